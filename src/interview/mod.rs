//! Interview engine
//!
//! Drives the slot-filling dialogue that classifies a user's tinnitus and
//! emits a [`TinnitusProfile`] exactly once per session.

pub mod assisted;
pub mod inference;
pub mod pipeline;
pub mod profile;
pub mod scripted;
pub mod session;
pub mod state;
pub mod strategy;

pub use assisted::AssistedStrategy;
pub use inference::infer_type;
pub use pipeline::{InterviewCommand, InterviewEvent, InterviewPipeline};
pub use profile::{Ear, TinnitusProfile, TinnitusType, UserProfile};
pub use scripted::ScriptedStrategy;
pub use session::{InterviewSession, Turn};
pub use state::InterviewState;
pub use strategy::{InterviewMode, InterviewStrategy, Step};
