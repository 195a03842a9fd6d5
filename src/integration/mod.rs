//! Integration layer connecting the interview, layout selection and audio
//!
//! The [`Controller`] is the only place UI requests are applied.

pub mod config;
pub mod controller;

pub use config::{AppConfig, AudioConfig};
pub use controller::{AppMessage, Controller, Dispatch};
