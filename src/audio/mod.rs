//! Tone generation
//!
//! [`AudioEngine`] owns per-channel parameters and voices, [`Mixer`] is the
//! output sink they are connected to, and [`AudioOutput`] feeds the mixer to
//! the default device.

pub mod engine;
pub mod mixer;
#[cfg(feature = "audio-io")]
pub mod output;
pub mod params;
pub mod voice;

pub use engine::AudioEngine;
pub use mixer::Mixer;
#[cfg(feature = "audio-io")]
pub use output::AudioOutput;
pub use params::{AudioParameters, Channel, ParameterUpdate, PlaybackState, Waveform};
pub use voice::{GainStage, Oscillator, Voice};
