//! Tone parameters and their bounds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_FREQUENCY_HZ: f32 = 20.0;
pub const MAX_FREQUENCY_HZ: f32 = 20_000.0;
pub const DEFAULT_FREQUENCY_HZ: f32 = 1000.0;

/// One oscillator + gain path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Rendered to both sides
    Mono,
    Left,
    Right,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Mono => "Both ears",
            Channel::Left => "Left ear",
            Channel::Right => "Right ear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Value of the waveform at `cycle` (fraction of a period in [0, 1))
    ///
    /// Every shape starts at zero and rises, like a sine.
    pub fn sample(&self, cycle: f32) -> f32 {
        match self {
            Waveform::Sine => (cycle * std::f32::consts::TAU).sin(),
            Waveform::Square => {
                if cycle < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (cycle + 0.5).fract() - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * ((cycle + 0.25).fract() - 0.5).abs(),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Triangle => "Triangle",
        };
        f.write_str(name)
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown waveform: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// A single field change requested by a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterUpdate {
    FrequencyHz(f32),
    Waveform(Waveform),
    PhaseDegrees(f32),
}

/// Tone settings for one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioParameters {
    /// Always within [20, 20000]
    pub frequency_hz: f32,
    pub waveform: Waveform,
    /// Always within [0, 360)
    pub phase_degrees: f32,
}

impl Default for AudioParameters {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            waveform: Waveform::Sine,
            phase_degrees: 0.0,
        }
    }
}

impl AudioParameters {
    pub fn phase_radians(&self) -> f32 {
        self.phase_degrees.to_radians()
    }
}

pub fn clamp_frequency(hz: f32) -> f32 {
    hz.clamp(MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
}

/// Wrap any angle into [0, 360)
pub fn normalize_phase(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
