//! Oscillator and gain stage making up one voice

use crate::audio::params::{AudioParameters, Channel, Waveform};
use crate::{Result, TinnieaseError};
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use uuid::Uuid;

/// f32 stored as bits so the audio callback never takes a lock for it
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

const CREATED: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// Periodic signal generator
///
/// Frequency and phase can be retuned while running. The waveform is fixed
/// at construction, and once stopped an oscillator cannot be started again.
#[derive(Debug)]
pub struct Oscillator {
    waveform: Waveform,
    frequency_hz: AtomicF32,
    phase_radians: AtomicF32,
    /// Position in the current cycle, [0, 1)
    cycle: AtomicF32,
    state: AtomicU8,
}

impl Oscillator {
    pub fn new(params: &AudioParameters) -> Self {
        Self {
            waveform: params.waveform,
            frequency_hz: AtomicF32::new(params.frequency_hz),
            phase_radians: AtomicF32::new(params.phase_radians()),
            cycle: AtomicF32::new(0.0),
            state: AtomicU8::new(CREATED),
        }
    }

    pub fn start(&self) -> Result<()> {
        self.state
            .compare_exchange(CREATED, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| {
                TinnieaseError::AudioProcessingError("oscillator can only be started once".to_string())
            })
    }

    pub fn stop(&self) {
        self.state.store(STOPPED, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::SeqCst) == RUNNING
    }

    pub fn is_stopped(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STOPPED
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz.load()
    }

    pub fn set_frequency_hz(&self, hz: f32) {
        self.frequency_hz.store(hz);
    }

    pub fn phase_radians(&self) -> f32 {
        self.phase_radians.load()
    }

    pub fn set_phase_radians(&self, radians: f32) {
        self.phase_radians.store(radians);
    }

    /// Produce the next sample and advance; silent unless running
    pub fn next_sample(&self, sample_rate: f32) -> f32 {
        if !self.is_running() {
            return 0.0;
        }

        let cycle = self.cycle.load();
        let offset = self.phase_radians() / std::f32::consts::TAU;
        let value = self.waveform.sample((cycle + offset).rem_euclid(1.0));

        self.cycle.store((cycle + self.frequency_hz() / sample_rate).fract());
        value
    }
}

/// Output level applied after the oscillator
#[derive(Debug)]
pub struct GainStage {
    level: AtomicF32,
}

impl GainStage {
    pub fn new(level: f32) -> Self {
        Self {
            level: AtomicF32::new(level.clamp(0.0, 1.0)),
        }
    }

    pub fn level(&self) -> f32 {
        self.level.load()
    }

    pub fn set_level(&self, level: f32) {
        self.level.store(level.clamp(0.0, 1.0));
    }

    pub fn apply(&self, sample: f32) -> f32 {
        sample * self.level()
    }
}

/// Oscillator -> gain pair routed to one channel
#[derive(Debug)]
pub struct Voice {
    id: Uuid,
    channel: Channel,
    oscillator: Oscillator,
    gain: GainStage,
}

impl Voice {
    pub fn new(channel: Channel, params: &AudioParameters, gain: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
            oscillator: Oscillator::new(params),
            gain: GainStage::new(gain),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub fn gain(&self) -> &GainStage {
        &self.gain
    }

    pub fn next_sample(&self, sample_rate: f32) -> f32 {
        self.gain.apply(self.oscillator.next_sample(sample_rate))
    }
}
