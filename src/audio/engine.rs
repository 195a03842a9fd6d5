//! Audio engine: per-channel parameters and idempotent play/stop

use crate::audio::mixer::Mixer;
use crate::audio::params::{
    clamp_frequency, normalize_phase, AudioParameters, Channel, ParameterUpdate, PlaybackState,
};
use crate::audio::voice::Voice;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

struct ChannelSlot {
    params: AudioParameters,
    voice: Option<Arc<Voice>>,
}

impl ChannelSlot {
    fn new() -> Self {
        Self {
            params: AudioParameters::default(),
            voice: None,
        }
    }

    fn state(&self) -> PlaybackState {
        if self.voice.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }
}

/// Owns the live voices; at most one per channel
///
/// Operations never fail: out-of-range values are clamped and requests for
/// channels that are not armed are ignored.
pub struct AudioEngine {
    mixer: Arc<Mixer>,
    gain: f32,
    slots: BTreeMap<Channel, ChannelSlot>,
}

impl AudioEngine {
    pub fn new(mixer: Arc<Mixer>, gain: f32) -> Self {
        Self {
            mixer,
            gain,
            slots: BTreeMap::new(),
        }
    }

    /// Replace the channel set; anything playing is stopped first
    pub fn arm(&mut self, channels: &[Channel]) {
        self.stop_all();
        self.slots = channels.iter().map(|c| (*c, ChannelSlot::new())).collect();
        info!("Audio engine armed with {:?}", channels);
    }

    pub fn armed_channels(&self) -> Vec<Channel> {
        self.slots.keys().copied().collect()
    }

    pub fn parameters(&self, channel: Channel) -> Option<AudioParameters> {
        self.slots.get(&channel).map(|s| s.params)
    }

    pub fn playback_state(&self, channel: Channel) -> PlaybackState {
        self.slots
            .get(&channel)
            .map(ChannelSlot::state)
            .unwrap_or(PlaybackState::Idle)
    }

    /// The voice currently sounding on `channel`
    pub fn live_voice(&self, channel: Channel) -> Option<Arc<Voice>> {
        self.slots.get(&channel).and_then(|s| s.voice.clone())
    }

    pub fn set_parameter(&mut self, channel: Channel, update: ParameterUpdate) {
        let Some(slot) = self.slots.get_mut(&channel) else {
            warn!("Ignoring {:?} for unarmed channel {:?}", update, channel);
            return;
        };

        match update {
            ParameterUpdate::FrequencyHz(hz) => {
                if !hz.is_finite() {
                    warn!("Ignoring non-finite frequency {}", hz);
                    return;
                }
                slot.params.frequency_hz = clamp_frequency(hz);
                if let Some(voice) = &slot.voice {
                    voice.oscillator().set_frequency_hz(slot.params.frequency_hz);
                }
            }
            ParameterUpdate::PhaseDegrees(degrees) => {
                if !degrees.is_finite() {
                    warn!("Ignoring non-finite phase {}", degrees);
                    return;
                }
                slot.params.phase_degrees = normalize_phase(degrees);
                if let Some(voice) = &slot.voice {
                    voice.oscillator().set_phase_radians(slot.params.phase_radians());
                }
            }
            ParameterUpdate::Waveform(waveform) => {
                // Takes effect on the next play
                slot.params.waveform = waveform;
            }
        }
    }

    pub fn play(&mut self, channel: Channel) {
        let Some(slot) = self.slots.get_mut(&channel) else {
            warn!("Ignoring play for unarmed channel {:?}", channel);
            return;
        };
        if slot.voice.is_some() {
            debug!("{:?} already playing", channel);
            return;
        }

        let voice = Arc::new(Voice::new(channel, &slot.params, self.gain));
        self.mixer.connect(Arc::clone(&voice));
        if let Err(e) = voice.oscillator().start() {
            warn!("Failed to start voice on {:?}: {}", channel, e);
            self.mixer.disconnect(voice.id());
            return;
        }

        info!(
            "Playing {:?}: {} Hz {} {} deg",
            channel, slot.params.frequency_hz, slot.params.waveform, slot.params.phase_degrees
        );
        slot.voice = Some(voice);
    }

    pub fn stop(&mut self, channel: Channel) {
        let Some(voice) = self.slots.get_mut(&channel).and_then(|s| s.voice.take()) else {
            debug!("{:?} already idle", channel);
            return;
        };

        voice.oscillator().stop();
        self.mixer.disconnect(voice.id());
        info!("Stopped {:?}", channel);
    }

    pub fn stop_all(&mut self) {
        let playing: Vec<Channel> = self
            .slots
            .iter()
            .filter(|(_, s)| s.voice.is_some())
            .map(|(c, _)| *c)
            .collect();
        for channel in playing {
            self.stop(channel);
        }
    }

    pub fn mixer(&self) -> &Arc<Mixer> {
        &self.mixer
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.stop_all();
    }
}
