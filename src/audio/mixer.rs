//! Output sink shared between the engine and the device callback

use crate::audio::params::Channel;
use crate::audio::voice::Voice;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Sums connected voices into interleaved output frames
pub struct Mixer {
    sample_rate: u32,
    voices: Mutex<Vec<Arc<Voice>>>,
}

impl Mixer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            voices: Mutex::new(Vec::new()),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn connect(&self, voice: Arc<Voice>) {
        debug!("Connecting voice {} on {:?}", voice.id(), voice.channel());
        self.voices.lock().push(voice);
    }

    /// Remove a voice; returns whether it was connected
    pub fn disconnect(&self, id: Uuid) -> bool {
        let mut voices = self.voices.lock();
        let before = voices.len();
        voices.retain(|v| v.id() != id);
        before != voices.len()
    }

    /// Number of connected voices whose oscillator is running
    pub fn active_voices(&self) -> usize {
        self.voices
            .lock()
            .iter()
            .filter(|v| v.oscillator().is_running())
            .count()
    }

    pub fn active_on(&self, channel: Channel) -> usize {
        self.voices
            .lock()
            .iter()
            .filter(|v| v.channel() == channel && v.oscillator().is_running())
            .count()
    }

    pub fn connected(&self) -> usize {
        self.voices.lock().len()
    }

    /// Fill `data` with interleaved frames of `channels` samples each
    ///
    /// Mono voices feed both sides; a one-channel device gets the average
    /// of left and right.
    pub fn render(&self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }

        let voices = self.voices.lock();
        let sample_rate = self.sample_rate as f32;

        for frame in data.chunks_mut(channels) {
            let (mut left, mut right) = (0.0f32, 0.0f32);

            for voice in voices.iter() {
                let sample = voice.next_sample(sample_rate);
                match voice.channel() {
                    Channel::Mono => {
                        left += sample;
                        right += sample;
                    }
                    Channel::Left => left += sample,
                    Channel::Right => right += sample,
                }
            }

            if frame.len() == 1 {
                frame[0] = ((left + right) * 0.5).clamp(-1.0, 1.0);
            } else {
                frame.fill(0.0);
                frame[0] = left.clamp(-1.0, 1.0);
                frame[1] = right.clamp(-1.0, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::params::{AudioParameters, Waveform};

    fn square_voice(channel: Channel) -> Arc<Voice> {
        let voice = Arc::new(Voice::new(
            channel,
            &AudioParameters {
                waveform: Waveform::Square,
                ..Default::default()
            },
            0.5,
        ));
        voice.oscillator().start().unwrap();
        voice
    }

    #[test]
    fn test_silence_without_voices() {
        let mixer = Mixer::new(48_000);
        let mut data = vec![1.0f32; 8];
        mixer.render(&mut data, 2);
        assert!(data.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_channel_routing() {
        let mixer = Mixer::new(48_000);
        mixer.connect(square_voice(Channel::Left));

        let mut data = vec![0.0f32; 4];
        mixer.render(&mut data, 2);
        assert_eq!(data[0], 0.5);
        assert_eq!(data[1], 0.0);

        mixer.connect(square_voice(Channel::Mono));
        mixer.render(&mut data, 2);
        assert_eq!(data[0], 1.0);
        assert_eq!(data[1], 0.5);
    }

    #[test]
    fn test_mono_device_downmix() {
        let mixer = Mixer::new(48_000);
        mixer.connect(square_voice(Channel::Right));

        let mut data = vec![0.0f32; 3];
        mixer.render(&mut data, 1);
        assert!(data.iter().all(|s| *s == 0.25));
    }

    #[test]
    fn test_disconnect() {
        let mixer = Mixer::new(48_000);
        let voice = square_voice(Channel::Mono);
        mixer.connect(voice.clone());
        assert_eq!(mixer.active_on(Channel::Mono), 1);

        assert!(mixer.disconnect(voice.id()));
        assert!(!mixer.disconnect(voice.id()));
        assert_eq!(mixer.connected(), 0);
    }
}
