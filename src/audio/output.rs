use crate::audio::mixer::Mixer;
use crate::{Result, TinnieaseError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Default output device pulling frames from a [`Mixer`]
pub struct AudioOutput {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
}

impl AudioOutput {
    /// Create a new audio output with the default output device
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| TinnieaseError::AudioDeviceError("No output device available".into()))?;

        info!("Using output device: {}", device.name().unwrap_or_else(|_| "Unknown".to_string()));

        let config = device
            .default_output_config()
            .map_err(|e| TinnieaseError::AudioDeviceError(format!("Failed to get output config: {}", e)))?
            .into();

        Ok(Self {
            device,
            config,
            stream: None,
        })
    }

    /// Get the sample rate of the output device
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Get the number of channels
    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    /// Start the device stream, rendering from `mixer`
    pub fn start(&mut self, mixer: Arc<Mixer>) -> Result<()> {
        if self.stream.is_some() {
            warn!("Output stream already running");
            return Ok(());
        }

        if mixer.sample_rate() != self.sample_rate() {
            warn!(
                "Mixer runs at {} Hz but device expects {} Hz",
                mixer.sample_rate(),
                self.sample_rate()
            );
        }

        let channels = self.config.channels as usize;

        let err_fn = |err| {
            error!("Audio output stream error: {}", err);
        };

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    mixer.render(data, channels);
                },
                err_fn,
                None,
            )
            .map_err(|e| TinnieaseError::AudioDeviceError(format!("Failed to build output stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| TinnieaseError::AudioDeviceError(format!("Failed to start output stream: {}", e)))?;

        self.stream = Some(stream);

        info!("Started audio output");
        Ok(())
    }

    /// Stop the device stream
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            drop(stream);
            info!("Stopped audio output");
        }
    }

    /// Check if the device stream is running
    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for AudioOutput {
    fn drop(&mut self) {
        self.stop();
    }
}
