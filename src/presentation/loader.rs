//! Control templates for each layout

use crate::audio::Channel;
use crate::presentation::layout::{Layout, LayoutId};
use crate::Result;

/// Widget ids of one control group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlIds {
    pub frequency: String,
    pub wave_type: String,
    pub phase: String,
    pub play_button: String,
    pub stop_button: String,
    pub frequency_value: String,
    pub phase_value: String,
}

impl ControlIds {
    fn with_suffix(suffix: &str) -> Self {
        let id = |base: &str| format!("{}{}", base, suffix);
        Self {
            frequency: id("frequency"),
            wave_type: id("wave-type"),
            phase: id("phase"),
            play_button: id("play-button"),
            stop_button: id("stop-button"),
            frequency_value: id("frequency-value"),
            phase_value: id("phase-value"),
        }
    }
}

/// Frequency, waveform and phase controls bound to one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlGroup {
    pub channel: Channel,
    pub label: String,
    pub ids: ControlIds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTemplate {
    pub layout: Layout,
    pub title: String,
    pub description: String,
    pub groups: Vec<ControlGroup>,
}

/// Source of layout templates
pub trait LayoutLoader: Send {
    fn load(&self, layout: &Layout) -> Result<LayoutTemplate>;
}

/// Templates compiled into the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLayouts;

impl LayoutLoader for BuiltinLayouts {
    fn load(&self, layout: &Layout) -> Result<LayoutTemplate> {
        let description = match layout.id {
            LayoutId::Mono => {
                "Adjust the frequency, wave type, and phase of the tone played in both ears.".to_string()
            }
            LayoutId::Binaural => {
                "Adjust the frequency and wave type for each ear independently.".to_string()
            }
            LayoutId::Uni => format!(
                "Adjust the frequency, wave type, and phase for your {} ear.",
                layout.ear.map(|e| e.as_str()).unwrap_or("affected")
            ),
        };

        let binaural = layout.id == LayoutId::Binaural;
        let groups = layout
            .channels()
            .into_iter()
            .map(|channel| {
                let suffix = match (binaural, channel) {
                    (true, Channel::Left) => "-left",
                    (true, Channel::Right) => "-right",
                    _ => "",
                };
                ControlGroup {
                    channel,
                    label: channel.label().to_string(),
                    ids: ControlIds::with_suffix(suffix),
                }
            })
            .collect();

        Ok(LayoutTemplate {
            layout: *layout,
            title: "Audio Therapy Controls".to_string(),
            description,
            groups,
        })
    }
}
