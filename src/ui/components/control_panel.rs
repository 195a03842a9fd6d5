//! Audio therapy controls for the loaded layout
//!
//! Every widget interaction becomes an [`AppMessage`]; the panel holds no
//! tone state of its own and reads parameters back from the engine.

use crate::audio::params::{MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ};
use crate::audio::{AudioParameters, PlaybackState, Waveform};
use crate::integration::AppMessage;
use crate::presentation::ControlGroup;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2, WidgetInfo, WidgetType};

pub struct ControlPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ControlPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        if self.state.layout_failed() {
            self.show_retry(ui);
            return;
        }

        let Some(template) = self.state.template().cloned() else {
            ui.label(
                RichText::new("Controls appear once the interview is complete.")
                    .color(self.theme.text_muted),
            );
            return;
        };

        ui.heading(RichText::new(&template.title).color(self.theme.text_primary));
        ui.label(RichText::new(&template.description).color(self.theme.text_secondary));
        ui.add_space(self.theme.spacing);

        let mut requests = Vec::new();
        for group in &template.groups {
            let Some(params) = self.state.parameters(group.channel) else {
                continue;
            };
            let playing = self.state.playback_state(group.channel) == PlaybackState::Playing;
            self.show_group(ui, group, params, playing, &mut requests);
            ui.add_space(self.theme.spacing_sm);
        }

        for request in requests {
            self.state.dispatch(request);
        }
    }

    fn show_retry(self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("The controls could not be loaded.").color(self.theme.error),
        );
        let response = ui.button("Retry");
        response.widget_info(|| {
            WidgetInfo::labeled(WidgetType::Button, true, "Retry loading controls")
        });
        if response.clicked() {
            self.state.dispatch(AppMessage::RetryLayout);
        }
    }

    fn show_group(
        &self,
        ui: &mut egui::Ui,
        group: &ControlGroup,
        params: AudioParameters,
        playing: bool,
        requests: &mut Vec<AppMessage>,
    ) {
        let channel = group.channel;
        let ids = &group.ids;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&group.label).strong().color(self.theme.text_primary));
                    let (text, color) = if playing {
                        ("Playing", self.theme.success)
                    } else {
                        ("Stopped", self.theme.text_muted)
                    };
                    ui.label(RichText::new(text).size(12.0).color(color));
                });

                ui.label("Frequency (Hz):");
                ui.horizontal(|ui| {
                    let mut hz = params.frequency_hz;
                    let response = ui.add(
                        egui::Slider::new(&mut hz, MIN_FREQUENCY_HZ..=MAX_FREQUENCY_HZ)
                            .logarithmic(true)
                            .show_value(false),
                    );
                    response.widget_info(|| WidgetInfo::labeled(WidgetType::Slider, true, &ids.frequency));
                    if response.changed() {
                        requests.push(AppMessage::SetFrequency { channel, hz });
                    }

                    let value = ui.label(format!("{:.0} Hz", params.frequency_hz));
                    value.widget_info(|| {
                        WidgetInfo::labeled(
                            WidgetType::Label,
                            true,
                            format!("{}: {:.0} Hz", ids.frequency_value, params.frequency_hz),
                        )
                    });
                });

                ui.label("Wave Type:");
                let mut waveform = params.waveform;
                egui::ComboBox::from_id_salt(&ids.wave_type)
                    .selected_text(waveform.to_string())
                    .show_ui(ui, |ui| {
                        for candidate in Waveform::ALL {
                            ui.selectable_value(&mut waveform, candidate, candidate.to_string());
                        }
                    });
                if waveform != params.waveform {
                    requests.push(AppMessage::SetWaveform { channel, waveform });
                }

                ui.label("Phase (degrees):");
                ui.horizontal(|ui| {
                    let mut degrees = params.phase_degrees;
                    let response = ui.add(egui::Slider::new(&mut degrees, 0.0..=359.0).show_value(false));
                    response.widget_info(|| WidgetInfo::labeled(WidgetType::Slider, true, &ids.phase));
                    if response.changed() {
                        requests.push(AppMessage::SetPhase { channel, degrees });
                    }

                    let value = ui.label(format!("{:.0}°", params.phase_degrees));
                    value.widget_info(|| {
                        WidgetInfo::labeled(
                            WidgetType::Label,
                            true,
                            format!("{}: {:.0}°", ids.phase_value, params.phase_degrees),
                        )
                    });
                });

                ui.add_space(self.theme.spacing_sm);
                ui.horizontal(|ui| {
                    let play = ui.add(
                        egui::Button::new("Play")
                            .min_size(Vec2::new(64.0, 32.0))
                            .rounding(self.theme.button_rounding)
                            .fill(self.theme.primary),
                    );
                    play.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, &ids.play_button));
                    if play.clicked() {
                        requests.push(AppMessage::PlayRequested(channel));
                    }

                    let stop = ui.add(
                        egui::Button::new("Stop")
                            .min_size(Vec2::new(64.0, 32.0))
                            .rounding(self.theme.button_rounding),
                    );
                    stop.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, &ids.stop_button));
                    if stop.clicked() {
                        requests.push(AppMessage::StopRequested(channel));
                    }
                });
            });
    }
}
