//! Message list component
//!
//! Displays the interview transcript as chat bubbles.

use crate::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

pub struct MessageList<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let messages = self.state.messages().get_all();

        egui::ScrollArea::vertical()
            .id_salt("transcript")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    for message in &messages {
                        self.show_message(ui, message);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    if self.state.is_waiting() {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new("Thinking...").color(self.theme.text_muted));
                        });
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = message.is_user();
        let (bubble_color, text_color) = if is_user {
            (self.theme.user_bubble, Color32::WHITE)
        } else {
            (self.theme.assistant_bubble, self.theme.text_primary)
        };
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(
                RichText::new(message.sender.label())
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    let response = ui.label(RichText::new(&message.text).color(text_color));
                    let accessible = if is_user {
                        format!("User message: {}", message.text)
                    } else {
                        format!("Assistant response: {}", message.text)
                    };
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &accessible)
                    });
                });

            ui.label(
                RichText::new(message.timestamp.format("%H:%M").to_string())
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }
}
