//! Main application struct and eframe integration

use crate::ui::components::{ControlPanel, InputBar, MessageList};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::time::Duration;

pub struct TinnieaseApp {
    state: AppState,
    theme: Theme,
}

impl TinnieaseApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);
        Self { state, theme }
    }

    /// Draw one frame; shared by eframe and the UI tests
    pub fn ui(state: &mut AppState, theme: &Theme, ctx: &egui::Context) {
        state.poll_events();

        Self::show_header(state, theme, ctx);

        if state.template().is_some() || state.layout_failed() {
            SidePanel::right("controls")
                .resizable(true)
                .default_width(340.0)
                .min_width(280.0)
                .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("controls_scroll")
                        .show(ui, |ui| ControlPanel::new(state, theme).show(ui));
                });
        }

        TopBottomPanel::bottom("input_area")
            .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
            .show(ctx, |ui| InputBar::new(state, theme).show(ui));

        CentralPanel::default()
            .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing_sm))
            .show(ctx, |ui| MessageList::new(state, theme).show(ui));

        // Worker replies arrive off the UI thread
        if state.is_waiting() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn show_header(state: &AppState, theme: &Theme, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Tinniease")
                            .size(20.0)
                            .strong()
                            .color(theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Tinnitus relief assistant")
                            .size(14.0)
                            .color(theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(state.status_text())
                                .size(12.0)
                                .color(theme.text_secondary),
                        );
                    });
                });
            });
    }
}

impl eframe::App for TinnieaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        Self::ui(&mut self.state, &self.theme, ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
    }
}
