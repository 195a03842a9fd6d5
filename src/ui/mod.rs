//! GUI implementation with egui/eframe
//!
//! A chat panel for the interview and, once a layout is loaded, a side panel
//! with the audio therapy controls.

mod app;
mod components;
mod state;
mod theme;

pub use app::TinnieaseApp;
pub use components::{ControlPanel, InputBar, MessageList};
pub use state::AppState;
pub use theme::Theme;

/// Run the Tinniease application
pub fn run(state: AppState) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([700.0, 450.0])
            .with_title("Tinniease"),
        ..Default::default()
    };

    eframe::run_native(
        "Tinniease",
        options,
        Box::new(move |cc| Ok(Box::new(TinnieaseApp::new(cc, state)))),
    )
}
