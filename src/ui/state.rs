//! Application state shared by the UI components

use crate::audio::{AudioParameters, Channel, PlaybackState};
use crate::integration::{AppMessage, Controller, Dispatch};
use crate::interview::InterviewMode;
use crate::messages::MessageStorage;
use crate::presentation::LayoutTemplate;

pub struct AppState {
    controller: Controller,
    /// Current text in the input field
    pub input_text: String,
}

impl AppState {
    pub fn new(controller: Controller) -> Self {
        Self {
            controller,
            input_text: String::new(),
        }
    }

    /// Apply pending worker events
    pub fn poll_events(&mut self) {
        self.controller.poll_events();
    }

    pub fn dispatch(&mut self, message: AppMessage) -> Dispatch {
        self.controller.dispatch(message)
    }

    /// Send the input text as an utterance; the field is cleared once accepted
    pub fn send_message(&mut self) {
        let text = self.input_text.trim().to_string();
        if self.controller.dispatch(AppMessage::UserUtterance(text)) == Dispatch::Handled {
            self.input_text.clear();
        }
    }

    pub fn can_send(&self) -> bool {
        !self.input_text.trim().is_empty() && !self.controller.is_waiting()
    }

    pub fn messages(&self) -> &MessageStorage {
        self.controller.transcript()
    }

    pub fn is_waiting(&self) -> bool {
        self.controller.is_waiting()
    }

    pub fn template(&self) -> Option<&LayoutTemplate> {
        self.controller.template()
    }

    pub fn layout_failed(&self) -> bool {
        self.controller.layout_failed()
    }

    pub fn parameters(&self, channel: Channel) -> Option<AudioParameters> {
        self.controller.engine().parameters(channel)
    }

    pub fn playback_state(&self, channel: Channel) -> PlaybackState {
        self.controller.engine().playback_state(channel)
    }

    /// Short description of where the session is
    pub fn status_text(&self) -> String {
        if self.controller.is_waiting() {
            return "Thinking...".to_string();
        }
        if let Some(error) = self.controller.last_error() {
            return error.to_string();
        }
        match (self.controller.mode(), self.controller.template()) {
            (None, _) => "Starting...".to_string(),
            (Some(_), Some(template)) => template.title.clone(),
            (Some(InterviewMode::Scripted), None) => "Scripted interview".to_string(),
            (Some(InterviewMode::Assisted), None) => "Assisted interview".to_string(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }
}
