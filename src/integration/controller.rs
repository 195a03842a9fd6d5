//! Single dispatch point between the UI, the interview worker, the layout
//! selector and the audio engine

use crate::audio::{AudioEngine, Channel, ParameterUpdate, Waveform};
use crate::interview::{
    InterviewCommand, InterviewEvent, InterviewMode, InterviewPipeline, InterviewState,
    TinnitusProfile, UserProfile,
};
use crate::messages::{MessageStorage, Sender as Author};
use crate::presentation::{confirmation, select_layout, Layout, LayoutLoader, LayoutTemplate};
use crate::{Result, TinnieaseError};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Everything the UI can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// Text submitted from the chat input
    UserUtterance(String),

    SetFrequency { channel: Channel, hz: f32 },

    SetWaveform { channel: Channel, waveform: Waveform },

    SetPhase { channel: Channel, degrees: f32 },

    PlayRequested(Channel),

    StopRequested(Channel),

    /// Load the selected layout again after a failure
    RetryLayout,
}

/// What became of a dispatched message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Ignored,
}

pub struct Controller {
    transcript: MessageStorage,
    command_tx: Sender<InterviewCommand>,
    event_rx: Receiver<InterviewEvent>,
    worker: Option<JoinHandle<()>>,
    engine: AudioEngine,
    loader: Box<dyn LayoutLoader>,

    mode: Option<InterviewMode>,
    state: Option<InterviewState>,
    pending: Option<Uuid>,
    profile: Option<UserProfile>,
    classification: Option<TinnitusProfile>,
    layout: Option<Layout>,
    template: Option<LayoutTemplate>,
    last_error: Option<String>,
}

impl Controller {
    /// Start the interview worker and wire it to `engine` and `loader`
    pub fn start(
        pipeline: InterviewPipeline,
        engine: AudioEngine,
        loader: Box<dyn LayoutLoader>,
    ) -> Result<Self> {
        let transcript = pipeline.transcript();
        let command_tx = pipeline.command_sender();
        let event_rx = pipeline.event_receiver();
        let worker = pipeline.start_worker()?;

        Ok(Self {
            transcript,
            command_tx,
            event_rx,
            worker: Some(worker),
            engine,
            loader,
            mode: None,
            state: None,
            pending: None,
            profile: None,
            classification: None,
            layout: None,
            template: None,
            last_error: None,
        })
    }

    pub fn dispatch(&mut self, message: AppMessage) -> Dispatch {
        match message {
            AppMessage::UserUtterance(text) => self.submit(text),
            AppMessage::SetFrequency { channel, hz } => {
                self.audio(channel, |engine| {
                    engine.set_parameter(channel, ParameterUpdate::FrequencyHz(hz))
                })
            }
            AppMessage::SetWaveform { channel, waveform } => self.audio(channel, |engine| {
                engine.set_parameter(channel, ParameterUpdate::Waveform(waveform))
            }),
            AppMessage::SetPhase { channel, degrees } => self.audio(channel, |engine| {
                engine.set_parameter(channel, ParameterUpdate::PhaseDegrees(degrees))
            }),
            AppMessage::PlayRequested(channel) => self.audio(channel, |engine| engine.play(channel)),
            AppMessage::StopRequested(channel) => self.audio(channel, |engine| engine.stop(channel)),
            AppMessage::RetryLayout => match (self.layout, &self.template) {
                (Some(layout), None) => {
                    info!("Retrying layout {:?}", layout.id);
                    self.load_layout(layout);
                    Dispatch::Handled
                }
                _ => Dispatch::Ignored,
            },
        }
    }

    fn submit(&mut self, text: String) -> Dispatch {
        let text = text.trim();
        if text.is_empty() {
            return Dispatch::Ignored;
        }
        if let Some(id) = self.pending {
            debug!("Reply {} still pending, dropping input", id);
            return Dispatch::Ignored;
        }

        let request_id = Uuid::new_v4();
        let command = InterviewCommand::Submit {
            utterance: text.to_string(),
            request_id,
        };
        match self.command_tx.send(command) {
            Ok(()) => {
                self.pending = Some(request_id);
                Dispatch::Handled
            }
            Err(e) => {
                error!("Interview worker unreachable: {}", e);
                self.last_error = Some(TinnieaseError::ChannelError(e.to_string()).user_message());
                Dispatch::Ignored
            }
        }
    }

    fn audio(&mut self, channel: Channel, apply: impl FnOnce(&mut AudioEngine)) -> Dispatch {
        if self.template.is_none() || self.engine.parameters(channel).is_none() {
            debug!("No control for {:?} in the current layout", channel);
            return Dispatch::Ignored;
        }
        apply(&mut self.engine);
        Dispatch::Handled
    }

    /// Drain worker events without blocking; returns how many were handled
    pub fn poll_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.worker.is_some() {
                        warn!("Interview event channel disconnected");
                    }
                    break;
                }
            }
        }
        handled
    }

    /// Block until `done` holds or `timeout` elapses
    pub fn wait_until(&mut self, timeout: Duration, done: impl Fn(&Self) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        self.poll_events();
        while !done(self) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return done(self);
                }
            }
        }
        true
    }

    /// Wait for the greeting to be posted
    pub fn wait_ready(&mut self, timeout: Duration) -> bool {
        self.wait_until(timeout, |c| c.mode.is_some())
    }

    /// Wait for the pending reply, if any
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        self.wait_until(timeout, |c| c.pending.is_none())
    }

    fn handle_event(&mut self, event: InterviewEvent) {
        match event {
            InterviewEvent::Ready { mode } => {
                info!("Interview ready in {:?} mode", mode);
                self.mode = Some(mode);
            }
            InterviewEvent::Classified {
                result, profile, ..
            } => self.on_classified(result, profile),
            InterviewEvent::TurnComplete { request_id, turn } => {
                self.clear_pending(request_id);
                self.state = Some(turn.state);
            }
            InterviewEvent::Ignored { request_id } => self.clear_pending(request_id),
            InterviewEvent::Error { error } => {
                warn!("Interview worker error: {}", error);
                self.last_error = Some(error);
            }
            InterviewEvent::Shutdown => {
                debug!("Interview worker shut down");
                self.pending = None;
            }
        }
    }

    fn clear_pending(&mut self, request_id: Uuid) {
        if self.pending == Some(request_id) {
            self.pending = None;
        } else {
            debug!("Stale reply {}", request_id);
        }
    }

    fn on_classified(&mut self, result: TinnitusProfile, profile: UserProfile) {
        if self.layout.is_some() {
            warn!("Layout already selected, ignoring repeat classification");
            return;
        }

        match serde_json::to_string(&profile) {
            Ok(json) => info!("Collected profile: {}", json),
            Err(e) => warn!("Failed to serialize profile: {}", e),
        }

        let layout = select_layout(&result);
        info!("Selected layout {:?} for {:?}", layout, result);
        self.classification = Some(result);
        self.profile = Some(profile);
        self.layout = Some(layout);
        self.load_layout(layout);
    }

    fn load_layout(&mut self, layout: Layout) {
        match self.loader.load(&layout) {
            Ok(template) => {
                self.engine.arm(&layout.channels());
                self.transcript.append(Author::Assistant, confirmation(&layout));
                self.template = Some(template);
                self.last_error = None;
            }
            Err(e) => {
                error!("Failed to load layout {:?}: {}", layout.id, e);
                let failure = TinnieaseError::LayoutLoadFailure(e.to_string());
                self.transcript.append(Author::Assistant, failure.user_message());
                self.last_error = Some(failure.to_string());
            }
        }
    }

    pub fn transcript(&self) -> &MessageStorage {
        &self.transcript
    }

    /// Mode actually in use, once the worker has started
    pub fn mode(&self) -> Option<InterviewMode> {
        self.mode
    }

    pub fn interview_state(&self) -> Option<InterviewState> {
        self.state
    }

    /// Whether an utterance is waiting for its reply
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn classification(&self) -> Option<TinnitusProfile> {
        self.classification
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn layout(&self) -> Option<Layout> {
        self.layout
    }

    /// The loaded control template; `None` until a layout loads
    pub fn template(&self) -> Option<&LayoutTemplate> {
        self.template.as_ref()
    }

    /// A layout was selected but failed to load
    pub fn layout_failed(&self) -> bool {
        self.layout.is_some() && self.template.is_none()
    }

    pub fn engine(&self) -> &AudioEngine {
        &self.engine
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Stop every voice and the interview worker
    pub fn shutdown(&mut self) {
        self.engine.stop_all();
        let Some(worker) = self.worker.take() else {
            return;
        };
        if self.command_tx.send(InterviewCommand::Shutdown).is_ok() && worker.join().is_err() {
            warn!("Interview worker panicked");
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Mixer, PlaybackState};
    use crate::llm::ClassifierConfig;
    use crate::presentation::BuiltinLayouts;
    use std::sync::Arc;

    const WAIT: Duration = Duration::from_secs(5);

    fn controller() -> Controller {
        let pipeline = InterviewPipeline::new(
            InterviewMode::Scripted,
            ClassifierConfig::default(),
            MessageStorage::new(),
        );
        let engine = AudioEngine::new(Arc::new(Mixer::new(48_000)), 0.5);
        let mut controller = Controller::start(pipeline, engine, Box::new(BuiltinLayouts)).unwrap();
        assert!(controller.wait_ready(WAIT));
        controller
    }

    fn say(controller: &mut Controller, text: &str) {
        assert_eq!(
            controller.dispatch(AppMessage::UserUtterance(text.to_string())),
            Dispatch::Handled
        );
        assert!(controller.wait_idle(WAIT));
    }

    #[test]
    fn test_greeting_posted() {
        let controller = controller();
        assert_eq!(controller.mode(), Some(InterviewMode::Scripted));
        assert_eq!(controller.transcript().len(), 1);
        assert!(controller.template().is_none());
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut controller = controller();
        assert_eq!(
            controller.dispatch(AppMessage::UserUtterance("   ".into())),
            Dispatch::Ignored
        );
        assert!(!controller.is_waiting());
    }

    #[test]
    fn test_audio_ignored_before_layout() {
        let mut controller = controller();
        assert_eq!(
            controller.dispatch(AppMessage::PlayRequested(Channel::Mono)),
            Dispatch::Ignored
        );
        assert_eq!(controller.engine().mixer().active_voices(), 0);
    }

    #[test]
    fn test_symmetric_interview_arms_mono() {
        let mut controller = controller();
        for text in ["existing", "5551234", "1"] {
            say(&mut controller, text);
        }

        assert_eq!(controller.interview_state(), Some(InterviewState::Classified));
        assert_eq!(controller.engine().armed_channels(), vec![Channel::Mono]);
        assert!(controller.profile().is_some());

        assert_eq!(
            controller.dispatch(AppMessage::PlayRequested(Channel::Mono)),
            Dispatch::Handled
        );
        assert_eq!(controller.engine().playback_state(Channel::Mono), PlaybackState::Playing);
        assert_eq!(
            controller.dispatch(AppMessage::PlayRequested(Channel::Left)),
            Dispatch::Ignored
        );

        controller.shutdown();
        assert_eq!(controller.engine().mixer().active_voices(), 0);
    }
}
