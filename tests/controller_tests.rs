//! Controller behavior: dispatch, layout loading and audio routing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tinniease::audio::params::{MAX_FREQUENCY_HZ, MIN_FREQUENCY_HZ};
use tinniease::audio::{AudioEngine, Channel, Mixer, PlaybackState, Waveform};
use tinniease::integration::{AppMessage, Controller, Dispatch};
use tinniease::interview::{Ear, InterviewMode, InterviewPipeline, TinnitusType};
use tinniease::llm::{Classifier, ClassifierConfig, ConversationMessage};
use tinniease::messages::{MessageStorage, Sender};
use tinniease::presentation::{
    confirmation, BuiltinLayouts, Layout, LayoutId, LayoutLoader, LayoutTemplate,
};
use tinniease::{Result, TinnieaseError};
use tokio::sync::Notify;

const WAIT: Duration = Duration::from_secs(5);
const LAYOUT_ERROR: &str = "Sorry, there was an error loading the interface. Please try again.";

fn engine() -> AudioEngine {
    AudioEngine::new(Arc::new(Mixer::new(48_000)), 0.5)
}

fn start(pipeline: InterviewPipeline, loader: Box<dyn LayoutLoader>) -> Controller {
    let mut controller = Controller::start(pipeline, engine(), loader).unwrap();
    assert!(controller.wait_ready(WAIT), "worker never became ready");
    controller
}

fn scripted(loader: Box<dyn LayoutLoader>) -> Controller {
    let pipeline = InterviewPipeline::new(
        InterviewMode::Scripted,
        ClassifierConfig::default(),
        MessageStorage::new(),
    );
    start(pipeline, loader)
}

fn say(controller: &mut Controller, text: &str) {
    assert_eq!(
        controller.dispatch(AppMessage::UserUtterance(text.to_string())),
        Dispatch::Handled,
        "utterance {:?} rejected",
        text
    );
    assert!(controller.wait_idle(WAIT), "no reply to {:?}", text);
}

fn last_text(controller: &Controller) -> String {
    controller.transcript().last().map(|m| m.text).unwrap_or_default()
}

/// Fails the first `failures` loads
struct FlakyLoader {
    failures: usize,
    calls: Arc<AtomicUsize>,
}

impl LayoutLoader for FlakyLoader {
    fn load(&self, layout: &Layout) -> Result<LayoutTemplate> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(TinnieaseError::LayoutLoadFailure("template missing".into()));
        }
        BuiltinLayouts.load(layout)
    }
}

/// Replies only after being released
struct Gated {
    release: Arc<Notify>,
}

#[async_trait]
impl Classifier for Gated {
    async fn generate(&self, _prompt: &str, _history: &[ConversationMessage]) -> Result<String> {
        self.release.notified().await;
        Ok("Go on.".to_string())
    }
}

#[test]
fn test_binaural_session_drives_two_channels() {
    let mut controller = scripted(Box::new(BuiltinLayouts));
    for input in ["new", "Alice", "01/01/1990", "5551234", "2"] {
        say(&mut controller, input);
    }

    let layout = controller.layout().unwrap();
    assert_eq!(layout.id, LayoutId::Binaural);
    assert_eq!(
        controller.classification().unwrap().tinnitus_type,
        TinnitusType::BilateralAsymmetric
    );
    assert_eq!(last_text(&controller), confirmation(&layout));
    assert_eq!(controller.engine().armed_channels(), vec![Channel::Left, Channel::Right]);

    controller.dispatch(AppMessage::SetFrequency { channel: Channel::Left, hz: 440.0 });
    controller.dispatch(AppMessage::SetFrequency { channel: Channel::Right, hz: 880.0 });
    controller.dispatch(AppMessage::PlayRequested(Channel::Left));
    controller.dispatch(AppMessage::PlayRequested(Channel::Right));

    let engine = controller.engine();
    assert_eq!(engine.mixer().active_voices(), 2);
    let left = engine.live_voice(Channel::Left).unwrap();
    let right = engine.live_voice(Channel::Right).unwrap();
    assert_eq!(left.oscillator().frequency_hz(), 440.0);
    assert_eq!(right.oscillator().frequency_hz(), 880.0);

    controller.dispatch(AppMessage::StopRequested(Channel::Left));
    assert_eq!(controller.engine().playback_state(Channel::Left), PlaybackState::Idle);
    assert_eq!(controller.engine().playback_state(Channel::Right), PlaybackState::Playing);
}

#[test]
fn test_play_and_stop_are_idempotent() {
    let mut controller = scripted(Box::new(BuiltinLayouts));
    for input in ["existing", "5551234", "3", "right"] {
        say(&mut controller, input);
    }
    assert_eq!(controller.classification().unwrap().affected_ear, Some(Ear::Right));
    assert_eq!(controller.engine().armed_channels(), vec![Channel::Right]);

    controller.dispatch(AppMessage::PlayRequested(Channel::Right));
    let first = controller.engine().live_voice(Channel::Right).unwrap().id();
    controller.dispatch(AppMessage::PlayRequested(Channel::Right));
    assert_eq!(controller.engine().live_voice(Channel::Right).unwrap().id(), first);
    assert_eq!(controller.engine().mixer().connected(), 1);

    controller.dispatch(AppMessage::StopRequested(Channel::Right));
    controller.dispatch(AppMessage::StopRequested(Channel::Right));
    assert_eq!(controller.engine().playback_state(Channel::Right), PlaybackState::Idle);
    assert_eq!(controller.engine().mixer().active_voices(), 0);

    assert_eq!(
        controller.dispatch(AppMessage::PlayRequested(Channel::Left)),
        Dispatch::Ignored
    );
}

#[test]
fn test_parameter_bounds_and_waveform_timing() {
    let mut controller = scripted(Box::new(BuiltinLayouts));
    for input in ["existing", "5551234", "1"] {
        say(&mut controller, input);
    }

    let mono = Channel::Mono;
    controller.dispatch(AppMessage::SetFrequency { channel: mono, hz: 5.0 });
    assert_eq!(controller.engine().parameters(mono).unwrap().frequency_hz, MIN_FREQUENCY_HZ);
    controller.dispatch(AppMessage::SetFrequency { channel: mono, hz: 50_000.0 });
    assert_eq!(controller.engine().parameters(mono).unwrap().frequency_hz, MAX_FREQUENCY_HZ);
    controller.dispatch(AppMessage::SetFrequency { channel: mono, hz: f32::NAN });
    assert_eq!(controller.engine().parameters(mono).unwrap().frequency_hz, MAX_FREQUENCY_HZ);
    controller.dispatch(AppMessage::SetPhase { channel: mono, degrees: -10.0 });
    assert_eq!(controller.engine().parameters(mono).unwrap().phase_degrees, 350.0);

    controller.dispatch(AppMessage::PlayRequested(mono));
    controller.dispatch(AppMessage::SetWaveform { channel: mono, waveform: Waveform::Square });
    let voice = controller.engine().live_voice(mono).unwrap();
    assert_eq!(voice.oscillator().waveform(), Waveform::Sine);

    controller.dispatch(AppMessage::StopRequested(mono));
    controller.dispatch(AppMessage::PlayRequested(mono));
    let voice = controller.engine().live_voice(mono).unwrap();
    assert_eq!(voice.oscillator().waveform(), Waveform::Square);
}

#[test]
fn test_layout_failure_then_retry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let loader = FlakyLoader {
        failures: 1,
        calls: Arc::clone(&calls),
    };
    let mut controller = scripted(Box::new(loader));

    assert_eq!(controller.dispatch(AppMessage::RetryLayout), Dispatch::Ignored);

    for input in ["existing", "5551234", "1"] {
        say(&mut controller, input);
    }

    assert!(controller.layout_failed());
    assert!(controller.classification().is_some());
    assert!(controller.template().is_none());
    assert!(controller.engine().armed_channels().is_empty());
    assert_eq!(last_text(&controller), LAYOUT_ERROR);

    assert_eq!(controller.dispatch(AppMessage::RetryLayout), Dispatch::Handled);
    assert!(!controller.layout_failed());
    assert_eq!(controller.engine().armed_channels(), vec![Channel::Mono]);
    assert_eq!(last_text(&controller), confirmation(&controller.layout().unwrap()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    assert_eq!(controller.dispatch(AppMessage::RetryLayout), Dispatch::Ignored);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_utterances_dropped_while_reply_pending() {
    let release = Arc::new(Notify::new());
    let pipeline = InterviewPipeline::new(
        InterviewMode::Assisted,
        ClassifierConfig::default(),
        MessageStorage::new(),
    )
    .with_classifier(Arc::new(Gated {
        release: Arc::clone(&release),
    }));
    let mut controller = start(pipeline, Box::new(BuiltinLayouts));
    assert_eq!(controller.mode(), Some(InterviewMode::Assisted));

    assert_eq!(
        controller.dispatch(AppMessage::UserUtterance("It rings all day".into())),
        Dispatch::Handled
    );
    assert!(controller.is_waiting());
    assert_eq!(
        controller.dispatch(AppMessage::UserUtterance("Hello?".into())),
        Dispatch::Ignored
    );

    release.notify_one();
    assert!(controller.wait_idle(WAIT));

    let user_turns: Vec<String> = controller
        .transcript()
        .get_all()
        .into_iter()
        .filter(|m| m.sender == Sender::User)
        .map(|m| m.text)
        .collect();
    assert_eq!(user_turns, vec!["It rings all day".to_string()]);
    assert_eq!(last_text(&controller), "Go on.");
}

#[test]
fn test_input_after_classification_changes_nothing() {
    let mut controller = scripted(Box::new(BuiltinLayouts));
    for input in ["existing", "5551234", "1"] {
        say(&mut controller, input);
    }
    let before = controller.transcript().len();

    say(&mut controller, "2");
    assert_eq!(controller.transcript().len(), before);
    assert_eq!(controller.layout().unwrap().id, LayoutId::Mono);
}

#[cfg(not(feature = "local-llm"))]
#[test]
fn test_assisted_without_backend_falls_back() {
    let pipeline = InterviewPipeline::new(
        InterviewMode::Assisted,
        ClassifierConfig::new(""),
        MessageStorage::new(),
    );
    let controller = start(pipeline, Box::new(BuiltinLayouts));

    assert_eq!(controller.mode(), Some(InterviewMode::Scripted));
    assert!(controller.last_error().is_some());
}
