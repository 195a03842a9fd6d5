//! Interview worker with channel-based communication
//!
//! The session runs on its own thread with a tokio runtime so classifier
//! calls never block the UI. Commands are handled strictly one at a time.

use crate::interview::assisted::AssistedStrategy;
use crate::interview::profile::{TinnitusProfile, UserProfile};
use crate::interview::scripted::ScriptedStrategy;
use crate::interview::session::{InterviewSession, Turn};
use crate::interview::strategy::{InterviewMode, InterviewStrategy};
use crate::llm::{Classifier, ClassifierConfig};
use crate::messages::MessageStorage;
use crate::{Result, TinnieaseError};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Commands that can be sent to the interview worker
#[derive(Debug, Clone)]
pub enum InterviewCommand {
    /// Submit a user utterance
    Submit {
        utterance: String,
        request_id: Uuid,
    },

    /// Shutdown the worker
    Shutdown,
}

/// Events emitted by the interview worker
#[derive(Debug, Clone)]
pub enum InterviewEvent {
    /// Session started and greeting posted
    Ready { mode: InterviewMode },

    /// Classification completed; sent before the matching `TurnComplete`
    Classified {
        request_id: Uuid,
        result: TinnitusProfile,
        profile: UserProfile,
    },

    /// The utterance was handled
    TurnComplete { request_id: Uuid, turn: Turn },

    /// The utterance was ignored (blank, or session already classified)
    Ignored { request_id: Uuid },

    /// A recoverable problem occurred
    Error { error: String },

    /// Worker has shut down
    Shutdown,
}

/// Interview pipeline owning the command and event channels
pub struct InterviewPipeline {
    mode: InterviewMode,
    config: ClassifierConfig,
    classifier: Option<Arc<dyn Classifier>>,
    transcript: MessageStorage,
    command_tx: Sender<InterviewCommand>,
    command_rx: Receiver<InterviewCommand>,
    event_tx: Sender<InterviewEvent>,
    event_rx: Receiver<InterviewEvent>,
}

impl InterviewPipeline {
    /// Create a pipeline that will post to `transcript`
    pub fn new(mode: InterviewMode, config: ClassifierConfig, transcript: MessageStorage) -> Self {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = bounded(64);

        Self {
            mode,
            config,
            classifier: None,
            transcript,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Use `classifier` instead of loading the local model
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<InterviewCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<InterviewEvent> {
        self.event_rx.clone()
    }

    /// The transcript the worker posts to
    pub fn transcript(&self) -> MessageStorage {
        self.transcript.clone()
    }

    /// Start the worker thread
    pub fn start_worker(self) -> Result<JoinHandle<()>> {
        let Self {
            mode,
            config,
            classifier,
            transcript,
            command_rx,
            event_tx,
            ..
        } = self;

        std::thread::Builder::new()
            .name("interview".to_string())
            .spawn(move || run_worker(mode, config, classifier, transcript, command_rx, event_tx))
            .map_err(|e| TinnieaseError::ChannelError(format!("Failed to spawn interview worker: {}", e)))
    }
}

fn run_worker(
    mode: InterviewMode,
    config: ClassifierConfig,
    classifier: Option<Arc<dyn Classifier>>,
    transcript: MessageStorage,
    command_rx: Receiver<InterviewCommand>,
    event_tx: Sender<InterviewEvent>,
) {
    info!("Interview worker starting");

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            let _ = event_tx.send(InterviewEvent::Error {
                error: format!("Runtime creation failed: {}", e),
            });
            let _ = event_tx.send(InterviewEvent::Shutdown);
            return;
        }
    };

    let (strategy, mode) = build_strategy(mode, config, classifier, &runtime, &event_tx);
    let mut session = InterviewSession::begin(strategy, transcript);
    let _ = event_tx.send(InterviewEvent::Ready { mode });

    loop {
        match command_rx.recv() {
            Ok(InterviewCommand::Submit {
                utterance,
                request_id,
            }) => {
                debug!("Processing utterance: {}", request_id);

                match runtime.block_on(session.submit(&utterance)) {
                    Some(turn) => {
                        if let Some(result) = turn.classification {
                            let _ = event_tx.send(InterviewEvent::Classified {
                                request_id,
                                result,
                                profile: session.profile().clone(),
                            });
                        }
                        let _ = event_tx.send(InterviewEvent::TurnComplete { request_id, turn });
                    }
                    None => {
                        let _ = event_tx.send(InterviewEvent::Ignored { request_id });
                    }
                }
            }

            Ok(InterviewCommand::Shutdown) => {
                info!("Interview worker shutting down");
                let _ = event_tx.send(InterviewEvent::Shutdown);
                break;
            }

            Err(e) => {
                error!("Command channel error: {}", e);
                break;
            }
        }
    }

    info!("Interview worker stopped");
}

/// Pick the session strategy; assisted mode falls back to scripted when no
/// classifier can be obtained
fn build_strategy(
    mode: InterviewMode,
    config: ClassifierConfig,
    classifier: Option<Arc<dyn Classifier>>,
    runtime: &Runtime,
    event_tx: &Sender<InterviewEvent>,
) -> (Box<dyn InterviewStrategy>, InterviewMode) {
    if mode == InterviewMode::Scripted {
        return (Box::new(ScriptedStrategy::new()), InterviewMode::Scripted);
    }

    let classifier = match classifier {
        Some(c) => Ok(c),
        None => load_local_classifier(runtime, &config),
    };

    match classifier {
        Ok(classifier) => (
            Box::new(AssistedStrategy::new(classifier, config)),
            InterviewMode::Assisted,
        ),
        Err(e) => {
            warn!("Assisted interview unavailable, using scripted: {}", e);
            let _ = event_tx.send(InterviewEvent::Error {
                error: e.user_message(),
            });
            (Box::new(ScriptedStrategy::new()), InterviewMode::Scripted)
        }
    }
}

#[cfg(feature = "local-llm")]
fn load_local_classifier(runtime: &Runtime, config: &ClassifierConfig) -> Result<Arc<dyn Classifier>> {
    let classifier = runtime.block_on(crate::llm::LocalLlmClassifier::new(config.clone()))?;
    Ok(Arc::new(classifier))
}

#[cfg(not(feature = "local-llm"))]
fn load_local_classifier(_runtime: &Runtime, _config: &ClassifierConfig) -> Result<Arc<dyn Classifier>> {
    Err(TinnieaseError::ConfigError(
        "built without the local-llm feature".to_string(),
    ))
}
