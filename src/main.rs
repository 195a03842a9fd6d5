use anyhow::{anyhow, Result};
use std::sync::Arc;
use tinniease::audio::{AudioEngine, Mixer};
use tinniease::integration::{AppConfig, Controller};
use tinniease::interview::InterviewPipeline;
use tinniease::messages::MessageStorage;
use tinniease::presentation::BuiltinLayouts;
use tinniease::ui::{self, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinniease=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tinniease");

    let config = AppConfig::from_env()?;
    config.validate().map_err(|e| anyhow!(e))?;

    #[cfg(feature = "audio-io")]
    let (mixer, _output) = open_output(&config);
    #[cfg(not(feature = "audio-io"))]
    let mixer = Arc::new(Mixer::new(config.audio.fallback_sample_rate));

    let engine = AudioEngine::new(mixer, config.audio.gain);
    let pipeline = InterviewPipeline::new(config.mode, config.classifier.clone(), MessageStorage::new());
    let controller = Controller::start(pipeline, engine, Box::new(BuiltinLayouts))?;

    ui::run(AppState::new(controller)).map_err(|e| anyhow!("UI error: {}", e))
}

/// Open the default device; the interview still runs silently without one
#[cfg(feature = "audio-io")]
fn open_output(config: &AppConfig) -> (Arc<Mixer>, Option<tinniease::audio::AudioOutput>) {
    use tinniease::audio::AudioOutput;
    use tracing::warn;

    let fallback = || Arc::new(Mixer::new(config.audio.fallback_sample_rate));
    if !config.audio.enable_output {
        return (fallback(), None);
    }

    let mut output = match AudioOutput::new() {
        Ok(output) => output,
        Err(e) => {
            warn!("{} ({})", e.user_message(), e);
            return (fallback(), None);
        }
    };

    let mixer = Arc::new(Mixer::new(output.sample_rate()));
    match output.start(Arc::clone(&mixer)) {
        Ok(()) => (mixer, Some(output)),
        Err(e) => {
            warn!("{} ({})", e.user_message(), e);
            (mixer, None)
        }
    }
}
