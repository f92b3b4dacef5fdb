use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use voicebook::config::AppConfig;
use voicebook::handlers;
use voicebook::services::grammar::Grammar;
use voicebook::services::speech::console::ConsoleSpeech;
use voicebook::services::speech::remote::RemoteSpeech;
use voicebook::services::speech::SpeechAdapter;
use voicebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();

    let speech: Arc<dyn SpeechAdapter> = match config.speech_provider.as_str() {
        "remote" => {
            anyhow::ensure!(
                !config.speech_endpoint.is_empty(),
                "SPEECH_ENDPOINT must be set when SPEECH_PROVIDER=remote"
            );
            tracing::info!("using remote speech gateway (endpoint: {})", config.speech_endpoint);
            Arc::new(RemoteSpeech::new(
                config.speech_endpoint.clone(),
                config.speech_key.clone(),
            ))
        }
        _ => {
            tracing::info!("using console speech (type answers on stdin)");
            Arc::new(ConsoleSpeech::new())
        }
    };

    let grammar = Arc::new(Grammar::builtin());
    tracing::info!(entries = grammar.len(), "grammar loaded");

    let (state, runner, triggers) = AppState::with_runner(config.clone(), speech, grammar);

    tokio::spawn(async move {
        if let Err(e) = runner.run(triggers).await {
            tracing::error!(error = %e, "session runner stopped");
        }
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
