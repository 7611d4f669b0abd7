use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use voicegate::application::services::AuthenticationService;
use voicegate::infrastructure::audio::{FsScratchStore, WavFormatValidator};
use voicegate::infrastructure::embedding::OnnxVoiceEmbedder;
use voicegate::infrastructure::observability::init_tracing;
use voicegate::infrastructure::persistence::PgCredentialRepository;
use voicegate::infrastructure::speech::HttpSpeechEngine;
use voicegate::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_str(
        &std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
    )
    .map_err(|e| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(&settings.logging.level, settings.logging.enable_json);
    tracing::info!(environment = %environment, "Voicegate starting");

    let db_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let validator = Arc::new(WavFormatValidator::new(
        settings.audio.required_channels,
        settings.audio.required_bits_per_sample,
        settings.audio.min_sample_rate,
    ));
    let speech = Arc::new(
        HttpSpeechEngine::new(
            settings.speech.base_url.clone(),
            settings.speech.model.clone(),
            settings.speech.api_key.clone(),
            Duration::from_secs(settings.speech.timeout_secs),
            settings.speech.calibration_ms,
        )
        .map_err(|e| anyhow::anyhow!("speech engine: {}", e))?,
    );
    let embedder = Arc::new(OnnxVoiceEmbedder::new(
        settings.embedding.model_path.clone(),
        settings.embedding.dimension,
        settings.embedding.sample_rate,
        settings.embedding.analysis_window_secs,
    ));
    let credentials = Arc::new(PgCredentialRepository::new(db_pool));
    let scratch = Arc::new(FsScratchStore::new(settings.scratch.dir.clone()));

    let auth_service = Arc::new(AuthenticationService::new(
        validator,
        speech,
        embedder,
        credentials,
        scratch,
        settings.auth.accept_threshold,
    ));

    let state = AppState { auth_service };
    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
