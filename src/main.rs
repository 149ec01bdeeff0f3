use std::sync::Arc;

use marquee_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        completion::ChatCompletionsBackend, recommendations::RecommendationService,
        trailers::TmdbProvider,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Credentials resolve once here; a missing key aborts startup
    let config = Config::from_env()?;

    let backend = ChatCompletionsBackend::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    );
    let metadata = TmdbProvider::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone());

    let recommender = RecommendationService::new(Arc::new(backend), Arc::new(metadata));
    let state = AppState {
        recommender: Arc::new(recommender),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
