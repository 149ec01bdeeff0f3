use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationRecord, RecommendationRequest},
    services::{
        completion::CompletionBackend, parser, prompts, trailers,
        trailers::MovieMetadataProvider,
    },
};

/// Generates enriched movie recommendations from a seed entity.
///
/// Sequences the pipeline: prompt construction, completion, parsing, trailer
/// enrichment. Parsing must finish before enrichment starts, since the
/// enricher needs the parsed IMDB ids. Any stage failure surfaces as a single
/// pipeline error wrapping the originating cause; no stage recovers another
/// stage's error.
pub struct RecommendationService {
    backend: Arc<dyn CompletionBackend>,
    metadata: Arc<dyn MovieMetadataProvider>,
}

impl RecommendationService {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        metadata: Arc<dyn MovieMetadataProvider>,
    ) -> Self {
        Self { backend, metadata }
    }

    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> AppResult<Vec<RecommendationRecord>> {
        let prompt = prompts::build_prompt(request);

        let completion = self.backend.complete(&prompt).await.map_err(pipeline_error)?;

        let records = parser::parse(&completion).map_err(pipeline_error)?;

        tracing::info!(
            kind = request.kind(),
            records = records.len(),
            backend = self.backend.name(),
            "Parsed recommendations"
        );

        trailers::enrich(Arc::clone(&self.metadata), records)
            .await
            .map_err(pipeline_error)
    }
}

fn pipeline_error(cause: AppError) -> AppError {
    AppError::Recommendation(Box::new(cause))
}
