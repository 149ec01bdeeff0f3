use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{FindResponse, MovieVideo, RecommendationRecord, VideoListing},
};

/// Video type marking a trailer in the metadata service's listings
const TRAILER_TYPE: &str = "Trailer";

/// Trait for movie metadata backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieMetadataProvider: Send + Sync {
    /// Resolve an IMDB id to the provider's internal movie id.
    ///
    /// Returns `None` when the provider has no match; that is not an error.
    async fn find_by_imdb_id(&self, imdb_id: &str) -> AppResult<Option<u64>>;

    /// List the videos attached to an internal movie id
    async fn list_videos(&self, movie_id: u64) -> AppResult<Vec<MovieVideo>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// TMDB metadata provider
///
/// API flow per record:
/// 1. Find: /3/find/{imdb_id}?external_source=imdb_id → internal movie id
/// 2. Videos: /3/movie/{id}/videos → entries with a `type` discriminator
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl MovieMetadataProvider for TmdbProvider {
    async fn find_by_imdb_id(&self, imdb_id: &str) -> AppResult<Option<u64>> {
        let url = format!("{}/3/find/{}", self.api_url, imdb_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await
            .map_err(metadata_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Enrichment(format!(
                "metadata API returned status {}: {}",
                status, body
            )));
        }

        let found: FindResponse = response.json().await.map_err(metadata_error)?;
        let movie_id = found.movie_results.first().map(|movie| movie.id);

        if movie_id.is_none() {
            tracing::debug!(imdb_id = %imdb_id, provider = self.name(), "No metadata match");
        }

        Ok(movie_id)
    }

    async fn list_videos(&self, movie_id: u64) -> AppResult<Vec<MovieVideo>> {
        let url = format!("{}/3/movie/{}/videos", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(metadata_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Enrichment(format!(
                "metadata API returned status {}: {}",
                status, body
            )));
        }

        let listing: VideoListing = response.json().await.map_err(metadata_error)?;
        Ok(listing.results)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

fn metadata_error(err: reqwest::Error) -> AppError {
    AppError::Enrichment(err.to_string())
}

/// First video marked as a trailer, if any
fn select_trailer(videos: &[MovieVideo]) -> Option<String> {
    videos
        .iter()
        .find(|video| video.kind == TRAILER_TYPE)
        .map(|video| video.key.clone())
}

/// Attaches a trailer key to each record via the metadata provider.
///
/// Two fan-out phases: every record's IMDB id resolves concurrently, then
/// every resolved record's video listing fetches concurrently. Each phase
/// joins all of its tasks before the next begins. Any failed call fails the
/// whole batch; no partially enriched sequence is returned. Records whose
/// lookup has no match, or whose listing has no trailer, keep a null trailer
/// key. Output length and order match the input.
pub async fn enrich(
    provider: Arc<dyn MovieMetadataProvider>,
    records: Vec<RecommendationRecord>,
) -> AppResult<Vec<RecommendationRecord>> {
    tracing::debug!(records = records.len(), "Resolving metadata ids");

    // Phase A: IMDB id → internal metadata id
    let mut lookups = Vec::with_capacity(records.len());
    for record in &records {
        let provider = Arc::clone(&provider);
        let imdb_id = record.imdb_id.clone();
        lookups.push(tokio::spawn(
            async move { provider.find_by_imdb_id(&imdb_id).await },
        ));
    }

    let mut movie_ids = Vec::with_capacity(records.len());
    let mut first_error: Option<AppError> = None;
    for task in lookups {
        match task.await {
            Ok(Ok(movie_id)) => movie_ids.push(movie_id),
            Ok(Err(e)) => {
                movie_ids.push(None);
                first_error.get_or_insert(e);
            }
            Err(e) => {
                movie_ids.push(None);
                first_error.get_or_insert(AppError::Enrichment(format!(
                    "metadata lookup task failed: {}",
                    e
                )));
            }
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    // Phase B: video listing per resolved record; unresolved slots stay empty
    let mut fetches = Vec::with_capacity(records.len());
    for movie_id in &movie_ids {
        match movie_id {
            Some(movie_id) => {
                let provider = Arc::clone(&provider);
                let movie_id = *movie_id;
                fetches.push(Some(tokio::spawn(async move {
                    provider.list_videos(movie_id).await
                })));
            }
            None => fetches.push(None),
        }
    }

    let mut trailer_keys = Vec::with_capacity(records.len());
    let mut first_error: Option<AppError> = None;
    for fetch in fetches {
        match fetch {
            Some(task) => match task.await {
                Ok(Ok(videos)) => trailer_keys.push(select_trailer(&videos)),
                Ok(Err(e)) => {
                    trailer_keys.push(None);
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    trailer_keys.push(None);
                    first_error.get_or_insert(AppError::Enrichment(format!(
                        "video fetch task failed: {}",
                        e
                    )));
                }
            },
            None => trailer_keys.push(None),
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    let trailer_count = trailer_keys.iter().flatten().count();

    let enriched: Vec<RecommendationRecord> = records
        .into_iter()
        .zip(trailer_keys)
        .map(|(record, trailer_key)| RecommendationRecord {
            trailer_key,
            ..record
        })
        .collect();

    tracing::info!(
        records = enriched.len(),
        trailers = trailer_count,
        "Trailer enrichment completed"
    );

    Ok(enriched)
}
