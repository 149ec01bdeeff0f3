use serde::{Deserialize, Serialize};

/// Fixed viewing history backing the history-seeded request kind.
///
/// Read-only for the process lifetime; the prompt builder enumerates these
/// IMDB ids verbatim.
pub const VIEWING_HISTORY: [&str; 5] = [
    "tt1375666", // Inception
    "tt0209144", // Memento
    "tt0816692", // Interstellar
    "tt0468569", // The Dark Knight
    "tt6751668", // Parasite
];

/// A recommendation request, one variant per seed kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationRequest {
    /// Seeded by a movie title
    Movie { title: String },
    /// Seeded by a director name
    Director { name: String },
    /// Seeded by an actor name
    Actor { name: String },
    /// Seeded by the fixed viewing history
    History,
}

impl RecommendationRequest {
    /// Short kind label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendationRequest::Movie { .. } => "movie",
            RecommendationRequest::Director { .. } => "director",
            RecommendationRequest::Actor { .. } => "actor",
            RecommendationRequest::History => "history",
        }
    }
}

/// One recommendation returned to the client.
///
/// `trailer_key` stays null until the enricher runs, so the parser's output
/// and the enricher's output share one shape. Sequence order follows the
/// model's output order throughout the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub movie: String,
    pub director: String,
    pub imdb_id: String,
    pub trailer_key: Option<String>,
}

/// Shape of one element in the model's JSON array reply.
///
/// The prompt names these fields explicitly, so decoding assumes them.
#[derive(Debug, Deserialize)]
pub struct ParsedRecommendation {
    pub movie: String,
    #[serde(default)]
    pub director: String,
    pub imdb: String,
}

impl From<ParsedRecommendation> for RecommendationRecord {
    fn from(parsed: ParsedRecommendation) -> Self {
        Self {
            movie: parsed.movie,
            director: parsed.director,
            imdb_id: parsed.imdb,
            trailer_key: None,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from /3/find/{imdb_id}
#[derive(Debug, Deserialize)]
pub struct FindResponse {
    #[serde(default)]
    pub movie_results: Vec<FoundMovie>,
}

/// One match returned by the find endpoint
#[derive(Debug, Deserialize)]
pub struct FoundMovie {
    pub id: u64,
}

/// Response from /3/movie/{id}/videos
#[derive(Debug, Deserialize)]
pub struct VideoListing {
    #[serde(default)]
    pub results: Vec<MovieVideo>,
}

/// One video entry attached to a movie
#[derive(Debug, Clone, Deserialize)]
pub struct MovieVideo {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub site: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_recommendation_deserialization() {
        let json = r#"{"director":"C. Nolan","movie":"Memento","imdb":"tt0209144"}"#;

        let parsed: ParsedRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.movie, "Memento");
        assert_eq!(parsed.director, "C. Nolan");
        assert_eq!(parsed.imdb, "tt0209144");
    }

    #[test]
    fn test_parsed_recommendation_defaults_director() {
        let json = r#"{"movie":"Memento","imdb":"tt0209144"}"#;

        let parsed: ParsedRecommendation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.director, "");
    }

    #[test]
    fn test_record_serializes_null_trailer() {
        let record = RecommendationRecord {
            movie: "Memento".to_string(),
            director: "C. Nolan".to_string(),
            imdb_id: "tt0209144".to_string(),
            trailer_key: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["trailer_key"].is_null());
    }

    #[test]
    fn test_movie_video_type_field() {
        let json = r#"{"key":"abc123","type":"Trailer","site":"YouTube"}"#;

        let video: MovieVideo = serde_json::from_str(json).unwrap();
        assert_eq!(video.key, "abc123");
        assert_eq!(video.kind, "Trailer");
        assert_eq!(video.site, Some("YouTube".to_string()));
    }

    #[test]
    fn test_find_response_tolerates_missing_results() {
        let found: FindResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(found.movie_results.is_empty());
    }

    #[test]
    fn test_request_kind_labels() {
        let movie = RecommendationRequest::Movie {
            title: "Inception".to_string(),
        };
        assert_eq!(movie.kind(), "movie");
        assert_eq!(RecommendationRequest::History.kind(), "history");
    }
}
