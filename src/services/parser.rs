use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{ParsedRecommendation, RecommendationRecord},
};

/// Longest fragment of raw text carried inside a parse error
const FRAGMENT_LIMIT: usize = 200;

/// Extracts recommendation records from a raw completion.
///
/// The model frequently wraps the payload in conversational text, so only
/// the span from the first `[` through the last `]` is decoded. Decode
/// failure inside that span is a hard error; there is no heuristic repair.
/// Elements missing a usable `movie` or `imdb` field are dropped with a
/// warning, but an entirely unusable response is an error, not an empty list.
pub fn parse(raw: &str) -> AppResult<Vec<RecommendationRecord>> {
    let start = raw
        .find('[')
        .ok_or_else(|| parse_error("no JSON array found in completion", raw))?;

    let span = &raw[start..];
    let end = span.rfind(']').map(|i| i + 1).unwrap_or(span.len());
    let payload = &span[..end];

    let elements: Vec<Value> = serde_json::from_str(payload)
        .map_err(|e| parse_error(&format!("invalid JSON array: {}", e), payload))?;

    let mut records = Vec::with_capacity(elements.len());
    for element in elements {
        match serde_json::from_value::<ParsedRecommendation>(element) {
            Ok(parsed) if parsed.movie.trim().is_empty() || parsed.imdb.trim().is_empty() => {
                tracing::warn!(
                    movie = %parsed.movie,
                    imdb = %parsed.imdb,
                    "Dropping recommendation with blank required field"
                );
            }
            Ok(parsed) => records.push(RecommendationRecord::from(parsed)),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping recommendation missing required fields");
            }
        }
    }

    if records.is_empty() {
        return Err(parse_error(
            "completion contained no usable recommendations",
            payload,
        ));
    }

    Ok(records)
}

fn parse_error(message: &str, text: &str) -> AppError {
    let fragment: String = text.chars().take(FRAGMENT_LIMIT).collect();
    AppError::Parse {
        message: message.to_string(),
        fragment,
    }
}
