use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion backend error: {message}")]
    Backend {
        /// HTTP status returned by the backend, when the failure got that far
        status: Option<u16>,
        message: String,
    },

    #[error("Unparseable completion: {message}")]
    Parse {
        message: String,
        /// Offending portion of the raw completion, bounded for logging
        fragment: String,
    },

    #[error("Metadata backend error: {0}")]
    Enrichment(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Recommendation pipeline failed")]
    Recommendation(#[source] Box<AppError>),
}

impl AppError {
    /// Status and fixed client-facing message for this error.
    ///
    /// Pipeline failures all map to a stage-appropriate fixed string; status
    /// codes, fragments and credentials never leave the log.
    fn client_response(&self) -> (StatusCode, String) {
        match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Service configuration error".to_string(),
            ),
            AppError::Backend { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error generating recommendations".to_string(),
            ),
            AppError::Parse { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error parsing generated recommendations".to_string(),
            ),
            AppError::Enrichment(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching trailer data".to_string(),
            ),
            AppError::Recommendation(cause) => cause.client_response(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.client_response();

        if status.is_server_error() {
            tracing::error!(error = %self, detail = ?self, "Request failed");
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_wrapper_preserves_source() {
        let cause = AppError::Backend {
            status: Some(429),
            message: "quota exceeded".to_string(),
        };
        let wrapped = AppError::Recommendation(Box::new(cause));

        let source = std::error::Error::source(&wrapped).expect("source should be preserved");
        assert!(source.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_client_response_unwraps_pipeline_stage() {
        let wrapped = AppError::Recommendation(Box::new(AppError::Parse {
            message: "invalid JSON array".to_string(),
            fragment: "[{".to_string(),
        }));

        let (status, message) = wrapped.client_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Error parsing generated recommendations");
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err = AppError::InvalidInput("movie query parameter is required".to_string());
        let (status, message) = err.client_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("movie"));
    }
}
