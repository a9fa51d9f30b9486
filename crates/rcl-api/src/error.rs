use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rcl_review::ReviewError;
use rcl_srs::CardId;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Card {0} not found")]
    CardNotFound(CardId),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::CardNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Review(ReviewError::UnknownStudyMode(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Review(ReviewError::Scheduler(_) | ReviewError::InvalidSnapshot(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("Request rejected: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use rcl_srs::SrsError;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::CardNotFound(3).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Review(ReviewError::Scheduler(SrsError::InvalidQuality(8))).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Review(ReviewError::UnknownStudyMode("cram".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Storage(anyhow::anyhow!("disk full")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::CardNotFound(3).to_string(), "Card 3 not found");
        assert_eq!(
            ApiError::Review(ReviewError::Scheduler(SrsError::InvalidQuality(8))).to_string(),
            "scheduler error: quality must be between 0 and 5, got 8"
        );
    }
}
