use crate::models::Transaction;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TollError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingField(Vec<String>),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown toll booth: {0}")]
    UnknownTollBooth(String),

    #[error("Blockchain verification failed")]
    VerificationFailed,

    #[error("Failed to fetch transactions")]
    FetchFailed(#[source] anyhow::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl TollError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TollError::MissingField(_)
            | TollError::InvalidRequest(_)
            | TollError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            TollError::UnknownTollBooth(_) => StatusCode::NOT_FOUND,
            TollError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            TollError::VerificationFailed
            | TollError::FetchFailed(_)
            | TollError::Internal(_)
            | TollError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TollError::MissingField(_) => "MISSING_FIELD",
            TollError::InvalidRequest(_) => "INVALID_REQUEST",
            TollError::InvalidQuery(_) => "INVALID_QUERY",
            TollError::UnknownTollBooth(_) => "UNKNOWN_TOLL_BOOTH",
            TollError::VerificationFailed => "VERIFICATION_FAILED",
            TollError::FetchFailed(_) => "FETCH_ERROR",
            TollError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            TollError::Internal(_) | TollError::Anyhow(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,

    /// Present on list endpoints so clients can always read an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

impl IntoResponse for TollError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status = self.status_code();
        let error_code = self.error_code();

        // Internal details stay in the logs.
        let error = match &self {
            TollError::Internal(_) | TollError::Anyhow(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let transactions = match &self {
            TollError::FetchFailed(_) => Some(Vec::new()),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!(
                error = ?self,
                error_code = error_code,
                request_id = %request_id,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error = %self,
                error_code = error_code,
                request_id = %request_id,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            success: false,
            error,
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id,
            transactions,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            TollError::MissingField(vec!["amount".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TollError::VerificationFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            TollError::UnknownTollBooth("TB999".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TollError::RateLimitExceeded.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn missing_field_message_lists_fields() {
        let err = TollError::MissingField(vec!["vehicleNumber".into(), "amount".into()]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: vehicleNumber, amount"
        );
    }

    #[tokio::test]
    async fn fetch_failure_body_carries_empty_list() {
        let response = TollError::FetchFailed(anyhow::anyhow!("lock poisoned")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to fetch transactions");
        assert_eq!(json["transactions"], serde_json::json!([]));
    }
}
