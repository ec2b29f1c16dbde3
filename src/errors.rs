use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::SubscriptionTier;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API key is required. Please include it in the X-API-Key header.")]
    MissingApiKey,

    // Unknown and deactivated keys share one message on purpose: the
    // response must not reveal whether a key ever existed.
    #[error("Invalid or inactive API key.")]
    InvalidApiKey,

    #[error("Rate limit exceeded for {tier} tier. Maximum {limit} requests per minute.")]
    RateLimited { tier: SubscriptionTier, limit: u32 },

    #[error("{message}")]
    Forbidden {
        message: String,
        required: SubscriptionTier,
        current: SubscriptionTier,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Webhook Error: {0}")]
    Webhook(String),

    #[error("{0}")]
    Payment(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingApiKey | ApiError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Unauthorized",
                    "message": self.to_string(),
                }),
            ),
            ApiError::RateLimited { tier, limit } => {
                let mut body = json!({
                    "error": "Too Many Requests",
                    "message": self.to_string(),
                    "tier": tier,
                    "limit": limit,
                });
                if let Some(hint) = tier.upgrade_hint() {
                    body["upgrade"] = json!(hint);
                }
                (StatusCode::TOO_MANY_REQUESTS, body)
            }
            ApiError::Forbidden {
                message,
                required,
                current,
            } => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "Forbidden",
                    "message": message,
                    "requiredTier": required,
                    "currentTier": current,
                    "upgrade": "Upgrade your plan to access this feature",
                }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Not Found",
                    "message": message,
                }),
            ),
            ApiError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Bad Request",
                    "message": message,
                }),
            ),
            ApiError::Webhook(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Webhook Error",
                    "message": message,
                }),
            ),
            ApiError::Payment(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal Server Error",
                    "message": message,
                }),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal Server Error",
                    "message": "Something went wrong",
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
