use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::errors::ApiError;
use crate::AppState;

// API key authentication middleware. Resolves the X-API-Key header to a
// credential and attaches it to the request for the layers below.
pub async fn authenticate_api_key(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // An empty header value counts as missing
    let raw_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    let Some(raw_key) = raw_key else {
        return Err(ApiError::MissingApiKey);
    };

    let Some(api_key) = state.api_keys.validate_api_key(&raw_key) else {
        tracing::warn!("rejected request with unknown or inactive API key");
        return Err(ApiError::InvalidApiKey);
    };

    // Usage accounting happens on every authenticated request, before the
    // rate limiter downstream gets a say.
    state.api_keys.increment_request_count(&raw_key);
    let api_key = state.api_keys.get_api_key_info(&raw_key).unwrap_or(api_key);

    request.extensions_mut().insert(api_key);
    Ok(next.run(request).await)
}
