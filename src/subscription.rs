use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::errors::ApiError;
use crate::models::{CheckoutRequest, SubscribeRequest, SubscriptionTier};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plans", get(plans))
        .route("/subscribe/free", post(subscribe_free))
        .route("/subscribe/checkout", post(checkout))
        .route("/webhook", post(webhook))
        .route("/success", get(success))
        .route("/cancel", get(cancel))
}

async fn plans(State(state): State<AppState>) -> Json<serde_json::Value> {
    let plans: Vec<_> = state
        .plans
        .plans()
        .iter()
        .map(|plan| {
            json!({
                "tier": plan.tier,
                "price": plan.price,
                "currency": plan.currency,
                "features": plan.features,
                "rateLimit": format!("{} requests per minute", plan.rate_limit.max_requests),
            })
        })
        .collect();

    Json(json!({ "plans": plans }))
}

async fn subscribe_free(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let user_id = payload
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("userId is required".to_string()))?;

    let api_key = state
        .api_keys
        .generate_api_key(&user_id, SubscriptionTier::Free);
    let plan = state.plans.get(SubscriptionTier::Free);

    tracing::info!(user_id = %api_key.user_id, "issued free tier API key");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Free API key generated successfully",
            "apiKey": api_key.key,
            "tier": api_key.tier,
            "features": plan.features,
            "rateLimit": format!("{} requests per minute", plan.rate_limit.max_requests),
        })),
    ))
}

async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (Some(user_id), Some(tier)) = (
        payload.user_id.filter(|id| !id.is_empty()),
        payload.tier,
    ) else {
        return Err(ApiError::InvalidRequest(
            "userId and tier are required".to_string(),
        ));
    };

    if tier == SubscriptionTier::Free {
        return Err(ApiError::InvalidRequest(
            "Use /subscribe/free endpoint for free tier".to_string(),
        ));
    }

    let base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let plan = state.plans.get(tier);

    let checkout_url = state.payments.create_checkout_session(
        &user_id,
        plan,
        &format!("{base_url}/api/subscription/success"),
        &format!("{base_url}/api/subscription/cancel"),
    )?;

    Ok(Json(json!({
        "message": "Checkout session created",
        "checkoutUrl": checkout_url,
    })))
}

async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let signature = headers
        .get("x-webhook-signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Webhook("missing x-webhook-signature header".to_string()))?;

    state.payments.handle_webhook(&body, signature)?;

    Ok(Json(json!({ "received": true })))
}

async fn success() -> Html<&'static str> {
    Html(
        r#"<html>
  <head><title>Subscription Successful</title></head>
  <body style="font-family: Arial, sans-serif; text-align: center; padding: 50px;">
    <h1>&#10003; Subscription Successful!</h1>
    <p>Your API key has been generated and sent to your email.</p>
    <p><a href="/">Return to Home</a></p>
  </body>
</html>"#,
    )
}

async fn cancel() -> Html<&'static str> {
    Html(
        r#"<html>
  <head><title>Subscription Canceled</title></head>
  <body style="font-family: Arial, sans-serif; text-align: center; padding: 50px;">
    <h1>Subscription Canceled</h1>
    <p>Your subscription was not completed.</p>
    <p><a href="/api/subscription/plans">View Plans Again</a></p>
  </body>
</html>"#,
    )
}
