use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;

use proclubs_api::{
    auth,
    payment::PaymentService,
    plans::PlanCatalog,
    proclubs,
    rate_limit::{self, RateLimiter},
    security::ApiKeyService,
    subscription, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize services
    let plans = Arc::new(PlanCatalog::from_env());
    let api_keys = ApiKeyService::new();
    let payments = PaymentService::new(
        api_keys.clone(),
        std::env::var("PAYMENT_WEBHOOK_SECRET")
            .unwrap_or_else(|_| "dev-webhook-secret".to_string()),
    );
    let limiter = RateLimiter::new();

    let state = AppState {
        api_keys,
        plans,
        limiter,
        payments,
    };

    // Protected routes: authentication first, then the tier-driven rate
    // limiter (the outermost layer runs first).
    let protected = proclubs::router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::dynamic_rate_limiter,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate_api_key,
        ));

    let app = Router::new()
        .route("/", get(root))
        .route("/api/docs", get(docs))
        .nest("/api/subscription", subscription::router())
        .nest("/api/proclubs", protected)
        .fallback(not_found)
        .with_state(state);

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000u16);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Proclubs Stats API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "documentation": "/api/docs",
        "subscription": "/api/subscription/plans",
    }))
}

async fn docs() -> Json<serde_json::Value> {
    Json(json!({
        "endpoints": {
            "public": {
                "/": "API information",
                "/api/docs": "API documentation",
                "GET /api/subscription/plans": "Get subscription plans",
                "POST /api/subscription/subscribe/free": "Get free API key",
                "POST /api/subscription/subscribe/checkout": "Create checkout session for paid plans",
            },
            "authenticated": {
                "GET /api/proclubs/matches": "Get recent matches (all tiers)",
                "GET /api/proclubs/matches/:matchId": "Get match details (all tiers)",
                "GET /api/proclubs/statistics/players": "Get player statistics (Basic & Premium)",
                "GET /api/proclubs/analytics/advanced": "Get advanced analytics (Premium only)",
            }
        },
        "authentication": {
            "method": "API Key",
            "header": "X-API-Key",
            "example": "X-API-Key: proclubs_free_abc123...",
        },
        "rateLimit": {
            "free": "10 requests/minute",
            "basic": "100 requests/minute",
            "premium": "1000 requests/minute",
        }
    }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": "The requested endpoint does not exist",
            "documentation": "/api/docs",
        })),
    )
}
