// Proclubs subscription API
// Main library module

pub mod access;
pub mod auth;
pub mod errors;
pub mod models;
pub mod payment;
pub mod plans;
pub mod proclubs;
pub mod rate_limit;
pub mod security;
pub mod subscription;

use std::sync::Arc;

// Re-export commonly used items
pub use errors::ApiError;
pub use models::{ApiKey, RateLimitConfig, SubscriptionPlan, SubscriptionTier};
pub use payment::PaymentService;
pub use plans::PlanCatalog;
pub use rate_limit::RateLimiter;
pub use security::ApiKeyService;

// Shared state handed to every route and middleware
#[derive(Clone)]
pub struct AppState {
    pub api_keys: ApiKeyService,
    pub plans: Arc<PlanCatalog>,
    pub limiter: RateLimiter,
    pub payments: PaymentService,
}
