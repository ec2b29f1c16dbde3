use std::env;

use crate::models::{RateLimitConfig, SubscriptionPlan, SubscriptionTier};

// All tiers count requests over the same one-minute window.
pub const WINDOW_MS: u64 = 60 * 1000;

// Static plan catalog. Built once at startup and read-only afterwards;
// every tier is present by construction, so lookups are total.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    free: SubscriptionPlan,
    basic: SubscriptionPlan,
    premium: SubscriptionPlan,
}

impl PlanCatalog {
    pub fn from_env() -> Self {
        Self {
            free: SubscriptionPlan {
                tier: SubscriptionTier::Free,
                price: 0.0,
                currency: "USD",
                rate_limit: RateLimitConfig {
                    window_ms: WINDOW_MS,
                    max_requests: env_limit("RATE_LIMIT_FREE", 10),
                },
                features: vec![
                    "Access to basic match data",
                    "Limited to 10 requests per minute",
                    "Community support",
                ],
            },
            basic: SubscriptionPlan {
                tier: SubscriptionTier::Basic,
                price: 9.99,
                currency: "USD",
                rate_limit: RateLimitConfig {
                    window_ms: WINDOW_MS,
                    max_requests: env_limit("RATE_LIMIT_BASIC", 100),
                },
                features: vec![
                    "Access to all match data",
                    "Player statistics",
                    "100 requests per minute",
                    "Email support",
                    "Historical data access (6 months)",
                ],
            },
            premium: SubscriptionPlan {
                tier: SubscriptionTier::Premium,
                price: 29.99,
                currency: "USD",
                rate_limit: RateLimitConfig {
                    window_ms: WINDOW_MS,
                    max_requests: env_limit("RATE_LIMIT_PREMIUM", 1000),
                },
                features: vec![
                    "All Basic features",
                    "1000 requests per minute",
                    "Real-time match updates",
                    "Advanced analytics",
                    "Priority support",
                    "Historical data access (unlimited)",
                    "Webhook notifications",
                ],
            },
        }
    }

    pub fn get(&self, tier: SubscriptionTier) -> &SubscriptionPlan {
        match tier {
            SubscriptionTier::Free => &self.free,
            SubscriptionTier::Basic => &self.basic,
            SubscriptionTier::Premium => &self.premium,
        }
    }

    pub fn plans(&self) -> [&SubscriptionPlan; 3] {
        [&self.free, &self.basic, &self.premium]
    }
}

fn env_limit(var: &str, default: u32) -> u32 {
    env::var(var)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
