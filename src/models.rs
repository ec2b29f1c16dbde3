use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Tiers are ordered: Free < Basic < Premium. The access gate and the
// upgrade hints both rely on this ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Basic,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }

    pub fn upgrade_hint(&self) -> Option<&'static str> {
        match self {
            Self::Free => Some("Upgrade to Basic or Premium for higher limits"),
            Self::Basic => Some("Upgrade to Premium for higher limits"),
            Self::Premium => None,
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub key: String,
    pub tier: SubscriptionTier,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub request_count: u64,
    pub last_used: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionPlan {
    pub tier: SubscriptionTier,
    pub price: f64,
    pub currency: &'static str,
    pub rate_limit: RateLimitConfig,
    pub features: Vec<&'static str>,
}

// Request models
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub tier: Option<SubscriptionTier>,
}

// Mock data records served by the protected endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProclubsMatch {
    pub match_id: &'static str,
    pub club_name: &'static str,
    pub opponent_name: &'static str,
    pub result: &'static str,
    pub goals_for: u32,
    pub goals_against: u32,
    pub date: &'static str,
    pub competition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    pub player_id: &'static str,
    pub player_name: &'static str,
    pub position: &'static str,
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub rating: f64,
}
