use crate::errors::ApiError;
use crate::models::SubscriptionTier;

// Protected operations gated by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    RecentMatches,
    MatchById,
    PlayerStatistics,
    AdvancedAnalytics,
}

impl Capability {
    pub fn required_tier(&self) -> SubscriptionTier {
        match self {
            Capability::RecentMatches | Capability::MatchById => SubscriptionTier::Free,
            Capability::PlayerStatistics => SubscriptionTier::Basic,
            Capability::AdvancedAnalytics => SubscriptionTier::Premium,
        }
    }

    fn denial_message(&self) -> &'static str {
        match self {
            Capability::RecentMatches | Capability::MatchById => {
                "Match data is available to all subscribers"
            }
            Capability::PlayerStatistics => {
                "Player statistics are only available to Basic and Premium subscribers"
            }
            Capability::AdvancedAnalytics => {
                "Advanced analytics are only available to Premium subscribers"
            }
        }
    }
}

pub fn authorize(tier: SubscriptionTier, capability: Capability) -> Result<(), ApiError> {
    let required = capability.required_tier();
    if tier >= required {
        Ok(())
    } else {
        Err(ApiError::Forbidden {
            message: capability.denial_message().to_string(),
            required,
            current: tier,
        })
    }
}
