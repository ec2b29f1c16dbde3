use proclubs_api::access::{authorize, Capability};
use proclubs_api::{ApiError, SubscriptionTier};

#[tokio::test]
async fn test_access_gate_matrix() {
    println!("🧪 Testing access gate matrix...");

    use Capability::*;
    use SubscriptionTier::*;

    let table = [
        (Free, RecentMatches, true),
        (Free, MatchById, true),
        (Free, PlayerStatistics, false),
        (Free, AdvancedAnalytics, false),
        (Basic, RecentMatches, true),
        (Basic, MatchById, true),
        (Basic, PlayerStatistics, true),
        (Basic, AdvancedAnalytics, false),
        (Premium, RecentMatches, true),
        (Premium, MatchById, true),
        (Premium, PlayerStatistics, true),
        (Premium, AdvancedAnalytics, true),
    ];

    for (tier, capability, expected) in table {
        assert_eq!(
            authorize(tier, capability).is_ok(),
            expected,
            "tier {tier} / capability {capability:?}"
        );
    }

    println!("✅ Access gate matrix test passed");
}

#[tokio::test]
async fn test_denial_names_required_and_current_tier() {
    let err = authorize(SubscriptionTier::Free, Capability::AdvancedAnalytics)
        .expect_err("free tier must not reach analytics");

    match err {
        ApiError::Forbidden {
            required, current, ..
        } => {
            assert_eq!(required, SubscriptionTier::Premium);
            assert_eq!(current, SubscriptionTier::Free);
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_required_tiers() {
    assert_eq!(
        Capability::RecentMatches.required_tier(),
        SubscriptionTier::Free
    );
    assert_eq!(
        Capability::MatchById.required_tier(),
        SubscriptionTier::Free
    );
    assert_eq!(
        Capability::PlayerStatistics.required_tier(),
        SubscriptionTier::Basic
    );
    assert_eq!(
        Capability::AdvancedAnalytics.required_tier(),
        SubscriptionTier::Premium
    );
}
