use std::collections::HashSet;

use proclubs_api::{security::ApiKeyService, SubscriptionTier};

#[tokio::test]
async fn test_key_generation_uniqueness() {
    println!("🧪 Testing API key uniqueness...");

    let service = ApiKeyService::new();
    let mut seen = HashSet::new();

    for i in 0..10_000 {
        let api_key = service.generate_api_key(&format!("user_{i}"), SubscriptionTier::Free);
        assert!(
            seen.insert(api_key.key.clone()),
            "duplicate key issued: {}",
            api_key.key
        );
    }

    println!("✅ 10,000 issued keys are pairwise distinct");
}

#[tokio::test]
async fn test_key_format_and_initial_state() {
    let service = ApiKeyService::new();

    let api_key = service.generate_api_key("format_user", SubscriptionTier::Basic);

    // キーにはティアのセグメントが埋め込まれる
    assert!(api_key.key.starts_with("proclubs_basic_"));
    assert_eq!(api_key.tier, SubscriptionTier::Basic);
    assert_eq!(api_key.user_id, "format_user");
    assert!(api_key.is_active);
    assert_eq!(api_key.request_count, 0);
    assert!(api_key.last_used.is_none());
}

#[tokio::test]
async fn test_validate_unknown_key() {
    let service = ApiKeyService::new();

    assert!(service.validate_api_key("proclubs_free_NOTISSUED").is_none());
}

#[tokio::test]
async fn test_deactivated_key_indistinguishable_from_unknown() {
    println!("🧪 Testing deactivated key rejection...");

    let service = ApiKeyService::new();
    let api_key = service.generate_api_key("deactivate_user", SubscriptionTier::Premium);

    // 発行直後は有効
    assert!(service.validate_api_key(&api_key.key).is_some());

    assert!(service.deactivate_api_key(&api_key.key));

    // 無効化後は、一度も発行されていないキーと同じ結果になる
    let deactivated = service.validate_api_key(&api_key.key);
    let never_issued = service.validate_api_key("proclubs_premium_NEVERISSUED");
    assert!(deactivated.is_none());
    assert!(never_issued.is_none());

    // 記録自体は残っている（lookup は可能、active だけが落ちる）
    let info = service.get_api_key_info(&api_key.key).expect("record kept");
    assert!(!info.is_active);

    println!("✅ Deactivated key rejection test passed");
}

#[tokio::test]
async fn test_deactivate_unknown_key_returns_false() {
    let service = ApiKeyService::new();

    assert!(!service.deactivate_api_key("proclubs_free_MISSING"));
}

#[tokio::test]
async fn test_request_count_is_monotonic() {
    println!("🧪 Testing request count accounting...");

    let service = ApiKeyService::new();
    let api_key = service.generate_api_key("count_user", SubscriptionTier::Free);

    for _ in 0..25 {
        service.increment_request_count(&api_key.key);
    }

    let info = service.get_api_key_info(&api_key.key).expect("key exists");
    assert_eq!(info.request_count, 25);
    assert!(info.last_used.is_some());

    println!("✅ Request count accounting test passed");
}

#[tokio::test]
async fn test_increment_unknown_key_is_noop() {
    let service = ApiKeyService::new();
    let api_key = service.generate_api_key("noop_user", SubscriptionTier::Free);

    service.increment_request_count("proclubs_free_MISSING");

    let info = service.get_api_key_info(&api_key.key).expect("key exists");
    assert_eq!(info.request_count, 0);
}

#[tokio::test]
async fn test_upgrade_subscription_changes_tier_in_place() {
    let service = ApiKeyService::new();
    let api_key = service.generate_api_key("upgrade_user", SubscriptionTier::Free);

    service.increment_request_count(&api_key.key);
    assert!(service.upgrade_subscription(&api_key.key, SubscriptionTier::Premium));

    // ティアだけが変わり、使用量カウンタは保持される
    let info = service.get_api_key_info(&api_key.key).expect("key exists");
    assert_eq!(info.tier, SubscriptionTier::Premium);
    assert_eq!(info.request_count, 1);

    assert!(!service.upgrade_subscription("proclubs_basic_MISSING", SubscriptionTier::Basic));
}

#[tokio::test]
async fn test_list_api_keys() {
    let service = ApiKeyService::new();

    service.generate_api_key("list_user_1", SubscriptionTier::Free);
    service.generate_api_key("list_user_2", SubscriptionTier::Basic);

    let keys = service.list_api_keys();
    assert_eq!(keys.len(), 2);
}
