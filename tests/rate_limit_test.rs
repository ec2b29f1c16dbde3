use std::time::Duration;

use proclubs_api::{RateLimitConfig, RateLimiter};

#[tokio::test]
async fn test_rate_limit_basic_functionality() {
    let limiter = RateLimiter::new();
    let config = RateLimitConfig {
        window_ms: 1000,
        max_requests: 3,
    };
    let identifier = "test_client_123";

    // 上限までは許可される
    assert!(limiter.check(identifier, &config).allowed);
    assert!(limiter.check(identifier, &config).allowed);

    let third = limiter.check(identifier, &config);
    assert!(third.allowed);
    assert_eq!(third.remaining, 0);

    // 4回目は拒否されるはず
    let fourth = limiter.check(identifier, &config);
    assert!(!fourth.allowed);
    assert_eq!(fourth.limit, 3);

    // ウィンドウが過ぎれば再び許可され、カウンタは1から再スタート
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let fifth = limiter.check(identifier, &config);
    assert!(fifth.allowed);
    assert_eq!(fifth.remaining, 2);
}

#[tokio::test]
async fn test_rate_limit_window_reset() {
    let limiter = RateLimiter::new();
    let config = RateLimitConfig {
        window_ms: 1000,
        max_requests: 2,
    };
    let identifier = "window_test_client";

    assert!(limiter.check(identifier, &config).allowed);
    assert!(limiter.check(identifier, &config).allowed);
    assert!(!limiter.check(identifier, &config).allowed);

    // 1秒待機してウィンドウをリセット
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(limiter.check(identifier, &config).allowed);
}

#[tokio::test]
async fn test_rate_limit_different_identifiers() {
    let limiter = RateLimiter::new();
    let config = RateLimitConfig {
        window_ms: 60_000,
        max_requests: 2,
    };

    // 識別子ごとに独立してカウントされる
    assert!(limiter.check("client_1", &config).allowed);
    assert!(limiter.check("client_1", &config).allowed);
    assert!(!limiter.check("client_1", &config).allowed);

    assert!(limiter.check("client_2", &config).allowed);
    assert!(limiter.check("client_2", &config).allowed);
    assert!(!limiter.check("client_2", &config).allowed);
}

#[tokio::test]
async fn test_tier_upgrade_mid_window() {
    println!("🧪 Testing mid-window tier upgrade...");

    let limiter = RateLimiter::new();
    let free = RateLimitConfig {
        window_ms: 60_000,
        max_requests: 10,
    };
    let premium = RateLimitConfig {
        window_ms: 60_000,
        max_requests: 1000,
    };
    let identifier = "upgraded_client";

    for _ in 0..5 {
        assert!(limiter.check(identifier, &free).allowed);
    }

    // アップグレード後は新しい上限が即座に適用される。
    // カウンタはリセットされずに引き継がれる。
    let decision = limiter.check(identifier, &premium);
    assert!(decision.allowed);
    assert_eq!(decision.limit, 1000);
    assert_eq!(decision.remaining, 1000 - 6);

    println!("✅ Mid-window tier upgrade test passed");
}

#[tokio::test]
async fn test_denied_decision_reports_limit_and_reset() {
    let limiter = RateLimiter::new();
    let config = RateLimitConfig {
        window_ms: 60_000,
        max_requests: 1,
    };
    let identifier = "error_test_client";

    assert!(limiter.check(identifier, &config).allowed);

    let denied = limiter.check(identifier, &config);
    assert!(!denied.allowed);
    assert_eq!(denied.limit, 1);
    assert_eq!(denied.remaining, 0);
    assert!(denied.reset_after <= Duration::from_millis(60_000));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_checks_admit_exactly_limit() {
    println!("🧪 Testing concurrent admission...");

    let limiter = RateLimiter::new();
    let config = RateLimitConfig {
        window_ms: 60_000,
        max_requests: 50,
    };

    let mut handles = Vec::new();
    for _ in 0..100 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            limiter.check("shared_identity", &config).allowed
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.expect("task panicked") {
            admitted += 1;
        }
    }

    // 競合があっても過剰許可・過少許可は起きない
    assert_eq!(admitted, 50);

    println!("✅ Concurrent admission test passed");
}
