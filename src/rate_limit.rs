use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::errors::ApiError;
use crate::models::{ApiKey, RateLimitConfig, SubscriptionTier};
use crate::AppState;

#[derive(Debug, Clone)]
pub struct RateLimitEntry {
    pub requests: u32,
    pub window_start: Instant,
    pub window: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

// 固定ウィンドウ方式のカウンタ。識別子ごとにエントリを持ち、
// ウィンドウ設定は呼び出し側（ティア）から渡される。
#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // check-then-increment は単一ロック内で行う。並行リクエストでも
    // 過剰許可・過少許可は起きない。
    pub fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitDecision {
        let mut entries = self.entries.lock().unwrap();
        let now = Instant::now();
        let window = Duration::from_millis(config.window_ms);

        // 期限切れエントリをクリーンアップ
        entries.retain(|_, entry| now.duration_since(entry.window_start) < entry.window);

        let entry = entries
            .entry(identifier.to_string())
            .or_insert(RateLimitEntry {
                requests: 0,
                window_start: now,
                window,
            });

        if now.duration_since(entry.window_start) >= entry.window {
            entry.requests = 0;
            entry.window_start = now;
        }
        entry.window = window;

        // カウンタは拒否されるリクエストでも進む
        entry.requests += 1;

        let allowed = entry.requests <= config.max_requests;
        let remaining = config.max_requests.saturating_sub(entry.requests);
        let elapsed = now.duration_since(entry.window_start);

        RateLimitDecision {
            allowed,
            limit: config.max_requests,
            remaining,
            reset_after: window.saturating_sub(elapsed),
        }
    }
}

// 動的レート制限ミドルウェア。認証済みクレデンシャルのティアから
// ウィンドウ設定を引き、クレデンシャル文字列をウィンドウキーにする。
pub async fn dynamic_rate_limiter(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let api_key = request.extensions().get::<ApiKey>().cloned();

    let tier = api_key
        .as_ref()
        .map(|key| key.tier)
        .unwrap_or(SubscriptionTier::Free);

    // クレデンシャルがない場合はクライアントアドレスにフォールバック
    let identifier = match &api_key {
        Some(key) => key.key.clone(),
        None => client_address(&request),
    };

    // ティア設定はチェック時点のカタログから引く。ウィンドウ途中で
    // アップグレードされた場合も次のリクエストから新しい上限が効く。
    let config = state.plans.get(tier).rate_limit;
    let decision = state.limiter.check(&identifier, &config);

    if !decision.allowed {
        tracing::warn!(tier = %tier, limit = decision.limit, "rate limit exceeded");
        return Err(ApiError::RateLimited {
            tier,
            limit: decision.limit,
        });
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert(
        "x-ratelimit-reset",
        HeaderValue::from(decision.reset_after.as_secs()),
    );
    Ok(response)
}

fn client_address(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| format!("ip:{}", ip.trim()))
        .unwrap_or_else(|| "ip:unknown".to_string())
}
