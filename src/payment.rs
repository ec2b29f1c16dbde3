use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{SubscriptionPlan, SubscriptionTier};
use crate::security::ApiKeyService;

type HmacSha256 = Hmac<Sha256>;

// Thin stand-in for a hosted billing provider: creates checkout sessions
// and applies their webhook events to the key store.
#[derive(Clone)]
pub struct PaymentService {
    api_keys: ApiKeyService,
    webhook_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: WebhookObject,
}

#[derive(Debug, Deserialize)]
pub struct WebhookObject {
    pub id: Option<String>,
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub metadata: WebhookMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookMetadata {
    pub tier: Option<SubscriptionTier>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl PaymentService {
    pub fn new(api_keys: ApiKeyService, webhook_secret: String) -> Self {
        Self {
            api_keys,
            webhook_secret,
        }
    }

    pub fn create_checkout_session(
        &self,
        user_id: &str,
        plan: &SubscriptionPlan,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String, ApiError> {
        if plan.tier == SubscriptionTier::Free {
            return Err(ApiError::Payment(
                "Free tier does not require payment".to_string(),
            ));
        }

        let session_id = format!("cs_{}", Uuid::new_v4().simple());
        let amount_cents = (plan.price * 100.0).round() as i64;

        tracing::info!(
            %session_id,
            user_id,
            tier = %plan.tier,
            amount_cents,
            success_url,
            cancel_url,
            "created checkout session"
        );

        Ok(format!("https://checkout.proclubs.dev/c/pay/{session_id}"))
    }

    // Webhook payloads are signed with HMAC-SHA256 over the raw body.
    // Events are applied as-is; redelivered events are not deduplicated.
    pub fn handle_webhook(&self, payload: &str, signature: &str) -> Result<(), ApiError> {
        self.verify_signature(payload, signature)?;

        let event: WebhookEvent = serde_json::from_str(payload)
            .map_err(|err| ApiError::Webhook(format!("malformed event payload: {err}")))?;

        match event.event_type.as_str() {
            "checkout.session.completed" => self.handle_checkout_completed(event.data.object),
            "customer.subscription.deleted" => {
                tracing::info!(session = ?event.data.object.id, "subscription canceled");
                Ok(())
            }
            "customer.subscription.updated" => {
                tracing::info!(session = ?event.data.object.id, "subscription updated");
                Ok(())
            }
            other => {
                tracing::debug!(event_type = other, "ignoring unhandled webhook event");
                Ok(())
            }
        }
    }

    fn handle_checkout_completed(&self, object: WebhookObject) -> Result<(), ApiError> {
        let user_id = object.client_reference_id.or(object.metadata.user_id);

        let (Some(user_id), Some(tier)) = (user_id, object.metadata.tier) else {
            tracing::warn!("checkout.session.completed without user or tier metadata");
            return Ok(());
        };

        let api_key = self.api_keys.generate_api_key(&user_id, tier);
        tracing::info!(
            user_id = %api_key.user_id,
            tier = %api_key.tier,
            "API key generated from completed checkout"
        );
        Ok(())
    }

    pub fn sign(&self, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn verify_signature(&self, payload: &str, signature: &str) -> Result<(), ApiError> {
        let provided = hex::decode(signature.trim())
            .map_err(|_| ApiError::Webhook("signature is not valid hex".to_string()))?;

        let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac.verify_slice(&provided)
            .map_err(|_| ApiError::Webhook("signature mismatch".to_string()))
    }
}
