use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::models::{ApiKey, SubscriptionTier};

const KEY_PREFIX: &str = "proclubs";

// In-memory credential store. Cloning hands out another handle to the
// same map, so every service and middleware sees one set of keys.
#[derive(Clone, Default)]
pub struct ApiKeyService {
    keys: Arc<Mutex<HashMap<String, ApiKey>>>,
}

impl ApiKeyService {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // Generate a 160-bit API key with the tier embedded as a readable segment
    pub fn generate_api_key(&self, user_id: &str, tier: SubscriptionTier) -> ApiKey {
        let mut rng = rand::thread_rng();
        let mut random_bytes = [0u8; 20];
        rng.fill(&mut random_bytes);

        // Checksum: first 4 bytes of SHA256 over prefix, tier and payload
        let mut hasher = Sha256::new();
        hasher.update(KEY_PREFIX.as_bytes());
        hasher.update(tier.as_str().as_bytes());
        hasher.update(random_bytes);
        let checksum = hasher.finalize();

        let key = format!(
            "{}_{}_{}_{}",
            KEY_PREFIX,
            tier.as_str(),
            base32::encode(base32::Alphabet::RFC4648 { padding: false }, &random_bytes),
            base32::encode(base32::Alphabet::RFC4648 { padding: false }, &checksum[..4]),
        );

        let api_key = ApiKey {
            key: key.clone(),
            tier,
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            is_active: true,
            request_count: 0,
            last_used: None,
        };

        self.keys.lock().unwrap().insert(key, api_key.clone());
        api_key
    }

    // Returns the credential only when it exists and is active. Unknown
    // and deactivated keys are indistinguishable to the caller.
    pub fn validate_api_key(&self, key: &str) -> Option<ApiKey> {
        let keys = self.keys.lock().unwrap();
        match keys.get(key) {
            Some(api_key) if api_key.is_active => Some(api_key.clone()),
            _ => None,
        }
    }

    pub fn increment_request_count(&self, key: &str) {
        let mut keys = self.keys.lock().unwrap();
        if let Some(api_key) = keys.get_mut(key) {
            api_key.request_count += 1;
            api_key.last_used = Some(Utc::now());
        }
    }

    // Deactivation is permanent; there is no reactivation path.
    pub fn deactivate_api_key(&self, key: &str) -> bool {
        let mut keys = self.keys.lock().unwrap();
        match keys.get_mut(key) {
            Some(api_key) => {
                api_key.is_active = false;
                true
            }
            None => false,
        }
    }

    pub fn upgrade_subscription(&self, key: &str, new_tier: SubscriptionTier) -> bool {
        let mut keys = self.keys.lock().unwrap();
        match keys.get_mut(key) {
            Some(api_key) => {
                api_key.tier = new_tier;
                true
            }
            None => false,
        }
    }

    pub fn get_api_key_info(&self, key: &str) -> Option<ApiKey> {
        self.keys.lock().unwrap().get(key).cloned()
    }

    pub fn list_api_keys(&self) -> Vec<ApiKey> {
        self.keys.lock().unwrap().values().cloned().collect()
    }
}
