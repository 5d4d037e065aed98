//! Shared mock collaborators for the application test suite

use async_trait::async_trait;
use mre_domain::error::{Error, Result};
use mre_domain::ports::infrastructure::catalog::{CatalogReader, CatalogSnapshot};
use mre_domain::ports::infrastructure::credentials::CredentialStore;
use mre_domain::ports::infrastructure::routing::{
    HealthSnapshot, HealthTracker, ProviderHealthStatus, RateLimiter, SessionAffinity,
};
use mre_domain::ports::infrastructure::usage::UsageSink;
use mre_domain::ports::providers::crypto::{CryptoProvider, EncryptedData};
use mre_domain::ports::providers::upstream::{UpstreamClient, UpstreamResponse};
use mre_domain::value_objects::{
    ChatMessage, CompletionRequest, ErrorClass, ModelSpec, PowerLevel, Provider, ProviderType,
    ResolvedCredential, TokenUsage, UsageRecord,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Builders
// ============================================================================

pub fn provider(name: &str, provider_type: ProviderType) -> Provider {
    Provider::new(name, provider_type, "https://api.example.test")
}

pub fn provider_with_operator_key(name: &str, provider_type: ProviderType) -> Provider {
    provider(name, provider_type)
        .with_operator_credential(EncryptedData::new(b"op-secret".to_vec(), Vec::new()))
}

#[allow(clippy::too_many_arguments)]
pub fn model(
    id: &str,
    provider: &str,
    input_cost: f64,
    output_cost: f64,
    context_length: u32,
    latency_ms: f64,
    quality: f64,
) -> ModelSpec {
    ModelSpec {
        id: id.to_string(),
        provider: provider.to_string(),
        input_cost_per_1k: input_cost,
        output_cost_per_1k: output_cost,
        context_length,
        avg_latency_ms: latency_ms,
        quality,
        enabled: true,
    }
}

pub fn request() -> CompletionRequest {
    CompletionRequest::new(vec![ChatMessage::user("ping")], 100)
}

pub fn snapshot(providers: Vec<Provider>, models: Vec<ModelSpec>) -> CatalogSnapshot {
    CatalogSnapshot {
        providers,
        models,
        ..CatalogSnapshot::empty()
    }
}

// ============================================================================
// Crypto and credential store
// ============================================================================

/// Identity "cipher" for tests; ciphertext beginning with `corrupt` fails
/// integrity checks.
pub struct PlainCrypto;

impl CryptoProvider for PlainCrypto {
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData> {
        Ok(EncryptedData::new(plaintext.to_vec(), Vec::new()))
    }

    fn decrypt(&self, encrypted_data: &EncryptedData) -> Result<Vec<u8>> {
        if encrypted_data.ciphertext.starts_with(b"corrupt") {
            return Err(Error::crypto("Decryption failed: aead error"));
        }
        Ok(encrypted_data.ciphertext.clone())
    }

    fn cipher_name(&self) -> &str {
        "plaintext"
    }
}

#[derive(Default)]
pub struct MapCredentialStore {
    creds: Mutex<HashMap<(String, ProviderType), EncryptedData>>,
    fail_types: Mutex<HashSet<ProviderType>>,
}

impl MapCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_plain(&self, user_id: &str, provider_type: ProviderType, secret: &str) {
        self.creds.lock().unwrap().insert(
            (user_id.to_string(), provider_type),
            EncryptedData::new(secret.as_bytes().to_vec(), Vec::new()),
        );
    }

    pub fn insert_corrupt(&self, user_id: &str, provider_type: ProviderType) {
        self.creds.lock().unwrap().insert(
            (user_id.to_string(), provider_type),
            EncryptedData::new(b"corrupt-blob".to_vec(), Vec::new()),
        );
    }

    pub fn fail_on(&self, provider_type: ProviderType) {
        self.fail_types.lock().unwrap().insert(provider_type);
    }
}

#[async_trait]
impl CredentialStore for MapCredentialStore {
    async fn get_encrypted(
        &self,
        user_id: &str,
        provider_type: ProviderType,
    ) -> Result<Option<EncryptedData>> {
        if self.fail_types.lock().unwrap().contains(&provider_type) {
            return Err(Error::infrastructure("credential store offline"));
        }
        Ok(self
            .creds
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), provider_type))
            .cloned())
    }
}

// ============================================================================
// Health, affinity, rate limiting
// ============================================================================

/// Health tracker double: transient failures open a cooldown immediately,
/// successes clear it, every write is recorded for assertions.
#[derive(Default)]
pub struct TestHealthTracker {
    cooldowns: Mutex<HashSet<String>>,
    successes: Mutex<Vec<(String, u64)>>,
    failures: Mutex<Vec<(String, ErrorClass)>>,
}

impl TestHealthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cooldown(&self, provider: &str) {
        self.cooldowns.lock().unwrap().insert(provider.to_string());
    }

    pub fn failures(&self) -> Vec<(String, ErrorClass)> {
        self.failures.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<(String, u64)> {
        self.successes.lock().unwrap().clone()
    }
}

impl HealthTracker for TestHealthTracker {
    fn record_success(&self, provider: &str, latency_ms: u64) {
        self.cooldowns.lock().unwrap().remove(provider);
        self.successes
            .lock()
            .unwrap()
            .push((provider.to_string(), latency_ms));
    }

    fn record_failure(&self, provider: &str, class: ErrorClass) {
        if class.is_transient() {
            self.cooldowns.lock().unwrap().insert(provider.to_string());
        }
        self.failures
            .lock()
            .unwrap()
            .push((provider.to_string(), class));
    }

    fn snapshot(&self, provider: &str) -> HealthSnapshot {
        let status = if self.cooldowns.lock().unwrap().contains(provider) {
            ProviderHealthStatus::Degraded
        } else {
            ProviderHealthStatus::Unknown
        };
        HealthSnapshot {
            status,
            ..HealthSnapshot::default()
        }
    }

    fn in_cooldown(&self, provider: &str) -> bool {
        self.cooldowns.lock().unwrap().contains(provider)
    }

    fn all_statuses(&self) -> HashMap<String, ProviderHealthStatus> {
        HashMap::new()
    }
}

#[derive(Default)]
pub struct MapAffinity {
    bindings: Mutex<HashMap<String, String>>,
}

impl MapAffinity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, conversation_id: &str, provider: &str) {
        self.bindings
            .lock()
            .unwrap()
            .insert(conversation_id.to_string(), provider.to_string());
    }
}

impl SessionAffinity for MapAffinity {
    fn bound_provider(&self, conversation_id: &str) -> Option<String> {
        self.bindings.lock().unwrap().get(conversation_id).cloned()
    }

    fn bind(&self, conversation_id: &str, provider: &str) {
        self.bindings
            .lock()
            .unwrap()
            .insert(conversation_id.to_string(), provider.to_string());
    }

    fn forget(&self, conversation_id: &str) {
        self.bindings.lock().unwrap().remove(conversation_id);
    }
}

pub struct AllowAll;

impl RateLimiter for AllowAll {
    fn try_acquire(&self, _user_id: &str, _level: PowerLevel) -> bool {
        true
    }
}

pub struct DenyAll;

impl RateLimiter for DenyAll {
    fn try_acquire(&self, _user_id: &str, _level: PowerLevel) -> bool {
        false
    }
}

// ============================================================================
// Catalog reader and usage sink
// ============================================================================

pub struct FixedCatalog {
    snapshot: Arc<CatalogSnapshot>,
}

impl FixedCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

impl CatalogReader for FixedCatalog {
    fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.snapshot)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<UsageRecord>>,
    fail: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_appends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<UsageRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl UsageSink for RecordingSink {
    async fn append(&self, record: UsageRecord) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::infrastructure("usage sink offline"));
        }
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

// ============================================================================
// Scripted upstream
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum ScriptedOutcome {
    /// Return a successful response with this latency
    Succeed(u64),
    /// Fail with the given classification
    Fail(ErrorClass),
    /// Never answer; only timeouts or cancellation end the attempt
    Hang,
}

/// Upstream double driven by per-provider outcome queues
#[derive(Default)]
pub struct ScriptedUpstream {
    script: Mutex<HashMap<String, VecDeque<ScriptedOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, provider: &str, outcomes: Vec<ScriptedOutcome>) {
        self.script
            .lock()
            .unwrap()
            .insert(provider.to_string(), outcomes.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for ScriptedUpstream {
    async fn complete(
        &self,
        provider: &Provider,
        model: &ModelSpec,
        _credential: &ResolvedCredential,
        _request: &CompletionRequest,
        _timeout: Duration,
    ) -> Result<UpstreamResponse> {
        self.calls.lock().unwrap().push(provider.name.clone());
        let outcome = self
            .script
            .lock()
            .unwrap()
            .get_mut(&provider.name)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted outcome for provider '{}'", provider.name));
        match outcome {
            ScriptedOutcome::Succeed(latency_ms) => Ok(UpstreamResponse {
                content: format!("reply from {}", model.id),
                usage: TokenUsage::new(100, 50),
                latency_ms,
            }),
            ScriptedOutcome::Fail(class) => Err(Error::upstream(
                &provider.name,
                class,
                "scripted failure",
            )),
            ScriptedOutcome::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(Error::upstream(
                    &provider.name,
                    ErrorClass::Timeout,
                    "hang elapsed",
                ))
            }
        }
    }
}
