//! Unit tests for credential resolution

use crate::support::{provider, provider_with_operator_key, MapCredentialStore, PlainCrypto};
use mre_application::use_cases::credentials::CredentialResolver;
use mre_domain::value_objects::{CredentialOrigin, ProviderType};
use std::sync::Arc;

fn resolver(store: Arc<MapCredentialStore>) -> CredentialResolver {
    CredentialResolver::new(store, Arc::new(PlainCrypto))
}

#[tokio::test]
async fn test_user_credential_preferred_over_operator() {
    let store = Arc::new(MapCredentialStore::new());
    store.insert_plain("user-1", ProviderType::OpenAi, "sk-user");
    let resolver = resolver(Arc::clone(&store));
    let provider = provider_with_operator_key("p1", ProviderType::OpenAi);

    let resolved = resolver
        .resolve("user-1", &provider)
        .await
        .expect("resolution never errors")
        .expect("credential expected");
    assert_eq!(resolved.secret, "sk-user");
    assert_eq!(resolved.origin, CredentialOrigin::User);
}

#[tokio::test]
async fn test_operator_fallback_when_user_has_no_key() {
    let store = Arc::new(MapCredentialStore::new());
    let resolver = resolver(store);
    let provider = provider_with_operator_key("p1", ProviderType::OpenAi);

    let resolved = resolver
        .resolve("user-1", &provider)
        .await
        .expect("resolution never errors")
        .expect("operator credential expected");
    assert_eq!(resolved.secret, "op-secret");
    assert_eq!(resolved.origin, CredentialOrigin::Operator);
}

#[tokio::test]
async fn test_no_credential_anywhere_yields_none() {
    let store = Arc::new(MapCredentialStore::new());
    let resolver = resolver(store);
    let provider = provider("p1", ProviderType::OpenAi);

    let resolved = resolver.resolve("user-1", &provider).await.expect("ok");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn test_corrupt_user_credential_does_not_fall_back_to_operator() {
    let store = Arc::new(MapCredentialStore::new());
    store.insert_corrupt("user-1", ProviderType::OpenAi);
    let resolver = resolver(store);
    let provider = provider_with_operator_key("p1", ProviderType::OpenAi);

    // BYOK traffic must not silently shift onto the operator account
    let resolved = resolver.resolve("user-1", &provider).await.expect("ok");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn test_corrupt_operator_credential_yields_none() {
    let store = Arc::new(MapCredentialStore::new());
    let resolver = resolver(store);
    let provider = provider("p1", ProviderType::OpenAi).with_operator_credential(
        mre_domain::ports::providers::crypto::EncryptedData::new(
            b"corrupt-op".to_vec(),
            Vec::new(),
        ),
    );

    let resolved = resolver.resolve("user-1", &provider).await.expect("ok");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn test_store_failure_disqualifies_candidate() {
    let store = Arc::new(MapCredentialStore::new());
    store.fail_on(ProviderType::OpenAi);
    let resolver = resolver(store);
    let provider = provider_with_operator_key("p1", ProviderType::OpenAi);

    let resolved = resolver.resolve("user-1", &provider).await.expect("ok");
    assert!(resolved.is_none());
}

#[tokio::test]
async fn test_available_types_reflects_store_contents() {
    let store = Arc::new(MapCredentialStore::new());
    store.insert_plain("user-1", ProviderType::OpenAi, "sk-a");
    store.insert_plain("user-1", ProviderType::Google, "sk-b");
    store.insert_plain("user-2", ProviderType::Anthropic, "sk-c");
    let resolver = resolver(store);

    let available = resolver.available_types("user-1").await;
    assert!(available.contains(&ProviderType::OpenAi));
    assert!(available.contains(&ProviderType::Google));
    assert!(!available.contains(&ProviderType::Anthropic));
}
