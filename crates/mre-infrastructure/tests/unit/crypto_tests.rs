//! Unit tests for the AES-GCM crypto service

use base64::Engine as _;
use mre_domain::ports::providers::crypto::{CryptoProvider, EncryptedData};
use mre_infrastructure::crypto::CryptoService;

#[test]
fn test_encrypt_decrypt_round_trip() {
    let service = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    let encrypted = service.encrypt(b"sk-super-secret").expect("encrypts");
    assert_ne!(encrypted.ciphertext, b"sk-super-secret".to_vec());
    let decrypted = service.decrypt(&encrypted).expect("decrypts");
    assert_eq!(decrypted, b"sk-super-secret");
}

#[test]
fn test_nonces_are_unique_per_encryption() {
    let service = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    let a = service.encrypt(b"same plaintext").expect("encrypts");
    let b = service.encrypt(b"same plaintext").expect("encrypts");
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn test_wrong_key_fails_decryption() {
    let alice = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    let mallory = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    let encrypted = alice.encrypt(b"secret").expect("encrypts");
    assert!(mallory.decrypt(&encrypted).is_err());
}

#[test]
fn test_tampered_ciphertext_fails_authentication() {
    let service = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    let mut encrypted = service.encrypt(b"secret").expect("encrypts");
    encrypted.ciphertext[0] ^= 0xFF;
    assert!(service.decrypt(&encrypted).is_err());
}

#[test]
fn test_invalid_key_size_rejected() {
    assert!(CryptoService::new(vec![0u8; 16]).is_err());
    assert!(CryptoService::new(Vec::new()).is_err());
}

#[test]
fn test_invalid_nonce_size_rejected() {
    let service = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    let bogus = EncryptedData::new(vec![1, 2, 3], vec![0u8; 4]);
    assert!(service.decrypt(&bogus).is_err());
}

#[test]
fn test_from_base64_key() {
    let key = CryptoService::generate_master_key();
    let key_b64 = base64::engine::general_purpose::STANDARD.encode(&key);
    let service = CryptoService::from_base64_key(&key_b64).expect("valid key");
    let encrypted = service.encrypt(b"secret").expect("encrypts");
    assert_eq!(service.decrypt(&encrypted).expect("decrypts"), b"secret");
}

#[test]
fn test_from_base64_key_rejects_garbage() {
    assert!(CryptoService::from_base64_key("not-base64!!!").is_err());
}

#[test]
fn test_encrypted_data_base64_round_trip() {
    let data = EncryptedData::new(vec![1, 2, 3, 4], vec![9, 9, 9]);
    let (ciphertext_b64, nonce_b64) = data.to_base64();
    let decoded = EncryptedData::from_base64(&ciphertext_b64, &nonce_b64).expect("decodes");
    assert_eq!(decoded, data);
}

#[test]
fn test_cipher_name() {
    let service = CryptoService::new(CryptoService::generate_master_key()).expect("valid key");
    assert_eq!(service.cipher_name(), "aes-256-gcm");
}
