//! RustCrypto-based cryptographic operations.
//!
//! This module uses pure Rust implementations from the RustCrypto project
//! and `x25519-dalek` for the key agreement.

mod aead;
mod block_cipher;
mod key_agreement;

/// Crypto backend using RustCrypto libraries.
///
/// Supports all cipher modes, AES-CCM with every nonce and tag length and X25519.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RustCryptoBackend;
