//! OpenSSL-based cryptographic operations.

mod aead;
mod block_cipher;
mod key_agreement;

/// Crypto backend using the OpenSSL library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpensslBackend;
