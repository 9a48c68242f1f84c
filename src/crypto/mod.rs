//! Capabilities the algorithms of this crate need from a crypto library.
//!
//! CMAC, the key derivation and the S0 MAC are written against these traits only,
//! so a backend can be swapped without touching them. The backend is selected with
//! the cargo features `rust-crypto` (default) and `openssl`.

pub mod aead;
pub mod block_cipher;
pub mod key_agreement;

pub use aead::AeadCipher;
pub use block_cipher::{BlockCipher, CipherMode};
pub use key_agreement::KeyAgreement;

cfg_if::cfg_if! {
if #[cfg(all(feature = "rust-crypto", not(feature = "openssl")))] {
    mod rust_crypto;
    /// Crypto backend selected at compile time.
    pub type Backend = rust_crypto::RustCryptoBackend;
}
else if #[cfg(all(feature = "openssl", not(feature = "rust-crypto")))] {
    mod openssl;
    /// Crypto backend selected at compile time.
    pub type Backend = openssl::OpensslBackend;
} else if #[cfg(all(feature = "openssl", feature = "rust-crypto"))] {
    compile_error!("Cannot configure multiple crypto backends at the same time.");
    mod rust_crypto;
    pub type Backend = rust_crypto::RustCryptoBackend;
} else {
    compile_error!("No crypto backend configured, enable either `rust-crypto` or `openssl`.");
}
}
