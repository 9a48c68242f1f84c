//! # Mesh network security primitives
//! This library implements the cryptographic building blocks of the two link layer security
//! schemes of a wireless mesh protocol, Security S0 (SDS10865) and Security S2 (SDS13783):
//!
//! - AES-128 ECB/OFB wrappers with zero padding and the S0 CBC-MAC, see [`block`]
//! - AES-128-CMAC as of NIST SP 800-38B, see [`cmac`]
//! - the S2 key derivation (PRK, temporary keys, network keys, MEI), see [`kdf`]
//! - X25519 raw key ⇄ DER conversion and key pair handling, see [`ecdh`]
//! - AES-128-CCM with detached authentication tags, see [`ccm`]
//!
//! Session handling, nonce management and key storage are left to the caller.
//!
//! # Optional features
//!
//! Using optional features `meshsec` allows to configure different crypto libraries.
//! Be aware that those features are mutually exlusive, if multiple are configured `meshsec` issues a compiler error.
//!
//! - **`rust-crypto`** *(enabled by default)*: uses the pure Rust implementations of the
//!   [RustCrypto](https://github.com/RustCrypto) project and [x25519-dalek](https://crates.io/crates/x25519-dalek),
//!   which allows compilation to Wasm32.
//! - **`openssl`**: uses the [rust-openssl](https://crates.io/crates/openssl) crate, which provides bindings to OpenSSL.
//!   Per default the OpenSSL library is locally compiled and then statically linked. The build process requires a C compiler,
//!   `perl` (and `perl-core`), and `make`. For further options see the [openssl crate documentation](https://docs.rs/openssl/0.10.55/openssl/).
//!
//! All algorithms are written against the traits in [`crypto`], their free functions use the
//! backend selected at compile time ([`crypto::Backend`]).

#![deny(clippy::missing_panics_doc)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
#![warn(
    missing_docs,
    clippy::doc_markdown,
    clippy::semicolon_if_nothing_returned,
    clippy::single_match_else,
    clippy::inconsistent_struct_constructor,
    clippy::map_unwrap_or,
    clippy::match_same_arms
)]

/// AES-128 block cipher wrappers and the Security S0 MAC
pub mod block;
/// AES-128-CCM authenticated encryption
pub mod ccm;
pub mod cmac;
/// protocol constants, see SDS13783
pub mod constants;
pub mod crypto;
pub mod ecdh;
/// error definitions
pub mod error;
pub mod kdf;
pub mod util;

pub use block::{
    compute_mac, compute_mac_with_iv, decrypt_aes128_ecb, decrypt_aes128_ofb, encrypt_aes128_ecb,
    encrypt_aes128_ofb,
};
pub use ccm::{decrypt_aes128_ccm, encrypt_aes128_ccm, CcmDecrypted, CcmEncrypted};
pub use cmac::compute_cmac;
pub use constants::SECURITY_S2_AUTH_TAG_LENGTH;
pub use error::{Result, SecurityError};
pub use kdf::{
    compute_nonce_prk, compute_prk, derive_mei, derive_network_keys, derive_temp_keys,
    NetworkKeys, TempKeys,
};
