//! AES-128-CCM authenticated encryption of Security S2 payloads.
//!
//! A frame which fails authentication is reported through [`CcmDecrypted::auth_ok`]
//! so the caller can drop it instead of handling an error.

use crate::{
    crypto::{aead::check_ccm_params, AeadCipher, Backend},
    error::Result,
};

pub use crate::crypto::aead::{CcmDecrypted, CcmEncrypted};

/// Parameter checked AES-128-CCM, available for every [`AeadCipher`].
pub trait AuthenticatedEncryption: AeadCipher {
    /// Encrypts `plaintext` and authenticates it together with `additional_data`.
    fn encrypt_aes128_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        additional_data: &[u8],
        auth_tag_len: usize,
    ) -> Result<CcmEncrypted> {
        check_ccm_params(key, nonce, auth_tag_len)?;
        self.seal_ccm(key, nonce, plaintext, additional_data, auth_tag_len)
    }

    /// Decrypts `ciphertext` and verifies `auth_tag`.
    ///
    /// Errors are only returned for invalid parameters. A tag mismatch yields
    /// `auth_ok == false` with a zeroed plaintext.
    fn decrypt_aes128_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        additional_data: &[u8],
        auth_tag: &[u8],
    ) -> Result<CcmDecrypted> {
        check_ccm_params(key, nonce, auth_tag.len())?;
        let decrypted = self.open_ccm(key, nonce, ciphertext, additional_data, auth_tag)?;
        if !decrypted.auth_ok {
            log::debug!("Discarding CCM frame with invalid authentication tag");
        }
        Ok(decrypted)
    }
}

impl<T> AuthenticatedEncryption for T where T: AeadCipher + ?Sized {}

/// Encrypts a payload using AES-128-CCM.
pub fn encrypt_aes128_ccm(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    additional_data: &[u8],
    auth_tag_len: usize,
) -> Result<CcmEncrypted> {
    Backend::default().encrypt_aes128_ccm(key, nonce, plaintext, additional_data, auth_tag_len)
}

/// Decrypts a payload using AES-128-CCM and verifies its authentication tag.
pub fn decrypt_aes128_ccm(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    additional_data: &[u8],
    auth_tag: &[u8],
) -> Result<CcmDecrypted> {
    Backend::default().decrypt_aes128_ccm(key, nonce, ciphertext, additional_data, auth_tag)
}
