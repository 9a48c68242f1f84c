//! AES-128 block cipher wrappers with zero padding, and the Security S0 MAC.
//!
//! Inputs which are not block aligned are zero padded before they reach the cipher.
//! For stream modes (OFB) the output is cut back to the input length, so callers
//! never see the padding.

use crate::{
    constants::{Block, AES128_KEY_LEN, BLOCK_SIZE, Z128},
    crypto::{Backend, BlockCipher, CipherMode},
    error::{check_key_len, Result, SecurityError},
    util::zero_pad,
};

/// length of the truncated Security S0 MAC
pub const S0_MAC_LEN: usize = 8;

/// Block cipher primitives of the security layers, available for every [`BlockCipher`].
pub trait BlockPrimitives: BlockCipher {
    /// Encrypts a single block using AES-128-ECB.
    fn encrypt_aes128_ecb(&self, plaintext: &Block, key: &[u8]) -> Result<Block> {
        check_key_len(key, AES128_KEY_LEN)?;
        self.encrypt_block(key, plaintext)
    }

    /// Decrypts a single block using AES-128-ECB.
    fn decrypt_aes128_ecb(&self, ciphertext: &Block, key: &[u8]) -> Result<Block> {
        check_key_len(key, AES128_KEY_LEN)?;
        self.decrypt_block(key, ciphertext)
    }

    /// Encrypts a payload of any length using AES-128-OFB.
    fn encrypt_aes128_ofb(&self, plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        encrypt_padded(self, CipherMode::Ofb, plaintext, key, iv)
    }

    /// Decrypts a payload of any length using AES-128-OFB.
    fn decrypt_aes128_ofb(&self, ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        decrypt_padded(self, CipherMode::Ofb, ciphertext, key, iv)
    }

    /// Computes the Security S0 message authentication code.
    ///
    /// `auth_data` is zero padded and run through AES-128-CBC, the MAC is the first
    /// [`S0_MAC_LEN`] bytes of the last ciphertext block.
    fn compute_mac(&self, auth_data: &[u8], key: &[u8], iv: &[u8]) -> Result<[u8; S0_MAC_LEN]> {
        if auth_data.is_empty() {
            return Err(SecurityError::invalid_buffer("S0 auth data", 0));
        }

        let ciphertext = encrypt_padded(self, CipherMode::Cbc, auth_data, key, iv)?;
        let last_block = ciphertext
            .len()
            .checked_sub(BLOCK_SIZE)
            .and_then(|start| ciphertext.get(start..start + S0_MAC_LEN))
            .ok_or(SecurityError::EncryptionFailure)?;

        let mut mac = [0u8; S0_MAC_LEN];
        mac.copy_from_slice(last_block);
        Ok(mac)
    }
}

impl<T> BlockPrimitives for T where T: BlockCipher + ?Sized {}

fn encrypt_padded<C>(
    cipher: &C,
    mode: CipherMode,
    input: &[u8],
    key: &[u8],
    iv: &[u8],
) -> Result<Vec<u8>>
where
    C: BlockCipher + ?Sized,
{
    mode.check_params(key, iv)?;
    let padded = zero_pad(input, mode.block_size());
    let mut output = cipher.encrypt(mode, key, iv, &padded.output)?;
    if mode.trims_to_input_len() {
        output.truncate(output.len().saturating_sub(padded.padding_len));
    }
    Ok(output)
}

fn decrypt_padded<C>(
    cipher: &C,
    mode: CipherMode,
    input: &[u8],
    key: &[u8],
    iv: &[u8],
) -> Result<Vec<u8>>
where
    C: BlockCipher + ?Sized,
{
    mode.check_params(key, iv)?;
    let padded = zero_pad(input, mode.block_size());
    let mut output = cipher.decrypt(mode, key, iv, &padded.output)?;
    if mode.trims_to_input_len() {
        output.truncate(output.len().saturating_sub(padded.padding_len));
    }
    Ok(output)
}

/// Encrypts a single block using AES-128-ECB (as described in SDS10865).
pub fn encrypt_aes128_ecb(plaintext: &Block, key: &[u8]) -> Result<Block> {
    Backend::default().encrypt_aes128_ecb(plaintext, key)
}

/// Decrypts a single block using AES-128-ECB.
pub fn decrypt_aes128_ecb(ciphertext: &Block, key: &[u8]) -> Result<Block> {
    Backend::default().decrypt_aes128_ecb(ciphertext, key)
}

/// Encrypts a payload using AES-128-OFB (as described in SDS10865).
pub fn encrypt_aes128_ofb(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    Backend::default().encrypt_aes128_ofb(plaintext, key, iv)
}

/// Decrypts a payload using AES-128-OFB (as described in SDS10865).
pub fn decrypt_aes128_ofb(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    Backend::default().decrypt_aes128_ofb(ciphertext, key, iv)
}

/// Computes the Security S0 MAC with an all zero IV (as described in SDS10865).
pub fn compute_mac(auth_data: &[u8], key: &[u8]) -> Result<[u8; S0_MAC_LEN]> {
    compute_mac_with_iv(auth_data, key, &Z128)
}

/// Computes the Security S0 MAC with the given IV.
pub fn compute_mac_with_iv(auth_data: &[u8], key: &[u8], iv: &[u8]) -> Result<[u8; S0_MAC_LEN]> {
    Backend::default().compute_mac(auth_data, key, iv)
}
