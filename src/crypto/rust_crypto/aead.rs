//! AES-128-CCM implementation for RustCrypto backend.

use super::RustCryptoBackend;
use crate::{
    crypto::aead::{AeadCipher, CcmDecrypted, CcmEncrypted},
    error::{Result, SecurityError},
};
use aes::Aes128;
use ccm::{
    aead::{
        consts::{U10, U11, U12, U13, U14, U16, U4, U6, U7, U8, U9},
        generic_array::{ArrayLength, GenericArray},
        AeadInPlace, KeyInit,
    },
    Ccm, NonceSize, TagSize,
};

// `Ccm` fixes nonce and tag size at the type level, so each supported runtime
// length is mapped onto its own instantiation
macro_rules! with_tag_size {
    ($tag_len:expr, $nonce:ty, $func:ident($($arg:expr),*)) => {
        match $tag_len {
            4 => $func::<U4, $nonce>($($arg),*),
            6 => $func::<U6, $nonce>($($arg),*),
            8 => $func::<U8, $nonce>($($arg),*),
            10 => $func::<U10, $nonce>($($arg),*),
            12 => $func::<U12, $nonce>($($arg),*),
            14 => $func::<U14, $nonce>($($arg),*),
            16 => $func::<U16, $nonce>($($arg),*),
            len => Err(SecurityError::invalid_buffer("CCM tag", len)),
        }
    };
}

macro_rules! with_ccm_sizes {
    ($nonce_len:expr, $tag_len:expr, $func:ident($($arg:expr),*)) => {
        match $nonce_len {
            7 => with_tag_size!($tag_len, U7, $func($($arg),*)),
            8 => with_tag_size!($tag_len, U8, $func($($arg),*)),
            9 => with_tag_size!($tag_len, U9, $func($($arg),*)),
            10 => with_tag_size!($tag_len, U10, $func($($arg),*)),
            11 => with_tag_size!($tag_len, U11, $func($($arg),*)),
            12 => with_tag_size!($tag_len, U12, $func($($arg),*)),
            13 => with_tag_size!($tag_len, U13, $func($($arg),*)),
            len => Err(SecurityError::invalid_buffer("CCM nonce", len)),
        }
    };
}

impl AeadCipher for RustCryptoBackend {
    fn seal_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
        tag_len: usize,
    ) -> Result<CcmEncrypted> {
        with_ccm_sizes!(
            nonce.len(),
            tag_len,
            seal_in_place_detached(key, nonce, plaintext, aad)
        )
    }

    fn open_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
        tag: &[u8],
    ) -> Result<CcmDecrypted> {
        with_ccm_sizes!(
            nonce.len(),
            tag.len(),
            open_in_place_detached(key, nonce, ciphertext, aad, tag)
        )
    }
}

fn seal_in_place_detached<M, N>(
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<CcmEncrypted>
where
    M: ArrayLength<u8> + TagSize,
    N: ArrayLength<u8> + NonceSize,
{
    let algo = Ccm::<Aes128, M, N>::new_from_slice(key).map_err(|err| {
        log::debug!("Invalid CCM key: {err}");
        SecurityError::EncryptionFailure
    })?;

    let mut buffer = plaintext.to_vec();
    let tag = algo
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, &mut buffer)
        .map_err(|err| {
            log::debug!("Encryption failed: {err}");
            SecurityError::EncryptionFailure
        })?;

    Ok(CcmEncrypted {
        ciphertext: buffer,
        auth_tag: tag.to_vec(),
    })
}

fn open_in_place_detached<M, N>(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<CcmDecrypted>
where
    M: ArrayLength<u8> + TagSize,
    N: ArrayLength<u8> + NonceSize,
{
    let algo = Ccm::<Aes128, M, N>::new_from_slice(key).map_err(|err| {
        log::debug!("Invalid CCM key: {err}");
        SecurityError::DecryptionFailure
    })?;

    let mut buffer = ciphertext.to_vec();
    let auth_ok = match algo.decrypt_in_place_detached(
        GenericArray::from_slice(nonce),
        aad,
        &mut buffer,
        GenericArray::from_slice(tag),
    ) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("CCM authentication failed: {err}");
            buffer.fill(0);
            false
        }
    };

    Ok(CcmDecrypted {
        plaintext: buffer,
        auth_ok,
    })
}
