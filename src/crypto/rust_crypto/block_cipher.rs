use super::RustCryptoBackend;
use crate::{
    constants::BLOCK_SIZE,
    crypto::block_cipher::{BlockCipher, CipherMode},
    error::{Result, SecurityError},
};
use aes::Aes128;
use cipher::{
    block_padding::NoPadding, generic_array::GenericArray, BlockDecrypt, BlockDecryptMut,
    BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher, StreamCipherError,
};

impl BlockCipher for RustCryptoBackend {
    fn encrypt(&self, mode: CipherMode, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = data.to_vec();
        match mode {
            CipherMode::Ecb => {
                let aes = Aes128::new_from_slice(key).map_err(encryption_failure)?;
                buffer
                    .chunks_exact_mut(BLOCK_SIZE)
                    .for_each(|block| aes.encrypt_block(GenericArray::from_mut_slice(block)));
            }
            CipherMode::Ofb => apply_ofb(key, iv, &mut buffer).map_err(encryption_failure)?,
            CipherMode::Cbc => {
                let len = buffer.len();
                cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
                    .map_err(encryption_failure)?
                    .encrypt_padded_mut::<NoPadding>(&mut buffer, len)
                    .map_err(encryption_failure)?;
            }
        }

        Ok(buffer)
    }

    fn decrypt(&self, mode: CipherMode, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut buffer = data.to_vec();
        match mode {
            CipherMode::Ecb => {
                let aes = Aes128::new_from_slice(key).map_err(decryption_failure)?;
                buffer
                    .chunks_exact_mut(BLOCK_SIZE)
                    .for_each(|block| aes.decrypt_block(GenericArray::from_mut_slice(block)));
            }
            CipherMode::Ofb => apply_ofb(key, iv, &mut buffer).map_err(decryption_failure)?,
            CipherMode::Cbc => {
                cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
                    .map_err(decryption_failure)?
                    .decrypt_padded_mut::<NoPadding>(&mut buffer)
                    .map_err(decryption_failure)?;
            }
        }

        Ok(buffer)
    }
}

// OFB is symmetric, encryption and decryption apply the same keystream
fn apply_ofb(
    key: &[u8],
    iv: &[u8],
    buffer: &mut [u8],
) -> std::result::Result<(), StreamCipherError> {
    let Ok(mut cipher) = ofb::Ofb::<Aes128>::new_from_slices(key, iv) else {
        return Err(StreamCipherError);
    };
    cipher.try_apply_keystream(buffer)
}

fn encryption_failure<E: std::fmt::Debug>(err: E) -> SecurityError {
    log::debug!("AES encryption failed: {err:?}");
    SecurityError::EncryptionFailure
}

fn decryption_failure<E: std::fmt::Debug>(err: E) -> SecurityError {
    log::debug!("AES decryption failed: {err:?}");
    SecurityError::DecryptionFailure
}
