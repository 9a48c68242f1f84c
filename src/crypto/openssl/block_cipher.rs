use super::OpensslBackend;
use crate::{
    crypto::block_cipher::{BlockCipher, CipherMode},
    error::{Result, SecurityError},
};
use openssl::symm::{Cipher, Crypter, Mode};

impl BlockCipher for OpensslBackend {
    fn encrypt(&self, mode: CipherMode, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        crypt(mode, Mode::Encrypt, key, iv, data).map_err(|err| {
            log::debug!("Encryption failed, OpenSSL error stack: {err}");
            SecurityError::EncryptionFailure
        })
    }

    fn decrypt(&self, mode: CipherMode, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        crypt(mode, Mode::Decrypt, key, iv, data).map_err(|err| {
            log::debug!("Decryption failed, OpenSSL error stack: {err}");
            SecurityError::DecryptionFailure
        })
    }
}

fn crypt(
    mode: CipherMode,
    direction: Mode,
    key: &[u8],
    iv: &[u8],
    data: &[u8],
) -> std::result::Result<Vec<u8>, openssl::error::ErrorStack> {
    let cipher = Cipher::from(mode);
    let iv = mode.iv_len().map(|_| iv);

    let mut crypter = Crypter::new(cipher, direction, key, iv)?;
    // the input is zero padded by the caller already
    crypter.pad(false);

    let mut out = vec![0; data.len() + cipher.block_size()];
    let count = crypter.update(data, &mut out)?;
    let rest = crypter.finalize(&mut out[count..])?;
    out.truncate(count + rest);

    Ok(out)
}

impl From<CipherMode> for Cipher {
    fn from(mode: CipherMode) -> Self {
        match mode {
            CipherMode::Ecb => Cipher::aes_128_ecb(),
            CipherMode::Ofb => Cipher::aes_128_ofb(),
            CipherMode::Cbc => Cipher::aes_128_cbc(),
        }
    }
}
