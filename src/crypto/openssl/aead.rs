use super::OpensslBackend;
use crate::{
    crypto::aead::{AeadCipher, CcmDecrypted, CcmEncrypted},
    error::{Result, SecurityError},
};
use openssl::symm::Cipher;

impl AeadCipher for OpensslBackend {
    fn seal_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
        tag_len: usize,
    ) -> Result<CcmEncrypted> {
        let mut auth_tag = vec![0; tag_len];
        let ciphertext = openssl::symm::encrypt_aead(
            Cipher::aes_128_ccm(),
            key,
            Some(nonce),
            aad,
            plaintext,
            &mut auth_tag,
        )
        .map_err(|err| {
            log::debug!("Encryption failed, OpenSSL error stack: {err}");
            SecurityError::EncryptionFailure
        })?;

        Ok(CcmEncrypted {
            ciphertext,
            auth_tag,
        })
    }

    fn open_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
        tag: &[u8],
    ) -> Result<CcmDecrypted> {
        // OpenSSL verifies the tag in constant time and withholds the plaintext on mismatch
        let decrypted = openssl::symm::decrypt_aead(
            Cipher::aes_128_ccm(),
            key,
            Some(nonce),
            aad,
            ciphertext,
            tag,
        );

        let result = match decrypted {
            Ok(plaintext) => CcmDecrypted {
                plaintext,
                auth_ok: true,
            },
            Err(err) => {
                log::debug!("CCM authentication failed, OpenSSL error stack: {err}");
                CcmDecrypted {
                    plaintext: vec![0; ciphertext.len()],
                    auth_ok: false,
                }
            }
        };

        Ok(result)
    }
}
