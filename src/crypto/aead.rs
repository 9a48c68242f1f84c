use crate::{
    constants::{AES128_KEY_LEN, CCM_NONCE_LEN_RANGE, CCM_TAG_LENGTHS},
    error::{check_key_len, Result, SecurityError},
};

/// Output of an AES-128-CCM encryption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CcmEncrypted {
    /// encrypted payload, same length as the plaintext
    pub ciphertext: Vec<u8>,
    /// authentication tag of the requested length
    pub auth_tag: Vec<u8>,
}

/// Output of an AES-128-CCM decryption
///
/// If `auth_ok` is false the frame was tampered with or decrypted with the wrong
/// key/nonce. The plaintext is then zeroed and must be discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CcmDecrypted {
    /// decrypted payload
    pub plaintext: Vec<u8>,
    /// whether the authentication tag matched
    pub auth_ok: bool,
}

/// AES-128-CCM authenticated encryption.
///
/// Implementations may assume that key, nonce and tag length have been validated with
/// [`check_ccm_params`]. The tag comparison is left to the backend library.
pub trait AeadCipher {
    /// Encrypts `plaintext` and authenticates it together with `aad`.
    fn seal_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
        tag_len: usize,
    ) -> Result<CcmEncrypted>;

    /// Decrypts `ciphertext` and verifies `tag`.
    ///
    /// A tag mismatch must be reported through [`CcmDecrypted::auth_ok`], not as an error.
    fn open_ccm(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
        tag: &[u8],
    ) -> Result<CcmDecrypted>;
}

/// Validates the AES-128-CCM parameters shared by encryption and decryption.
pub fn check_ccm_params(key: &[u8], nonce: &[u8], tag_len: usize) -> Result<()> {
    check_key_len(key, AES128_KEY_LEN)?;
    if !CCM_NONCE_LEN_RANGE.contains(&nonce.len()) {
        return Err(SecurityError::invalid_buffer("CCM nonce", nonce.len()));
    }
    if !CCM_TAG_LENGTHS.contains(&tag_len) {
        return Err(SecurityError::invalid_buffer("CCM tag", tag_len));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::check_ccm_params;
    use crate::error::SecurityError;
    use test_case::test_case;

    #[test_case(7, 4; "shortest nonce, shortest tag")]
    #[test_case(13, 8; "s2 parameters")]
    #[test_case(13, 16; "full tag")]
    fn accepts_valid_params(nonce_len: usize, tag_len: usize) {
        check_ccm_params(&[0; 16], &vec![0; nonce_len], tag_len).unwrap();
    }

    #[test_case(6; "too short")]
    #[test_case(14; "too long")]
    fn rejects_nonce_length(nonce_len: usize) {
        let err = check_ccm_params(&[0; 16], &vec![0; nonce_len], 8).unwrap_err();
        assert_eq!(
            err,
            SecurityError::InvalidBufferLength {
                name: "CCM nonce",
                len: nonce_len
            }
        );
    }

    #[test_case(0; "empty")]
    #[test_case(5; "odd")]
    #[test_case(18; "too long")]
    fn rejects_tag_length(tag_len: usize) {
        let err = check_ccm_params(&[0; 16], &[0; 13], tag_len).unwrap_err();
        assert_eq!(
            err,
            SecurityError::InvalidBufferLength {
                name: "CCM tag",
                len: tag_len
            }
        );
    }
}
