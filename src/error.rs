/// Represents either success(T) or an failure ([`SecurityError`])
pub type Result<T> = std::result::Result<T, SecurityError>;

/// Represents an error which has occured in the meshsec library
///
/// A failed CCM authentication is not an error, see [`crate::ccm::CcmDecrypted`].
#[derive(PartialEq, Eq, Debug, thiserror::Error)]
pub enum SecurityError {
    /// key has not the size required by the operation
    #[error("Key with size {actual} is invalid, expected {expected} bytes")]
    InvalidKeyLength {
        /// required key size in bytes
        expected: usize,
        /// size of the key which was passed
        actual: usize,
    },

    /// a buffer (IV, nonce, tag, operand) has an unsupported size
    #[error("{name} with size {len} is invalid")]
    InvalidBufferLength {
        /// which buffer was rejected
        name: &'static str,
        /// size of the rejected buffer
        len: usize,
    },

    /// the block cipher or AEAD backend failed to encrypt
    #[error("Failed to Encrypt")]
    EncryptionFailure,

    /// the block cipher backend failed to decrypt
    #[error("Failed to Decrypt")]
    DecryptionFailure,

    /// the backend could not generate a fresh key pair
    #[error("Unable to generate a key pair")]
    KeyGenerationFailure,

    /// a DER encoded key could not be imported
    #[error("Key encoding is invalid")]
    InvalidKeyEncoding,

    /// any arbitrary error
    #[error("{0}")]
    Other(String),
}

impl SecurityError {
    pub(crate) fn invalid_buffer(name: &'static str, len: usize) -> Self {
        log::debug!("Rejecting {name} with invalid length {len}");
        SecurityError::InvalidBufferLength { name, len }
    }
}

/// Fails with [`SecurityError::InvalidKeyLength`] unless `key` has exactly `expected` bytes.
pub(crate) fn check_key_len(key: &[u8], expected: usize) -> Result<()> {
    if key.len() != expected {
        log::debug!(
            "Rejecting key with length {}, expected {expected}",
            key.len()
        );
        return Err(SecurityError::InvalidKeyLength {
            expected,
            actual: key.len(),
        });
    }
    Ok(())
}
