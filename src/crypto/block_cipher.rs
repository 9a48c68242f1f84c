use crate::{
    constants::{Block, AES128_KEY_LEN, BLOCK_SIZE},
    error::{check_key_len, Result, SecurityError},
};

/// AES-128 modes of operation used by the security layers
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CipherMode {
    /// electronic codebook, no IV
    Ecb,
    /// output feedback, a stream mode
    Ofb,
    /// cipher block chaining
    Cbc,
}

impl CipherMode {
    /// Block size the input is padded to before it is passed to the backend.
    pub const fn block_size(self) -> usize {
        BLOCK_SIZE
    }

    /// Required IV length, `None` if the mode takes no IV.
    pub const fn iv_len(self) -> Option<usize> {
        match self {
            CipherMode::Ecb => None,
            CipherMode::Ofb | CipherMode::Cbc => Some(BLOCK_SIZE),
        }
    }

    /// Stream modes produce exactly as many bytes as they consume,
    /// so the zero padding is cut off again after en-/decryption.
    pub const fn trims_to_input_len(self) -> bool {
        matches!(self, CipherMode::Ofb)
    }

    /// Validates key and IV for this mode, `iv` is ignored for [`CipherMode::Ecb`].
    pub fn check_params(self, key: &[u8], iv: &[u8]) -> Result<()> {
        check_key_len(key, AES128_KEY_LEN)?;
        match self.iv_len() {
            Some(iv_len) if iv.len() != iv_len => Err(SecurityError::invalid_buffer("IV", iv.len())),
            _ => Ok(()),
        }
    }
}

/// Raw AES-128 en-/decryption of block aligned data without padding.
///
/// Implementations may assume that `data.len()` is a multiple of [`BLOCK_SIZE`] and
/// that key and IV have been validated with [`CipherMode::check_params`].
pub trait BlockCipher {
    /// Encrypts block aligned `data` with the given mode.
    fn encrypt(&self, mode: CipherMode, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>>;

    /// Decrypts block aligned `data` with the given mode.
    fn decrypt(&self, mode: CipherMode, key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>>;

    /// Encrypts a single block with AES-128-ECB.
    fn encrypt_block(&self, key: &[u8], block: &Block) -> Result<Block> {
        let out = self.encrypt(CipherMode::Ecb, key, &[], block)?;
        out.try_into().map_err(|out: Vec<u8>| {
            log::debug!("Backend returned {} bytes for a single block", out.len());
            SecurityError::EncryptionFailure
        })
    }

    /// Decrypts a single block with AES-128-ECB.
    fn decrypt_block(&self, key: &[u8], block: &Block) -> Result<Block> {
        let out = self.decrypt(CipherMode::Ecb, key, &[], block)?;
        out.try_into().map_err(|out: Vec<u8>| {
            log::debug!("Backend returned {} bytes for a single block", out.len());
            SecurityError::DecryptionFailure
        })
    }
}
