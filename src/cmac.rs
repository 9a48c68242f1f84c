//! AES-128-CMAC as of [NIST SP 800-38B](https://doi.org/10.6028/NIST.SP.800-38B), used for
//! authentication and key derivation in Security S2 (as described in SDS13783).

use zeroize::Zeroize;

use crate::{
    constants::{Block, AES128_KEY_LEN, BLOCK_SIZE, R128, Z128},
    crypto::{Backend, BlockCipher},
    error::{check_key_len, Result},
    util::{left_shift_1, xor_block},
};

/// The subkeys k1 and k2 of [NIST SP 800-38B 6.1](https://doi.org/10.6028/NIST.SP.800-38B)
///
/// Both are zeroed when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct CmacSubkeys {
    /// applied to a complete last block
    pub k1: Block,
    /// applied to a padded last block
    pub k2: Block,
}

impl Drop for CmacSubkeys {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
    }
}

impl std::fmt::Debug for CmacSubkeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CmacSubkeys { .. }")
    }
}

/// CMAC computation, available for every [`BlockCipher`].
pub trait Cmac: BlockCipher {
    /// Generates the CMAC subkeys for an AES-128 key.
    fn generate_cmac_subkeys(&self, key: &[u8]) -> Result<CmacSubkeys> {
        check_key_len(key, AES128_KEY_LEN)?;
        let l = self.encrypt_block(key, &Z128)?;
        let k1 = next_subkey(&l);
        let k2 = next_subkey(&k1);

        Ok(CmacSubkeys { k1, k2 })
    }

    /// Computes the full 16 byte CMAC of `message`.
    fn compute_cmac(&self, message: &[u8], key: &[u8]) -> Result<Block> {
        let subkeys = self.generate_cmac_subkeys(key)?;

        // the empty message is treated as a single incomplete block
        let num_blocks = message.len().div_ceil(BLOCK_SIZE).max(1);
        let last_block_is_complete = !message.is_empty() && message.len() % BLOCK_SIZE == 0;
        let (leading, last) = message.split_at((num_blocks - 1) * BLOCK_SIZE);

        let mut state = Z128;
        for block in leading.chunks_exact(BLOCK_SIZE) {
            state.iter_mut().zip(block).for_each(|(s, m)| *s ^= m);
            state = self.encrypt_block(key, &state)?;
        }

        let mut last_block = [0u8; BLOCK_SIZE];
        last_block[..last.len()].copy_from_slice(last);
        let subkey = if last_block_is_complete {
            &subkeys.k1
        } else {
            last_block[last.len()] = 0x80;
            &subkeys.k2
        };

        let state = xor_block(&state, &xor_block(subkey, &last_block));
        self.encrypt_block(key, &state)
    }
}

impl<T> Cmac for T where T: BlockCipher + ?Sized {}

// MSB of the input decides whether the shifted value is reduced with R128
fn next_subkey(input: &Block) -> Block {
    let shifted = left_shift_1(input);
    if input[0] & 0x80 == 0 {
        shifted
    } else {
        xor_block(&shifted, &R128)
    }
}

/// Generates the CMAC subkeys k1 and k2 for `key`.
pub fn generate_cmac_subkeys(key: &[u8]) -> Result<CmacSubkeys> {
    Backend::default().generate_cmac_subkeys(key)
}

/// Computes a message authentication code for Security S2 (as described in SDS13783).
pub fn compute_cmac(message: &[u8], key: &[u8]) -> Result<Block> {
    Backend::default().compute_cmac(message, key)
}
