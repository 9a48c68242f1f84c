//! Byte buffer helpers shared by the cipher modes, CMAC and the key derivation.

#[cfg(test)]
use std::fmt::Write;

use crate::{
    constants::{Block, BLOCK_SIZE},
    error::{Result, SecurityError},
};

/// Result of [`zero_pad`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZeroPadded {
    /// input followed by the padding
    pub output: Vec<u8>,
    /// number of zero bytes which were appended
    pub padding_len: usize,
}

/// Pads `input` with zero bytes to the next multiple of `block_size`.
///
/// Input which is already aligned (including empty input) is returned unchanged.
pub fn zero_pad(input: &[u8], block_size: usize) -> ZeroPadded {
    let padding_len = (block_size - input.len() % block_size) % block_size;
    let mut output = Vec::with_capacity(input.len() + padding_len);
    output.extend_from_slice(input);
    output.resize(input.len() + padding_len, 0);

    ZeroPadded {
        output,
        padding_len,
    }
}

/// XORs two buffers of equal length.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if a.len() != b.len() {
        log::debug!("Cannot xor buffers of length {} and {}", a.len(), b.len());
        return Err(SecurityError::InvalidBufferLength {
            name: "xor operand",
            len: b.len(),
        });
    }

    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

pub(crate) fn xor_block(a: &Block, b: &Block) -> Block {
    let mut out = *a;
    out.iter_mut().zip(b).for_each(|(x, y)| *x ^= y);
    out
}

/// Shifts a block left by one bit, carrying across byte boundaries.
///
/// The most significant bit of the first byte is dropped.
pub fn left_shift_1(input: &Block) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for i in 0..BLOCK_SIZE {
        let carry = input.get(i + 1).map_or(0, |next| next >> 7);
        out[i] = (input[i] << 1) | carry;
    }
    out
}

#[cfg(test)]
pub(crate) fn bin2string(bin: &[u8]) -> String {
    bin.iter().fold(String::new(), |mut output, x| {
        let _ = write!(output, "{x:08b} ");
        output
    })
}
