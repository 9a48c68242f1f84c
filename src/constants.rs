//! Fixed protocol constants.
//!
//! All domain separation values are part of the wire contract with other devices
//! and must not change.

use std::ops::RangeInclusive;

/// size of an AES block in bytes
pub const BLOCK_SIZE: usize = 16;
/// AES-128 key size in bytes
pub const AES128_KEY_LEN: usize = 16;
/// raw X25519 key size in bytes (private and public)
pub const X25519_KEY_LEN: usize = 32;

/// A single AES block
pub type Block = [u8; BLOCK_SIZE];

/// all zero block, used as CMAC start state and default S0 IV
pub const Z128: Block = [0; BLOCK_SIZE];
/// constant for CMAC subkey generation, see NIST SP 800-38B 5.3
pub const R128: Block = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x87];

/// key for extracting the PRK from the ECDH shared secret
pub const CONSTANT_PRK: [u8; 16] = [0x33; 16];
/// label of the temporary key expansion
pub const CONSTANT_TE: [u8; 15] = [0x88; 15];
/// label of the network key expansion
pub const CONSTANT_NK: [u8; 15] = [0x55; 15];
/// key for extracting the nonce PRK from both entropy inputs
pub const CONSTANT_NONCE: [u8; 16] = [0x26; 16];
/// label of the mixed entropy input expansion
pub const CONSTANT_EI: [u8; 15] = [0x88; 15];

/// CCM authentication tag length used by Security S2
pub const SECURITY_S2_AUTH_TAG_LENGTH: usize = 8;

/// nonce lengths accepted by AES-CCM (RFC 3610: 15 - L, with 2 <= L <= 8)
pub const CCM_NONCE_LEN_RANGE: RangeInclusive<usize> = 7..=13;
/// tag lengths accepted by AES-CCM
pub const CCM_TAG_LENGTHS: [usize; 7] = [4, 6, 8, 10, 12, 14, 16];

/// DER prefix of an X25519 private key in PKCS#8 encoding
pub const X25519_PKCS8_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x6e, 0x04, 0x22, 0x04, 0x20,
];
/// DER prefix of an X25519 public key in SPKI encoding
pub const X25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x6e, 0x03, 0x21, 0x00,
];
