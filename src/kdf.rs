//! Security S2 key derivation (as described in SDS13783).
//!
//! All derivations are CMAC based counter mode KDFs in the style of
//! [NIST SP 800-108](https://doi.org/10.6028/NIST.SP.800-108r1): round `i` computes
//! `T(i) = CMAC(T(i-1) || label || i)` where `T(0)` is empty.

use zeroize::{Zeroize, Zeroizing};

use crate::{
    cmac::Cmac,
    constants::{
        Block, BLOCK_SIZE, CONSTANT_EI, CONSTANT_NK, CONSTANT_NONCE, CONSTANT_PRK, CONSTANT_TE,
        X25519_KEY_LEN, Z128,
    },
    crypto::Backend,
    error::{check_key_len, Result},
};

/// length of the personalization strings used to seed the CTR_DRBG
pub const PERSONALIZATION_STRING_LEN: usize = 2 * BLOCK_SIZE;
/// length of the mixed entropy input
pub const MEI_LEN: usize = 2 * BLOCK_SIZE;

/// Temporary keys used during S2 bootstrapping, derived from the ECDH [`compute_prk`] output
#[derive(Clone, PartialEq, Eq)]
pub struct TempKeys {
    /// temporary CCM key
    pub temp_key_ccm: Block,
    /// temporary personalization string
    pub temp_personalization_string: [u8; PERSONALIZATION_STRING_LEN],
}

/// Keys derived from a permanent network key (PNK)
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkKeys {
    /// CCM key for singlecast frames
    pub key_ccm: Block,
    /// key for the multicast pre-agreed nonce
    pub key_mpan: Block,
    /// personalization string
    pub personalization_string: [u8; PERSONALIZATION_STRING_LEN],
}

impl Drop for TempKeys {
    fn drop(&mut self) {
        self.temp_key_ccm.zeroize();
        self.temp_personalization_string.zeroize();
    }
}

impl Drop for NetworkKeys {
    fn drop(&mut self) {
        self.key_ccm.zeroize();
        self.key_mpan.zeroize();
        self.personalization_string.zeroize();
    }
}

impl std::fmt::Debug for TempKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TempKeys { .. }")
    }
}

impl std::fmt::Debug for NetworkKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NetworkKeys { .. }")
    }
}

/// Security S2 key derivation, available for every [`crate::crypto::BlockCipher`].
pub trait KeyDerivation: Cmac {
    /// Computes the pseudo random key (PRK) used to derive the temporary keys.
    fn compute_prk(
        &self,
        ecdh_shared_secret: &[u8],
        pub_key_a: &[u8],
        pub_key_b: &[u8],
    ) -> Result<Block> {
        check_key_len(ecdh_shared_secret, X25519_KEY_LEN)?;
        check_key_len(pub_key_a, X25519_KEY_LEN)?;
        check_key_len(pub_key_b, X25519_KEY_LEN)?;

        let message = Zeroizing::new([ecdh_shared_secret, pub_key_a, pub_key_b].concat());
        self.compute_cmac(&message, &CONSTANT_PRK)
    }

    /// Derives the temporary CCM key and personalization string from the PRK.
    fn derive_temp_keys(&self, prk: &[u8]) -> Result<TempKeys> {
        let rounds: Zeroizing<[Block; 3]> = Zeroizing::new(expand(self, prk, &CONSTANT_TE)?);

        Ok(TempKeys {
            temp_key_ccm: rounds[0],
            temp_personalization_string: concat_blocks(&rounds[1], &rounds[2]),
        })
    }

    /// Derives the CCM and MPAN keys and the personalization string from a PNK.
    fn derive_network_keys(&self, pnk: &[u8]) -> Result<NetworkKeys> {
        let rounds: Zeroizing<[Block; 4]> = Zeroizing::new(expand(self, pnk, &CONSTANT_NK)?);

        Ok(NetworkKeys {
            key_ccm: rounds[0],
            key_mpan: rounds[3],
            personalization_string: concat_blocks(&rounds[1], &rounds[2]),
        })
    }

    /// Computes the PRK used to derive the mixed entropy input (MEI) for nonce generation.
    fn compute_nonce_prk(&self, sender_ei: &[u8], receiver_ei: &[u8]) -> Result<Block> {
        let message = Zeroizing::new([sender_ei, receiver_ei].concat());
        self.compute_cmac(&message, &CONSTANT_NONCE)
    }

    /// Derives the mixed entropy input (MEI) from the nonce PRK.
    ///
    /// Unlike the other derivations the first round covers the label twice,
    /// with the counters 0 and 1.
    fn derive_mei(&self, nonce_prk: &[u8]) -> Result<[u8; MEI_LEN]> {
        let first_message = [&CONSTANT_EI[..], &[0x00], &CONSTANT_EI, &[0x01]].concat();
        let t1 = Zeroizing::new(self.compute_cmac(&first_message, nonce_prk)?);

        let second_message = Zeroizing::new([&t1[..], &CONSTANT_EI, &[0x02]].concat());
        let t2 = Zeroizing::new(self.compute_cmac(&second_message, nonce_prk)?);

        Ok(concat_blocks(&t1, &t2))
    }
}

impl<T> KeyDerivation for T where T: Cmac + ?Sized {}

// Runs the CMAC rounds 1..=N keyed with `key`
fn expand<C, const N: usize>(cipher: &C, key: &[u8], label: &[u8]) -> Result<[Block; N]>
where
    C: Cmac + ?Sized,
{
    let mut rounds = [Z128; N];
    for i in 0..N {
        let previous: &[u8] = if i == 0 { &[] } else { &rounds[i - 1] };
        let counter = (i + 1) as u8;
        let message = Zeroizing::new([previous, label, &[counter]].concat());
        rounds[i] = cipher.compute_cmac(&message, key)?;
    }

    Ok(rounds)
}

fn concat_blocks(first: &Block, second: &Block) -> [u8; 2 * BLOCK_SIZE] {
    let mut out = [0u8; 2 * BLOCK_SIZE];
    out[..BLOCK_SIZE].copy_from_slice(first);
    out[BLOCK_SIZE..].copy_from_slice(second);
    out
}

/// Computes the Pseudo Random Key (PRK) used to derive auth, encryption and nonce keys.
pub fn compute_prk(ecdh_shared_secret: &[u8], pub_key_a: &[u8], pub_key_b: &[u8]) -> Result<Block> {
    Backend::default().compute_prk(ecdh_shared_secret, pub_key_a, pub_key_b)
}

/// Derives the temporary auth, encryption and nonce keys from the PRK.
pub fn derive_temp_keys(prk: &[u8]) -> Result<TempKeys> {
    Backend::default().derive_temp_keys(prk)
}

/// Derives the CCM, MPAN keys and the personalization string from the permanent network key (PNK).
pub fn derive_network_keys(pnk: &[u8]) -> Result<NetworkKeys> {
    Backend::default().derive_network_keys(pnk)
}

/// Computes the Pseudo Random Key (PRK) used to derive the mixed entropy input (MEI).
pub fn compute_nonce_prk(sender_ei: &[u8], receiver_ei: &[u8]) -> Result<Block> {
    Backend::default().compute_nonce_prk(sender_ei, receiver_ei)
}

/// Derives the MEI from the nonce PRK.
pub fn derive_mei(nonce_prk: &[u8]) -> Result<[u8; MEI_LEN]> {
    Backend::default().derive_mei(nonce_prk)
}
