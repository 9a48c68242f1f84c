use crate::{constants::X25519_KEY_LEN, error::Result};

/// X25519 key objects of a crypto library.
///
/// Keys cross this boundary in DER form, PKCS#8 for private and SPKI for public keys,
/// the same way they are exchanged with an external key object API.
pub trait KeyAgreement {
    /// The library's private key object
    type PrivateKey;
    /// The library's public key object
    type PublicKey;

    /// Generates a fresh private key from the system's secure random source.
    fn generate_private_key(&self) -> Result<Self::PrivateKey>;

    /// Computes the public key belonging to `private_key`.
    fn public_key_of(&self, private_key: &Self::PrivateKey) -> Result<Self::PublicKey>;

    /// Imports a PKCS#8 DER encoded private key.
    fn private_key_from_pkcs8(&self, der: &[u8]) -> Result<Self::PrivateKey>;

    /// Exports a private key as PKCS#8 DER.
    fn private_key_to_pkcs8(&self, private_key: &Self::PrivateKey) -> Result<Vec<u8>>;

    /// Imports an SPKI DER encoded public key.
    fn public_key_from_spki(&self, der: &[u8]) -> Result<Self::PublicKey>;

    /// Exports a public key as SPKI DER.
    fn public_key_to_spki(&self, public_key: &Self::PublicKey) -> Result<Vec<u8>>;

    /// X25519 Diffie-Hellman.
    fn diffie_hellman(
        &self,
        private_key: &Self::PrivateKey,
        public_key: &Self::PublicKey,
    ) -> Result<[u8; X25519_KEY_LEN]>;
}
