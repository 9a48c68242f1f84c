use super::RustCryptoBackend;
use crate::{
    constants::{X25519_KEY_LEN, X25519_PKCS8_PREFIX, X25519_SPKI_PREFIX},
    crypto::key_agreement::KeyAgreement,
    ecdh::{encode_x25519_key_der_pkcs8, encode_x25519_key_der_spki},
    error::{Result, SecurityError},
};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

impl KeyAgreement for RustCryptoBackend {
    type PrivateKey = StaticSecret;
    type PublicKey = PublicKey;

    fn generate_private_key(&self) -> Result<StaticSecret> {
        let mut raw = Zeroizing::new([0u8; X25519_KEY_LEN]);
        getrandom::getrandom(raw.as_mut_slice()).map_err(|err| {
            log::error!("Cannot read from the secure random source: {err}");
            SecurityError::KeyGenerationFailure
        })?;

        Ok(StaticSecret::from(*raw))
    }

    fn public_key_of(&self, private_key: &StaticSecret) -> Result<PublicKey> {
        Ok(PublicKey::from(private_key))
    }

    fn private_key_from_pkcs8(&self, der: &[u8]) -> Result<StaticSecret> {
        let raw = Zeroizing::new(strip_der_prefix(der, &X25519_PKCS8_PREFIX)?);
        Ok(StaticSecret::from(*raw))
    }

    fn private_key_to_pkcs8(&self, private_key: &StaticSecret) -> Result<Vec<u8>> {
        let raw = Zeroizing::new(private_key.to_bytes());
        encode_x25519_key_der_pkcs8(raw.as_slice())
    }

    fn public_key_from_spki(&self, der: &[u8]) -> Result<PublicKey> {
        strip_der_prefix(der, &X25519_SPKI_PREFIX).map(PublicKey::from)
    }

    fn public_key_to_spki(&self, public_key: &PublicKey) -> Result<Vec<u8>> {
        encode_x25519_key_der_spki(public_key.as_bytes())
    }

    fn diffie_hellman(
        &self,
        private_key: &StaticSecret,
        public_key: &PublicKey,
    ) -> Result<[u8; X25519_KEY_LEN]> {
        Ok(private_key.diffie_hellman(public_key).to_bytes())
    }
}

// x25519-dalek has no DER support, the fixed prefix is the whole structure
fn strip_der_prefix(der: &[u8], prefix: &[u8]) -> Result<[u8; X25519_KEY_LEN]> {
    der.strip_prefix(prefix)
        .and_then(|raw| <[u8; X25519_KEY_LEN]>::try_from(raw).ok())
        .ok_or_else(|| {
            log::debug!("DER encoded key of length {} is no X25519 key", der.len());
            SecurityError::InvalidKeyEncoding
        })
}
