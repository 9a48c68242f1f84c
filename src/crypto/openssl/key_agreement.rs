use super::OpensslBackend;
use crate::{
    constants::X25519_KEY_LEN,
    crypto::key_agreement::KeyAgreement,
    error::{Result, SecurityError},
};
use openssl::{
    derive::Deriver,
    error::ErrorStack,
    pkey::{Id, PKey, Private, Public},
};

impl KeyAgreement for OpensslBackend {
    type PrivateKey = PKey<Private>;
    type PublicKey = PKey<Public>;

    fn generate_private_key(&self) -> Result<PKey<Private>> {
        PKey::generate_x25519().map_err(|err| {
            log::error!("Key generation failed, OpenSSL error stack: {err}");
            SecurityError::KeyGenerationFailure
        })
    }

    fn public_key_of(&self, private_key: &PKey<Private>) -> Result<PKey<Public>> {
        private_key
            .raw_public_key()
            .and_then(|raw| PKey::public_key_from_raw_bytes(&raw, Id::X25519))
            .map_err(invalid_encoding)
    }

    fn private_key_from_pkcs8(&self, der: &[u8]) -> Result<PKey<Private>> {
        let key = PKey::private_key_from_pkcs8(der).map_err(invalid_encoding)?;
        ensure_x25519(key)
    }

    fn private_key_to_pkcs8(&self, private_key: &PKey<Private>) -> Result<Vec<u8>> {
        private_key.private_key_to_pkcs8().map_err(invalid_encoding)
    }

    fn public_key_from_spki(&self, der: &[u8]) -> Result<PKey<Public>> {
        let key = PKey::public_key_from_der(der).map_err(invalid_encoding)?;
        ensure_x25519(key)
    }

    fn public_key_to_spki(&self, public_key: &PKey<Public>) -> Result<Vec<u8>> {
        public_key.public_key_to_der().map_err(invalid_encoding)
    }

    fn diffie_hellman(
        &self,
        private_key: &PKey<Private>,
        public_key: &PKey<Public>,
    ) -> Result<[u8; X25519_KEY_LEN]> {
        let derive = || -> std::result::Result<Vec<u8>, ErrorStack> {
            let mut deriver = Deriver::new(private_key)?;
            deriver.set_peer(public_key)?;
            deriver.derive_to_vec()
        };

        let shared_secret = derive().map_err(|err| {
            log::debug!("Key agreement failed, OpenSSL error stack: {err}");
            SecurityError::Other(err.to_string())
        })?;

        shared_secret.try_into().map_err(|secret: Vec<u8>| {
            SecurityError::Other(format!("shared secret has {} bytes", secret.len()))
        })
    }
}

fn ensure_x25519<T>(key: PKey<T>) -> Result<PKey<T>> {
    if key.id() == Id::X25519 {
        Ok(key)
    } else {
        log::debug!("Expected an X25519 key, got {:?}", key.id());
        Err(SecurityError::InvalidKeyEncoding)
    }
}

fn invalid_encoding(err: ErrorStack) -> SecurityError {
    log::debug!("Key conversion failed, OpenSSL error stack: {err}");
    SecurityError::InvalidKeyEncoding
}
