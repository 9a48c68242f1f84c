//! X25519 key handling for the Security S2 key exchange.
//!
//! DER encodings of X25519 keys have a constant prefix followed by the 32 raw key
//! bytes, so encoding and decoding is plain concatenation instead of ASN.1 processing.

use zeroize::Zeroizing;

use crate::{
    constants::{X25519_KEY_LEN, X25519_PKCS8_PREFIX, X25519_SPKI_PREFIX},
    crypto::{Backend, KeyAgreement},
    error::{check_key_len, Result, SecurityError},
};

/// A private key of the selected backend
pub type PrivateKey = <Backend as KeyAgreement>::PrivateKey;
/// A public key of the selected backend
pub type PublicKey = <Backend as KeyAgreement>::PublicKey;
/// A key pair of the selected backend
pub type KeyPair = EcdhKeyPair<Backend>;

/// X25519 key pair as key objects of a [`KeyAgreement`] backend
pub struct EcdhKeyPair<K: KeyAgreement> {
    /// the private key
    pub private_key: K::PrivateKey,
    /// the public key belonging to `private_key`
    pub public_key: K::PublicKey,
}

/// Decodes a DER-encoded X25519 key (PKCS#8 or SPKI), returning the raw key.
pub fn decode_x25519_key_der(der: &[u8]) -> Result<[u8; X25519_KEY_LEN]> {
    der.len()
        .checked_sub(X25519_KEY_LEN)
        .and_then(|start| der[start..].try_into().ok())
        .ok_or_else(|| SecurityError::invalid_buffer("DER encoded key", der.len()))
}

/// Encodes a raw X25519 private key with DER/PKCS#8.
pub fn encode_x25519_key_der_pkcs8(raw: &[u8]) -> Result<Vec<u8>> {
    check_key_len(raw, X25519_KEY_LEN)?;
    Ok([&X25519_PKCS8_PREFIX[..], raw].concat())
}

/// Encodes a raw X25519 public key with DER/SPKI.
pub fn encode_x25519_key_der_spki(raw: &[u8]) -> Result<Vec<u8>> {
    check_key_len(raw, X25519_KEY_LEN)?;
    Ok([&X25519_SPKI_PREFIX[..], raw].concat())
}

/// Conversions between raw X25519 keys and key objects, available for every [`KeyAgreement`].
pub trait EcdhKeys: KeyAgreement + Sized {
    /// Generates a fresh X25519 key pair.
    fn generate_key_pair(&self) -> Result<EcdhKeyPair<Self>> {
        let private_key = self.generate_private_key()?;
        let public_key = self.public_key_of(&private_key)?;

        Ok(EcdhKeyPair {
            private_key,
            public_key,
        })
    }

    /// Creates the key pair belonging to a raw private key.
    fn key_pair_from_raw_private_key(&self, private_key: &[u8]) -> Result<EcdhKeyPair<Self>> {
        let private_key = self.import_raw_private_key(private_key)?;
        let public_key = self.public_key_of(&private_key)?;

        Ok(EcdhKeyPair {
            private_key,
            public_key,
        })
    }

    /// Returns the raw bytes of a public key object.
    fn extract_raw_public_key(&self, public_key: &Self::PublicKey) -> Result<[u8; X25519_KEY_LEN]> {
        let der = self.public_key_to_spki(public_key)?;
        decode_x25519_key_der(&der)
    }

    /// Returns the raw bytes of a private key object.
    fn extract_raw_private_key(
        &self,
        private_key: &Self::PrivateKey,
    ) -> Result<Zeroizing<[u8; X25519_KEY_LEN]>> {
        let der = Zeroizing::new(self.private_key_to_pkcs8(private_key)?);
        decode_x25519_key_der(&der).map(Zeroizing::new)
    }

    /// Converts a raw public key to a key object.
    fn import_raw_public_key(&self, public_key: &[u8]) -> Result<Self::PublicKey> {
        let der = encode_x25519_key_der_spki(public_key)?;
        self.public_key_from_spki(&der)
    }

    /// Converts a raw private key to a key object.
    fn import_raw_private_key(&self, private_key: &[u8]) -> Result<Self::PrivateKey> {
        let der = Zeroizing::new(encode_x25519_key_der_pkcs8(private_key)?);
        self.private_key_from_pkcs8(&der)
    }

    /// Computes the X25519 shared secret of a raw private and a raw public key.
    fn compute_shared_secret(
        &self,
        private_key: &[u8],
        public_key: &[u8],
    ) -> Result<Zeroizing<[u8; X25519_KEY_LEN]>> {
        let private_key = self.import_raw_private_key(private_key)?;
        let public_key = self.import_raw_public_key(public_key)?;
        self.diffie_hellman(&private_key, &public_key)
            .map(Zeroizing::new)
    }
}

impl<T> EcdhKeys for T where T: KeyAgreement {}

/// Generates an X25519 / ECDH key pair.
pub fn generate_key_pair() -> Result<KeyPair> {
    Backend::default().generate_key_pair()
}

/// Creates the key pair belonging to a raw private key.
pub fn key_pair_from_raw_private_key(private_key: &[u8]) -> Result<KeyPair> {
    Backend::default().key_pair_from_raw_private_key(private_key)
}

/// Takes an ECDH public key object and returns the raw key.
pub fn extract_raw_public_key(public_key: &PublicKey) -> Result<[u8; X25519_KEY_LEN]> {
    Backend::default().extract_raw_public_key(public_key)
}

/// Takes an ECDH private key object and returns the raw key.
pub fn extract_raw_private_key(private_key: &PrivateKey) -> Result<Zeroizing<[u8; X25519_KEY_LEN]>> {
    Backend::default().extract_raw_private_key(private_key)
}

/// Converts a raw public key to an ECDH key object.
pub fn import_raw_public_key(public_key: &[u8]) -> Result<PublicKey> {
    Backend::default().import_raw_public_key(public_key)
}

/// Converts a raw private key to an ECDH key object.
pub fn import_raw_private_key(private_key: &[u8]) -> Result<PrivateKey> {
    Backend::default().import_raw_private_key(private_key)
}

/// Computes the shared secret of an X25519 key exchange from raw keys.
pub fn compute_shared_secret(
    private_key: &[u8],
    public_key: &[u8],
) -> Result<Zeroizing<[u8; X25519_KEY_LEN]>> {
    Backend::default().compute_shared_secret(private_key, public_key)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::test::{assert_bytes_eq, from_hex};
    use proptest::prelude::*;
    use test_case::test_case;

    // RFC 7748 6.1
    const ALICE_PRIVATE: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
    const ALICE_PUBLIC: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
    const BOB_PRIVATE: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
    const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
    const SHARED_SECRET: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";

    #[test]
    fn encodes_pkcs8() {
        let der = encode_x25519_key_der_pkcs8(&from_hex(ALICE_PRIVATE)).unwrap();
        assert_bytes_eq(
            &der,
            &from_hex(concat!(
                "302e020100300506032b656e04220420",
                "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a"
            )),
        );
    }

    #[test]
    fn encodes_spki() {
        let der = encode_x25519_key_der_spki(&from_hex(ALICE_PUBLIC)).unwrap();
        assert_bytes_eq(
            &der,
            &from_hex(concat!(
                "302a300506032b656e032100",
                "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a"
            )),
        );
    }

    #[test_case(31; "too short")]
    #[test_case(33; "too long")]
    #[test_case(16; "aes key")]
    fn encoding_rejects_invalid_key_length(len: usize) {
        let raw = vec![0x42; len];
        let expected = SecurityError::InvalidKeyLength {
            expected: 32,
            actual: len,
        };

        assert_eq!(encode_x25519_key_der_pkcs8(&raw).unwrap_err(), expected);
        assert_eq!(encode_x25519_key_der_spki(&raw).unwrap_err(), expected);
    }

    #[test]
    fn decoding_rejects_short_input() {
        let err = decode_x25519_key_der(&[0; 31]).unwrap_err();
        assert!(matches!(err, SecurityError::InvalidBufferLength { len: 31, .. }));
    }

    proptest! {
        #[test]
        fn der_round_trip(raw in any::<[u8; 32]>()) {
            let pkcs8 = encode_x25519_key_der_pkcs8(&raw).unwrap();
            prop_assert_eq!(pkcs8.len(), 48);
            prop_assert_eq!(decode_x25519_key_der(&pkcs8).unwrap(), raw);

            let spki = encode_x25519_key_der_spki(&raw).unwrap();
            prop_assert_eq!(spki.len(), 44);
            prop_assert_eq!(decode_x25519_key_der(&spki).unwrap(), raw);
        }
    }

    #[test]
    fn key_pair_from_raw_private_key_derives_public_key() {
        let key_pair = key_pair_from_raw_private_key(&from_hex(ALICE_PRIVATE)).unwrap();

        let public_key = extract_raw_public_key(&key_pair.public_key).unwrap();
        assert_bytes_eq(&public_key, &from_hex(ALICE_PUBLIC));

        let private_key = extract_raw_private_key(&key_pair.private_key).unwrap();
        assert_bytes_eq(private_key.as_slice(), &from_hex(ALICE_PRIVATE));
    }

    #[test]
    fn imports_and_extracts_public_key() {
        let public_key = import_raw_public_key(&from_hex(BOB_PUBLIC)).unwrap();
        let raw = extract_raw_public_key(&public_key).unwrap();

        assert_bytes_eq(&raw, &from_hex(BOB_PUBLIC));
    }

    #[test]
    fn imports_and_extracts_private_key() {
        let private_key = import_raw_private_key(&from_hex(BOB_PRIVATE)).unwrap();
        let raw = extract_raw_private_key(&private_key).unwrap();

        assert_bytes_eq(raw.as_slice(), &from_hex(BOB_PRIVATE));
    }

    #[test]
    fn import_rejects_malformed_der() {
        let backend = Backend::default();

        assert!(matches!(
            backend.private_key_from_pkcs8(&[0x30, 0x03, 0x02, 0x01, 0x00]),
            Err(SecurityError::InvalidKeyEncoding)
        ));
        assert!(matches!(
            backend.public_key_from_spki(&from_hex(ALICE_PUBLIC)),
            Err(SecurityError::InvalidKeyEncoding)
        ));
    }

    #[test]
    fn generated_key_pair_is_consistent() {
        let key_pair = generate_key_pair().unwrap();
        let raw_private = extract_raw_private_key(&key_pair.private_key).unwrap();
        let raw_public = extract_raw_public_key(&key_pair.public_key).unwrap();

        let restored = key_pair_from_raw_private_key(raw_private.as_slice()).unwrap();
        assert_eq!(extract_raw_public_key(&restored.public_key).unwrap(), raw_public);
    }

    #[test]
    fn generated_key_pairs_differ() {
        let first = generate_key_pair().unwrap();
        let second = generate_key_pair().unwrap();

        assert_ne!(
            extract_raw_public_key(&first.public_key).unwrap(),
            extract_raw_public_key(&second.public_key).unwrap()
        );
    }

    #[test]
    fn computes_rfc7748_shared_secret() {
        let alice = compute_shared_secret(&from_hex(ALICE_PRIVATE), &from_hex(BOB_PUBLIC)).unwrap();
        let bob = compute_shared_secret(&from_hex(BOB_PRIVATE), &from_hex(ALICE_PUBLIC)).unwrap();

        assert_bytes_eq(alice.as_slice(), &from_hex(SHARED_SECRET));
        assert_bytes_eq(bob.as_slice(), &from_hex(SHARED_SECRET));
    }
}
