use pretty_assertions::assert_eq;
use rand::Rng;

use meshsec::{
    compute_mac, compute_nonce_prk, compute_prk, decrypt_aes128_ccm, decrypt_aes128_ofb,
    derive_mei, derive_network_keys, derive_temp_keys,
    ecdh::{
        compute_shared_secret, extract_raw_private_key, extract_raw_public_key, generate_key_pair,
    },
    encrypt_aes128_ccm, encrypt_aes128_ofb, SECURITY_S2_AUTH_TAG_LENGTH,
};

const CCM_NONCE_LEN: usize = 13;

fn init_logging() {
    // several tests share the process wide logger
    let _ = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init();
}

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    rand::rng().fill(&mut bytes[..]);
    bytes
}

struct Node {
    private_key: [u8; 32],
    public_key: [u8; 32],
}

impl Node {
    fn generate() -> Self {
        let key_pair = generate_key_pair().unwrap();
        Self {
            private_key: *extract_raw_private_key(&key_pair.private_key).unwrap(),
            public_key: extract_raw_public_key(&key_pair.public_key).unwrap(),
        }
    }
}

#[test]
fn bootstrapping_both_sides_derive_the_same_temporary_keys() {
    init_logging();
    let including = Node::generate();
    let joining = Node::generate();

    let secret_including =
        compute_shared_secret(&including.private_key, &joining.public_key).unwrap();
    let secret_joining =
        compute_shared_secret(&joining.private_key, &including.public_key).unwrap();
    assert_eq!(*secret_including, *secret_joining);

    let prk_including =
        compute_prk(&*secret_including, &joining.public_key, &including.public_key).unwrap();
    let prk_joining =
        compute_prk(&*secret_joining, &joining.public_key, &including.public_key).unwrap();
    assert_eq!(prk_including, prk_joining);

    let keys_including = derive_temp_keys(&prk_including).unwrap();
    let keys_joining = derive_temp_keys(&prk_joining).unwrap();
    assert_eq!(keys_including.temp_key_ccm, keys_joining.temp_key_ccm);
    assert_eq!(
        keys_including.temp_personalization_string,
        keys_joining.temp_personalization_string
    );

    // key exchange frame sent from the including to the joining node
    let nonce = random_bytes::<CCM_NONCE_LEN>();
    let header = [0x9f, 0x03, 0x01, 0x00];
    let payload = b"network key report";
    let encrypted = encrypt_aes128_ccm(
        &keys_including.temp_key_ccm,
        &nonce,
        payload,
        &header,
        SECURITY_S2_AUTH_TAG_LENGTH,
    )
    .unwrap();

    let decrypted = decrypt_aes128_ccm(
        &keys_joining.temp_key_ccm,
        &nonce,
        &encrypted.ciphertext,
        &header,
        &encrypted.auth_tag,
    )
    .unwrap();
    assert!(decrypted.auth_ok);
    assert_eq!(decrypted.plaintext, payload.to_vec());
}

#[test]
fn swapped_public_keys_yield_different_prk() {
    init_logging();
    let a = Node::generate();
    let b = Node::generate();
    let secret = compute_shared_secret(&a.private_key, &b.public_key).unwrap();

    let prk = compute_prk(&*secret, &a.public_key, &b.public_key).unwrap();
    let swapped = compute_prk(&*secret, &b.public_key, &a.public_key).unwrap();
    assert_ne!(prk, swapped);
}

#[test]
fn network_key_frames_with_synchronized_entropy() {
    init_logging();
    let pnk = random_bytes::<16>();
    let sender_keys = derive_network_keys(&pnk).unwrap();
    let receiver_keys = derive_network_keys(&pnk).unwrap();
    assert_eq!(sender_keys.key_ccm, receiver_keys.key_ccm);

    let sender_ei = random_bytes::<16>();
    let receiver_ei = random_bytes::<16>();
    let sender_mei = derive_mei(&compute_nonce_prk(&sender_ei, &receiver_ei).unwrap()).unwrap();
    let receiver_mei = derive_mei(&compute_nonce_prk(&sender_ei, &receiver_ei).unwrap()).unwrap();
    assert_eq!(sender_mei, receiver_mei);

    let nonce = &sender_mei[..CCM_NONCE_LEN];
    let encrypted = encrypt_aes128_ccm(
        &sender_keys.key_ccm,
        nonce,
        b"switch on",
        b"frame header",
        SECURITY_S2_AUTH_TAG_LENGTH,
    )
    .unwrap();

    let decrypted = decrypt_aes128_ccm(
        &receiver_keys.key_ccm,
        &receiver_mei[..CCM_NONCE_LEN],
        &encrypted.ciphertext,
        b"frame header",
        &encrypted.auth_tag,
    )
    .unwrap();
    assert!(decrypted.auth_ok);
    assert_eq!(decrypted.plaintext, b"switch on".to_vec());

    // a receiver which lost entropy sync must not accept the frame
    let other_mei = derive_mei(&compute_nonce_prk(&receiver_ei, &sender_ei).unwrap()).unwrap();
    let rejected = decrypt_aes128_ccm(
        &receiver_keys.key_ccm,
        &other_mei[..CCM_NONCE_LEN],
        &encrypted.ciphertext,
        b"frame header",
        &encrypted.auth_tag,
    )
    .unwrap();
    assert!(!rejected.auth_ok);
}

#[test]
fn s0_frame_encryption_and_authentication() {
    init_logging();
    let network_key = random_bytes::<16>();
    let iv = random_bytes::<16>();
    let payload = b"S0 encapsulated command";

    let ciphertext = encrypt_aes128_ofb(payload, &network_key, &iv).unwrap();
    assert_eq!(ciphertext.len(), payload.len());
    assert_eq!(
        decrypt_aes128_ofb(&ciphertext, &network_key, &iv).unwrap(),
        payload.to_vec()
    );

    let auth_data = [&iv[..], &[0x81, 0x01, 0x02], &ciphertext[..]].concat();
    let mac = compute_mac(&auth_data, &network_key).unwrap();
    assert_eq!(mac, compute_mac(&auth_data, &network_key).unwrap());

    let mut tampered = auth_data.clone();
    tampered[20] ^= 0x01;
    assert_ne!(mac, compute_mac(&tampered, &network_key).unwrap());
}
