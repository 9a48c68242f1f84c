#![allow(clippy::unit_arg)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Bencher, BenchmarkId, Criterion};
use meshsec::{
    compute_cmac, compute_mac, decrypt_aes128_ccm, derive_mei, derive_network_keys,
    encrypt_aes128_ccm, encrypt_aes128_ofb, CcmEncrypted, SECURITY_S2_AUTH_TAG_LENGTH,
};
use rand::Rng;

const KEY: [u8; 16] = [0x42; 16];
const IV: [u8; 16] = [0x24; 16];
const NONCE: [u8; 13] = [0x13; 13];
const ADDITIONAL_DATA: &[u8] = b"frame header";

fn payload_sizes() -> &'static [usize] {
    let ci = std::env::var("CI").ok();
    if ci.is_some_and(|ci| ci == "true") {
        return &[256];
    }

    // a single mesh frame carries at most a few dozen bytes of payload
    &[16, 46, 256, 4096]
}

fn create_random_payload(size: usize) -> Vec<u8> {
    let mut payload = vec![0; size];
    rand::rng().fill(payload.as_mut_slice());
    payload
}

fn encrypt_random_payload(size: usize) -> CcmEncrypted {
    let payload = create_random_payload(size);
    encrypt_aes128_ccm(
        &KEY,
        &NONCE,
        &payload,
        ADDITIONAL_DATA,
        SECURITY_S2_AUTH_TAG_LENGTH,
    )
    .unwrap()
}

fn bench_over_payload_sizes<F>(c: &mut Criterion, name: &str, mut bench: F)
where
    F: FnMut(&mut Bencher, &usize),
{
    let mut group = c.benchmark_group(name);
    for payload_size in payload_sizes().iter() {
        group.throughput(criterion::Throughput::Bytes(*payload_size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(payload_size),
            payload_size,
            &mut bench,
        );
    }
}

fn ccm_benches(c: &mut Criterion) {
    bench_over_payload_sizes(c, "encrypt with AES-128-CCM", |b, &payload_size| {
        b.iter_batched(
            || create_random_payload(payload_size),
            |payload| {
                let encrypted = encrypt_aes128_ccm(
                    &KEY,
                    &NONCE,
                    &payload,
                    ADDITIONAL_DATA,
                    SECURITY_S2_AUTH_TAG_LENGTH,
                )
                .unwrap();
                black_box(encrypted);
            },
            BatchSize::SmallInput,
        );
    });

    bench_over_payload_sizes(c, "decrypt with AES-128-CCM", |b, &payload_size| {
        b.iter_batched(
            || encrypt_random_payload(payload_size),
            |encrypted| {
                let decrypted = decrypt_aes128_ccm(
                    &KEY,
                    &NONCE,
                    &encrypted.ciphertext,
                    ADDITIONAL_DATA,
                    &encrypted.auth_tag,
                )
                .unwrap();
                black_box(decrypted);
            },
            BatchSize::SmallInput,
        );
    });
}

fn s0_benches(c: &mut Criterion) {
    bench_over_payload_sizes(c, "encrypt with AES-128-OFB", |b, &payload_size| {
        b.iter_batched(
            || create_random_payload(payload_size),
            |payload| black_box(encrypt_aes128_ofb(&payload, &KEY, &IV).unwrap()),
            BatchSize::SmallInput,
        );
    });

    bench_over_payload_sizes(c, "S0 MAC", |b, &payload_size| {
        b.iter_batched(
            || create_random_payload(payload_size),
            |payload| black_box(compute_mac(&payload, &KEY).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

fn kdf_benches(c: &mut Criterion) {
    bench_over_payload_sizes(c, "AES-128-CMAC", |b, &payload_size| {
        b.iter_batched(
            || create_random_payload(payload_size),
            |payload| black_box(compute_cmac(&payload, &KEY).unwrap()),
            BatchSize::SmallInput,
        );
    });

    c.bench_function("derive network keys", |b| {
        b.iter(|| black_box(derive_network_keys(&KEY).unwrap()))
    });

    c.bench_function("derive MEI", |b| {
        b.iter(|| black_box(derive_mei(&KEY).unwrap()))
    });
}

criterion_group!(benches, ccm_benches, s0_benches, kdf_benches);
criterion_main!(benches);
