use ecc_engine::{Eddsa, EngineConfig};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_ed25519(c: &mut Criterion) {
    let ed = Eddsa::new(EngineConfig::default());
    let seed = [0x42u8; 32];
    let public = ed.public_key_create(&seed).unwrap();
    let msg = [0u8; 64];
    let sig = ed.sign(&msg, &seed).unwrap();

    c.bench_function("ed25519 public key", |b| {
        b.iter(|| ed.public_key_create(black_box(&seed)))
    });

    c.bench_function("ed25519 sign 64 bytes", |b| {
        b.iter(|| ed.sign(black_box(&msg), black_box(&seed)))
    });

    c.bench_function("ed25519 verify 64 bytes", |b| {
        b.iter(|| ed.verify(black_box(&msg), black_box(&sig), black_box(&public)))
    });

    c.bench_function("ed25519 derive", |b| {
        b.iter(|| ed.derive(black_box(&public), black_box(&seed)))
    });
}

criterion_group!(benches, bench_ed25519);
criterion_main!(benches);
