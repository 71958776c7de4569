//! Checks every engine against the same contract through `SignatureScheme`.

use ecc_engine::{CurveId, Ecdsa, Eddsa, EngineConfig, SignatureScheme};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn check_scheme(scheme: &dyn SignatureScheme, rng: &mut StdRng) {
    let name = scheme.name();

    for round in 0..4u8 {
        let key = scheme.generate_private_key(rng);
        assert_eq!(key.len(), scheme.private_key_size(), "{name}");
        assert!(scheme.private_key_verify(&key), "{name}");

        let public = scheme.public_key(&key).unwrap();
        assert!(scheme.public_key_verify(&public), "{name}");

        let msg = vec![round.wrapping_mul(37); scheme.private_key_size()];
        let sig = scheme.sign(&msg, &key).unwrap();
        assert_eq!(sig.len(), scheme.signature_size(), "{name}");

        // Deterministic nonces.
        assert_eq!(scheme.sign(&msg, &key).unwrap(), sig, "{name}");
        assert!(scheme.verify(&msg, &sig, &public), "{name}");

        let mut other = msg.clone();
        other[0] ^= 0x80;
        assert!(!scheme.verify(&other, &sig, &public), "{name}");

        let mut bad = sig.clone();
        let last = bad.len() - 1;
        bad[last] ^= 1;
        assert!(!scheme.verify(&msg, &bad, &public), "{name}");

        assert!(!scheme.verify(&msg, &sig[1..], &public), "{name}");
        assert!(!scheme.verify(&msg, &sig, &public[1..]), "{name}");
    }

    assert!(!scheme.private_key_verify(&[]), "{name}");
    assert!(!scheme.public_key_verify(&[]), "{name}");
    assert!(scheme.sign(b"msg", &[]).is_err(), "{name}");
}

#[test]
fn native_engines_conform() {
    let mut rng = StdRng::seed_from_u64(60);
    let config = EngineConfig::default();

    let mut schemes: Vec<Box<dyn SignatureScheme>> = CurveId::ALL
        .iter()
        .map(|&id| Box::new(Ecdsa::new(id, config)) as Box<dyn SignatureScheme>)
        .collect();
    schemes.push(Box::new(Eddsa::new(config)));

    for scheme in &schemes {
        check_scheme(scheme.as_ref(), &mut rng);
    }
}

#[cfg(feature = "k256-backend")]
#[test]
fn k256_backend_conforms() {
    use ecc_engine::K256Ecdsa;

    let mut rng = StdRng::seed_from_u64(61);
    let backend = K256Ecdsa::new();
    check_scheme(&backend, &mut rng);

    // Both engines derive the same nonce and normalize to low S.
    let native = Ecdsa::new(CurveId::Secp256k1, EngineConfig::default());
    for _ in 0..8 {
        let key = native.private_key_generate(&mut rng);
        let msg = native.private_key_generate(&mut rng);

        let ours = native.sign(&msg, &key).unwrap();
        let theirs = SignatureScheme::sign(&backend, &msg, &key).unwrap();
        assert_eq!(ours, theirs);

        let public = native.public_key_create(&key, true).unwrap();
        assert_eq!(SignatureScheme::public_key(&backend, &key).unwrap(), public);
        assert!(SignatureScheme::verify(&backend, &msg, &ours, &public));
    }
}
