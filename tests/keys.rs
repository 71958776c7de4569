use ecc_engine::curve::sec1;
use ecc_engine::primitives::Uint;
use ecc_engine::{CurveId, Ecdsa, EngineConfig, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn engines() -> Vec<Ecdsa> {
    CurveId::ALL
        .iter()
        .map(|&id| Ecdsa::new(id, EngineConfig::default()))
        .collect()
}

#[test]
fn generated_keys_are_valid() {
    let mut rng = StdRng::seed_from_u64(1);

    for ec in engines() {
        for _ in 0..4 {
            let key = ec.private_key_generate(&mut rng);
            assert_eq!(key.len(), ec.size());
            assert!(ec.private_key_verify(&key), "{}", ec.id().name());

            let public = ec.public_key_create(&key, true).unwrap();
            assert_eq!(public.len(), ec.size() + 1);
            assert!(ec.public_key_verify(&public));
        }
    }
}

#[test]
fn private_key_range() {
    for ec in engines() {
        let size = ec.size();
        let n = ec.curve().scalar_modulus().value().to_be_bytes(size);

        assert!(!ec.private_key_verify(&vec![0u8; size]));
        assert!(!ec.private_key_verify(&n));
        assert!(!ec.private_key_verify(&vec![0xffu8; size]));
        assert!(!ec.private_key_verify(&[1u8]));

        let mut one = vec![0u8; size];
        one[size - 1] = 1;
        assert!(ec.private_key_verify(&one));
        let g = sec1::encode_projective(&ec.curve().generator(), false).unwrap();
        assert_eq!(ec.public_key_create(&one, false).unwrap(), g);

        // Padding with a leading zero byte is not accepted.
        let mut padded = vec![0u8];
        padded.extend_from_slice(&one);
        assert_eq!(ec.public_key_create(&padded, true), Err(Error::InvalidScalar));
    }
}

#[test]
fn reduce_negate_invert() {
    for ec in engines() {
        let size = ec.size();
        let n = ec.curve().scalar_modulus().value().to_be_bytes(size);

        assert_eq!(ec.private_key_reduce(&n), vec![0u8; size]);
        assert_eq!(ec.private_key_reduce(&[]), vec![0u8; size]);

        let n_plus_7 = ec.curve().scalar_modulus().value().wrapping_add(&Uint::from_u64(7));
        let mut expected = vec![0u8; size];
        expected[size - 1] = 7;
        assert_eq!(ec.private_key_reduce(&n_plus_7.to_be_bytes(size + 1)), expected);
        assert_eq!(ec.private_key_reduce(&[7u8]), expected);

        let mut rng = StdRng::seed_from_u64(2);
        let key = ec.private_key_generate(&mut rng);

        let neg = ec.private_key_negate(&key).unwrap();
        assert_eq!(ec.private_key_negate(&neg).unwrap(), key);
        assert_eq!(ec.private_key_negate(&vec![0u8; size]).unwrap(), vec![0u8; size]);

        let inv = ec.private_key_invert(&key).unwrap();
        assert_eq!(ec.private_key_invert(&inv).unwrap(), key);
        assert_eq!(ec.private_key_invert(&vec![0u8; size]), Err(Error::InvalidScalar));

        let mut one = vec![0u8; size];
        one[size - 1] = 1;
        assert_eq!(ec.private_key_tweak_mul(&key, &inv).unwrap(), one);

        // k + (n - k) = 0
        assert_eq!(ec.private_key_tweak_add(&key, &neg), Err(Error::InvalidScalar));
        assert_eq!(ec.private_key_tweak_mul(&key, &vec![0u8; size]), Err(Error::InvalidScalar));
        assert_eq!(ec.private_key_tweak_add(&key, &n), Err(Error::InvalidScalar));
    }
}

#[test]
fn tweaks_are_homomorphic() {
    let mut rng = StdRng::seed_from_u64(3);

    for ec in engines() {
        let key = ec.private_key_generate(&mut rng);
        let tweak = ec.private_key_generate(&mut rng);
        let public = ec.public_key_create(&key, true).unwrap();

        let added = ec.private_key_tweak_add(&key, &tweak).unwrap();
        assert_eq!(
            ec.public_key_create(&added, true).unwrap(),
            ec.public_key_tweak_add(&public, &tweak, true).unwrap(),
            "{}",
            ec.id().name()
        );

        let multiplied = ec.private_key_tweak_mul(&key, &tweak).unwrap();
        assert_eq!(
            ec.public_key_create(&multiplied, false).unwrap(),
            ec.public_key_tweak_mul(&public, &tweak, false).unwrap(),
            "{}",
            ec.id().name()
        );

        let neg = ec.private_key_negate(&key).unwrap();
        assert_eq!(
            ec.public_key_create(&neg, true).unwrap(),
            ec.public_key_negate(&public, true).unwrap()
        );
    }
}

#[test]
fn combining_keys() {
    let mut rng = StdRng::seed_from_u64(4);

    for ec in engines() {
        let a = ec.private_key_generate(&mut rng);
        let b = ec.private_key_generate(&mut rng);
        let pa = ec.public_key_create(&a, true).unwrap();
        let pb = ec.public_key_create(&b, false).unwrap();

        let sum = ec.private_key_tweak_add(&a, &b).unwrap();
        let expected = ec.public_key_create(&sum, true).unwrap();

        assert_eq!(ec.public_key_add(&pa, &pb, true).unwrap(), expected);
        assert_eq!(ec.public_key_combine(&[&pa[..], &pb[..]], true).unwrap(), expected);
        assert_eq!(ec.public_key_combine(&[&pa[..]], true).unwrap(), pa);

        // Doubling goes through the same path.
        let twice = ec.public_key_add(&pa, &pa, true).unwrap();
        let two_a = ec.private_key_tweak_add(&a, &a).unwrap();
        assert_eq!(twice, ec.public_key_create(&two_a, true).unwrap());

        let neg = ec.public_key_negate(&pa, true).unwrap();
        assert_eq!(ec.public_key_add(&pa, &neg, true), Err(Error::InvalidPoint));
        assert_eq!(ec.public_key_combine(&[], true), Err(Error::InvalidPoint));
    }
}

#[test]
fn ecdh_agrees() {
    let mut rng = StdRng::seed_from_u64(5);

    for ec in engines() {
        let a = ec.private_key_generate(&mut rng);
        let b = ec.private_key_generate(&mut rng);
        let pa = ec.public_key_create(&a, true).unwrap();
        let pb = ec.public_key_create(&b, false).unwrap();

        let ab = ec.derive(&pb, &a, true).unwrap();
        let ba = ec.derive(&pa, &b, true).unwrap();
        assert_eq!(ab, ba, "{}", ec.id().name());

        assert_eq!(ec.derive(&pb, &vec![0u8; ec.size()], true), Err(Error::InvalidScalar));
    }
}

#[test]
fn public_key_conversions() {
    let mut rng = StdRng::seed_from_u64(6);

    for ec in engines() {
        let key = ec.private_key_generate(&mut rng);
        let compressed = ec.public_key_create(&key, true).unwrap();
        let uncompressed = ec.public_key_create(&key, false).unwrap();

        assert_eq!(uncompressed.len(), 2 * ec.size() + 1);
        assert_eq!(ec.public_key_convert(&compressed, false).unwrap(), uncompressed);
        assert_eq!(ec.public_key_convert(&uncompressed, true).unwrap(), compressed);

        // Hybrid: 0x06 | parity of y.
        let mut hybrid = uncompressed.clone();
        hybrid[0] = 0x06 | (uncompressed[uncompressed.len() - 1] & 1);
        assert!(ec.public_key_verify(&hybrid));
        assert_eq!(ec.public_key_convert(&hybrid, true).unwrap(), compressed);

        hybrid[0] ^= 1;
        assert!(!ec.public_key_verify(&hybrid));
        assert_eq!(ec.public_key_convert(&hybrid, true), Err(Error::InvalidEncoding));

        let mut off_curve = uncompressed.clone();
        let last = off_curve.len() - 1;
        off_curve[last] ^= 1;
        assert!(!ec.public_key_verify(&off_curve));

        let mut bad_prefix = compressed.clone();
        bad_prefix[0] = 0x05;
        assert!(!ec.public_key_verify(&bad_prefix));
        assert!(!ec.public_key_verify(&compressed[..compressed.len() - 1]));
        assert!(!ec.public_key_verify(&[]));
        assert!(!ec.public_key_verify(&[0x00]));
    }
}

#[test]
fn non_canonical_x_is_rejected() {
    let k1 = Ecdsa::new(CurveId::Secp256k1, EngineConfig::default());
    for key in [
        "02fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc30",
        "03fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc30",
    ] {
        let key = hex::decode(key).unwrap();
        assert!(!k1.public_key_verify(&key));
        assert_eq!(k1.public_key_convert(&key, false), Err(Error::InvalidPoint));
    }

    let p256 = Ecdsa::new(CurveId::P256, EngineConfig::default());
    for key in [
        "02ffffffff00000001000000000000000000000001000000000000000000000004",
        "03ffffffff00000001000000000000000000000001000000000000000000000004",
    ] {
        assert!(!p256.public_key_verify(&hex::decode(key).unwrap()));
    }
}

#[test]
fn precomputation_does_not_change_results() {
    let mut rng = StdRng::seed_from_u64(7);

    for id in CurveId::ALL {
        let fast = Ecdsa::new(id, EngineConfig::default());
        let slow = Ecdsa::new(id, EngineConfig::default().with_precompute(false));
        let key = fast.private_key_generate(&mut rng);

        assert_eq!(
            fast.public_key_create(&key, true).unwrap(),
            slow.public_key_create(&key, true).unwrap()
        );
    }
}
