use ecc_engine::signatures::der;
use ecc_engine::{CurveId, Ecdsa, EngineConfig, HashAlgorithm};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn engine(id: CurveId) -> Ecdsa {
    Ecdsa::new(id, EngineConfig::default())
}

fn h(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap()
}

/// Flips every `step`-th bit of `buf` in turn. Each flip must be rejected
/// and the restored buffer must verify again.
fn check_bit_flips(buf: &[u8], step: usize, verify: impl Fn(&[u8]) -> bool) {
    let mut b = buf.to_vec();

    for i in (0..b.len() * 8).step_by(step) {
        b[i / 8] ^= 1 << (i % 8);
        assert!(!verify(&b), "bit {i} flipped");
        b[i / 8] ^= 1 << (i % 8);
        assert!(verify(&b), "bit {i} restored");
    }
}

#[test]
fn rfc6979_p256_sha256() {
    let p256 = engine(CurveId::P256);
    let key = h("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");

    let public = p256.public_key_create(&key, false).unwrap();
    assert_eq!(
        hex::encode(&public),
        "0460fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6\
         7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299"
    );

    let vectors = [
        (
            &b"sample"[..],
            "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716",
            "0834e36ad29a83bf2bc9385e491d6099c8fdf9d1ed67aa7ea5f51f93782857a9",
        ),
        (
            &b"test"[..],
            "f1abb023518351cd71d881567b1ea663ed3efcf6c5132b354f28d3b0b7d38367",
            "019f4113742a2b14bd25926b49c649155f267e60d3814b4c0cc84250e46f0083",
        ),
    ];

    for (text, r, s) in vectors {
        let msg = HashAlgorithm::Sha256.digest(&[text]);
        let sig = p256.sign(&msg, &key).unwrap();

        assert_eq!(hex::encode(&sig[..32]), r);
        assert_eq!(hex::encode(&sig[32..]), s);
        assert!(p256.is_low_s(&sig));
        assert!(p256.verify(&msg, &sig, &public));

        // Signing is deterministic.
        assert_eq!(p256.sign(&msg, &key).unwrap(), sig);
    }
}

#[test]
fn sign_and_verify_every_curve() {
    let mut rng = StdRng::seed_from_u64(10);

    for id in CurveId::ALL {
        let ec = engine(id);
        let key = ec.private_key_generate(&mut rng);
        let public = ec.public_key_create(&key, true).unwrap();
        let uncompressed = ec.public_key_convert(&public, false).unwrap();

        let mut hybrid = uncompressed.clone();
        hybrid[0] = 0x06 | (uncompressed[uncompressed.len() - 1] & 1);

        let mut msg = vec![0u8; ec.size()];
        rng.fill_bytes(&mut msg);

        let mut sig = ec.sign(&msg, &key).unwrap();
        let mut sig_der = ec.sign_der(&msg, &key).unwrap();
        assert_eq!(ec.signature_import(&sig_der).unwrap(), sig);
        assert!(ec.is_low_der(&sig_der));

        assert!(ec.verify(&msg, &sig, &public), "{}", id.name());
        assert!(ec.verify(&msg, &sig, &uncompressed));
        assert!(ec.verify(&msg, &sig, &hybrid));
        assert!(ec.verify_der(&msg, &sig_der, &public));

        msg[0] ^= 1;
        assert!(!ec.verify(&msg, &sig, &public));
        assert!(!ec.verify_der(&msg, &sig_der, &public));
        msg[0] ^= 1;

        sig[0] ^= 1;
        sig_der[0] ^= 1;
        assert!(!ec.verify(&msg, &sig, &public));
        assert!(!ec.verify_der(&msg, &sig_der, &public));
        sig[0] ^= 1;
        sig_der[0] ^= 1;

        let mut other = public.clone();
        other[2] ^= 1;
        assert!(!ec.verify(&msg, &sig, &other));

        assert!(ec.verify(&msg, &sig, &public));
    }
}

#[test]
fn every_bit_flip_is_rejected() {
    let mut rng = StdRng::seed_from_u64(16);

    for id in CurveId::ALL {
        let ec = engine(id);
        let step = match id {
            CurveId::P256 | CurveId::Secp256k1 => 1,
            _ => 7,
        };

        let key = ec.private_key_generate(&mut rng);
        let public = ec.public_key_create(&key, true).unwrap();

        // Only the leftmost bits(n) of a digest are used, so keep the
        // message within them.
        let mut msg = vec![0u8; ec.curve().order_bits() / 8];
        rng.fill_bytes(&mut msg);
        let sig = ec.sign(&msg, &key).unwrap();

        check_bit_flips(&msg, step, |m| ec.verify(m, &sig, &public));
        check_bit_flips(&sig, step, |s| ec.verify(&msg, s, &public));
        check_bit_flips(&public, step, |p| ec.verify(&msg, &sig, p));
    }
}

#[test]
fn high_s_is_accepted_by_verify() {
    let mut rng = StdRng::seed_from_u64(11);
    let ec = engine(CurveId::Secp256k1);
    let key = ec.private_key_generate(&mut rng);
    let public = ec.public_key_create(&key, true).unwrap();
    let msg = [0x5au8; 32];

    let sig = ec.sign(&msg, &key).unwrap();
    let n = ec.curve().scalar_modulus();
    let s = ecc_engine::arith::Elem::reduce_be_bytes(n, &sig[32..]);
    let mut high = sig[..32].to_vec();
    high.extend_from_slice(&(-s).to_be_bytes());

    assert!(!ec.is_low_s(&high));
    assert!(ec.verify(&msg, &high, &public));
    assert_eq!(ec.signature_normalize(&high).unwrap(), sig);
}

#[test]
fn recoverable_signatures() {
    let mut rng = StdRng::seed_from_u64(12);

    for id in CurveId::ALL {
        let ec = engine(id);

        for _ in 0..4 {
            let key = ec.private_key_generate(&mut rng);
            let public = ec.public_key_create(&key, true).unwrap();
            let uncompressed = ec.public_key_create(&key, false).unwrap();

            let mut msg = vec![0u8; ec.size()];
            rng.fill_bytes(&mut msg);

            let (sig, id) = ec.sign_recoverable(&msg, &key).unwrap();
            assert!(id < 4);
            assert!(ec.is_low_s(&sig));
            assert_eq!(ec.recover(&msg, &sig, id, true).unwrap(), public);
            assert_eq!(ec.recover(&msg, &sig, id, false).unwrap(), uncompressed);

            let (sig_der, id_der) = ec.sign_recoverable_der(&msg, &key).unwrap();
            assert_eq!(id_der, id);
            assert_eq!(ec.recover_der(&msg, &sig_der, id, true).unwrap(), public);

            // The wrong parity recovers a different key, if any.
            if let Some(other) = ec.recover(&msg, &sig, id ^ 1, true) {
                assert_ne!(other, public);
            }

            assert!(ec.recover(&msg, &sig, 4, true).is_none());
        }
    }
}

#[test]
fn recovery_fails_without_a_point() {
    let ec = engine(CurveId::Secp256k1);
    let msg = h("f75c6b18a72fabc0f0b888c3da58e004f0af1fe14f7ca5d8c897fe164925d5e9");
    let mut sig = h("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");
    sig.extend(h("8887321be575c8095f789dd4c743dfe42c1820f9231f98a962b210e3ac2452a3"));

    for id in 0..4 {
        assert!(ec.recover(&msg, &sig, id, true).is_none());
    }
}

#[test]
fn zero_length_message() {
    let mut rng = StdRng::seed_from_u64(13);
    let ec = engine(CurveId::P256);
    let key = ec.private_key_generate(&mut rng);
    let public = ec.public_key_create(&key, true).unwrap();
    let sig = ec.sign(&[], &key).unwrap();

    assert!(ec.is_low_s(&sig));
    assert!(ec.verify(&[], &sig, &public));
}

#[test]
fn long_digests_are_truncated() {
    let mut rng = StdRng::seed_from_u64(14);
    let ec = engine(CurveId::P256);
    let key = ec.private_key_generate(&mut rng);
    let public = ec.public_key_create(&key, true).unwrap();

    let digest = HashAlgorithm::Sha512.digest(&[&b"wide"[..]]);
    let sig = ec.sign(&digest, &key).unwrap();

    assert!(ec.verify(&digest, &sig, &public));
    assert!(ec.verify(&digest[..32], &sig, &public));
}

#[test]
fn maxwell_trick() {
    let msg = h("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");

    let vectors = [
        (
            CurveId::P256,
            "041548fc88953e06cd34d4b300804c5322cb48c24aaaa4d07a541b0f0ccfeedeb0\
             ae4991b90519ea405588bdf699f5e6d0c6b2d5217a5c16e8371062737aa1dae1",
            "3006020106020104",
            true,
        ),
        (
            CurveId::P256,
            "04ad8f60e4ec1ebdb6a260b559cb55b1e9d2c5ddd43a41a2d11b0741ef2567d84e\
             166737664104ebbc337af3d861d3524cfbc761c12edae974a0759750c8324f9a",
            "3006020106020104",
            true,
        ),
        (
            CurveId::P256,
            "0445bd879143a64af5746e2e82aa65fd2ea07bba4e35594095a981b59984dacb21\
             9d59697387ac721b1f1eccf4b11f43ddc39e8367147abab3084142ed3ea170e4",
            "301502104319055358e8617b0c46353d039cdaae020104",
            true,
        ),
        (
            CurveId::P256,
            "040feb5df4cc78b35ec9c180cc0de5842f75f088b48456978ffa98e716d94883e1\
             e6500b2a1f6c1d9d493428d7ae7d9a8a560fff30a3d14aa160be0c5e7edcd887",
            "301502104319055358e8617b0c46353d039cdaae020104",
            false,
        ),
        (
            CurveId::P384,
            "0425e299eea9927b39fa92417705391bf17e8110b4615e9eb5da471b57be0c30e7\
             d89dbdc3e5da4eae029b300344d3851548b59ed8be668813905105e673319d59\
             d32f574e180568463c6186864888f6c0b67b304441f82aab031279e48f047c31",
            "3006020103020104",
            true,
        ),
        (
            CurveId::P384,
            "04a328f65c22307188b4af65779c1d2ec821c6748c6bd8dc0e6a008135f048f832\
             df501f7f3f79966b03d5bef2f187ec34d85f6a934af465656fb4eea8dd9176ab\
             80fbb4a27a649f526a7dfe616091b78d293552bc093dfde9b31cae69d51d3afb",
            "3006020103020104",
            true,
        ),
        (
            CurveId::P384,
            "04242e8585eaa7a28cc6062cab4c9c5fd536f46b17be1728288a2cda5951df4941\
             aed1d712defda023d10aca1c5ee01443e8beacd821f7efa27847418ab95ce2c5\
             14b2b6b395ee73417c83dbcad631421f360d84d64658c98a62d685b220f5aad4",
            "301d0218389cb27e0bc8d21fa7e5f24cb74f58851313e696333ad68e020104",
            true,
        ),
        (
            CurveId::P384,
            "04cdf865dd743fe1c23757ec5e65fd5e4038b472ded2af261e3d8343c595c8b691\
             47df46379c7ca40e60e80170d34a1188dbb2b6f7d3934c23d2f78cfb0db3f321\
             9959fad63c9b612ef2f20d679777b84192ce86e781c14b1bbb77eacd6e0520e2",
            "301d0218389cb27e0bc8d21fa7e5f24cb74f58851313e696333ad68e020104",
            false,
        ),
    ];

    for (i, (id, key, sig, expected)) in vectors.into_iter().enumerate() {
        let ec = engine(id);
        let sig = h(sig);

        assert!(der::decode(&sig, ec.size()).is_ok(), "vector {i}");
        assert_eq!(ec.verify_der(&msg, &sig, &h(key)), expected, "vector {i}");
    }
}

const P521_MSG: &str = "2987f61715244cfb7e613770ec59bbd4eeb48d9f3b4a66cdb056acb82e75b1157b85\
                        38092ac43632541d8045d5a334d9063ff2c27e26cac1673bab85e9d1a4990d2f";
const P521_R: &str = "0172fb58279be153963a356a3c154e4aad826db0fb4fd156cc1ebe1cb937fd499fcf\
                      d90578546fea1adf36ddb6247ed4505c84b9b53d4fe5111ab03de4fcb6edf2c1";
const P521_S: &str = "006eb96e4a6f3674ed254b915ac3241472ee8085e822e925e0d42711e5eed113ff44\
                      d27239388466595c5b719c3fa5f4ebdfd6a099f3db3bd244623c68b3feacb49a";
const P521_X: &str = "01c0c2cbc731e95d2086a9208c93febcbb72d95c2a37cde565df74d78b2dbfb90abe\
                      5540dbd5790c9a0683a8a01a7f2b342df7d660513d6f6532f861bb8c2d205061";
const P521_Y: &str = "010ca5c0e1e861801cdc800cb07584027b332ecfe4a6152a9c0b7e09a18c14da4287\
                      91ce6448743401b2972439969786a068a30f6690dec00c9e1a9149cdd87dfda8";

#[test]
fn p521_canonical_encodings() {
    let p521 = engine(CurveId::P521);
    let msg = h(P521_MSG);
    let compressed = h(&format!("02{P521_X}"));

    let check = |r: &str, s: &str, key: &[u8]| {
        let sig = h(&format!("{r}{s}"));
        let sig_der = der::encode(&sig).unwrap();
        (p521.verify(&msg, &sig, key), p521.verify_der(&msg, &sig_der, key))
    };

    assert_eq!(check(P521_R, P521_S, &compressed), (true, true));
    assert_eq!(
        check(P521_R, P521_S, &h(&format!("04{P521_X}{P521_Y}"))),
        (true, true)
    );

    // r + 2^521 and s + 2^521 are outside [1, n).
    let r_high = format!("03{}", &P521_R[2..]);
    let s_high = format!("02{}", &P521_S[2..]);
    assert_eq!(check(&r_high, P521_S, &compressed), (false, false));
    assert_eq!(check(P521_R, &s_high, &compressed), (false, false));

    // x + p and y + p encode the same point non-canonically.
    let x_high = "03c0c2cbc731e95d2086a9208c93febcbb72d95c2a37cde565df74d78b2dbfb90abe\
                  5540dbd5790c9a0683a8a01a7f2b342df7d660513d6f6532f861bb8c2d205060";
    let y_high = "030ca5c0e1e861801cdc800cb07584027b332ecfe4a6152a9c0b7e09a18c14da4287\
                  91ce6448743401b2972439969786a068a30f6690dec00c9e1a9149cdd87dfda7";
    for key in [
        format!("02{x_high}"),
        format!("04{x_high}{P521_Y}"),
        format!("04{P521_X}{y_high}"),
    ] {
        let key = h(&key);
        assert!(!p521.public_key_verify(&key));
        assert_eq!(check(P521_R, P521_S, &key), (false, false));
    }
}

#[test]
fn alternate_hash_changes_the_nonce() {
    let key = [0x42u8; 32];
    let msg = [0x24u8; 32];

    let plain = engine(CurveId::Secp256k1);
    let alt = Ecdsa::new(
        CurveId::Secp256k1,
        EngineConfig::default().with_hash(HashAlgorithm::Sha512),
    );
    assert_eq!(alt.hash(), HashAlgorithm::Sha512);

    let a = plain.sign(&msg, &key).unwrap();
    let b = alt.sign(&msg, &key).unwrap();
    assert_ne!(a, b);

    let public = plain.public_key_create(&key, true).unwrap();
    assert!(plain.verify(&msg, &b, &public));
}
