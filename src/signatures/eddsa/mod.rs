//! Ed25519 signatures (RFC 8032, pure variant).
//!
//! Signing is deterministic:
//!
//! - `r = H(prefix ‖ M) mod L` and `R = r·B`,
//! - `k = H(R ‖ A ‖ M) mod L`,
//! - `S = (r + k·a) mod L`,
//!
//! where `H` is SHA-512, `a` the clamped scalar and `prefix` the second
//! half of the seed digest. The signature is `R ‖ S` (64 bytes).
//!
//! [`Eddsa::sign_tweak`] signs for the child key `a + t`, whose public key
//! is [`Eddsa::public_key_tweak_add`] of the parent. Its nonce also binds
//! the tweak so parent and child never share a nonce.

use crate::arith::Elem;
use crate::config::EngineConfig;
use crate::curve::edwards::ED25519_SIZE;
use crate::curve::{EdwardsCurve, EdwardsPoint};
use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::keys::ExpandedKey;
use tracing::debug;

/// Ed25519 engine.
#[derive(Copy, Clone, Debug)]
pub struct Eddsa {
    pub(crate) curve: &'static EdwardsCurve,
    pub(crate) config: EngineConfig,
}

impl Eddsa {
    /// Builds an engine. The digest is always SHA-512; `config.hash` is
    /// ignored because it is fixed by the scheme.
    pub fn new(config: EngineConfig) -> Self {
        debug!(curve = "ED25519", precompute = config.precompute, "eddsa engine created");

        Self {
            curve: EdwardsCurve::ed25519(),
            config,
        }
    }

    pub fn curve(&self) -> &'static EdwardsCurve {
        self.curve
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Byte length of seeds, scalars and public keys.
    pub fn size(&self) -> usize {
        ED25519_SIZE
    }

    pub fn signature_size(&self) -> usize {
        2 * ED25519_SIZE
    }

    pub(crate) fn mul_base(&self, k: &Elem) -> EdwardsPoint {
        self.curve.mul_base(k, self.config.precompute)
    }

    fn hash_to_scalar(&self, parts: &[&[u8]]) -> Elem {
        let h = HashAlgorithm::Sha512.digest(parts);
        Elem::reduce_le_bytes(self.curve.scalar_modulus(), &h)
    }

    fn sign_with(&self, msg: &[u8], a: &Elem, r: &Elem) -> Vec<u8> {
        let big_a = self.mul_base(a).encode();
        let big_r = self.mul_base(r).encode();
        let k = self.hash_to_scalar(&[&big_r, &big_a, msg]);
        let s = *r + k * *a;

        let mut sig = vec![0u8; 2 * ED25519_SIZE];
        sig[..ED25519_SIZE].copy_from_slice(&big_r);
        s.write_le_bytes(&mut sig[ED25519_SIZE..]);
        sig
    }

    /// Signs `msg` with a 32-byte seed.
    pub fn sign(&self, msg: &[u8], seed: &[u8]) -> Result<Vec<u8>> {
        let key = ExpandedKey::from_seed(self, seed)?;
        let r = self.hash_to_scalar(&[&key.prefix, msg]);

        Ok(self.sign_with(msg, &key.scalar, &r))
    }

    /// Signs `msg` for the child key `a + t mod L`.
    ///
    /// The signature verifies under
    /// `public_key_tweak_add(public_key_create(seed), tweak)`.
    pub fn sign_tweak(&self, msg: &[u8], seed: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        if tweak.len() != ED25519_SIZE {
            return Err(Error::InvalidScalar);
        }

        let key = ExpandedKey::from_seed(self, seed)?;
        let t = Elem::reduce_le_bytes(self.curve.scalar_modulus(), tweak);
        let a = key.scalar + t;
        let r = self.hash_to_scalar(&[&key.prefix, tweak, msg]);

        Ok(self.sign_with(msg, &a, &r))
    }

    /// Verifies `R ‖ S` against a public key.
    ///
    /// # Returns
    /// `false` when the signature or key is malformed, when `S ≥ L`, or
    /// when `S·B − k·A` does not encode to `R`.
    pub fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        if sig.len() != 2 * ED25519_SIZE {
            return false;
        }

        let Ok(a) = EdwardsPoint::decode(self.curve, key) else {
            return false;
        };

        let (big_r, s) = sig.split_at(ED25519_SIZE);
        let mut s_be = [0u8; ED25519_SIZE];
        s_be.copy_from_slice(s);
        s_be.reverse();

        let Some(s) = Option::<Elem>::from(Elem::from_be_bytes(self.curve.scalar_modulus(), &s_be))
        else {
            return false;
        };

        let k = self.hash_to_scalar(&[big_r, key, msg]);
        let check = a.neg().mul_add_base_vartime(&s, &k);

        check.encode()[..] == *big_r
    }
}
