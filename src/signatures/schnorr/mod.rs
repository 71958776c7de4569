//! Schnorr signatures over the short-Weierstrass curves.
//!
//! This is the pre-BIP340 "bip-schnorr" construction, generalized to
//! every curve whose field prime is `≡ 3 (mod 4)`:
//!
//! - `k = H(d ‖ m) mod n`, `R = k·G`, with `k` negated unless `R.y` is a
//!   quadratic residue,
//! - `e = H(R.x ‖ P ‖ m) mod n` where `P` is the compressed public key,
//! - `s = k + e·d mod n`,
//! - the signature is `R.x ‖ s`.
//!
//! Verification recomputes `R = s·G − e·P` and accepts when `R` is finite,
//! `R.y` is a residue and `R.x = r`. Batch verification checks one random
//! linear combination of all the equations, so a single bad signature
//! fails the whole batch.
//!
//! P-224 has `p ≡ 1 (mod 4)`, where "`R.y` is a residue" does not pick one
//! of `±R`. Signing on it reports `Unsupported` and verification returns
//! `false`.

use crate::arith::Elem;
use crate::config::EngineConfig;
use crate::curve::{AffinePoint, Curve, CurveId, ProjectivePoint, sec1, table};
use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::keys::{decode_private, decode_public};
use crate::rng::HmacDrbg;
use subtle::Choice;
use tracing::{debug, warn};
use zeroize::Zeroize;

/// Schnorr engine for a single curve.
#[derive(Copy, Clone, Debug)]
pub struct Schnorr {
    curve: &'static Curve,
    config: EngineConfig,
    hash: HashAlgorithm,
}

/// One `(message, signature, public key)` triple for batch verification.
pub type BatchItem<'a> = (&'a [u8], &'a [u8], &'a [u8]);

impl Schnorr {
    pub fn new(id: CurveId, config: EngineConfig) -> Self {
        let curve = id.curve();
        let hash = config.hash.unwrap_or(curve.hash());

        debug!(curve = id.name(), ?hash, "schnorr engine created");

        Self { curve, config, hash }
    }

    pub fn id(&self) -> CurveId {
        self.curve.id()
    }

    pub fn size(&self) -> usize {
        self.curve.size()
    }

    pub fn signature_size(&self) -> usize {
        2 * self.curve.size()
    }

    /// Whether the curve admits this scheme.
    pub fn is_supported(&self) -> bool {
        self.curve.field_modulus().is_blum()
    }

    fn challenge(&self, r: &[u8], key: &[u8], msg: &[u8]) -> Elem {
        let h = self.hash.digest(&[r, key, msg]);
        Elem::reduce_be_bytes(self.curve.scalar_modulus(), &h)
    }

    /// Signs a message.
    ///
    /// # Returns
    /// - `Unsupported` on curves with `p ≡ 1 (mod 4)`,
    /// - `InvalidScalar` for an invalid key or the negligible zero nonce.
    pub fn sign(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        if !self.is_supported() {
            warn!(curve = self.curve.id().name(), "schnorr signing is not defined on this curve");
            return Err(Error::Unsupported("schnorr requires p ≡ 3 (mod 4)"));
        }

        let fq = self.curve.scalar_modulus();
        let mut d = decode_private(self.curve, key)?;
        let mut k = Elem::reduce_be_bytes(fq, &self.hash.digest(&[key, msg]));

        if bool::from(k.is_zero()) {
            return Err(Error::InvalidScalar);
        }

        let big_r = self
            .curve
            .mul_base(&k, self.config.precompute)
            .to_affine()
            .ok_or(Error::InvalidScalar)?;
        k = k.conditional_negate(!big_r.y.is_square());

        let public = sec1::encode_projective(&self.curve.mul_base(&d, self.config.precompute), true)?;
        let r = big_r.x.to_be_bytes();
        let e = self.challenge(&r, &public, msg);
        let s = k + e * d;

        k.zeroize();
        d.zeroize();

        let mut sig = r;
        sig.extend_from_slice(&s.to_be_bytes());
        Ok(sig)
    }

    /// Parses a signature and key and returns `(r, s, P, e)`.
    fn parse(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> Option<(Elem, Elem, ProjectivePoint, Elem)> {
        let size = self.size();

        if sig.len() != 2 * size {
            return None;
        }

        let (rb, sb) = sig.split_at(size);
        let r = Option::<Elem>::from(Elem::from_be_bytes(self.curve.field_modulus(), rb))?;
        let s = Option::<Elem>::from(Elem::from_be_bytes(self.curve.scalar_modulus(), sb))?;
        let p = decode_public(self.curve, key).ok()?;
        let compressed = sec1::encode_projective(&p, true).ok()?;
        let e = self.challenge(rb, &compressed, msg);

        Some((r, s, p, e))
    }

    /// Verifies a single signature.
    pub fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        if !self.is_supported() {
            return false;
        }

        let Some((r, s, p, e)) = self.parse(msg, sig, key) else {
            return false;
        };

        let Some(big_r) = p.mul_add_base_vartime(&s, &-e).to_affine_vartime() else {
            return false;
        };

        bool::from(big_r.y.is_square()) && big_r.x == r
    }

    /// Verifies every triple at once.
    ///
    /// With coefficients `a_0 = 1` and `a_1.. ` drawn from an HMAC-DRBG
    /// seeded by a digest of the whole batch, this checks
    /// `(Σ a_i·s_i)·G = Σ a_i·R_i + Σ (a_i·e_i)·P_i`.
    ///
    /// # Returns
    /// `true` for an empty batch; `false` if any item is malformed or the
    /// combined equation fails.
    pub fn verify_batch(&self, items: &[BatchItem<'_>]) -> bool {
        if items.is_empty() {
            return true;
        }

        if !self.is_supported() {
            return false;
        }

        let curve = self.curve;
        let fq = curve.scalar_modulus();

        let mut parts: Vec<&[u8]> = Vec::with_capacity(3 * items.len());
        for (msg, sig, key) in items {
            parts.extend_from_slice(&[*msg, *sig, *key]);
        }
        let seed = self.hash.digest(&parts);
        let mut drbg = HmacDrbg::new(self.hash, &seed, &[], &[]);

        let mut lhs = Elem::zero(fq);
        let mut rhs = ProjectivePoint::identity(curve);

        for (i, (msg, sig, key)) in items.iter().enumerate() {
            let Some((r, s, p, e)) = self.parse(msg, sig, key) else {
                return false;
            };

            let Some(big_r) = lift_x(curve, &r) else {
                return false;
            };

            let a = if i == 0 {
                Elem::one(fq)
            } else {
                Elem::reduce_be_bytes(fq, &drbg.generate(fq.bytes()))
            };

            lhs += a * s;
            let term = table::mul_add_vartime(&big_r, &a.to_uint(), &p, &(a * e).to_uint());
            rhs = rhs.add(&term);
        }

        curve.mul_base(&lhs, self.config.precompute) == rhs
    }
}

/// The point with `x = r` whose `y` is a quadratic residue.
fn lift_x(curve: &'static Curve, r: &Elem) -> Option<ProjectivePoint> {
    let p = Option::<AffinePoint>::from(sec1::decompress(curve, r, Choice::from(0)))?;
    let y = p.y.conditional_negate(!p.y.is_square());

    Some(ProjectivePoint::from_affine(curve, &AffinePoint { x: p.x, y }))
}
