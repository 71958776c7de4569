//! Key lifecycle on the short-Weierstrass curves.
//!
//! Private keys are `size`-byte big-endian scalars in `[1, n)`. Public
//! keys are SEC1 encodings, and every operation that returns one takes a
//! `compress` flag. An operation that would produce the zero scalar or the
//! identity fails instead of returning an unusable key.
//!
//! Two homomorphisms tie the halves together:
//!
//! - `public_key_create(private_key_tweak_add(k, t)) == public_key_tweak_add(public_key_create(k), t)`
//! - `public_key_create(private_key_tweak_mul(k, t)) == public_key_tweak_mul(public_key_create(k), t)`

use crate::arith::Elem;
use crate::curve::{Curve, ProjectivePoint, map, sec1};
use crate::error::{Error, Result};
use crate::signatures::Ecdsa;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Decodes a `size`-byte scalar in `[0, n)`.
pub(crate) fn decode_scalar(curve: &Curve, bytes: &[u8]) -> Result<Elem> {
    Option::<Elem>::from(Elem::from_be_bytes(curve.scalar_modulus(), bytes))
        .ok_or(Error::InvalidScalar)
}

/// Decodes a private key, a scalar in `[1, n)`.
pub(crate) fn decode_private(curve: &Curve, bytes: &[u8]) -> Result<Elem> {
    let k = decode_scalar(curve, bytes)?;

    if bool::from(k.is_zero()) {
        return Err(Error::InvalidScalar);
    }

    Ok(k)
}

/// Decodes a SEC1 public key into projective form.
pub(crate) fn decode_public(curve: &'static Curve, bytes: &[u8]) -> Result<ProjectivePoint> {
    sec1::decode_projective(curve, bytes)
}

fn nonzero(k: Elem) -> Result<Vec<u8>> {
    if bool::from(k.is_zero()) {
        return Err(Error::InvalidScalar);
    }

    Ok(k.to_be_bytes())
}

impl Ecdsa {
    /// Draws a private key from `rng`.
    ///
    /// Random bytes are masked to the bit length of `n` and redrawn until
    /// they land in `[1, n)`, so the key is uniform without modular bias.
    pub fn private_key_generate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let size = self.size();
        let excess = size * 8 - self.curve.order_bits();
        let mut key = vec![0u8; size];

        loop {
            rng.fill_bytes(&mut key);
            key[0] &= 0xff >> excess;

            if self.private_key_verify(&key) {
                return key;
            }
        }
    }

    /// True when `key` is `size` bytes and encodes a value in `[1, n)`.
    pub fn private_key_verify(&self, key: &[u8]) -> bool {
        decode_private(self.curve, key).is_ok()
    }

    /// Reduces a big-endian integer of any length modulo `n`.
    ///
    /// # Returns
    /// The `size`-byte remainder. Empty input gives zero.
    pub fn private_key_reduce(&self, key: &[u8]) -> Vec<u8> {
        Elem::reduce_be_bytes(self.curve.scalar_modulus(), key).to_be_bytes()
    }

    /// `n − k`. Zero is accepted and maps to zero.
    pub fn private_key_negate(&self, key: &[u8]) -> Result<Vec<u8>> {
        let k = decode_scalar(self.curve, key)?;
        Ok((-k).to_be_bytes())
    }

    /// `k⁻¹ mod n`, in constant time.
    pub fn private_key_invert(&self, key: &[u8]) -> Result<Vec<u8>> {
        let k = decode_private(self.curve, key)?;
        Ok(k.invert().to_be_bytes())
    }

    /// `(k + t) mod n`.
    ///
    /// # Returns
    /// `InvalidScalar` when `k` is not a private key, when `t ≥ n`, or
    /// when the sum is zero.
    pub fn private_key_tweak_add(&self, key: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        let k = decode_private(self.curve, key)?;
        let t = decode_scalar(self.curve, tweak)?;
        nonzero(k + t)
    }

    /// `(k · t) mod n`. A zero tweak is rejected through the zero product.
    pub fn private_key_tweak_mul(&self, key: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        let k = decode_private(self.curve, key)?;
        let t = decode_scalar(self.curve, tweak)?;
        nonzero(k * t)
    }

    /// `k·G`.
    pub fn public_key_create(&self, key: &[u8], compress: bool) -> Result<Vec<u8>> {
        let mut k = decode_private(self.curve, key)?;
        let p = self.mul_base(&k);
        k.zeroize();

        sec1::encode_projective(&p, compress)
    }

    /// Re-encodes a public key.
    pub fn public_key_convert(&self, key: &[u8], compress: bool) -> Result<Vec<u8>> {
        let p = sec1::decode(self.curve, key)?;
        Ok(sec1::encode(&p, compress))
    }

    /// True when `key` is a valid SEC1 encoding of a curve point.
    pub fn public_key_verify(&self, key: &[u8]) -> bool {
        sec1::decode(self.curve, key).is_ok()
    }

    /// `P + t·G`.
    pub fn public_key_tweak_add(&self, key: &[u8], tweak: &[u8], compress: bool) -> Result<Vec<u8>> {
        let p = decode_public(self.curve, key)?;
        let t = decode_scalar(self.curve, tweak)?;

        sec1::encode_projective(&p.add(&self.mul_base(&t)), compress)
    }

    /// `t·P`.
    pub fn public_key_tweak_mul(&self, key: &[u8], tweak: &[u8], compress: bool) -> Result<Vec<u8>> {
        let p = decode_public(self.curve, key)?;
        let t = decode_scalar(self.curve, tweak)?;

        sec1::encode_projective(&p.mul(&t), compress)
    }

    /// `−P`.
    pub fn public_key_negate(&self, key: &[u8], compress: bool) -> Result<Vec<u8>> {
        let p = decode_public(self.curve, key)?;
        sec1::encode_projective(&p.neg(), compress)
    }

    /// `P + Q`.
    pub fn public_key_add(&self, a: &[u8], b: &[u8], compress: bool) -> Result<Vec<u8>> {
        self.public_key_combine(&[a, b], compress)
    }

    /// Sum of every key in `keys`.
    ///
    /// # Returns
    /// `InvalidPoint` when the list is empty or the sum is the identity,
    /// as when a key is combined with its own negation.
    pub fn public_key_combine(&self, keys: &[&[u8]], compress: bool) -> Result<Vec<u8>> {
        let mut acc = ProjectivePoint::identity(self.curve);

        for key in keys {
            acc = acc.add(&decode_public(self.curve, key)?);
        }

        sec1::encode_projective(&acc, compress)
    }

    /// Elliptic-curve Diffie-Hellman: the SEC1 encoding of `k·P`.
    pub fn derive(&self, public: &[u8], private: &[u8], compress: bool) -> Result<Vec<u8>> {
        let p = decode_public(self.curve, public)?;
        let mut k = decode_private(self.curve, private)?;
        let shared = p.mul(&k);
        k.zeroize();

        sec1::encode_projective(&shared, compress)
    }

    /// Maps `size` uniform bytes to a public key.
    pub fn public_key_from_uniform(&self, bytes: &[u8], compress: bool) -> Result<Vec<u8>> {
        sec1::encode_projective(&map::from_uniform(self.curve, bytes)?, compress)
    }

    /// Maps `2·size` bytes (typically a wide digest) to a public key.
    pub fn public_key_from_hash(&self, bytes: &[u8], compress: bool) -> Result<Vec<u8>> {
        sec1::encode_projective(&map::from_hash(self.curve, bytes)?, compress)
    }
}
