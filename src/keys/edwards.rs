//! Ed25519 key expansion and key-level operations.

use crate::arith::Elem;
use crate::curve::EdwardsPoint;
use crate::curve::edwards::ED25519_SIZE;
use crate::error::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::primitives::Uint;
use crate::signatures::Eddsa;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Clears the three low bits and bit 255, and sets bit 254.
///
/// The result is a multiple of the cofactor with a fixed top bit, so the
/// ladder always runs over the same number of bits.
pub(crate) fn clamp(a: &mut [u8; ED25519_SIZE]) {
    a[0] &= 248;
    a[31] &= 127;
    a[31] |= 64;
}

/// An RFC 8032 expanded private key.
pub(crate) struct ExpandedKey {
    /// Clamped scalar as a 255-bit integer.
    pub(crate) raw: Uint,
    /// The same scalar reduced modulo `L`.
    pub(crate) scalar: Elem,
    /// Second half of the seed digest, used for nonces.
    pub(crate) prefix: [u8; ED25519_SIZE],
}

impl ExpandedKey {
    /// Expands a 32-byte seed.
    ///
    /// # Returns
    /// `InvalidScalar` when the seed has the wrong length.
    pub(crate) fn from_seed(eddsa: &Eddsa, seed: &[u8]) -> Result<Self> {
        if seed.len() != ED25519_SIZE {
            return Err(Error::InvalidScalar);
        }

        let mut h = HashAlgorithm::Sha512.digest(&[seed]);

        let mut a = [0u8; ED25519_SIZE];
        a.copy_from_slice(&h[..ED25519_SIZE]);
        clamp(&mut a);

        let mut prefix = [0u8; ED25519_SIZE];
        prefix.copy_from_slice(&h[ED25519_SIZE..]);

        let key = Self {
            raw: Uint::from_le_slice(&a).unwrap_or(Uint::ZERO),
            scalar: Elem::reduce_le_bytes(eddsa.curve.scalar_modulus(), &a),
            prefix,
        };

        a.zeroize();
        h.zeroize();

        Ok(key)
    }
}

impl Drop for ExpandedKey {
    fn drop(&mut self) {
        self.raw.0.zeroize();
        self.scalar.zeroize();
        self.prefix.zeroize();
    }
}

impl Eddsa {
    /// Draws a 32-byte seed from `rng`.
    pub fn private_key_generate<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        let mut seed = vec![0u8; ED25519_SIZE];
        rng.fill_bytes(&mut seed);
        seed
    }

    /// Any 32-byte string is a valid seed.
    pub fn private_key_verify(&self, seed: &[u8]) -> bool {
        seed.len() == ED25519_SIZE
    }

    /// Returns the clamped scalar of a seed, little-endian.
    pub fn private_key_convert(&self, seed: &[u8]) -> Result<Vec<u8>> {
        let key = ExpandedKey::from_seed(self, seed)?;
        let mut out = vec![0u8; ED25519_SIZE];
        key.raw.write_le_bytes(&mut out);
        Ok(out)
    }

    /// `a·B` for the clamped scalar of a seed.
    pub fn public_key_create(&self, seed: &[u8]) -> Result<Vec<u8>> {
        let key = ExpandedKey::from_seed(self, seed)?;
        Ok(self.mul_base(&key.scalar).encode().to_vec())
    }

    /// `k·B` for a little-endian scalar, reduced modulo `L` first.
    pub fn public_key_from_scalar(&self, scalar: &[u8]) -> Result<Vec<u8>> {
        if scalar.len() != ED25519_SIZE {
            return Err(Error::InvalidScalar);
        }

        let mut k = Elem::reduce_le_bytes(self.curve.scalar_modulus(), scalar);
        let p = self.mul_base(&k);
        k.zeroize();

        Ok(p.encode().to_vec())
    }

    /// True when `key` decodes to a curve point.
    ///
    /// Unlike the Weierstrass keys, the identity and small-order points
    /// are accepted here.
    pub fn public_key_verify(&self, key: &[u8]) -> bool {
        EdwardsPoint::decode(self.curve, key).is_ok()
    }

    /// `A + (t mod L)·B`, the public half of [`Eddsa::sign_tweak`].
    ///
    /// The result may be the identity; it is returned rather than
    /// rejected, matching [`Eddsa::public_key_verify`].
    pub fn public_key_tweak_add(&self, key: &[u8], tweak: &[u8]) -> Result<Vec<u8>> {
        if tweak.len() != ED25519_SIZE {
            return Err(Error::InvalidScalar);
        }

        let a = EdwardsPoint::decode(self.curve, key)?;
        let t = Elem::reduce_le_bytes(self.curve.scalar_modulus(), tweak);

        Ok(a.add(&self.mul_base(&t)).encode().to_vec())
    }

    /// Montgomery `u = (1 + y)/(1 − y)` of an Edwards public key.
    pub fn public_key_to_montgomery(&self, key: &[u8]) -> Result<Vec<u8>> {
        let a = EdwardsPoint::decode(self.curve, key)?;
        Ok(a.to_montgomery().to_vec())
    }

    /// Edwards public key from a Montgomery `u` and the parity of `x`.
    pub fn public_key_from_montgomery(&self, u: &[u8], odd: bool) -> Result<Vec<u8>> {
        let a = EdwardsPoint::from_montgomery(self.curve, u, odd)?;
        Ok(a.encode().to_vec())
    }

    /// X25519-style key agreement: the Montgomery `u` of `a·A`, where `a`
    /// is the full clamped scalar of `seed`.
    ///
    /// # Returns
    /// `InvalidPoint` when the shared point is the identity.
    pub fn derive(&self, public: &[u8], seed: &[u8]) -> Result<Vec<u8>> {
        let a = EdwardsPoint::decode(self.curve, public)?;
        let key = ExpandedKey::from_seed(self, seed)?;
        let shared = a.mul_uint(&key.raw, 8 * ED25519_SIZE);

        if bool::from(shared.is_identity()) {
            return Err(Error::InvalidPoint);
        }

        Ok(shared.to_montgomery().to_vec())
    }
}
