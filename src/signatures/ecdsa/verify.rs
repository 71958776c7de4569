//! ECDSA verification and public-key recovery.
//!
//! Everything here works on public data, so the variable-time inversion
//! and double multiplication are used throughout.

use super::Ecdsa;
use crate::arith::Elem;
use crate::curve::{AffinePoint, ProjectivePoint, sec1};
use crate::keys::decode_public;
use crate::signatures::der;
use subtle::Choice;

impl Ecdsa {
    /// Splits a compact signature into `(r, s)`, both in `[1, n)`.
    pub(crate) fn decode_signature(&self, sig: &[u8]) -> Option<(Elem, Elem)> {
        let size = self.size();

        if sig.len() != 2 * size {
            return None;
        }

        let fq = self.curve.scalar_modulus();
        let r = Option::<Elem>::from(Elem::from_be_bytes(fq, &sig[..size]))?;
        let s = Option::<Elem>::from(Elem::from_be_bytes(fq, &sig[size..]))?;

        if bool::from(r.is_zero() | s.is_zero()) {
            return None;
        }

        Some((r, s))
    }

    /// Verifies a compact signature against a SEC1 public key.
    ///
    /// High-S signatures are accepted; use [`Ecdsa::is_low_s`] to enforce
    /// the canonical form.
    ///
    /// # Returns
    /// `true` only when `(u1·G + u2·Q).x ≡ r (mod n)`. Any malformed input
    /// yields `false`.
    pub fn verify(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        let Some((r, s)) = self.decode_signature(sig) else {
            return false;
        };

        let Ok(q) = decode_public(self.curve, key) else {
            return false;
        };

        let e = self.bits2int(msg);
        let si = s.invert_vartime();
        let u1 = e * si;
        let u2 = r * si;

        let Some(point) = q.mul_add_base_vartime(&u1, &u2).to_affine_vartime() else {
            return false;
        };

        let fq = self.curve.scalar_modulus();
        let x = fq.reduce_once(&point.x.to_uint());

        x == r.to_uint()
    }

    /// Verifies a DER signature, parsed leniently.
    pub fn verify_der(&self, msg: &[u8], sig: &[u8], key: &[u8]) -> bool {
        match der::decode_lax(sig, self.size()) {
            Ok(compact) => self.verify(msg, &compact, key),
            Err(_) => false,
        }
    }

    /// Recovers the signer's public key.
    ///
    /// `R` is rebuilt from `r` and the recovery id (bit 1 adds `n` to `r`,
    /// bit 0 selects the parity of `R.y`), then
    /// `Q = r⁻¹·(s·R − e·G)`.
    ///
    /// # Returns
    /// The SEC1 encoding of `Q`, or `None` when the signature is malformed,
    /// the id is out of range, or no point exists for `(r, id)`.
    pub fn recover(&self, msg: &[u8], sig: &[u8], id: u8, compress: bool) -> Option<Vec<u8>> {
        if id > 3 {
            return None;
        }

        let (r, s) = self.decode_signature(sig)?;
        let curve = self.curve;
        let fp = curve.field_modulus();
        let fq = curve.scalar_modulus();

        let mut x = r.to_uint();
        if id & 2 != 0 {
            let (sum, carry) = x.overflowing_add(fq.value());
            if carry != 0 {
                return None;
            }
            x = sum;
        }

        if x >= *fp.value() {
            return None;
        }

        let x = Elem::from_uint(fp, &x);
        let big_r = Option::<AffinePoint>::from(sec1::decompress(curve, &x, Choice::from(id & 1)))?;
        let big_r = ProjectivePoint::from_affine(curve, &big_r);

        let e = self.bits2int(msg);
        let ri = r.invert_vartime();
        let u1 = -(e * ri);
        let u2 = s * ri;

        let q = big_r.mul_add_base_vartime(&u1, &u2).to_affine_vartime()?;
        Some(sec1::encode(&q, compress))
    }

    /// Recovery from a DER signature, parsed leniently.
    pub fn recover_der(&self, msg: &[u8], sig: &[u8], id: u8, compress: bool) -> Option<Vec<u8>> {
        let compact = der::decode_lax(sig, self.size()).ok()?;
        self.recover(msg, &compact, id, compress)
    }
}
