//! ECDSA signing.

use super::Ecdsa;
use super::rfc6979::NonceGenerator;
use crate::arith::Elem;
use crate::error::{Error, Result};
use crate::keys::decode_private;
use crate::signatures::der;
use subtle::ConditionallySelectable;
use tracing::trace;
use zeroize::Zeroize;

impl Ecdsa {
    /// Signs a message digest.
    ///
    /// The nonce is derived deterministically (RFC 6979) from the key and
    /// the digest, so signing the same digest twice yields the same
    /// signature. The result is always low-S.
    ///
    /// # Returns
    /// The compact signature `r ‖ s`, or `InvalidScalar` when `key` is not
    /// a valid private key.
    pub fn sign(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        self.sign_recoverable(msg, key).map(|(sig, _)| sig)
    }

    /// Signs a message digest and returns the recovery id with it.
    ///
    /// Bit 0 of the id is the parity of `R.y` and bit 1 is set when `R.x`
    /// was at least `n`. Normalizing `s` to the low half negates `R`, so it
    /// flips bit 0.
    pub fn sign_recoverable(&self, msg: &[u8], key: &[u8]) -> Result<(Vec<u8>, u8)> {
        let fq = self.curve.scalar_modulus();
        let mut d = decode_private(self.curve, key)?;
        let e = self.bits2int(msg);
        let mut nonces = NonceGenerator::new(self.hash, &d, &e);

        loop {
            let mut k = nonces.next();

            let Some(point) = self.mul_base(&k).to_affine() else {
                trace!("nonce produced the identity, drawing again");
                continue;
            };

            let x = point.x.to_uint();
            let r_int = fq.reduce_once(&x);
            let r = Elem::from_uint(fq, &r_int);

            if bool::from(r.is_zero()) {
                trace!("r = 0, drawing again");
                continue;
            }

            let mut s = k.invert() * (e + r * d);
            k.zeroize();

            if bool::from(s.is_zero()) {
                trace!("s = 0, drawing again");
                continue;
            }

            let overflow = u8::from(r_int != x);
            let mut id = point.y.is_odd().unwrap_u8() | (overflow << 1);

            let high = s.is_high();
            s = s.conditional_negate(high);
            id.conditional_assign(&(id ^ 1), high);

            d.zeroize();

            let mut sig = r.to_be_bytes();
            sig.extend_from_slice(&s.to_be_bytes());

            return Ok((sig, id));
        }
    }

    /// Signs and returns the DER encoding of the signature.
    pub fn sign_der(&self, msg: &[u8], key: &[u8]) -> Result<Vec<u8>> {
        der::encode(&self.sign(msg, key)?)
    }

    /// Recoverable signing with a DER-encoded signature.
    pub fn sign_recoverable_der(&self, msg: &[u8], key: &[u8]) -> Result<(Vec<u8>, u8)> {
        let (sig, id) = self.sign_recoverable(msg, key)?;
        Ok((der::encode(&sig)?, id))
    }

    /// Checks that a compact signature has `s ≤ n/2`.
    ///
    /// # Returns
    /// `false` for a malformed signature or one with `r` or `s` out of
    /// `[1, n)`.
    pub fn is_low_s(&self, sig: &[u8]) -> bool {
        match self.decode_signature(sig) {
            Some((_, s)) => !bool::from(s.is_high()),
            None => false,
        }
    }

    /// Strict DER plus low S.
    pub fn is_low_der(&self, sig: &[u8]) -> bool {
        match der::decode(sig, self.size()) {
            Ok(compact) => self.is_low_s(&compact),
            Err(_) => false,
        }
    }

    /// Replaces a high `s` with `n − s`.
    ///
    /// # Returns
    /// - `InvalidEncoding` when the signature has the wrong length,
    /// - `InvalidScalar` when `r` or `s` is outside `[1, n)`.
    pub fn signature_normalize(&self, sig: &[u8]) -> Result<Vec<u8>> {
        if sig.len() != self.signature_size() {
            return Err(Error::InvalidEncoding);
        }

        let (r, s) = self.decode_signature(sig).ok_or(Error::InvalidScalar)?;
        let s = s.conditional_negate(s.is_high());

        let mut out = r.to_be_bytes();
        out.extend_from_slice(&s.to_be_bytes());
        Ok(out)
    }

    /// DER counterpart of [`Ecdsa::signature_normalize`].
    pub fn signature_normalize_der(&self, sig: &[u8]) -> Result<Vec<u8>> {
        let compact = der::decode(sig, self.size())?;
        der::encode(&self.signature_normalize(&compact)?)
    }

    /// Compact to strict DER.
    pub fn signature_export(&self, sig: &[u8]) -> Result<Vec<u8>> {
        if sig.len() != self.signature_size() {
            return Err(Error::InvalidEncoding);
        }

        der::encode(sig)
    }

    /// Strict DER to compact.
    pub fn signature_import(&self, sig: &[u8]) -> Result<Vec<u8>> {
        der::decode(sig, self.size())
    }
}
