//! Deterministic nonces (RFC 6979, section 3.2).
//!
//! The HMAC-DRBG is seeded with `int2octets(d) ‖ int2octets(e mod n)`.
//! Each candidate is `size` bytes of output truncated to the bit length
//! of `n`. Candidates outside `[1, n)` are skipped, and so is any nonce
//! the signer rejects later (`r = 0` or `s = 0`). Skipping simply draws the
//! next output, which performs the `K = HMAC(V ‖ 00)`, `V = HMAC(V)` step
//! of the RFC.

use crate::arith::{Elem, Modulus};
use crate::hash::HashAlgorithm;
use crate::primitives::Uint;
use crate::rng::HmacDrbg;
use tracing::trace;
use zeroize::Zeroize;

pub(super) struct NonceGenerator {
    drbg: HmacDrbg,
    fq: &'static Modulus,
}

impl NonceGenerator {
    pub(super) fn new(hash: HashAlgorithm, key: &Elem, e: &Elem) -> Self {
        let mut x = key.to_be_bytes();
        let h = e.to_be_bytes();
        let drbg = HmacDrbg::new(hash, &x, &h, &[]);
        x.zeroize();

        Self {
            drbg,
            fq: key.modulus(),
        }
    }

    /// Next nonce in `[1, n)`.
    pub(super) fn next(&mut self) -> Elem {
        let fq = self.fq;
        let len = fq.bytes();
        let shift = (len * 8 - fq.bits()) as u32;

        loop {
            let mut t = self.drbg.generate(len);
            let k = Uint::from_be_slice(&t).unwrap_or(Uint::ZERO) >> shift;
            t.zeroize();

            let in_range = k.ct_lt(fq.value()) & !k.ct_is_zero();
            if bool::from(in_range) {
                return Elem::from_uint(fq, &k);
            }

            trace!("nonce candidate out of range, drawing again");
        }
    }
}
