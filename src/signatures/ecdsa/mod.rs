//! ECDSA over the short-Weierstrass curves.
//!
//! An [`Ecdsa`] engine is bound to one curve and one [`EngineConfig`]. It
//! owns every operation that works on raw key and signature bytes for that
//! curve:
//!
//! - the key lifecycle (implemented in `crate::keys`),
//! - deterministic signing with RFC 6979 nonces,
//! - verification and public-key recovery,
//! - the compact and DER signature codecs,
//! - hash-to-curve public keys.
//!
//! Signatures are `r ‖ s` with both halves `size` bytes, big-endian.
//! Messages are pre-hashed digests of any length; they are truncated to
//! the bit length of the group order (`bits2int`) before use.
//!
//! Verification and recovery never return an error: a malformed input is
//! simply a signature that does not verify.

mod rfc6979;
mod sign;
mod verify;

use crate::arith::Elem;
use crate::config::EngineConfig;
use crate::curve::{Curve, CurveId, ProjectivePoint};
use crate::hash::HashAlgorithm;
use crate::primitives::Uint;
use tracing::debug;

/// ECDSA engine for a single curve.
#[derive(Copy, Clone, Debug)]
pub struct Ecdsa {
    pub(crate) curve: &'static Curve,
    pub(crate) config: EngineConfig,
    pub(crate) hash: HashAlgorithm,
}

impl Ecdsa {
    /// Builds an engine for `id`.
    ///
    /// The curve parameters are shared process-wide; constructing an
    /// engine is cheap and performs no precomputation.
    pub fn new(id: CurveId, config: EngineConfig) -> Self {
        let curve = id.curve();
        let hash = config.hash.unwrap_or(curve.hash());

        debug!(
            curve = id.name(),
            ?hash,
            precompute = config.precompute,
            "ecdsa engine created"
        );

        Self { curve, config, hash }
    }

    pub fn id(&self) -> CurveId {
        self.curve.id()
    }

    pub fn curve(&self) -> &'static Curve {
        self.curve
    }

    /// Byte length of a scalar or field element.
    pub fn size(&self) -> usize {
        self.curve.size()
    }

    /// Byte length of a compact signature.
    pub fn signature_size(&self) -> usize {
        2 * self.curve.size()
    }

    /// Digest used for nonce derivation.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// `k·G` following the configured strategy.
    pub(crate) fn mul_base(&self, k: &Elem) -> ProjectivePoint {
        self.curve.mul_base(k, self.config.precompute)
    }

    /// Truncates a digest to the bit length of `n` and reduces it once.
    pub(crate) fn bits2int(&self, msg: &[u8]) -> Elem {
        let fq = self.curve.scalar_modulus();
        let take = msg.len().min(fq.bytes());
        let mut e = Uint::from_be_slice(&msg[..take]).unwrap_or(Uint::ZERO);

        if take * 8 > fq.bits() {
            e = e >> (take * 8 - fq.bits()) as u32;
        }

        Elem::from_uint(fq, &fq.reduce_once(&e))
    }
}
