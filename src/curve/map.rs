//! Hash-to-curve maps
//!
//! Each Weierstrass curve carries one deterministic map from a field
//! element `u` to a curve point:
//!
//! - simplified SWU for P-192, P-224, P-256 and P-521,
//! - Icart's map for P-384 (`p ≡ 2 mod 3`),
//! - Shallue-van de Woestijne in the Fouque-Tibouchi form for secp256k1.
//!
//! The maps are straight-line code: every candidate is computed, square
//! tests pick among them with conditional selects, and inversions use
//! `inv0` semantics (`0 ↦ 0`). The sign of `y` follows the parity of `u`.
//!
//! `from_hash` sums two maps of independent halves, which gives a point
//! indistinguishable from random when the input is a wide digest.

use crate::arith::Elem;
use crate::curve::params::{Curve, MapConstants};
use crate::curve::point::{AffinePoint, ProjectivePoint};
use crate::error::{Error, Result};
use crate::primitives::Uint;
use subtle::{Choice, ConditionallySelectable};

/// Picks the root of `y2` whose parity matches `u`.
fn finish(curve: &'static Curve, u: &Elem, x: Elem, y2: Elem) -> ProjectivePoint {
    let y = y2.sqrt().unwrap_or(Elem::zero(curve.fp));
    let y = y.conditional_negate(y.is_odd() ^ u.is_odd());

    ProjectivePoint::from_affine(curve, &AffinePoint { x, y })
}

fn sswu(curve: &'static Curve, u: &Elem, z: Elem, minus_b_over_a: Elem, b_over_za: Elem) -> ProjectivePoint {
    let one = Elem::one(curve.fp);
    let zu2 = z * u.square();
    let t1 = (zu2.square() + zu2).invert();

    let x1 = minus_b_over_a * (one + t1);
    let x1 = Elem::conditional_select(&x1, &b_over_za, t1.is_zero());
    let x2 = zu2 * x1;

    let gx1 = curve.rhs(&x1);
    let gx2 = curve.rhs(&x2);
    let e = gx1.is_square();

    finish(
        curve,
        u,
        Elem::conditional_select(&x2, &x1, e),
        Elem::conditional_select(&gx2, &gx1, e),
    )
}

fn icart(curve: &'static Curve, u: &Elem, inv3: Elem, inv27: Elem, cbrt: &Uint) -> ProjectivePoint {
    let u2 = u.square();
    let u4 = u2.square();
    let u6 = u4 * u2;

    let six_u = Elem::from_u64(curve.fp, 6) * *u;
    let v = (Elem::from_u64(curve.fp, 3) * curve.a - u4) * six_u.invert();

    let w = v.square() - curve.b - u6 * inv27;
    let x = w.pow(cbrt) + u2 * inv3;
    let y = *u * x + v;
    let p = ProjectivePoint::from_affine(curve, &AffinePoint { x, y });

    ProjectivePoint::conditional_select(&p, &ProjectivePoint::identity(curve), u.is_zero())
}

fn svdw(curve: &'static Curve, u: &Elem, c: Elem, c1: Elem, one_plus_b: Elem) -> ProjectivePoint {
    let one = Elem::one(curve.fp);
    let w = c * *u * (one_plus_b + u.square()).invert();

    let x1 = c1 - *u * w;
    let x2 = -(one + x1);
    let x3 = one + w.square().invert();

    let g1 = curve.rhs(&x1);
    let g2 = curve.rhs(&x2);
    let g3 = curve.rhs(&x3);
    let e1: Choice = g1.is_square();
    let e2: Choice = g2.is_square();

    let mut x = Elem::conditional_select(&x3, &x2, e2);
    let mut gx = Elem::conditional_select(&g3, &g2, e2);
    x.conditional_assign(&x1, e1);
    gx.conditional_assign(&g1, e1);

    finish(curve, u, x, gx)
}

/// Maps a field element to a point with the curve's map.
pub fn map_to_curve(curve: &'static Curve, u: &Elem) -> ProjectivePoint {
    match curve.map {
        MapConstants::Sswu {
            z,
            minus_b_over_a,
            b_over_za,
        } => sswu(curve, u, z, minus_b_over_a, b_over_za),
        MapConstants::Icart { inv3, inv27, cbrt } => icart(curve, u, inv3, inv27, &cbrt),
        MapConstants::Svdw { c, c1, one_plus_b } => svdw(curve, u, c, c1, one_plus_b),
    }
}

/// Maps `size` uniform bytes: the value is masked to the bit length of
/// `p`, reduced, then mapped.
///
/// # Returns
/// `InvalidEncoding` when the input is not exactly `size` bytes.
pub fn from_uniform(curve: &'static Curve, bytes: &[u8]) -> Result<ProjectivePoint> {
    if bytes.len() != curve.size {
        return Err(Error::InvalidEncoding);
    }

    let raw = Uint::from_be_slice(bytes).ok_or(Error::InvalidEncoding)?;
    let masked = raw.mask_bits(curve.fp.bits());

    let u = Elem::reduce_be_bytes(curve.fp, &masked.to_be_bytes(curve.size));
    Ok(map_to_curve(curve, &u))
}

/// Maps `2·size` bytes by reducing each half, mapping both and adding.
///
/// # Returns
/// - `InvalidEncoding` when the input is not exactly `2·size` bytes,
/// - `InvalidPoint` in the negligible case where the sum is the identity.
pub fn from_hash(curve: &'static Curve, bytes: &[u8]) -> Result<ProjectivePoint> {
    if bytes.len() != 2 * curve.size {
        return Err(Error::InvalidEncoding);
    }

    let (lo, hi) = bytes.split_at(curve.size);
    let p1 = map_to_curve(curve, &Elem::reduce_be_bytes(curve.fp, lo));
    let p2 = map_to_curve(curve, &Elem::reduce_be_bytes(curve.fp, hi));
    let p = p1.add(&p2);

    if bool::from(p.is_identity()) {
        return Err(Error::InvalidPoint);
    }

    Ok(p)
}
