//! Short-Weierstrass group law
//!
//! Points are kept in homogeneous projective coordinates `(X : Y : Z)`
//! with the identity at `(0 : 1 : 0)`. Addition and doubling use the
//! complete formulas of Renes, Costello and Batina ("Complete addition
//! formulas for prime order elliptic curves", 2015, algorithms 1 and 3)
//! for arbitrary `a`. Being complete, they need no special case for the
//! identity, for `P = Q` or for `P = -Q`, which keeps secret-scalar
//! multiplication free of data-dependent branches.

use crate::arith::Elem;
use crate::curve::params::Curve;
use crate::curve::table::{self, Group};
use crate::primitives::Uint;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A finite point in affine coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: Elem,
    pub y: Elem,
}

/// A point in projective coordinates, bound to its curve.
#[derive(Copy, Clone, Debug)]
pub struct ProjectivePoint {
    x: Elem,
    y: Elem,
    z: Elem,
    curve: &'static Curve,
}

impl ProjectivePoint {
    /// The point at infinity.
    pub fn identity(curve: &'static Curve) -> Self {
        Self {
            x: Elem::zero(curve.fp),
            y: Elem::one(curve.fp),
            z: Elem::zero(curve.fp),
            curve,
        }
    }

    pub fn from_affine(curve: &'static Curve, p: &AffinePoint) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: Elem::one(curve.fp),
            curve,
        }
    }

    pub fn curve(&self) -> &'static Curve {
        self.curve
    }

    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Converts to affine coordinates with a constant-time inversion.
    ///
    /// # Returns
    /// `None` for the identity.
    pub fn to_affine(&self) -> Option<AffinePoint> {
        let zi = self.z.invert();
        self.finish_affine(zi)
    }

    /// Converts to affine coordinates; only for public points.
    pub fn to_affine_vartime(&self) -> Option<AffinePoint> {
        let zi = self.z.invert_vartime();
        self.finish_affine(zi)
    }

    fn finish_affine(&self, zi: Elem) -> Option<AffinePoint> {
        if bool::from(self.is_identity()) {
            return None;
        }

        Some(AffinePoint {
            x: self.x * zi,
            y: self.y * zi,
        })
    }

    /// Complete addition (RCB algorithm 1).
    pub fn add(&self, rhs: &Self) -> Self {
        let c = self.curve;
        let (a, b3) = (c.a, c.b3);
        let (x1, y1, z1) = (self.x, self.y, self.z);
        let (x2, y2, z2) = (rhs.x, rhs.y, rhs.z);

        let mut t0 = x1 * x2;
        let mut t1 = y1 * y2;
        let mut t2 = z1 * z2;
        let mut t3 = (x1 + y1) * (x2 + y2);
        let mut t4 = t0 + t1;
        t3 -= t4;
        t4 = (x1 + z1) * (x2 + z2);
        let mut t5 = t0 + t2;
        t4 -= t5;
        t5 = (y1 + z1) * (y2 + z2);
        let mut x3 = t1 + t2;
        t5 -= x3;
        let mut z3 = a * t4;
        x3 = b3 * t2;
        z3 = x3 + z3;
        x3 = t1 - z3;
        z3 = t1 + z3;
        let mut y3 = x3 * z3;
        t1 = t0 + t0;
        t1 += t0;
        t2 = a * t2;
        t4 = b3 * t4;
        t1 += t2;
        t2 = t0 - t2;
        t2 = a * t2;
        t4 += t2;
        t0 = t1 * t4;
        y3 += t0;
        t0 = t5 * t4;
        x3 = t3 * x3;
        x3 -= t0;
        t0 = t3 * t1;
        z3 = t5 * z3;
        z3 += t0;

        Self {
            x: x3,
            y: y3,
            z: z3,
            curve: c,
        }
    }

    /// Complete doubling (RCB algorithm 3).
    pub fn double(&self) -> Self {
        let c = self.curve;
        let (a, b3) = (c.a, c.b3);
        let (x, y, z) = (self.x, self.y, self.z);

        let mut t0 = x * x;
        let t1 = y * y;
        let mut t2 = z * z;
        let mut t3 = x * y;
        t3 += t3;
        let mut z3 = x * z;
        z3 += z3;
        let mut x3 = a * z3;
        let mut y3 = b3 * t2;
        y3 = x3 + y3;
        x3 = t1 - y3;
        y3 = t1 + y3;
        y3 = x3 * y3;
        x3 = t3 * x3;
        z3 = b3 * z3;
        t2 = a * t2;
        t3 = t0 - t2;
        t3 = a * t3;
        t3 += z3;
        z3 = t0 + t0;
        t0 = z3 + t0;
        t0 += t2;
        t0 *= t3;
        y3 += t0;
        t2 = y * z;
        t2 += t2;
        t0 = t2 * t3;
        x3 -= t0;
        z3 = t2 * t1;
        z3 += z3;
        z3 += z3;

        Self {
            x: x3,
            y: y3,
            z: z3,
            curve: c,
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            y: -self.y,
            ..*self
        }
    }

    /// `k·self` in constant time over `bits` scalar bits.
    pub fn mul_uint(&self, k: &Uint, bits: usize) -> Self {
        table::mul_ct(self, k, bits)
    }

    /// `k·self` for a scalar of the curve's group order, constant time.
    pub fn mul(&self, k: &Elem) -> Self {
        self.mul_uint(&k.to_uint(), self.curve.fq.bits())
    }

    /// `a·G + b·self` for public scalars.
    pub fn mul_add_base_vartime(&self, a: &Elem, b: &Elem) -> Self {
        table::mul_add_vartime(
            &self.curve.generator(),
            &a.to_uint(),
            self,
            &b.to_uint(),
        )
    }
}

impl Group for ProjectivePoint {
    fn identity_like(&self) -> Self {
        ProjectivePoint::identity(self.curve)
    }

    fn add(&self, rhs: &Self) -> Self {
        ProjectivePoint::add(self, rhs)
    }

    fn double(&self) -> Self {
        ProjectivePoint::double(self)
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Elem::conditional_select(&a.x, &b.x, choice),
            y: Elem::conditional_select(&a.y, &b.y, choice),
            z: Elem::conditional_select(&a.z, &b.z, choice),
            curve: a.curve,
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x * other.z).ct_eq(&(other.x * self.z))
            & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectivePoint;
    use crate::arith::Elem;
    use crate::curve::CurveId;

    #[test]
    fn complete_formulas_handle_special_cases() {
        for id in CurveId::ALL {
            let c = id.curve();
            let g = c.generator();
            let two_g = g.double();

            assert_eq!(g.add(&g), two_g, "{}", id.name());
            assert!(bool::from(g.add(&g.neg()).is_identity()));
            assert_eq!(g.add(&ProjectivePoint::identity(c)), g);
        }
    }

    #[test]
    fn ladder_matches_table_and_repeated_addition() {
        let c = CurveId::P256.curve();
        let k = Elem::from_u64(c.fq, 37);

        let mut acc = c.generator();
        for _ in 1..37 {
            acc = acc.add(&c.generator());
        }

        assert_eq!(c.mul_base(&k, false), acc);
        assert_eq!(c.mul_base(&k, true), acc);
        assert_eq!(c.generator().mul(&k), acc);
    }
}
