//! Residues bound to their modulus
//!
//! `Elem` pairs a Montgomery-form `Uint` with the `'static` modulus it
//! lives in. Curve formulas can then be written with ordinary operators
//! (`x * y + b`) without threading the modulus through every call, while
//! staying `Copy` and allocation-free.
//!
//! Mixing elements of different moduli is a logic error; it is caught by
//! a debug assertion.

use crate::arith::Modulus;
use crate::primitives::Uint;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// An element of `Z/mZ` in Montgomery form.
#[derive(Copy, Clone, Debug)]
pub struct Elem {
    v: Uint,
    m: &'static Modulus,
}

impl Elem {
    /// The additive identity.
    #[inline]
    pub fn zero(m: &'static Modulus) -> Self {
        Self { v: Uint::ZERO, m }
    }

    /// The multiplicative identity.
    #[inline]
    pub fn one(m: &'static Modulus) -> Self {
        Self { v: m.one(), m }
    }

    /// Lifts a canonical integer (`< m`) into Montgomery form.
    #[inline]
    pub fn from_uint(m: &'static Modulus, a: &Uint) -> Self {
        Self {
            v: m.to_mont(a),
            m,
        }
    }

    /// Lifts a small constant.
    #[inline]
    pub fn from_u64(m: &'static Modulus, a: u64) -> Self {
        Self::from_uint(m, &Uint::from_u64(a))
    }

    /// Lifts a small signed constant, mapping `-k` to `m - k`.
    pub fn from_i64(m: &'static Modulus, a: i64) -> Self {
        let e = Self::from_u64(m, a.unsigned_abs());
        if a < 0 { -e } else { e }
    }

    /// Decodes exactly `m.bytes()` big-endian bytes; fails on `≥ m`.
    pub fn from_be_bytes(m: &'static Modulus, bytes: &[u8]) -> CtOption<Self> {
        m.decode_canonical(bytes).map(|v| Self::from_uint(m, &v))
    }

    /// Reduces an arbitrary-length big-endian byte string modulo `m`.
    pub fn reduce_be_bytes(m: &'static Modulus, bytes: &[u8]) -> Self {
        Self::from_uint(m, &m.reduce_be_bytes(bytes))
    }

    /// Reduces an arbitrary-length little-endian byte string modulo `m`.
    pub fn reduce_le_bytes(m: &'static Modulus, bytes: &[u8]) -> Self {
        let mut be = bytes.to_vec();
        be.reverse();
        let e = Self::reduce_be_bytes(m, &be);
        be.zeroize();
        e
    }

    /// The modulus this element belongs to.
    #[inline]
    pub fn modulus(&self) -> &'static Modulus {
        self.m
    }

    /// Canonical integer value.
    #[inline]
    pub fn to_uint(&self) -> Uint {
        self.m.from_mont(&self.v)
    }

    /// Canonical big-endian encoding, `m.bytes()` long.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.to_uint().to_be_bytes(self.m.bytes())
    }

    /// Writes the canonical big-endian encoding into `out`.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        self.to_uint().write_be_bytes(out);
    }

    /// Canonical little-endian encoding into `out`.
    pub fn write_le_bytes(&self, out: &mut [u8]) {
        self.to_uint().write_le_bytes(out);
    }

    #[inline]
    pub fn square(&self) -> Self {
        Self {
            v: self.m.square(&self.v),
            m: self.m,
        }
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// `self^e` for a public exponent.
    pub fn pow(&self, e: &Uint) -> Self {
        Self {
            v: self.m.pow(&self.v, e),
            m: self.m,
        }
    }

    /// Constant-time inverse, zero maps to zero.
    pub fn invert(&self) -> Self {
        Self {
            v: self.m.invert(&self.v),
            m: self.m,
        }
    }

    /// Variable-time inverse for public values, zero maps to zero.
    pub fn invert_vartime(&self) -> Self {
        Self {
            v: self.m.invert_vartime(&self.v),
            m: self.m,
        }
    }

    pub fn sqrt(&self) -> CtOption<Self> {
        let m = self.m;
        m.sqrt(&self.v).map(|v| Self { v, m })
    }

    /// Cube root when the modulus supports it (`m ≡ 2 mod 3`).
    pub fn cbrt(&self) -> Option<Self> {
        let m = self.m;
        m.cbrt(&self.v).map(|v| Self { v, m })
    }

    /// True for zero and quadratic residues.
    #[inline]
    pub fn is_square(&self) -> Choice {
        self.m.is_square(&self.v)
    }

    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.v.ct_is_zero()
    }

    /// Parity of the canonical value.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        Choice::from(self.to_uint().bit(0))
    }

    /// Constant-time `self > (m - 1) / 2` on canonical values.
    pub fn is_high(&self) -> Choice {
        let half = *self.m.value() >> 1;
        half.ct_lt(&self.to_uint())
    }

    /// Returns `-self` when `flag` is set.
    #[inline]
    pub fn conditional_negate(&self, flag: Choice) -> Self {
        Self::conditional_select(self, &-*self, flag)
    }
}

impl Add for Elem {
    type Output = Elem;

    #[inline]
    fn add(self, rhs: Elem) -> Elem {
        debug_assert!(std::ptr::eq(self.m, rhs.m));
        Elem {
            v: self.m.add(&self.v, &rhs.v),
            m: self.m,
        }
    }
}

impl Sub for Elem {
    type Output = Elem;

    #[inline]
    fn sub(self, rhs: Elem) -> Elem {
        debug_assert!(std::ptr::eq(self.m, rhs.m));
        Elem {
            v: self.m.sub(&self.v, &rhs.v),
            m: self.m,
        }
    }
}

impl Mul for Elem {
    type Output = Elem;

    #[inline]
    fn mul(self, rhs: Elem) -> Elem {
        debug_assert!(std::ptr::eq(self.m, rhs.m));
        Elem {
            v: self.m.mul(&self.v, &rhs.v),
            m: self.m,
        }
    }
}

impl Neg for Elem {
    type Output = Elem;

    #[inline]
    fn neg(self) -> Elem {
        Elem {
            v: self.m.neg(&self.v),
            m: self.m,
        }
    }
}

impl AddAssign for Elem {
    #[inline]
    fn add_assign(&mut self, rhs: Elem) {
        *self = *self + rhs;
    }
}

impl SubAssign for Elem {
    #[inline]
    fn sub_assign(&mut self, rhs: Elem) {
        *self = *self - rhs;
    }
}

impl MulAssign for Elem {
    #[inline]
    fn mul_assign(&mut self, rhs: Elem) {
        *self = *self * rhs;
    }
}

impl ConstantTimeEq for Elem {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.v.ct_eq(&other.v)
    }
}

impl PartialEq for Elem {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Elem {}

impl ConditionallySelectable for Elem {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Elem {
            v: Uint::conditional_select(&a.v, &b.v, choice),
            m: a.m,
        }
    }
}

impl Zeroize for Elem {
    fn zeroize(&mut self) {
        self.v.0.zeroize();
    }
}
