//! Arithmetic, bitwise and comparison operations for `Uint`
//!
//! Carries and borrows are returned explicitly instead of being hidden
//! behind wrapping operators, since the modular layer needs them to drive
//! its final conditional subtraction. Everything here runs in time that
//! depends only on the width of the type, except for the helpers whose
//! name ends in `_vartime`.

use crate::primitives::uint::{LIMBS, Uint};
use std::cmp::Ordering;
use std::ops::{Shl, Shr};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Computes `a + b + carry`, returning the low word and the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Computes `a - b - borrow`, returning the low word and the new borrow
/// (`0` or `1`).
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, ((t >> 64) as u64) & 1)
}

/// Computes `a + b * c + carry`, returning the low word and the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

impl Uint {
    /// Full-width addition.
    ///
    /// # Returns
    /// The wrapped sum and the outgoing carry (`0` or `1`).
    #[inline]
    pub fn overflowing_add(&self, rhs: &Self) -> (Self, u64) {
        let mut out = [0u64; LIMBS];
        let mut carry = 0;

        for i in 0..LIMBS {
            (out[i], carry) = adc(self.0[i], rhs.0[i], carry);
        }

        (Self(out), carry)
    }

    /// Full-width subtraction.
    ///
    /// # Returns
    /// The wrapped difference and the outgoing borrow (`0` or `1`).
    #[inline]
    pub fn overflowing_sub(&self, rhs: &Self) -> (Self, u64) {
        let mut out = [0u64; LIMBS];
        let mut borrow = 0;

        for i in 0..LIMBS {
            (out[i], borrow) = sbb(self.0[i], rhs.0[i], borrow);
        }

        (Self(out), borrow)
    }

    /// Wrapping addition.
    #[inline]
    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        self.overflowing_add(rhs).0
    }

    /// Wrapping subtraction.
    #[inline]
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    /// Constant-time `self < rhs`.
    #[inline]
    pub fn ct_lt(&self, rhs: &Self) -> Choice {
        let (_, borrow) = self.overflowing_sub(rhs);
        Choice::from(borrow as u8)
    }

    /// Constant-time zero test.
    #[inline]
    pub fn ct_is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Divides by a small word.
    ///
    /// # Returns
    /// The quotient and remainder.
    ///
    /// # Notes
    /// Used only to derive public exponents from moduli.
    pub fn div_rem_small_vartime(&self, d: u64) -> (Self, u64) {
        let mut out = [0u64; LIMBS];
        let mut rem = 0u128;

        for i in (0..LIMBS).rev() {
            let cur = (rem << 64) | self.0[i] as u128;
            out[i] = (cur / d as u128) as u64;
            rem = cur % d as u128;
        }

        (Self(out), rem as u64)
    }

    /// Remainder modulo a small word.
    pub fn rem_small_vartime(&self, d: u64) -> u64 {
        self.div_rem_small_vartime(d).1
    }
}

/// Logical right shift by a bit count. Shifts of the full width or more
/// yield zero.
impl Shr<u32> for Uint {
    type Output = Uint;

    fn shr(self, rhs: u32) -> Self::Output {
        let shift = rhs as usize;

        if shift >= LIMBS * 64 {
            return Uint::ZERO;
        }

        let limb_shift = shift / 64;
        let bit_shift = shift % 64;
        let mut out = [0u64; LIMBS];

        for i in 0..LIMBS - limb_shift {
            out[i] = self.0[i + limb_shift] >> bit_shift;

            if bit_shift != 0 && i + limb_shift + 1 < LIMBS {
                out[i] |= self.0[i + limb_shift + 1] << (64 - bit_shift);
            }
        }

        Uint(out)
    }
}

/// Logical left shift by a bit count. Bits shifted past the top are lost.
impl Shl<u32> for Uint {
    type Output = Uint;

    fn shl(self, rhs: u32) -> Self::Output {
        let shift = rhs as usize;

        if shift >= LIMBS * 64 {
            return Uint::ZERO;
        }

        let limb_shift = shift / 64;
        let bit_shift = shift % 64;
        let mut out = [0u64; LIMBS];

        for i in limb_shift..LIMBS {
            out[i] = self.0[i - limb_shift] << bit_shift;

            if bit_shift != 0 && i > limb_shift {
                out[i] |= self.0[i - limb_shift - 1] >> (64 - bit_shift);
            }
        }

        Uint(out)
    }
}

/// Numeric ordering, most significant limb first.
///
/// This comparison exits early and must only be used on public values;
/// secret comparisons go through [`Uint::ct_lt`].
impl Ord for Uint {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..LIMBS).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        Ordering::Equal
    }
}

impl PartialOrd for Uint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ConstantTimeEq for Uint {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut acc = 0u64;

        for i in 0..LIMBS {
            acc |= self.0[i] ^ other.0[i];
        }

        acc.ct_eq(&0)
    }
}

impl ConditionallySelectable for Uint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; LIMBS];

        for i in 0..LIMBS {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }

        Uint(out)
    }
}
