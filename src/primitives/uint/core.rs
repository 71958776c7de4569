//! Fixed-width unsigned integer primitive
//!
//! This module defines `Uint`, a 576-bit unsigned integer stored as nine
//! 64-bit limbs in **little-endian** limb order. The width covers the
//! largest supported modulus (P-521) with room for a carry limb, so every
//! curve shares one representation and no heap allocation is ever needed.
//!
//! `Uint` is a plain value type. Modular semantics live one layer up in
//! `arith`; here we only provide carries, borrows, shifts, comparisons and
//! big-endian byte conversion.

use std::fmt::{Display, Formatter, Result};

/// Number of 64-bit limbs in a [`Uint`].
pub const LIMBS: usize = 9;

/// Number of bytes covered by a [`Uint`].
pub const BYTES: usize = LIMBS * 8;

/// Fixed-size 576-bit unsigned integer.
///
/// Limb `0` is the least significant. Values produced by the modular layer
/// never use more limbs than their modulus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Uint(pub(crate) [u64; LIMBS]);

impl Uint {
    /// The value zero.
    pub const ZERO: Self = Self([0u64; LIMBS]);

    /// The value one.
    pub const ONE: Self = Self::from_u64(1);

    /// Builds a value from a single limb.
    pub const fn from_u64(v: u64) -> Self {
        let mut limbs = [0u64; LIMBS];
        limbs[0] = v;
        Self(limbs)
    }

    /// Parses a big-endian hexadecimal constant.
    ///
    /// Intended for `const` curve parameters: an invalid digit or an
    /// oversized string is a compile-time error when evaluated in a
    /// constant context.
    pub const fn from_be_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        assert!(bytes.len() <= BYTES * 2, "hex constant too large");

        let mut limbs = [0u64; LIMBS];
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[bytes.len() - 1 - i];
            let v = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit"),
            };

            limbs[i / 16] |= (v as u64) << ((i % 16) * 4);
            i += 1;
        }

        Self(limbs)
    }

    /// Interprets up to [`BYTES`] big-endian bytes as an integer.
    ///
    /// # Returns
    /// `None` when `bytes` is longer than the integer width.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > BYTES {
            return None;
        }

        let mut limbs = [0u64; LIMBS];

        for (i, &b) in bytes.iter().rev().enumerate() {
            limbs[i / 8] |= (b as u64) << ((i % 8) * 8);
        }

        Some(Self(limbs))
    }

    /// Interprets little-endian bytes as an integer.
    pub fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > BYTES {
            return None;
        }

        let mut limbs = [0u64; LIMBS];

        for (i, &b) in bytes.iter().enumerate() {
            limbs[i / 8] |= (b as u64) << ((i % 8) * 8);
        }

        Some(Self(limbs))
    }

    /// Writes the low `out.len()` bytes of the value in big-endian order.
    ///
    /// Higher bytes that do not fit are silently dropped; callers size the
    /// output from the modulus so nothing significant is lost.
    pub fn write_be_bytes(&self, out: &mut [u8]) {
        let len = out.len();

        for (i, o) in out.iter_mut().rev().enumerate().take(BYTES.min(len)) {
            *o = (self.0[i / 8] >> ((i % 8) * 8)) as u8;
        }
    }

    /// Writes the low `out.len()` bytes of the value in little-endian order.
    pub fn write_le_bytes(&self, out: &mut [u8]) {
        for (i, o) in out.iter_mut().enumerate().take(BYTES) {
            *o = (self.0[i / 8] >> ((i % 8) * 8)) as u8;
        }
    }

    /// Returns the value as `len` big-endian bytes.
    pub fn to_be_bytes(&self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.write_be_bytes(&mut out);
        out
    }

    /// Returns bit `i` (0 = least significant) as `0` or `1`.
    #[inline]
    pub fn bit(&self, i: usize) -> u8 {
        if i >= BYTES * 8 {
            return 0;
        }

        ((self.0[i / 64] >> (i % 64)) & 1) as u8
    }

    /// Returns the 4-bit window starting at bit `4 * i`.
    #[inline]
    pub fn nibble(&self, i: usize) -> u8 {
        if i >= BYTES * 2 {
            return 0;
        }

        ((self.0[i / 16] >> ((i % 16) * 4)) & 0xf) as u8
    }

    /// Number of significant bits.
    ///
    /// # Notes
    /// Runs in time dependent on the value; only call on public data.
    pub fn bits_vartime(&self) -> usize {
        for i in (0..LIMBS).rev() {
            if self.0[i] != 0 {
                return i * 64 + (64 - self.0[i].leading_zeros() as usize);
            }
        }

        0
    }

    /// Returns `true` if the least significant bit is set.
    #[inline]
    pub fn is_odd_vartime(&self) -> bool {
        self.0[0] & 1 == 1
    }

    /// Returns `true` if every limb is zero.
    #[inline]
    pub fn is_zero_vartime(&self) -> bool {
        self.0.iter().all(|&l| l == 0)
    }

    /// Keeps only the lowest `bits` bits.
    pub fn mask_bits(&self, bits: usize) -> Self {
        let mut out = *self;

        for (i, limb) in out.0.iter_mut().enumerate() {
            let lo = i * 64;

            if bits <= lo {
                *limb = 0;
            } else if bits < lo + 64 {
                *limb &= (1u64 << (bits - lo)) - 1;
            }
        }

        out
    }
}

impl Display for Uint {
    /// Formats the value as lowercase big-endian hexadecimal without
    /// leading zero limbs.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let top = (0..LIMBS).rev().find(|&i| self.0[i] != 0).unwrap_or(0);

        write!(f, "{:x}", self.0[top])?;

        for i in (0..top).rev() {
            write!(f, "{:016x}", self.0[i])?;
        }

        Ok(())
    }
}
