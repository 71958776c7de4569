//! Montgomery arithmetic modulo an odd prime
//!
//! A `Modulus` owns every constant needed to work modulo a prime `m`:
//! the Montgomery parameters, the active limb count and the public
//! exponents used for inversion, square roots and cube roots.
//!
//! All residues handled here are `Uint` values in Montgomery form
//! (`a·R mod m` with `R = 2^(64·limbs)`). Operations that may touch secret
//! data (add, sub, mul, pow, invert, sqrt) are branch-free with respect to
//! the residue; only exponents, which are always public, drive control
//! flow. Functions suffixed `_vartime` are for public inputs only.

use crate::primitives::{LIMBS, Uint, adc, mac};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Square-root strategy, chosen from `m mod 4` at construction.
#[derive(Clone, Debug)]
enum SqrtStrategy {
    /// `m ≡ 3 (mod 4)`: `sqrt(a) = a^((m+1)/4)`.
    Blum { exp: Uint },

    /// General case, constant-time Tonelli-Shanks.
    TonelliShanks {
        /// 2-adicity of `m - 1`.
        c1: u32,
        /// `(c2 - 1) / 2` where `m - 1 = 2^c1 · c2`.
        c3: Uint,
        /// `z^c2` for the smallest non-residue `z`, Montgomery form.
        c5: Uint,
    },
}

/// An odd prime modulus with precomputed Montgomery constants.
#[derive(Clone, Debug)]
pub struct Modulus {
    m: Uint,
    limbs: usize,
    bits: usize,
    bytes: usize,
    m_inv: u64,
    one: Uint,
    r2: Uint,
    exp_inv: Uint,
    exp_legendre: Uint,
    exp_cbrt: Uint,
    cbrt: bool,
    sqrt: SqrtStrategy,
}

impl Modulus {
    /// Prepares a modulus.
    ///
    /// `m` must be an odd prime greater than 3. Every supported curve
    /// passes its field prime and its group order through here once.
    pub fn new(m: Uint) -> Self {
        let bits = m.bits_vartime();
        let limbs = bits.div_ceil(64);

        let mut inv = 1u64;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(m.0[0].wrapping_mul(inv)));
        }

        let mut md = Self {
            m,
            limbs,
            bits,
            bytes: bits.div_ceil(8),
            m_inv: inv.wrapping_neg(),
            one: Uint::ZERO,
            r2: Uint::ZERO,
            exp_inv: m.wrapping_sub(&Uint::from_u64(2)),
            exp_legendre: m >> 1,
            exp_cbrt: (m << 1).wrapping_sub(&Uint::ONE).div_rem_small_vartime(3).0,
            cbrt: m.rem_small_vartime(3) == 2,
            sqrt: SqrtStrategy::Blum { exp: Uint::ZERO },
        };

        // R mod m, then R^2 mod m, by repeated doubling.
        let mut x = Uint::ONE;
        for _ in 0..64 * limbs {
            x = md.add(&x, &x);
        }
        md.one = x;
        for _ in 0..64 * limbs {
            x = md.add(&x, &x);
        }
        md.r2 = x;

        md.sqrt = if m.rem_small_vartime(4) == 3 {
            SqrtStrategy::Blum {
                exp: m.wrapping_add(&Uint::ONE) >> 2,
            }
        } else {
            md.tonelli_shanks_constants()
        };

        md
    }

    fn tonelli_shanks_constants(&self) -> SqrtStrategy {
        let q = self.m.wrapping_sub(&Uint::ONE);
        let mut c1 = 0u32;
        let mut c2 = q;

        while !c2.is_odd_vartime() {
            c2 = c2 >> 1;
            c1 += 1;
        }

        let mut z = 2u64;
        loop {
            let zm = self.to_mont(&Uint::from_u64(z));
            if !bool::from(self.is_square(&zm)) {
                return SqrtStrategy::TonelliShanks {
                    c1,
                    c3: c2 >> 1,
                    c5: self.pow(&zm, &c2),
                };
            }
            z += 1;
        }
    }

    /// The modulus value.
    #[inline]
    pub fn value(&self) -> &Uint {
        &self.m
    }

    /// Bit length of the modulus.
    #[inline]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Byte length of a canonical encoding.
    #[inline]
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Montgomery form of one.
    #[inline]
    pub fn one(&self) -> Uint {
        self.one
    }

    /// Returns `true` if cube roots are available (`m ≡ 2 mod 3`).
    pub fn has_cbrt(&self) -> bool {
        self.cbrt
    }

    /// `(2m − 1)/3`. Raising to this power takes cube roots only when
    /// [`Modulus::has_cbrt`] holds.
    pub fn cbrt_exponent(&self) -> &Uint {
        &self.exp_cbrt
    }

    /// Returns `true` if `m ≡ 3 (mod 4)`.
    pub fn is_blum(&self) -> bool {
        matches!(self.sqrt, SqrtStrategy::Blum { .. })
    }

    /// `a + b mod m`.
    #[inline]
    pub fn add(&self, a: &Uint, b: &Uint) -> Uint {
        let s = a.wrapping_add(b);
        let (d, borrow) = s.overflowing_sub(&self.m);
        Uint::conditional_select(&d, &s, Choice::from(borrow as u8))
    }

    /// `a - b mod m`.
    #[inline]
    pub fn sub(&self, a: &Uint, b: &Uint) -> Uint {
        let (d, borrow) = a.overflowing_sub(b);
        let fix = Uint::conditional_select(&Uint::ZERO, &self.m, Choice::from(borrow as u8));
        d.wrapping_add(&fix)
    }

    /// `-a mod m`.
    #[inline]
    pub fn neg(&self, a: &Uint) -> Uint {
        self.sub(&Uint::ZERO, a)
    }

    /// Montgomery product `a·b·R⁻¹ mod m` (CIOS).
    pub fn mul(&self, a: &Uint, b: &Uint) -> Uint {
        let n = self.limbs;
        let m = &self.m.0;
        let mut t = [0u64; LIMBS + 2];

        for i in 0..n {
            let mut c = 0;
            for j in 0..n {
                (t[j], c) = mac(t[j], a.0[j], b.0[i], c);
            }
            let (s, hi) = adc(t[n], c, 0);
            t[n] = s;
            t[n + 1] = hi;

            let q = t[0].wrapping_mul(self.m_inv);
            let (_, mut c) = mac(t[0], q, m[0], 0);
            for j in 1..n {
                (t[j - 1], c) = mac(t[j], q, m[j], c);
            }
            let (s, hi) = adc(t[n], c, 0);
            t[n - 1] = s;
            t[n] = t[n + 1] + hi;
        }

        let mut out = [0u64; LIMBS];
        out[..n].copy_from_slice(&t[..n]);
        if n < LIMBS {
            out[n] = t[n];
        }

        let u = Uint(out);
        let (d, borrow) = u.overflowing_sub(&self.m);
        Uint::conditional_select(&d, &u, Choice::from(borrow as u8))
    }

    /// Montgomery square.
    #[inline]
    pub fn square(&self, a: &Uint) -> Uint {
        self.mul(a, a)
    }

    /// Converts a canonical integer into Montgomery form.
    #[inline]
    pub fn to_mont(&self, a: &Uint) -> Uint {
        self.mul(a, &self.r2)
    }

    /// Converts out of Montgomery form.
    #[inline]
    pub fn from_mont(&self, a: &Uint) -> Uint {
        self.mul(a, &Uint::ONE)
    }

    /// `a^e`, constant time in `a`. The exponent is public.
    pub fn pow(&self, a: &Uint, e: &Uint) -> Uint {
        let mut acc = self.one;

        for i in (0..e.bits_vartime()).rev() {
            acc = self.square(&acc);
            if e.bit(i) == 1 {
                acc = self.mul(&acc, a);
            }
        }

        acc
    }

    /// Inverse by Fermat's little theorem; maps zero to zero.
    pub fn invert(&self, a: &Uint) -> Uint {
        self.pow(a, &self.exp_inv)
    }

    /// Inverse by the binary extended Euclidean algorithm; maps zero to
    /// zero. Leaks timing, so only use it on public values.
    pub fn invert_vartime(&self, a: &Uint) -> Uint {
        let a = self.from_mont(a);

        if a.is_zero_vartime() {
            return Uint::ZERO;
        }

        let mut u = a;
        let mut v = self.m;
        let mut x1 = Uint::ONE;
        let mut x2 = Uint::ZERO;

        while u != Uint::ONE && v != Uint::ONE {
            while !u.is_odd_vartime() {
                u = u >> 1;
                x1 = self.half_vartime(&x1);
            }

            while !v.is_odd_vartime() {
                v = v >> 1;
                x2 = self.half_vartime(&x2);
            }

            if u >= v {
                u = u.wrapping_sub(&v);
                x1 = self.sub(&x1, &x2);
            } else {
                v = v.wrapping_sub(&u);
                x2 = self.sub(&x2, &x1);
            }
        }

        let inv = if u == Uint::ONE { x1 } else { x2 };
        self.to_mont(&inv)
    }

    fn half_vartime(&self, x: &Uint) -> Uint {
        if x.is_odd_vartime() {
            x.wrapping_add(&self.m) >> 1
        } else {
            *x >> 1
        }
    }

    /// Euler's criterion: true for zero and for quadratic residues.
    pub fn is_square(&self, a: &Uint) -> Choice {
        let l = self.pow(a, &self.exp_legendre);
        l.ct_eq(&self.one) | l.ct_eq(&Uint::ZERO)
    }

    /// Square root in Montgomery form; none when `a` is a non-residue.
    pub fn sqrt(&self, a: &Uint) -> CtOption<Uint> {
        let root = match &self.sqrt {
            SqrtStrategy::Blum { exp } => self.pow(a, exp),
            SqrtStrategy::TonelliShanks { c1, c3, c5 } => {
                let mut z = self.pow(a, c3);
                let mut t = self.mul(&self.square(&z), a);
                z = self.mul(&z, a);
                let mut b = t;
                let mut c = *c5;

                for i in (2..=*c1).rev() {
                    for _ in 1..i - 1 {
                        b = self.square(&b);
                    }

                    let e = b.ct_eq(&self.one);
                    let zt = self.mul(&z, &c);
                    z = Uint::conditional_select(&zt, &z, e);
                    c = self.square(&c);
                    let tt = self.mul(&t, &c);
                    t = Uint::conditional_select(&tt, &t, e);
                    b = t;
                }

                z
            }
        };

        CtOption::new(root, self.square(&root).ct_eq(a))
    }

    /// Cube root, defined for every input when `m ≡ 2 (mod 3)`.
    ///
    /// # Returns
    /// `None` when the modulus has no unique cube roots.
    pub fn cbrt(&self, a: &Uint) -> Option<Uint> {
        self.has_cbrt().then(|| self.pow(a, &self.exp_cbrt))
    }

    /// Decodes exactly `bytes()` big-endian bytes, rejecting values `≥ m`.
    ///
    /// # Returns
    /// The canonical integer (not in Montgomery form).
    pub fn decode_canonical(&self, bytes: &[u8]) -> CtOption<Uint> {
        match Uint::from_be_slice(bytes) {
            Some(v) if bytes.len() == self.bytes => CtOption::new(v, v.ct_lt(&self.m)),
            _ => CtOption::new(Uint::ZERO, Choice::from(0)),
        }
    }

    /// Reduces a big-endian byte string of any length modulo `m`.
    ///
    /// Runs in time dependent only on the input length.
    ///
    /// # Returns
    /// The canonical remainder (not in Montgomery form).
    pub fn reduce_be_bytes(&self, bytes: &[u8]) -> Uint {
        let mut acc = Uint::ZERO;

        for &b in bytes {
            for _ in 0..8 {
                acc = self.add(&acc, &acc);
            }
            acc = self.add(&acc, &Uint::from_u64(b as u64));
        }

        acc
    }

    /// Reduces a canonical-width integer that may exceed `m` once.
    pub fn reduce_once(&self, a: &Uint) -> Uint {
        let (d, borrow) = a.overflowing_sub(&self.m);
        Uint::conditional_select(&d, a, Choice::from(borrow as u8))
    }
}
