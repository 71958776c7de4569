//! Ed25519 group
//!
//! The twisted Edwards curve `−x² + y² = 1 + d·x²·y²` over `p = 2²⁵⁵ − 19`,
//! with a base point `B` of prime order
//! `L = 2²⁵² + 27742317777372353535851937790883648493` and cofactor 8.
//!
//! Points use extended coordinates `(X : Y : Z : T)` with `x = X/Z`,
//! `y = Y/Z` and `x·y = T/Z` (Hisil, Wong, Carter, Dawson 2008). Since `d`
//! is not a square the unified addition law is complete, so the shared
//! constant-time ladder and fixed-base table from `table` apply unchanged.
//!
//! Encoding follows RFC 8032: the little-endian `y` with the parity of `x`
//! in the top bit.

use crate::arith::{Elem, Modulus};
use crate::curve::table::{self, BaseTable, Group};
use crate::error::{Error, Result};
use crate::primitives::Uint;
use lazy_static::lazy_static;
use std::sync::OnceLock;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use tracing::debug;

const P: Uint =
    Uint::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");
const L: Uint =
    Uint::from_be_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed");
const D: Uint =
    Uint::from_be_hex("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3");
const BX: Uint =
    Uint::from_be_hex("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a");
const BY: Uint =
    Uint::from_be_hex("6666666666666666666666666666666666666666666666666666666666666658");

/// Byte length of encoded points, scalars and seeds.
pub const ED25519_SIZE: usize = 32;

lazy_static! {
    static ref ED25519_P: Modulus = Modulus::new(P);
    static ref ED25519_L: Modulus = Modulus::new(L);
    static ref ED25519: EdwardsCurve = EdwardsCurve::new(&ED25519_P, &ED25519_L);
}

/// Parameters of Ed25519.
pub struct EdwardsCurve {
    pub(crate) fp: &'static Modulus,
    pub(crate) fq: &'static Modulus,
    d: Elem,
    d2: Elem,
    bx: Elem,
    by: Elem,
    table: OnceLock<BaseTable<EdwardsPoint>>,
}

impl std::fmt::Debug for EdwardsCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EdwardsCurve(ED25519)")
    }
}

impl EdwardsCurve {
    fn new(fp: &'static Modulus, fq: &'static Modulus) -> Self {
        let d = Elem::from_uint(fp, &D);
        debug!(curve = "ED25519", "curve parameters initialized");

        Self {
            fp,
            fq,
            d,
            d2: d.double(),
            bx: Elem::from_uint(fp, &BX),
            by: Elem::from_uint(fp, &BY),
            table: OnceLock::new(),
        }
    }

    /// The shared Ed25519 instance.
    pub fn ed25519() -> &'static EdwardsCurve {
        &ED25519
    }

    /// Prime `p` of the base field.
    pub fn field_modulus(&self) -> &'static Modulus {
        self.fp
    }

    /// Order `L` of the base point.
    pub fn scalar_modulus(&self) -> &'static Modulus {
        self.fq
    }

    pub fn base_point(&'static self) -> EdwardsPoint {
        EdwardsPoint {
            x: self.bx,
            y: self.by,
            z: Elem::one(self.fp),
            t: self.bx * self.by,
            curve: self,
        }
    }

    /// `k·B` in constant time for a scalar reduced modulo `L`.
    pub fn mul_base(&'static self, k: &Elem, precompute: bool) -> EdwardsPoint {
        let k = k.to_uint();

        if precompute {
            self.base_table().mul(&k)
        } else {
            self.base_point().mul_uint(&k, self.fq.bits())
        }
    }

    fn base_table(&'static self) -> &BaseTable<EdwardsPoint> {
        self.table.get_or_init(|| {
            debug!(curve = "ED25519", "building fixed-base table");
            BaseTable::new(&self.base_point(), self.fq.bits())
        })
    }

    /// Recovers a point from `y` and the parity of `x`.
    fn from_y(&'static self, y: Elem, odd: u8) -> Result<EdwardsPoint> {
        let one = Elem::one(self.fp);
        let yy = y.square();
        let u = yy - one;
        let v = self.d * yy + one;

        let x = Option::<Elem>::from((u * v.invert_vartime()).sqrt()).ok_or(Error::InvalidPoint)?;

        if bool::from(x.is_zero()) && odd == 1 {
            return Err(Error::InvalidPoint);
        }

        let x = x.conditional_negate(Choice::from(x.is_odd().unwrap_u8() ^ odd));

        Ok(EdwardsPoint {
            x,
            y,
            z: one,
            t: x * y,
            curve: self,
        })
    }
}

/// A point of the Ed25519 group in extended coordinates.
#[derive(Copy, Clone, Debug)]
pub struct EdwardsPoint {
    x: Elem,
    y: Elem,
    z: Elem,
    t: Elem,
    curve: &'static EdwardsCurve,
}

impl EdwardsPoint {
    pub fn identity(curve: &'static EdwardsCurve) -> Self {
        Self {
            x: Elem::zero(curve.fp),
            y: Elem::one(curve.fp),
            z: Elem::one(curve.fp),
            t: Elem::zero(curve.fp),
            curve,
        }
    }

    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.ct_eq(&self.z)
    }

    /// Unified addition (`add-2008-hwcd-3`, `k = 2d`).
    pub fn add(&self, rhs: &Self) -> Self {
        let a = (self.y - self.x) * (rhs.y - rhs.x);
        let b = (self.y + self.x) * (rhs.y + rhs.x);
        let c = self.t * self.curve.d2 * rhs.t;
        let d = (self.z * rhs.z).double();

        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;

        Self {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
            curve: self.curve,
        }
    }

    /// Doubling (`dbl-2008-hwcd` with `a = −1`).
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square().double();

        let e = (self.x + self.y).square() - a - b;
        let g = b - a;
        let f = g - c;
        let h = -(a + b);

        Self {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
            curve: self.curve,
        }
    }

    pub fn neg(&self) -> Self {
        Self {
            x: -self.x,
            t: -self.t,
            ..*self
        }
    }

    /// `k·self` in constant time over `bits` scalar bits.
    pub fn mul_uint(&self, k: &Uint, bits: usize) -> Self {
        table::mul_ct(self, k, bits)
    }

    /// `k·self` for a scalar modulo `L`.
    pub fn mul(&self, k: &Elem) -> Self {
        self.mul_uint(&k.to_uint(), self.curve.fq.bits())
    }

    /// `a·B + b·self` for public scalars.
    pub fn mul_add_base_vartime(&self, a: &Elem, b: &Elem) -> Self {
        table::mul_add_vartime(
            &self.curve.base_point(),
            &a.to_uint(),
            self,
            &b.to_uint(),
        )
    }

    fn affine(&self) -> (Elem, Elem) {
        let zi = self.z.invert();
        (self.x * zi, self.y * zi)
    }

    /// RFC 8032 encoding.
    pub fn encode(&self) -> [u8; ED25519_SIZE] {
        let (x, y) = self.affine();
        let mut out = [0u8; ED25519_SIZE];

        y.write_le_bytes(&mut out);
        out[31] |= x.is_odd().unwrap_u8() << 7;
        out
    }

    /// RFC 8032 decoding.
    ///
    /// # Returns
    /// - `InvalidEncoding` when the input is not 32 bytes,
    /// - `InvalidPoint` for `y ≥ p`, a point off the curve, or `x = 0`
    ///   with the sign bit set.
    pub fn decode(curve: &'static EdwardsCurve, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ED25519_SIZE {
            return Err(Error::InvalidEncoding);
        }

        let odd = bytes[31] >> 7;
        let mut raw = [0u8; ED25519_SIZE];
        raw.copy_from_slice(bytes);
        raw[31] &= 0x7f;
        raw.reverse();

        let y = Option::<Elem>::from(Elem::from_be_bytes(curve.fp, &raw)).ok_or(Error::InvalidPoint)?;
        curve.from_y(y, odd)
    }

    /// Birational map to the Montgomery `u` coordinate, `(1 + y)/(1 − y)`,
    /// little-endian.
    pub fn to_montgomery(&self) -> [u8; ED25519_SIZE] {
        let one = Elem::one(self.curve.fp);
        let (_, y) = self.affine();
        let u = (one + y) * (one - y).invert();

        let mut out = [0u8; ED25519_SIZE];
        u.write_le_bytes(&mut out);
        out
    }

    /// Inverse map from a little-endian Montgomery `u`. The parity of
    /// `x` cannot be recovered from `u` and is passed in `odd`.
    ///
    /// # Returns
    /// `InvalidPoint` for a non-canonical `u`, for `u = −1`, or when `u`
    /// is not the image of a curve point.
    pub fn from_montgomery(
        curve: &'static EdwardsCurve,
        bytes: &[u8],
        odd: bool,
    ) -> Result<Self> {
        if bytes.len() != ED25519_SIZE {
            return Err(Error::InvalidEncoding);
        }

        let mut raw = [0u8; ED25519_SIZE];
        raw.copy_from_slice(bytes);
        raw.reverse();

        let u = Option::<Elem>::from(Elem::from_be_bytes(curve.fp, &raw)).ok_or(Error::InvalidPoint)?;
        let one = Elem::one(curve.fp);
        let den = u + one;

        if bool::from(den.is_zero()) {
            return Err(Error::InvalidPoint);
        }

        curve.from_y((u - one) * den.invert_vartime(), odd as u8)
    }
}

impl Group for EdwardsPoint {
    fn identity_like(&self) -> Self {
        EdwardsPoint::identity(self.curve)
    }

    fn add(&self, rhs: &Self) -> Self {
        EdwardsPoint::add(self, rhs)
    }

    fn double(&self) -> Self {
        EdwardsPoint::double(self)
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: Elem::conditional_select(&a.x, &b.x, choice),
            y: Elem::conditional_select(&a.y, &b.y, choice),
            z: Elem::conditional_select(&a.z, &b.z, choice),
            t: Elem::conditional_select(&a.t, &b.t, choice),
            curve: a.curve,
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x * other.z).ct_eq(&(other.x * self.z))
            & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
