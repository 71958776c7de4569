//! Curve parameters
//!
//! Every supported short-Weierstrass curve is described by a `const`
//! [`CurveDef`] and turned into a process-wide [`Curve`] the first time it
//! is used. Construction prepares both moduli, lifts the constants into
//! Montgomery form and derives the hash-to-curve constants; after that a
//! `Curve` is immutable apart from its lazily built base table.

use crate::arith::{Elem, Modulus};
use crate::curve::point::{AffinePoint, ProjectivePoint};
use crate::curve::table::BaseTable;
use crate::hash::HashAlgorithm;
use crate::primitives::Uint;
use lazy_static::lazy_static;
use std::sync::OnceLock;
use tracing::debug;

/// Identifier of a supported short-Weierstrass curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurveId {
    P192,
    P224,
    P256,
    P384,
    P521,
    Secp256k1,
}

impl CurveId {
    /// Every Weierstrass curve, in ascending field size.
    pub const ALL: [CurveId; 6] = [
        CurveId::P192,
        CurveId::P224,
        CurveId::P256,
        CurveId::P384,
        CurveId::P521,
        CurveId::Secp256k1,
    ];

    /// Conventional curve name.
    pub const fn name(self) -> &'static str {
        match self {
            CurveId::P192 => "P192",
            CurveId::P224 => "P224",
            CurveId::P256 => "P256",
            CurveId::P384 => "P384",
            CurveId::P521 => "P521",
            CurveId::Secp256k1 => "SECP256K1",
        }
    }

    /// The shared parameter set for this curve.
    pub fn curve(self) -> &'static Curve {
        match self {
            CurveId::P192 => &P192,
            CurveId::P224 => &P224,
            CurveId::P256 => &P256,
            CurveId::P384 => &P384,
            CurveId::P521 => &P521,
            CurveId::Secp256k1 => &SECP256K1,
        }
    }
}

/// Hash-to-curve map selected for a curve.
#[derive(Copy, Clone, Debug)]
pub(crate) enum MapKind {
    /// Simplified SWU with the given `Z`.
    Sswu { z: i64 },
    /// Icart's map.
    Icart,
    /// Shallue-van de Woestijne (Fouque-Tibouchi form) for `a = 0`, with
    /// the even square root of `-3`.
    Svdw { sqrt_neg3: Uint },
}

/// Raw constants of a curve.
pub(crate) struct CurveDef {
    id: CurveId,
    p: Uint,
    n: Uint,
    a: i64,
    b: Uint,
    gx: Uint,
    gy: Uint,
    hash: HashAlgorithm,
    map: MapKind,
}

const P192_DEF: CurveDef = CurveDef {
    id: CurveId::P192,
    p: Uint::from_be_hex("fffffffffffffffffffffffffffffffeffffffffffffffff"),
    n: Uint::from_be_hex("ffffffffffffffffffffffff99def836146bc9b1b4d22831"),
    a: -3,
    b: Uint::from_be_hex("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1"),
    gx: Uint::from_be_hex("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012"),
    gy: Uint::from_be_hex("07192b95ffc8da78631011ed6b24cdd573f977a11e794811"),
    hash: HashAlgorithm::Sha256,
    map: MapKind::Sswu { z: -1 },
};

const P224_DEF: CurveDef = CurveDef {
    id: CurveId::P224,
    p: Uint::from_be_hex("ffffffffffffffffffffffffffffffff000000000000000000000001"),
    n: Uint::from_be_hex("ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d"),
    a: -3,
    b: Uint::from_be_hex("b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4"),
    gx: Uint::from_be_hex("b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21"),
    gy: Uint::from_be_hex("bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34"),
    hash: HashAlgorithm::Sha256,
    map: MapKind::Sswu { z: -11 },
};

const P256_DEF: CurveDef = CurveDef {
    id: CurveId::P256,
    p: Uint::from_be_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"),
    n: Uint::from_be_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"),
    a: -3,
    b: Uint::from_be_hex("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b"),
    gx: Uint::from_be_hex("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"),
    gy: Uint::from_be_hex("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"),
    hash: HashAlgorithm::Sha256,
    map: MapKind::Sswu { z: -2 },
};

const P384_DEF: CurveDef = CurveDef {
    id: CurveId::P384,
    p: Uint::from_be_hex(concat!(
        "ffffffffffffffffffffffffffffffffffffffffffffffff",
        "fffffffffffffffeffffffff0000000000000000ffffffff"
    )),
    n: Uint::from_be_hex(concat!(
        "ffffffffffffffffffffffffffffffffffffffffffffffff",
        "c7634d81f4372ddf581a0db248b0a77aecec196accc52973"
    )),
    a: -3,
    b: Uint::from_be_hex(concat!(
        "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe814112",
        "0314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef"
    )),
    gx: Uint::from_be_hex(concat!(
        "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b98",
        "59f741e082542a385502f25dbf55296c3a545e3872760ab7"
    )),
    gy: Uint::from_be_hex(concat!(
        "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147c",
        "e9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f"
    )),
    hash: HashAlgorithm::Sha384,
    map: MapKind::Icart,
};

const P521_DEF: CurveDef = CurveDef {
    id: CurveId::P521,
    p: Uint::from_be_hex(concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )),
    n: Uint::from_be_hex(concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "fa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409"
    )),
    a: -3,
    b: Uint::from_be_hex(concat!(
        "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1",
        "09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00"
    )),
    gx: Uint::from_be_hex(concat!(
        "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d",
        "3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66"
    )),
    gy: Uint::from_be_hex(concat!(
        "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e",
        "662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650"
    )),
    hash: HashAlgorithm::Sha512,
    map: MapKind::Sswu { z: -2 },
};

const SECP256K1_DEF: CurveDef = CurveDef {
    id: CurveId::Secp256k1,
    p: Uint::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
    n: Uint::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
    a: 0,
    b: Uint::from_be_hex("07"),
    gx: Uint::from_be_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
    gy: Uint::from_be_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
    hash: HashAlgorithm::Sha256,
    map: MapKind::Svdw {
        sqrt_neg3: Uint::from_be_hex(
            "0a2d2ba93507f1df233770c2a797962cc61f6d15da14ecd47d8d27ae1cd5f852",
        ),
    },
};

lazy_static! {
    static ref P192_P: Modulus = Modulus::new(P192_DEF.p);
    static ref P192_N: Modulus = Modulus::new(P192_DEF.n);
    static ref P192: Curve = Curve::new(&P192_DEF, &P192_P, &P192_N);

    static ref P224_P: Modulus = Modulus::new(P224_DEF.p);
    static ref P224_N: Modulus = Modulus::new(P224_DEF.n);
    static ref P224: Curve = Curve::new(&P224_DEF, &P224_P, &P224_N);

    static ref P256_P: Modulus = Modulus::new(P256_DEF.p);
    static ref P256_N: Modulus = Modulus::new(P256_DEF.n);
    static ref P256: Curve = Curve::new(&P256_DEF, &P256_P, &P256_N);

    static ref P384_P: Modulus = Modulus::new(P384_DEF.p);
    static ref P384_N: Modulus = Modulus::new(P384_DEF.n);
    static ref P384: Curve = Curve::new(&P384_DEF, &P384_P, &P384_N);

    static ref P521_P: Modulus = Modulus::new(P521_DEF.p);
    static ref P521_N: Modulus = Modulus::new(P521_DEF.n);
    static ref P521: Curve = Curve::new(&P521_DEF, &P521_P, &P521_N);

    static ref SECP256K1_P: Modulus = Modulus::new(SECP256K1_DEF.p);
    static ref SECP256K1_N: Modulus = Modulus::new(SECP256K1_DEF.n);
    static ref SECP256K1: Curve = Curve::new(&SECP256K1_DEF, &SECP256K1_P, &SECP256K1_N);
}

/// Hash-to-curve constants, lifted into the field once.
#[derive(Copy, Clone, Debug)]
pub(crate) enum MapConstants {
    Sswu {
        z: Elem,
        /// `-b / a`
        minus_b_over_a: Elem,
        /// `b / (z·a)`
        b_over_za: Elem,
    },
    Icart {
        inv3: Elem,
        inv27: Elem,
        /// `(2p − 1)/3`
        cbrt: Uint,
    },
    Svdw {
        /// `√-3`
        c: Elem,
        /// `(√-3 - 1) / 2`
        c1: Elem,
        /// `1 + b`
        one_plus_b: Elem,
    },
}

/// Immutable parameter set of a short-Weierstrass curve
/// `y² = x³ + a·x + b` of prime order `n` (cofactor 1).
pub struct Curve {
    pub(crate) id: CurveId,
    pub(crate) fp: &'static Modulus,
    pub(crate) fq: &'static Modulus,
    pub(crate) size: usize,
    pub(crate) a: Elem,
    pub(crate) b: Elem,
    pub(crate) b3: Elem,
    pub(crate) g: AffinePoint,
    pub(crate) hash: HashAlgorithm,
    pub(crate) map: MapConstants,
    table: OnceLock<BaseTable<ProjectivePoint>>,
}

impl std::fmt::Debug for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curve").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Curve {
    fn new(def: &CurveDef, fp: &'static Modulus, fq: &'static Modulus) -> Self {
        let a = Elem::from_i64(fp, def.a);
        let b = Elem::from_uint(fp, &def.b);

        let map = match def.map {
            MapKind::Sswu { z } => {
                let z = Elem::from_i64(fp, z);
                MapConstants::Sswu {
                    z,
                    minus_b_over_a: -(b * a.invert()),
                    b_over_za: b * (z * a).invert(),
                }
            }
            MapKind::Icart => MapConstants::Icart {
                inv3: Elem::from_u64(fp, 3).invert(),
                inv27: Elem::from_u64(fp, 27).invert(),
                cbrt: *fp.cbrt_exponent(),
            },
            MapKind::Svdw { sqrt_neg3 } => {
                let c = Elem::from_uint(fp, &sqrt_neg3);
                let one = Elem::one(fp);
                MapConstants::Svdw {
                    c,
                    c1: (c - one) * Elem::from_u64(fp, 2).invert(),
                    one_plus_b: one + b,
                }
            }
        };

        debug!(curve = def.id.name(), bits = fp.bits(), "curve parameters initialized");

        Self {
            id: def.id,
            fp,
            fq,
            size: fp.bytes(),
            a,
            b,
            b3: b + b + b,
            g: AffinePoint {
                x: Elem::from_uint(fp, &def.gx),
                y: Elem::from_uint(fp, &def.gy),
            },
            hash: def.hash,
            map,
            table: OnceLock::new(),
        }
    }

    /// Curve identifier.
    pub fn id(&self) -> CurveId {
        self.id
    }

    /// Byte length of a field element and of a scalar.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bit length of the group order.
    pub fn order_bits(&self) -> usize {
        self.fq.bits()
    }

    /// Default digest for nonces and challenges.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Field prime `p`.
    pub fn field_modulus(&self) -> &'static Modulus {
        self.fp
    }

    /// Group order `n`.
    pub fn scalar_modulus(&self) -> &'static Modulus {
        self.fq
    }

    /// The generator in projective form.
    pub fn generator(&'static self) -> ProjectivePoint {
        ProjectivePoint::from_affine(self, &self.g)
    }

    /// `k·G` in constant time. With `precompute` the shared fixed-base
    /// table is used (and built on first use).
    pub fn mul_base(&'static self, k: &Elem, precompute: bool) -> ProjectivePoint {
        let k = k.to_uint();

        if precompute {
            self.base_table().mul(&k)
        } else {
            self.generator().mul_uint(&k, self.fq.bits())
        }
    }

    fn base_table(&'static self) -> &BaseTable<ProjectivePoint> {
        self.table.get_or_init(|| {
            debug!(curve = self.id.name(), "building fixed-base table");
            BaseTable::new(&self.generator(), self.fq.bits())
        })
    }

    /// True when `p` satisfies the curve equation. Coordinates held in an
    /// `Elem` are canonical by construction.
    pub fn is_on_curve(&self, p: &AffinePoint) -> bool {
        p.y.square() == self.rhs(&p.x)
    }

    /// Right-hand side of the curve equation, `x³ + a·x + b`.
    pub(crate) fn rhs(&self, x: &Elem) -> Elem {
        (x.square() + self.a) * *x + self.b
    }
}
