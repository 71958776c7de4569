use ecc_engine::CurveId;
use ecc_engine::arith::{Elem, Modulus};
use ecc_engine::primitives::{BYTES, Uint};

const P256_P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";

#[test]
fn uint_hex_and_bytes_agree() {
    let a = Uint::from_be_hex("0123456789abcdef00112233445566778899aabbccddeeff");
    let bytes = hex::decode("0123456789abcdef00112233445566778899aabbccddeeff").unwrap();

    assert_eq!(Uint::from_be_slice(&bytes), Some(a));
    assert_eq!(a.to_be_bytes(24), bytes);
    assert_eq!(a.to_string(), "123456789abcdef00112233445566778899aabbccddeeff");
    assert_eq!(a.bits_vartime(), 185);

    let mut le = bytes.clone();
    le.reverse();
    assert_eq!(Uint::from_le_slice(&le), Some(a));

    assert!(Uint::from_be_slice(&[0u8; BYTES + 1]).is_none());
}

#[test]
fn uint_carries_and_shifts() {
    let max = Uint::from_be_slice(&[0xff; BYTES]).unwrap();

    let (sum, carry) = max.overflowing_add(&Uint::ONE);
    assert_eq!(sum, Uint::ZERO);
    assert_eq!(carry, 1);

    let (diff, borrow) = Uint::ZERO.overflowing_sub(&Uint::ONE);
    assert_eq!(diff, max);
    assert_eq!(borrow, 1);

    let one = Uint::ONE;
    assert_eq!((one << 200) >> 200, one);
    assert_eq!((one << 200).bits_vartime(), 201);
    assert_eq!(one << (BYTES as u32 * 8), Uint::ZERO);
    assert_eq!(max.mask_bits(521).bits_vartime(), 521);

    assert!(bool::from(one.ct_lt(&(one << 64))));
    assert!(!bool::from((one << 64).ct_lt(&one)));
    assert!(one < (one << 64));
}

#[test]
fn uint_small_division() {
    let a = Uint::from_be_hex("100000000000000000000000000000005");
    let (q, r) = a.div_rem_small_vartime(3);
    assert_eq!(r, a.rem_small_vartime(3));
    assert_eq!(q.wrapping_add(&q).wrapping_add(&q).wrapping_add(&Uint::from_u64(r)), a);
}

#[test]
fn modulus_constants() {
    let m = Modulus::new(Uint::from_be_hex(P256_P));
    assert_eq!(m.bits(), 256);
    assert_eq!(m.bytes(), 32);
    assert!(m.is_blum());
    assert!(!m.has_cbrt());

    let x = Uint::from_u64(12345);
    assert_eq!(m.from_mont(&m.to_mont(&x)), x);

    let p_plus_one = m.value().wrapping_add(&Uint::ONE);
    assert_eq!(m.reduce_be_bytes(&p_plus_one.to_be_bytes(33)), Uint::ONE);
}

#[test]
fn field_inversion_and_roots() {
    for id in CurveId::ALL {
        let fp = id.curve().field_modulus();
        let a = Elem::from_u64(fp, 0x1234_5678_9abc_def0);

        assert_eq!(a * a.invert(), Elem::one(fp), "{}", id.name());
        assert_eq!(a.invert(), a.invert_vartime(), "{}", id.name());
        assert!(bool::from(Elem::zero(fp).invert().is_zero()));

        let sq = a.square();
        assert!(bool::from(sq.is_square()));

        let root = Option::<Elem>::from(sq.sqrt()).unwrap();
        assert!(root == a || root == -a, "{}", id.name());

        let p_minus_1 = fp.value().wrapping_sub(&Uint::ONE);
        assert_eq!(a.pow(&p_minus_1), Elem::one(fp));
    }
}

#[test]
fn non_residues_have_no_root() {
    // -1 is a non-residue whenever p ≡ 3 (mod 4).
    for id in [CurveId::P192, CurveId::P256, CurveId::P384, CurveId::P521, CurveId::Secp256k1] {
        let fp = id.curve().field_modulus();
        let m1 = Elem::from_i64(fp, -1);

        assert!(!bool::from(m1.is_square()), "{}", id.name());
        assert!(bool::from(m1.sqrt().is_none()), "{}", id.name());
    }

    // P-224 takes the Tonelli-Shanks path.
    let fp = CurveId::P224.curve().field_modulus();
    let a = Elem::from_u64(fp, 987654321);
    let root = Option::<Elem>::from(a.square().sqrt()).unwrap();
    assert_eq!(root.square(), a.square());
}

#[test]
fn cube_roots_where_available() {
    let fp = CurveId::P384.curve().field_modulus();
    assert!(fp.has_cbrt());

    let a = Elem::from_u64(fp, 42);
    let c = a.square() * a;
    let r = c.cbrt().unwrap();
    assert_eq!(r.square() * r, c);

    // p ≡ 1 (mod 3): cube roots are not unique.
    let p256 = CurveId::P256.curve().field_modulus();
    assert!(Elem::from_u64(p256, 8).cbrt().is_none());
}

#[test]
fn canonical_decoding() {
    let fp = CurveId::P256.curve().field_modulus();
    let p = hex::decode(P256_P).unwrap();

    assert!(bool::from(Elem::from_be_bytes(fp, &p).is_none()));
    assert!(bool::from(Elem::from_be_bytes(fp, &p[1..]).is_none()));

    let mut below = p.clone();
    below[31] -= 1;
    let e = Option::<Elem>::from(Elem::from_be_bytes(fp, &below)).unwrap();
    assert_eq!(e, Elem::from_i64(fp, -1));
    assert_eq!(e.to_be_bytes(), below);
    assert!(bool::from(e.is_high()));
    assert!(!bool::from(e.is_odd()));
    assert!(bool::from(Elem::one(fp).is_odd()));
}
