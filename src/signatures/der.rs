//! DER signature codec
//!
//! A DER signature is `SEQUENCE { INTEGER r, INTEGER s }`:
//!
//! ```text
//! 30 <len> 02 <len r> <r> 02 <len s> <s>
//! ```
//!
//! Integers are minimal two's-complement, so a leading `00` appears only
//! when the next byte has its high bit set. The sequence length uses the
//! long form `81 <len>` once the body reaches 128 bytes, which happens
//! for P-384 and P-521.
//!
//! Two parsers are provided. [`decode`] is strict and rejects anything
//! that is not the unique encoding. [`decode_lax`] follows the lenient
//! rules of libsecp256k1's `ecdsa_signature_parse_der_lax` and exists so
//! that historical non-canonical signatures can still be verified.

use crate::error::{Error, Result};

const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// Widest scalar of any supported curve (P-521).
const MAX_SCALAR: usize = 66;

/// Minimal big-endian magnitude with a sign pad when needed.
fn encode_integer(out: &mut Vec<u8>, v: &[u8]) {
    let start = v.iter().position(|&b| b != 0).unwrap_or(v.len() - 1);
    let v = &v[start..];
    let pad = v[0] & 0x80 != 0;

    out.push(INTEGER);
    out.push((v.len() + pad as usize) as u8);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(v);
}

/// Encodes a compact `r ‖ s` signature.
///
/// # Returns
/// `InvalidEncoding` when the input is empty, of odd length, or wider
/// than two P-521 scalars. Bodies then always fit `81 <len>`.
pub fn encode(sig: &[u8]) -> Result<Vec<u8>> {
    if sig.is_empty() || sig.len() % 2 != 0 || sig.len() > 2 * MAX_SCALAR {
        return Err(Error::InvalidEncoding);
    }

    let (r, s) = sig.split_at(sig.len() / 2);
    let mut body = Vec::with_capacity(sig.len() + 6);
    encode_integer(&mut body, r);
    encode_integer(&mut body, s);

    let mut out = Vec::with_capacity(body.len() + 3);
    out.push(SEQUENCE);
    if body.len() >= 0x80 {
        out.push(0x81);
    }
    out.push(body.len() as u8);
    out.extend_from_slice(&body);

    Ok(out)
}

/// Cursor over a DER byte string.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self.data.get(self.pos).ok_or(Error::InvalidEncoding)?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::InvalidEncoding);
        }

        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn expect(&mut self, tag: u8) -> Result<()> {
        if self.byte()? != tag {
            return Err(Error::InvalidEncoding);
        }

        Ok(())
    }

    /// Minimal length: short form, or `81 xx` with `xx ≥ 0x80`.
    fn strict_len(&mut self) -> Result<usize> {
        match self.byte()? {
            b if b < 0x80 => Ok(b as usize),
            0x81 => match self.byte()? {
                b if b >= 0x80 => Ok(b as usize),
                _ => Err(Error::InvalidEncoding),
            },
            _ => Err(Error::InvalidEncoding),
        }
    }

    /// Any length form; zero padding in the long form is skipped.
    fn lax_len(&mut self) -> Result<usize> {
        let b = self.byte()?;

        if b & 0x80 == 0 {
            return Ok(b as usize);
        }

        let mut n = (b & 0x7f) as usize;
        while n > 0 && self.data.get(self.pos) == Some(&0) {
            self.pos += 1;
            n -= 1;
        }

        if n > std::mem::size_of::<usize>() {
            return Err(Error::InvalidEncoding);
        }

        let mut len = 0usize;
        for _ in 0..n {
            len = (len << 8) | self.byte()? as usize;
        }

        Ok(len)
    }
}

/// Left-pads a magnitude to `size` bytes after dropping leading zeros.
fn fit(out: &mut Vec<u8>, v: &[u8], size: usize) -> Result<()> {
    let start = v.iter().position(|&b| b != 0).unwrap_or(v.len());
    let v = &v[start..];

    if v.len() > size {
        return Err(Error::InvalidEncoding);
    }

    out.resize(out.len() + size - v.len(), 0);
    out.extend_from_slice(v);
    Ok(())
}

fn strict_integer(rd: &mut Reader<'_>, out: &mut Vec<u8>, size: usize) -> Result<()> {
    rd.expect(INTEGER)?;
    let len = rd.strict_len()?;
    let v = rd.take(len)?;

    match v {
        [] => Err(Error::InvalidEncoding),
        [b, ..] if b & 0x80 != 0 => Err(Error::InvalidEncoding),
        [0, b, ..] if b & 0x80 == 0 => Err(Error::InvalidEncoding),
        _ => fit(out, v, size),
    }
}

/// Strict DER to compact `r ‖ s`.
///
/// # Returns
/// `InvalidEncoding` for a wrong tag, a non-minimal length or integer, a
/// negative integer, trailing bytes, or an integer wider than `size`.
pub fn decode(der: &[u8], size: usize) -> Result<Vec<u8>> {
    let mut rd = Reader::new(der);

    rd.expect(SEQUENCE)?;
    let len = rd.strict_len()?;
    if len != rd.remaining() {
        return Err(Error::InvalidEncoding);
    }

    let mut out = Vec::with_capacity(2 * size);
    strict_integer(&mut rd, &mut out, size)?;
    strict_integer(&mut rd, &mut out, size)?;

    if rd.remaining() != 0 {
        return Err(Error::InvalidEncoding);
    }

    Ok(out)
}

/// Lenient DER to compact `r ‖ s`.
///
/// Accepts any length form, ignores the sequence length and trailing
/// bytes, and tolerates zero-padded integers. Integers must still fit in
/// `size` bytes once leading zeros are dropped.
pub fn decode_lax(der: &[u8], size: usize) -> Result<Vec<u8>> {
    let mut rd = Reader::new(der);

    rd.expect(SEQUENCE)?;
    let _ = rd.lax_len()?;

    let mut out = Vec::with_capacity(2 * size);

    for _ in 0..2 {
        rd.expect(INTEGER)?;
        let len = rd.lax_len()?;
        let v = rd.take(len)?;
        fit(&mut out, v, size)?;
    }

    Ok(out)
}
