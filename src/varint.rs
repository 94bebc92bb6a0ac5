//! Unsigned LEB128 varints restricted to 63 bits.
//!
//! Each byte carries 7 payload bits, low-order group first, with the high bit
//! set on every byte except the last. Decoding is strict: the encoding must be
//! minimal and at most [`MAX_LEN`] bytes long.

use crate::error::{
  Error,
  Result,
};
use sp_std::{
  convert::TryFrom,
  fmt,
  vec::Vec,
};

/// Largest value a varint may carry.
pub const MAX_VALUE: u64 = (1 << 63) - 1;

/// Longest valid encoding, in bytes.
pub const MAX_LEN: usize = 9;

const CONTINUE: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// The canonical encoding of an unsigned integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Varint {
  buf: [u8; MAX_LEN],
  len: u8,
}

impl Varint {
  /// # Errors
  ///
  /// Returns `ValueTooLarge` if `value` exceeds [`MAX_VALUE`].
  pub fn new(value: u64) -> Result<Self> {
    if value > MAX_VALUE {
      return Err(Error::ValueTooLarge);
    }
    let mut buf = [0u8; MAX_LEN];
    let mut len = 0;
    let mut rest = value;
    loop {
      let group = (rest as u8) & PAYLOAD;
      rest >>= 7;
      if rest == 0 {
        buf[len] = group;
        len += 1;
        break;
      }
      buf[len] = group | CONTINUE;
      len += 1;
    }
    Ok(Varint { buf, len: len as u8 })
  }

  /// # Errors
  ///
  /// Returns `NegativeValue` for negative input.
  pub fn from_signed(value: i64) -> Result<Self> {
    if value < 0 {
      return Err(Error::NegativeValue);
    }
    Self::new(value as u64)
  }

  /// Reads a varint from the front of `bytes`, returning it together with
  /// the number of bytes consumed.
  ///
  /// # Errors
  ///
  /// See [`decode`].
  pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
    let (value, read) = decode(bytes)?;
    let mut buf = [0u8; MAX_LEN];
    buf[..read].copy_from_slice(&bytes[..read]);
    Ok((Varint { buf, len: read as u8 }, read))
  }

  pub fn value(&self) -> u64 {
    self.as_bytes().iter().enumerate().fold(0, |acc, (i, byte)| {
      acc | (u64::from(byte & PAYLOAD) << (7 * i))
    })
  }

  pub fn as_bytes(&self) -> &[u8] { &self.buf[..usize::from(self.len)] }

  #[allow(clippy::len_without_is_empty)]
  pub fn len(&self) -> usize { usize::from(self.len) }
}

impl AsRef<[u8]> for Varint {
  fn as_ref(&self) -> &[u8] { self.as_bytes() }
}

impl fmt::Debug for Varint {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Varint({})", self.value())
  }
}

impl TryFrom<u64> for Varint {
  type Error = Error;

  fn try_from(value: u64) -> Result<Self> { Self::new(value) }
}

impl TryFrom<i64> for Varint {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::from_signed(value) }
}

impl From<u32> for Varint {
  fn from(value: u32) -> Self {
    let mut buf = [0u8; MAX_LEN];
    let mut len = 0;
    let mut rest = value;
    while rest >= u32::from(CONTINUE) {
      buf[len] = (rest as u8) | CONTINUE;
      rest >>= 7;
      len += 1;
    }
    buf[len] = rest as u8;
    Varint { buf, len: (len + 1) as u8 }
  }
}

/// Encodes `value`.
///
/// # Errors
///
/// Returns `ValueTooLarge` if `value` exceeds [`MAX_VALUE`].
pub fn encode(value: u64) -> Result<Varint> { Varint::new(value) }

/// Appends the encoding of `value` to `out`.
///
/// # Errors
///
/// Returns `ValueTooLarge` if `value` exceeds [`MAX_VALUE`].
pub fn encode_into(value: u64, out: &mut Vec<u8>) -> Result<()> {
  if value > MAX_VALUE {
    return Err(Error::ValueTooLarge);
  }
  push(value, out);
  Ok(())
}

/// Appends `value` with no range check. For values range checked when their
/// owner was built, and for slice lengths, which never exceed `isize::MAX`.
pub(crate) fn push(value: u64, out: &mut Vec<u8>) {
  debug_assert!(value <= MAX_VALUE);
  let mut rest = value;
  while rest > u64::from(PAYLOAD) {
    out.push((rest as u8) | CONTINUE);
    rest >>= 7;
  }
  out.push(rest as u8);
}

/// Decodes the varint at the front of `bytes`, returning the value and the
/// number of bytes it occupied.
///
/// # Errors
///
/// * `Truncated` if no terminating byte is found.
/// * `Overlong` if the varint runs past [`MAX_LEN`] bytes.
/// * `NotMinimal` if the final group is a redundant zero.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
  let mut value = 0u64;
  for (i, &byte) in bytes.iter().enumerate() {
    if i == MAX_LEN {
      return Err(Error::Overlong);
    }
    value |= u64::from(byte & PAYLOAD) << (7 * i);
    if byte & CONTINUE == 0 {
      if byte == 0 && i > 0 {
        return Err(Error::NotMinimal);
      }
      return Ok((value, i + 1));
    }
  }
  Err(Error::Truncated)
}

/// Like [`decode`], but hands back the unread tail instead of a count.
///
/// # Errors
///
/// See [`decode`].
pub fn read(bytes: &[u8]) -> Result<(u64, &[u8])> {
  let (value, read) = decode(bytes)?;
  Ok((value, &bytes[read..]))
}

#[cfg(test)]
pub mod tests {
  use super::*;

  const VECTORS: &[(u64, &[u8])] = &[
    (0, &[0x00]),
    (1, &[0x01]),
    (127, &[0x7f]),
    (128, &[0x80, 0x01]),
    (255, &[0xff, 0x01]),
    (300, &[0xac, 0x02]),
    (16384, &[0x80, 0x80, 0x01]),
    (MAX_VALUE, &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]),
  ];

  #[test]
  fn value_to_buf() {
    for (value, buf) in VECTORS {
      let varint = Varint::new(*value).unwrap();
      assert_eq!(varint.as_bytes(), *buf);
      assert_eq!(varint.len(), buf.len());
    }
  }

  #[test]
  fn buf_to_value() {
    for (value, buf) in VECTORS {
      assert_eq!(decode(buf), Ok((*value, buf.len())));
      let (varint, read) = Varint::decode(buf).unwrap();
      assert_eq!(varint.value(), *value);
      assert_eq!(read, buf.len());
    }
  }

  #[test]
  fn decode_stops_at_terminator() {
    let bytes = [0xac, 0x02, 0x7f, 0x01];
    assert_eq!(decode(&bytes), Ok((300, 2)));
    assert_eq!(read(&bytes), Ok((300, &bytes[2..])));
  }

  #[test]
  fn rejects_values_past_63_bits() {
    assert_eq!(Varint::new(MAX_VALUE + 1), Err(Error::ValueTooLarge));
    assert_eq!(Varint::new(u64::MAX), Err(Error::ValueTooLarge));
    assert_eq!(Varint::try_from(-1i64), Err(Error::NegativeValue));
    assert_eq!(Varint::try_from(300i64).unwrap().as_bytes(), &[0xac, 0x02]);
  }

  #[test]
  fn rejects_malformed_input() {
    assert_eq!(decode(&[]), Err(Error::Truncated));
    assert_eq!(decode(&[0x80]), Err(Error::Truncated));
    assert_eq!(decode(&[0xff; 9]), Err(Error::Truncated));
    let mut overlong = [0xff; 10];
    overlong[9] = 0x01;
    assert_eq!(decode(&overlong), Err(Error::Overlong));
    assert_eq!(decode(&[0x80, 0x00]), Err(Error::NotMinimal));
    assert_eq!(decode(&[0xac, 0x82, 0x00]), Err(Error::NotMinimal));
  }

  #[test]
  fn small_integers_convert_infallibly() {
    for value in [0u32, 1, 127, 128, 300, u32::MAX].iter() {
      assert_eq!(Varint::from(*value), Varint::new(u64::from(*value)).unwrap());
    }
  }

  #[quickcheck]
  fn roundtrip(value: u64) -> bool {
    let value = value & MAX_VALUE;
    let varint = Varint::new(value).unwrap();
    decode(varint.as_bytes()) == Ok((value, varint.len()))
      && varint.value() == value
  }

  #[test]
  fn encode_into_appends_or_refuses() {
    let mut out = vec![0xaa];
    encode_into(300, &mut out).unwrap();
    encode_into(MAX_VALUE, &mut out).unwrap();
    assert_eq!(out.len(), 1 + 2 + MAX_LEN);
    assert_eq!(encode_into(MAX_VALUE + 1, &mut out), Err(Error::ValueTooLarge));
    assert_eq!(out.len(), 1 + 2 + MAX_LEN);
  }

  #[quickcheck]
  fn push_matches_varint(value: u64) -> bool {
    let value = value & MAX_VALUE;
    let mut out = Vec::new();
    push(value, &mut out);
    out == Varint::new(value).unwrap().as_bytes()
  }

  #[quickcheck]
  fn minimal_length(value: u64) -> bool {
    let value = value & MAX_VALUE;
    let bits = 64 - value.leading_zeros() as usize;
    let expected = if bits == 0 { 1 } else { (bits + 6) / 7 };
    Varint::new(value).unwrap().len() == expected
  }

  #[quickcheck]
  fn agrees_with_unsigned_varint(value: u64) -> bool {
    let value = value & MAX_VALUE;
    let mut buf = unsigned_varint::encode::u64_buffer();
    let theirs = unsigned_varint::encode::u64(value, &mut buf);
    Varint::new(value).unwrap().as_bytes() == theirs
  }
}
