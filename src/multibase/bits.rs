//! Power-of-two alphabets packed MSB first, RFC 4648 style.
//!
//! Covers base2, base16 and the base32 family. Input bits are cut into
//! fixed-width groups that may straddle byte boundaries; the last group is
//! zero-filled. Padded alphabets extend the output with `=` to a whole block.

use crate::error::{
  Error,
  Result,
};
use alloc::string::String;
use sp_std::vec::Vec;

const INVALID: u8 = 0xff;
const PAD: u8 = b'=';

pub struct Alphabet {
  symbols: &'static [u8],
  table: [u8; 256],
  bits: u32,
  padded: bool,
}

impl Alphabet {
  pub const fn new(symbols: &'static [u8], bits: u32, padded: bool) -> Self {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < symbols.len() {
      table[symbols[i] as usize] = i as u8;
      i += 1;
    }
    Alphabet { symbols, table, bits, padded }
  }

  /// Characters per padding block: the smallest run of groups that ends on a
  /// byte boundary.
  fn block(&self) -> usize {
    let (mut a, mut b) = (8, self.bits as usize);
    while b != 0 {
      let t = a % b;
      a = b;
      b = t;
    }
    8 / a
  }

  pub fn validate(&self, body: &[u8], name: &'static str) -> Result<()> {
    let legal = |c: &u8| {
      self.table[usize::from(*c)] != INVALID || (self.padded && *c == PAD)
    };
    if body.iter().all(legal) {
      Ok(())
    }
    else {
      Err(Error::InvalidCharacters(name))
    }
  }

  pub fn encode(&self, input: &[u8], out: &mut String) {
    let mask = (1u32 << self.bits) - 1;
    let start = out.len();
    let mut buffer = 0u32;
    let mut held = 0u32;
    for byte in input {
      buffer = (buffer << 8) | u32::from(*byte);
      held += 8;
      while held >= self.bits {
        held -= self.bits;
        out.push(char::from(self.symbols[((buffer >> held) & mask) as usize]));
      }
      buffer &= (1 << held) - 1;
    }
    if held > 0 {
      let index = (buffer << (self.bits - held)) & mask;
      out.push(char::from(self.symbols[index as usize]));
    }
    if self.padded {
      let block = self.block();
      while (out.len() - start) % block != 0 {
        out.push(char::from(PAD));
      }
    }
  }

  pub fn decode(&self, body: &[u8], name: &'static str) -> Result<Vec<u8>> {
    let data = if self.padded { self.strip_padding(body, name)? } else { body };
    let mut out = Vec::with_capacity(data.len() * self.bits as usize / 8);
    let mut buffer = 0u32;
    let mut held = 0u32;
    for c in data {
      let value = self.table[usize::from(*c)];
      if value == INVALID {
        return Err(Error::InvalidCharacters(name));
      }
      buffer = (buffer << self.bits) | u32::from(value);
      held += self.bits;
      if held >= 8 {
        held -= 8;
        out.push((buffer >> held) as u8);
        buffer &= (1 << held) - 1;
      }
    }
    // A whole leftover group, or set fill bits, cannot come from `encode`.
    if held >= self.bits || buffer != 0 {
      return Err(Error::AlignmentError(name));
    }
    Ok(out)
  }

  fn strip_padding<'a>(
    &self,
    body: &'a [u8],
    name: &'static str,
  ) -> Result<&'a [u8]> {
    let block = self.block();
    if body.len() % block != 0 {
      return Err(Error::AlignmentError(name));
    }
    let end = body.iter().rposition(|c| *c != PAD).map_or(0, |i| i + 1);
    let (data, padding) = body.split_at(end);
    if data.contains(&PAD) || (!padding.is_empty() && data.len() % block == 0)
    {
      return Err(Error::AlignmentError(name));
    }
    Ok(data)
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;

  static BASE32_PAD: Alphabet =
    Alphabet::new(b"abcdefghijklmnopqrstuvwxyz234567", 5, true);
  static BASE32: Alphabet =
    Alphabet::new(b"abcdefghijklmnopqrstuvwxyz234567", 5, false);

  fn encoded(alphabet: &Alphabet, input: &[u8]) -> String {
    let mut out = String::new();
    alphabet.encode(input, &mut out);
    out
  }

  #[test]
  fn block_sizes() {
    assert_eq!(Alphabet::new(b"01", 1, false).block(), 8);
    assert_eq!(Alphabet::new(b"0123456789abcdef", 4, false).block(), 2);
    assert_eq!(BASE32_PAD.block(), 8);
  }

  #[test]
  fn groups_straddle_bytes() {
    assert_eq!(encoded(&BASE32, b"foobar"), "mzxw6ytboi");
    assert_eq!(encoded(&BASE32, &[0x00, 0x01]), "aaaq");
    assert_eq!(BASE32.decode(b"aaaq", "base32").unwrap(), vec![0x00, 0x01]);
  }

  #[test]
  fn padding_is_checked() {
    assert_eq!(encoded(&BASE32_PAD, b"f"), "my======");
    assert_eq!(BASE32_PAD.decode(b"my======", "base32pad").unwrap(), b"f");
    assert_eq!(
      BASE32_PAD.decode(b"my=====", "base32pad"),
      Err(Error::AlignmentError("base32pad"))
    );
    assert_eq!(
      BASE32_PAD.decode(b"m=y=====", "base32pad"),
      Err(Error::AlignmentError("base32pad"))
    );
    assert_eq!(
      BASE32_PAD.decode(b"mzxw6ytb========", "base32pad"),
      Err(Error::AlignmentError("base32pad"))
    );
  }

  #[test]
  fn fill_bits_must_be_zero() {
    // "mz" leaves two set bits after the only whole byte
    assert_eq!(
      BASE32_PAD.decode(b"mz======", "base32pad"),
      Err(Error::AlignmentError("base32pad"))
    );
  }
}
