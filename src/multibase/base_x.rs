//! Big-number alphabets (base8, base10, base58).
//!
//! The payload is one big-endian unsigned integer. Each leading zero byte is
//! written as one leading zero digit, then the remaining value is converted by
//! repeated multiply-and-carry.

use crate::error::{
  Error,
  Result,
};
use alloc::string::String;
use sp_std::{
  iter,
  vec::Vec,
};

const INVALID: u8 = 0xff;

pub struct Radix {
  symbols: &'static [u8],
  table: [u8; 256],
}

impl Radix {
  pub const fn new(symbols: &'static [u8]) -> Self {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < symbols.len() {
      table[symbols[i] as usize] = i as u8;
      i += 1;
    }
    Radix { symbols, table }
  }

  fn base(&self) -> u32 { self.symbols.len() as u32 }

  pub fn validate(&self, body: &[u8], name: &'static str) -> Result<()> {
    if body.iter().all(|c| self.table[usize::from(*c)] != INVALID) {
      Ok(())
    }
    else {
      Err(Error::InvalidCharacters(name))
    }
  }

  pub fn encode(&self, input: &[u8], out: &mut String) {
    let zeros = input.iter().take_while(|b| **b == 0).count();
    let base = self.base();
    // little-endian digits of the value after the leading zeros
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 2);
    for byte in &input[zeros..] {
      let mut carry = u32::from(*byte);
      for digit in digits.iter_mut() {
        carry += u32::from(*digit) << 8;
        *digit = (carry % base) as u8;
        carry /= base;
      }
      while carry > 0 {
        digits.push((carry % base) as u8);
        carry /= base;
      }
    }
    let zero = char::from(self.symbols[0]);
    out.extend(iter::repeat(zero).take(zeros));
    out.extend(
      digits.iter().rev().map(|d| char::from(self.symbols[usize::from(*d)])),
    );
  }

  pub fn decode(&self, body: &[u8], name: &'static str) -> Result<Vec<u8>> {
    let zero = self.symbols[0];
    let zeros = body.iter().take_while(|c| **c == zero).count();
    let base = self.base();
    // little-endian bytes of the value after the leading zero digits
    let mut bytes: Vec<u8> = Vec::with_capacity(body.len());
    for c in &body[zeros..] {
      let value = self.table[usize::from(*c)];
      if value == INVALID {
        return Err(Error::InvalidCharacters(name));
      }
      let mut carry = u32::from(value);
      for byte in bytes.iter_mut() {
        carry += u32::from(*byte) * base;
        *byte = carry as u8;
        carry >>= 8;
      }
      while carry > 0 {
        bytes.push(carry as u8);
        carry >>= 8;
      }
    }
    let mut out = Vec::with_capacity(zeros + bytes.len());
    out.resize(zeros, 0);
    out.extend(bytes.iter().rev());
    Ok(out)
  }
}
