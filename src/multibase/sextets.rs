//! The base64 family, packed by the `base64` crate once the body has passed
//! our own alphabet and padding checks.

use crate::error::{
  Error,
  Result,
};
use alloc::string::String;
use sp_std::vec::Vec;

const PAD: u8 = b'=';

pub struct Sextets {
  config: base64::Config,
  url: bool,
  padded: bool,
}

impl Sextets {
  pub const fn new(config: base64::Config, url: bool, padded: bool) -> Self {
    Sextets { config, url, padded }
  }

  fn is_symbol(&self, c: u8) -> bool {
    match c {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => true,
      b'+' | b'/' => !self.url,
      b'-' | b'_' => self.url,
      PAD => self.padded,
      _ => false,
    }
  }

  pub fn validate(&self, body: &[u8], name: &'static str) -> Result<()> {
    if body.iter().all(|c| self.is_symbol(*c)) {
      Ok(())
    }
    else {
      Err(Error::InvalidCharacters(name))
    }
  }

  pub fn encode(&self, input: &[u8], out: &mut String) {
    base64::encode_config_buf(input, self.config, out);
  }

  pub fn decode(&self, body: &[u8], name: &'static str) -> Result<Vec<u8>> {
    if self.padded {
      let end = body.iter().rposition(|c| *c != PAD).map_or(0, |i| i + 1);
      let (data, padding) = body.split_at(end);
      if body.len() % 4 != 0 || padding.len() > 2 || data.contains(&PAD) {
        return Err(Error::AlignmentError(name));
      }
    }
    else if body.len() % 4 == 1 {
      return Err(Error::AlignmentError(name));
    }
    base64::decode_config(body, self.config)
      .map_err(|_| Error::AlignmentError(name))
  }
}
