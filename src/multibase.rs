//! Self-describing base encodings.
//!
//! A multibase string is a marker character followed by a body in the
//! alphabet the marker names. [`Protocol`] is the closed set of supported
//! alphabets; each one is served by one of three engines:
//!
//! * [`bits`]: power-of-two alphabets packed MSB first (base2, base16, base32
//!   and its variants)
//! * [`base_x`]: big-number alphabets (base8, base10, base58)
//! * [`sextets`]: the base64 family
//!
//! Uppercase protocols reuse their lowercase engine by folding case.

use crate::error::{
  Error,
  Result,
};
use alloc::{
  borrow::ToOwned,
  string::String,
};
use sp_std::{
  convert::TryFrom,
  fmt,
  str::{
    self,
    FromStr,
  },
  vec::Vec,
};

mod base_x;
mod bits;
mod sextets;

static BASE2: bits::Alphabet = bits::Alphabet::new(b"01", 1, false);
static BASE16: bits::Alphabet =
  bits::Alphabet::new(b"0123456789abcdef", 4, false);
static BASE32_HEX: bits::Alphabet =
  bits::Alphabet::new(b"0123456789abcdefghijklmnopqrstuv", 5, false);
static BASE32_HEX_PAD: bits::Alphabet =
  bits::Alphabet::new(b"0123456789abcdefghijklmnopqrstuv", 5, true);
static BASE32: bits::Alphabet =
  bits::Alphabet::new(b"abcdefghijklmnopqrstuvwxyz234567", 5, false);
static BASE32_PAD: bits::Alphabet =
  bits::Alphabet::new(b"abcdefghijklmnopqrstuvwxyz234567", 5, true);
static BASE32_Z: bits::Alphabet =
  bits::Alphabet::new(b"ybndrfg8ejkmcpqxot1uwisza345h769", 5, false);

static BASE8: base_x::Radix = base_x::Radix::new(b"01234567");
static BASE10: base_x::Radix = base_x::Radix::new(b"0123456789");
static BASE58_FLICKR: base_x::Radix = base_x::Radix::new(
  b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ",
);
static BASE58_BTC: base_x::Radix = base_x::Radix::new(
  b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz",
);

static BASE64: sextets::Sextets =
  sextets::Sextets::new(base64::STANDARD_NO_PAD, false, false);
static BASE64_PAD: sextets::Sextets =
  sextets::Sextets::new(base64::STANDARD, false, true);
static BASE64_URL: sextets::Sextets =
  sextets::Sextets::new(base64::URL_SAFE_NO_PAD, true, false);
static BASE64_URL_PAD: sextets::Sextets =
  sextets::Sextets::new(base64::URL_SAFE, true, true);

/// A multibase encoding, identified on the wire by its marker character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protocol {
  /// `\0`: the payload bytes verbatim.
  Identity,
  /// `0`
  Base2,
  /// `7`
  Base8,
  /// `9`
  Base10,
  /// `f`
  Base16,
  /// `F`
  Base16Upper,
  /// `v`
  Base32Hex,
  /// `V`
  Base32HexUpper,
  /// `t`
  Base32HexPad,
  /// `T`
  Base32HexPadUpper,
  /// `b`
  Base32,
  /// `B`
  Base32Upper,
  /// `c`
  Base32Pad,
  /// `C`
  Base32PadUpper,
  /// `h`
  Base32Z,
  /// `Z`
  Base58Flickr,
  /// `z`
  Base58Btc,
  /// `m`
  Base64,
  /// `M`
  Base64Pad,
  /// `u`
  Base64Url,
  /// `U`
  Base64UrlPad,
}

#[derive(Clone, Copy)]
enum Engine {
  Bits(&'static bits::Alphabet),
  Radix(&'static base_x::Radix),
  Sextets(&'static sextets::Sextets),
}

impl Engine {
  fn encode(self, input: &[u8], out: &mut String) {
    match self {
      Engine::Bits(alphabet) => alphabet.encode(input, out),
      Engine::Radix(radix) => radix.encode(input, out),
      Engine::Sextets(sextets) => sextets.encode(input, out),
    }
  }

  fn decode(self, body: &[u8], name: &'static str) -> Result<Vec<u8>> {
    match self {
      Engine::Bits(alphabet) => {
        alphabet.validate(body, name)?;
        alphabet.decode(body, name)
      }
      Engine::Radix(radix) => {
        radix.validate(body, name)?;
        radix.decode(body, name)
      }
      Engine::Sextets(sextets) => {
        sextets.validate(body, name)?;
        sextets.decode(body, name)
      }
    }
  }
}

impl Protocol {
  pub const ALL: [Protocol; 21] = [
    Protocol::Identity,
    Protocol::Base2,
    Protocol::Base8,
    Protocol::Base10,
    Protocol::Base16,
    Protocol::Base16Upper,
    Protocol::Base32Hex,
    Protocol::Base32HexUpper,
    Protocol::Base32HexPad,
    Protocol::Base32HexPadUpper,
    Protocol::Base32,
    Protocol::Base32Upper,
    Protocol::Base32Pad,
    Protocol::Base32PadUpper,
    Protocol::Base32Z,
    Protocol::Base58Flickr,
    Protocol::Base58Btc,
    Protocol::Base64,
    Protocol::Base64Pad,
    Protocol::Base64Url,
    Protocol::Base64UrlPad,
  ];

  pub fn marker(self) -> char {
    match self {
      Protocol::Identity => '\0',
      Protocol::Base2 => '0',
      Protocol::Base8 => '7',
      Protocol::Base10 => '9',
      Protocol::Base16 => 'f',
      Protocol::Base16Upper => 'F',
      Protocol::Base32Hex => 'v',
      Protocol::Base32HexUpper => 'V',
      Protocol::Base32HexPad => 't',
      Protocol::Base32HexPadUpper => 'T',
      Protocol::Base32 => 'b',
      Protocol::Base32Upper => 'B',
      Protocol::Base32Pad => 'c',
      Protocol::Base32PadUpper => 'C',
      Protocol::Base32Z => 'h',
      Protocol::Base58Flickr => 'Z',
      Protocol::Base58Btc => 'z',
      Protocol::Base64 => 'm',
      Protocol::Base64Pad => 'M',
      Protocol::Base64Url => 'u',
      Protocol::Base64UrlPad => 'U',
    }
  }

  /// # Errors
  ///
  /// Returns `UnknownProtocol` if no protocol uses `marker`.
  pub fn from_marker(marker: char) -> Result<Self> {
    Protocol::ALL
      .iter()
      .copied()
      .find(|protocol| protocol.marker() == marker)
      .ok_or(Error::UnknownProtocol(marker))
  }

  /// The name used in the multibase table.
  pub fn name(self) -> &'static str {
    match self {
      Protocol::Identity => "identity",
      Protocol::Base2 => "base2",
      Protocol::Base8 => "base8",
      Protocol::Base10 => "base10",
      Protocol::Base16 => "base16",
      Protocol::Base16Upper => "base16upper",
      Protocol::Base32Hex => "base32hex",
      Protocol::Base32HexUpper => "base32hexupper",
      Protocol::Base32HexPad => "base32hexpad",
      Protocol::Base32HexPadUpper => "base32hexpadupper",
      Protocol::Base32 => "base32",
      Protocol::Base32Upper => "base32upper",
      Protocol::Base32Pad => "base32pad",
      Protocol::Base32PadUpper => "base32padupper",
      Protocol::Base32Z => "base32z",
      Protocol::Base58Flickr => "base58flickr",
      Protocol::Base58Btc => "base58btc",
      Protocol::Base64 => "base64",
      Protocol::Base64Pad => "base64pad",
      Protocol::Base64Url => "base64url",
      Protocol::Base64UrlPad => "base64urlpad",
    }
  }

  /// The engine doing the work, and whether its output is case-folded up.
  /// `None` for identity.
  fn engine(self) -> Option<(Engine, bool)> {
    let engine = match self {
      Protocol::Identity => return None,
      Protocol::Base2 => (Engine::Bits(&BASE2), false),
      Protocol::Base8 => (Engine::Radix(&BASE8), false),
      Protocol::Base10 => (Engine::Radix(&BASE10), false),
      Protocol::Base16 => (Engine::Bits(&BASE16), false),
      Protocol::Base16Upper => (Engine::Bits(&BASE16), true),
      Protocol::Base32Hex => (Engine::Bits(&BASE32_HEX), false),
      Protocol::Base32HexUpper => (Engine::Bits(&BASE32_HEX), true),
      Protocol::Base32HexPad => (Engine::Bits(&BASE32_HEX_PAD), false),
      Protocol::Base32HexPadUpper => (Engine::Bits(&BASE32_HEX_PAD), true),
      Protocol::Base32 => (Engine::Bits(&BASE32), false),
      Protocol::Base32Upper => (Engine::Bits(&BASE32), true),
      Protocol::Base32Pad => (Engine::Bits(&BASE32_PAD), false),
      Protocol::Base32PadUpper => (Engine::Bits(&BASE32_PAD), true),
      Protocol::Base32Z => (Engine::Bits(&BASE32_Z), false),
      Protocol::Base58Flickr => (Engine::Radix(&BASE58_FLICKR), false),
      Protocol::Base58Btc => (Engine::Radix(&BASE58_BTC), false),
      Protocol::Base64 => (Engine::Sextets(&BASE64), false),
      Protocol::Base64Pad => (Engine::Sextets(&BASE64_PAD), false),
      Protocol::Base64Url => (Engine::Sextets(&BASE64_URL), false),
      Protocol::Base64UrlPad => (Engine::Sextets(&BASE64_URL_PAD), false),
    };
    Some(engine)
  }

  /// Appends the body (no marker) for `input` to `out`.
  ///
  /// # Errors
  ///
  /// Only identity can fail, when `input` is not UTF-8.
  pub fn encode_body(self, input: &[u8], out: &mut String) -> Result<()> {
    match self.engine() {
      None => {
        out.push_str(str::from_utf8(input).map_err(|_| Error::InvalidUtf8)?);
      }
      Some((engine, upper)) => {
        let start = out.len();
        engine.encode(input, out);
        if upper {
          out[start..].make_ascii_uppercase();
        }
      }
    }
    Ok(())
  }

  /// Decodes a body (no marker) written in this protocol.
  ///
  /// # Errors
  ///
  /// * `InvalidCharacters` if `body` strays outside the alphabet.
  /// * `AlignmentError` if the body is mis-padded or cannot have come from
  ///   a whole number of bytes.
  pub fn decode_body(self, body: &[u8]) -> Result<Vec<u8>> {
    let name = self.name();
    match self.engine() {
      None => Ok(body.to_vec()),
      Some((engine, false)) => engine.decode(body, name),
      Some((engine, true)) => {
        if body.iter().any(u8::is_ascii_lowercase) {
          return Err(Error::InvalidCharacters(name));
        }
        engine.decode(&body.to_ascii_lowercase(), name)
      }
    }
  }
}

impl fmt::Display for Protocol {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Protocol {
  type Err = Error;

  fn from_str(name: &str) -> Result<Self> {
    Protocol::ALL
      .iter()
      .copied()
      .find(|protocol| protocol.name() == name)
      .ok_or_else(|| Error::UnknownName(name.to_owned()))
  }
}

impl TryFrom<char> for Protocol {
  type Error = Error;

  fn try_from(marker: char) -> Result<Self> { Self::from_marker(marker) }
}

/// Encodes `input` as a multibase string.
///
/// # Errors
///
/// Returns `InvalidUtf8` for an identity payload that is not UTF-8; use
/// [`encode_to_vec`] for those.
pub fn encode<T: AsRef<[u8]>>(protocol: Protocol, input: T) -> Result<String> {
  let input = input.as_ref();
  let mut out = String::with_capacity(input.len() * 2 + 1);
  out.push(protocol.marker());
  protocol.encode_body(input, &mut out)?;
  Ok(out)
}

/// Encodes `input` as multibase bytes. Unlike [`encode`] this accepts any
/// identity payload.
pub fn encode_to_vec<T: AsRef<[u8]>>(protocol: Protocol, input: T) -> Vec<u8> {
  let input = input.as_ref();
  match protocol.engine() {
    None => {
      let mut out = Vec::with_capacity(input.len() + 1);
      out.push(0);
      out.extend_from_slice(input);
      out
    }
    Some((engine, upper)) => {
      let mut out = String::with_capacity(input.len() * 2 + 1);
      out.push(protocol.marker());
      engine.encode(input, &mut out);
      if upper {
        out.make_ascii_uppercase();
      }
      out.into_bytes()
    }
  }
}

/// Decodes a multibase string into its protocol and payload.
///
/// # Errors
///
/// * `EmptyInput` for `""`.
/// * `UnknownProtocol` if the first character is not a marker.
/// * `InvalidCharacters` or `AlignmentError` from the protocol's engine.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, err))]
pub fn decode<T: AsRef<str>>(input: T) -> Result<(Protocol, Vec<u8>)> {
  let input = input.as_ref();
  match input.chars().next() {
    None => Err(Error::EmptyInput),
    Some(marker) if !marker.is_ascii() => Err(Error::UnknownProtocol(marker)),
    Some(_) => decode_bytes(input.as_bytes()),
  }
}

/// Decodes multibase bytes, which may carry a non-UTF-8 identity payload.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_bytes(input: &[u8]) -> Result<(Protocol, Vec<u8>)> {
  match input.split_first() {
    None => Err(Error::EmptyInput),
    Some((&marker, body)) => {
      let protocol = Protocol::from_marker(char::from(marker))?;
      Ok((protocol, protocol.decode_body(body)?))
    }
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use quickcheck::{
    Arbitrary,
    Gen,
  };
  use Protocol::*;

  const YES_MANI: &[u8] = b"yes mani !";
  const UNICODE_ONE: &str = "÷ïÿ";
  const UNICODE_TWO: &str = "÷ïÿ🥰÷ïÿ😎🥶🤯";

  impl Arbitrary for Protocol {
    fn arbitrary(g: &mut Gen) -> Self {
      *g.choose(&Protocol::ALL).unwrap_or(&Protocol::Base58Btc)
    }
  }

  const VECTORS: &[(Protocol, &[u8], &str)] = &[
    (Base2, YES_MANI, "001111001011001010111001100100000011011010110000101101110011010010010000000100001"),
    (Base8, YES_MANI, "7171312714403326055632220041"),
    (Base8, b"\x00yes mani !", "70171312714403326055632220041"),
    (Base8, &[0x00, 0x01], "701"),
    (Base8, &[0x00, 0x00, 0x08], "70010"),
    (Base10, YES_MANI, "9573277761329450583662625"),
    (Base10, &[0x00, 0x01], "901"),
    (Base10, &[0x00, 0x00, 0xff], "900255"),
    (Base10, &[0x01, 0x00], "9256"),
    (Base10, &[0x00, 0x01, 0x00], "90256"),
    (Base10, &[0xff, 0xff, 0xff], "916777215"),
    (Base16, YES_MANI, "f796573206d616e692021"),
    (Base16Upper, YES_MANI, "F796573206D616E692021"),
    (Base16, &[0x01], "f01"),
    (Base16, &[0x0f], "f0f"),
    (Base16, b"f", "f66"),
    (Base16, b"fo", "f666f"),
    (Base16, b"foobar", "f666f6f626172"),
    (Base32, YES_MANI, "bpfsxgidnmfxgsibb"),
    (Base32, b"f", "bmy"),
    (Base32, b"fo", "bmzxq"),
    (Base32, b"foo", "bmzxw6"),
    (Base32, b"foob", "bmzxw6yq"),
    (Base32, b"fooba", "bmzxw6ytb"),
    (Base32, b"foobar", "bmzxw6ytboi"),
    (Base32Upper, YES_MANI, "BPFSXGIDNMFXGSIBB"),
    (Base32Upper, b"foobar", "BMZXW6YTBOI"),
    (Base32Pad, YES_MANI, "cpfsxgidnmfxgsibb"),
    (Base32Pad, b"f", "cmy======"),
    (Base32Pad, b"fo", "cmzxq===="),
    (Base32Pad, b"foo", "cmzxw6==="),
    (Base32Pad, b"foob", "cmzxw6yq="),
    (Base32Pad, b"fooba", "cmzxw6ytb"),
    (Base32Pad, b"foobar", "cmzxw6ytboi======"),
    (Base32PadUpper, b"foob", "CMZXW6YQ="),
    (Base32PadUpper, b"foobar", "CMZXW6YTBOI======"),
    (Base32Hex, YES_MANI, "vf5in683dc5n6i811"),
    (Base32Hex, b"f", "vco"),
    (Base32Hex, b"foobar", "vcpnmuoj1e8"),
    (Base32HexUpper, b"fooba", "VCPNMUOJ1"),
    (Base32HexPad, b"fo", "tcpng===="),
    (Base32HexPad, b"foobar", "tcpnmuoj1e8======"),
    (Base32HexPadUpper, b"foo", "TCPNMU==="),
    (Base32Z, YES_MANI, "hxf1zgedpcfzg1ebb"),
    (Base58Flickr, YES_MANI, "Z7Pznk19XTTzBtx"),
    (Base58Btc, YES_MANI, "z7paNL19xttacUY"),
    (Base58Btc, b"\x00\x00yes mani !", "z117paNL19xttacUY"),
    (Base64, UNICODE_ONE.as_bytes(), "mw7fDr8O/"),
    (Base64, b"f", "mZg"),
    (Base64, b"fo", "mZm8"),
    (Base64, b"foo", "mZm9v"),
    (Base64, b"foob", "mZm9vYg"),
    (Base64, b"fooba", "mZm9vYmE"),
    (Base64, b"foobar", "mZm9vYmFy"),
    (Base64, UNICODE_TWO.as_bytes(), "mw7fDr8O/8J+lsMO3w6/Dv/CfmI7wn6W28J+krw"),
    (Base64Pad, b"f", "MZg=="),
    (Base64Pad, b"fo", "MZm8="),
    (Base64Pad, b"foo", "MZm9v"),
    (Base64Pad, b"foob", "MZm9vYg=="),
    (Base64Pad, b"fooba", "MZm9vYmE="),
    (Base64Url, UNICODE_ONE.as_bytes(), "uw7fDr8O_"),
    (Base64Url, UNICODE_TWO.as_bytes(), "uw7fDr8O_8J-lsMO3w6_Dv_CfmI7wn6W28J-krw"),
    (Base64UrlPad, b"f", "UZg=="),
    (Base64UrlPad, b"foobar", "UZm9vYmFy"),
    (Base64UrlPad, UNICODE_TWO.as_bytes(), "Uw7fDr8O_8J-lsMO3w6_Dv_CfmI7wn6W28J-krw=="),
    (Identity, b"yes mani !", "\0yes mani !"),
  ];

  #[test]
  fn compatibility_encode() {
    for &(protocol, buf, encoded) in VECTORS {
      assert_eq!(encode(protocol, buf).unwrap(), encoded, "{}", protocol);
      assert_eq!(encode_to_vec(protocol, buf), encoded.as_bytes());
    }
  }

  #[test]
  fn compatibility_decode() {
    for &(protocol, buf, encoded) in VECTORS {
      assert_eq!(decode(encoded), Ok((protocol, buf.to_vec())), "{}", encoded);
    }
  }

  #[test]
  fn markers_are_bijective() {
    for protocol in Protocol::ALL.iter() {
      assert_eq!(Protocol::from_marker(protocol.marker()), Ok(*protocol));
      assert_eq!(protocol.name().parse::<Protocol>(), Ok(*protocol));
    }
    assert_eq!(Protocol::from_marker('Q'), Err(Error::UnknownProtocol('Q')));
    assert_eq!(Protocol::from_marker('1'), Err(Error::UnknownProtocol('1')));
  }

  #[test]
  fn rejects_empty_and_unknown() {
    assert_eq!(decode(""), Err(Error::EmptyInput));
    assert_eq!(decode_bytes(&[]), Err(Error::EmptyInput));
    assert_eq!(decode("x1234"), Err(Error::UnknownProtocol('x')));
    assert_eq!(decode("÷1234"), Err(Error::UnknownProtocol('÷')));
  }

  #[test]
  fn rejects_foreign_characters() {
    let cases = [
      ("f6g", "base16"),
      ("F6f", "base16upper"),
      ("f6F", "base16"),
      ("bmy=", "base32"),
      ("Bmy", "base32upper"),
      ("z0OIl", "base58btc"),
      ("Z0", "base58flickr"),
      ("9-1", "base10"),
      ("78", "base8"),
      ("02", "base2"),
      ("mZg==", "base64"),
      ("mZ-8", "base64"),
      ("uZ+8", "base64url"),
      ("hl", "base32z"),
    ];
    for &(input, name) in cases.iter() {
      assert_eq!(decode(input), Err(Error::InvalidCharacters(name)), "{}", input);
    }
  }

  #[test]
  fn rejects_misalignment() {
    let cases = [
      ("f123", "base16"),
      ("F1", "base16upper"),
      ("bm", "base32"),
      ("cmy=====", "base32pad"),
      ("cmy", "base32pad"),
      ("0011", "base2"),
      ("MZg", "base64pad"),
      ("UZg=", "base64urlpad"),
      ("mZ", "base64"),
    ];
    for &(input, name) in cases.iter() {
      assert_eq!(decode(input), Err(Error::AlignmentError(name)), "{}", input);
    }
  }

  #[test]
  fn identity_payloads_pass_through() {
    let payload = [0x00u8, 0xff, 0xfe, 0x80];
    assert_eq!(encode(Protocol::Identity, &payload), Err(Error::InvalidUtf8));
    let bytes = encode_to_vec(Protocol::Identity, &payload);
    assert_eq!(bytes, vec![0x00, 0x00, 0xff, 0xfe, 0x80]);
    assert_eq!(
      decode_bytes(&bytes),
      Ok((Protocol::Identity, payload.to_vec()))
    );
  }

  #[test]
  fn non_utf8_bodies_are_foreign() {
    assert_eq!(
      decode_bytes(&[b'f', 0xc3, 0xb7]),
      Err(Error::InvalidCharacters("base16"))
    );
  }

  #[quickcheck]
  fn roundtrip(protocol: Protocol, buf: Vec<u8>) -> bool {
    let encoded = encode_to_vec(protocol, &buf);
    decode_bytes(&encoded) == Ok((protocol, buf))
  }

  #[quickcheck]
  fn text_roundtrip(protocol: Protocol, buf: Vec<u8>) -> bool {
    match encode(protocol, &buf) {
      Ok(encoded) => decode(&encoded) == Ok((protocol, buf)),
      Err(e) => {
        protocol == Protocol::Identity
          && e == Error::InvalidUtf8
          && str::from_utf8(&buf).is_err()
      }
    }
  }

  #[quickcheck]
  fn uppercase_is_folded_lowercase(buf: Vec<u8>) -> bool {
    let pairs = [
      (Protocol::Base16, Protocol::Base16Upper),
      (Protocol::Base32, Protocol::Base32Upper),
      (Protocol::Base32Pad, Protocol::Base32PadUpper),
      (Protocol::Base32Hex, Protocol::Base32HexUpper),
      (Protocol::Base32HexPad, Protocol::Base32HexPadUpper),
    ];
    pairs.iter().all(|(lower, upper)| {
      let mut lower_body = String::new();
      let mut upper_body = String::new();
      lower.encode_body(&buf, &mut lower_body).is_ok()
        && upper.encode_body(&buf, &mut upper_body).is_ok()
        && lower_body.to_ascii_uppercase() == upper_body
    })
  }
}
