//! Composable network addresses.
//!
//! A multiaddr is a sequence of segments, each a protocol code and the
//! protocol's value. Text form: `/ip4/127.0.0.1/tcp/5000`. Binary form: each
//! segment as `varint(code)`, then the value laid out per its [`Shape`].

use crate::{
  error::{
    Error,
    Result,
  },
  varint,
};
use alloc::string::String;
use sp_std::{
  convert::TryFrom,
  fmt,
  slice,
  str::FromStr,
  vec::Vec,
};

pub mod protocol;
pub mod value;

pub use self::protocol::{
  Codec,
  DefaultProtocols,
  ProtocolInfo,
  ProtocolTable,
  Shape,
};

/// One protocol and its value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
  protocol: ProtocolInfo,
  value: Vec<u8>,
}

impl Segment {
  /// Builds a segment from a value's text form.
  ///
  /// # Errors
  ///
  /// * `ValueTooLarge` if the protocol code does not fit in a varint.
  /// * `MalformedValue` if `text` is not valid for `protocol`.
  pub fn from_text(protocol: ProtocolInfo, text: &str) -> Result<Self> {
    varint::encode(protocol.code)?;
    let value = value::parse(&protocol, text)?;
    Ok(Segment { protocol, value })
  }

  /// Builds a segment from a value's binary form.
  ///
  /// # Errors
  ///
  /// * `ValueTooLarge` if the protocol code does not fit in a varint.
  /// * `MalformedValue` if `value` is not valid for `protocol`.
  pub fn from_bytes(protocol: ProtocolInfo, value: &[u8]) -> Result<Self> {
    varint::encode(protocol.code)?;
    if let Shape::Fixed(n) = protocol.shape {
      if value.len() != n {
        return Err(Error::MalformedValue(protocol.name));
      }
    }
    value::render(&protocol, value, &mut String::new())?;
    Ok(Segment { protocol, value: value.to_vec() })
  }

  pub fn code(&self) -> u64 { self.protocol.code }

  pub fn name(&self) -> &'static str { self.protocol.name }

  pub fn shape(&self) -> Shape { self.protocol.shape }

  pub fn protocol(&self) -> &ProtocolInfo { &self.protocol }

  /// The value's binary form, without any length prefix.
  pub fn value(&self) -> &[u8] { &self.value }

  fn write_binary(&self, out: &mut Vec<u8>) {
    varint::push(self.protocol.code, out);
    match self.protocol.shape {
      Shape::Empty | Shape::Fixed(_) => {}
      Shape::Prefixed | Shape::Path => varint::push(self.value.len() as u64, out),
    }
    out.extend_from_slice(&self.value);
  }

  fn write_text(&self, name: &str, out: &mut String) -> Result<()> {
    out.push('/');
    out.push_str(name);
    if self.protocol.shape != Shape::Empty {
      out.push('/');
      value::render(&self.protocol, &self.value, out)?;
    }
    Ok(())
  }
}

/// An ordered list of segments. Order is significant and kept as given.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Multiaddr {
  segments: Vec<Segment>,
}

impl Multiaddr {
  pub fn empty() -> Self { Multiaddr::default() }

  /// Parses the text form against the default protocol table.
  ///
  /// # Errors
  ///
  /// See [`Multiaddr::parse_text_with`].
  pub fn parse_text(text: &str) -> Result<Self> {
    Self::parse_text_with(&DefaultProtocols, text)
  }

  /// Parses `/name/value/name/value…`. A single trailing `/` is ignored and
  /// `/` alone is the empty address.
  ///
  /// # Errors
  ///
  /// * `InvalidMultiaddr` if `text` does not start with `/` or has an empty
  ///   protocol name.
  /// * `UnknownProtocolName` for a name `table` does not know.
  /// * `MissingValue` if a protocol that takes a value ends the address.
  /// * `MalformedValue` if a value does not parse.
  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, err))]
  pub fn parse_text_with<T: ProtocolTable + ?Sized>(
    table: &T,
    text: &str,
  ) -> Result<Self> {
    let body = text.strip_prefix('/').ok_or(Error::InvalidMultiaddr)?;
    let body = body.strip_suffix('/').unwrap_or(body);
    let mut segments = Vec::new();
    if body.is_empty() {
      return Ok(Multiaddr { segments });
    }
    let mut tokens = body.split('/');
    while let Some(name) = tokens.next() {
      if name.is_empty() {
        return Err(Error::InvalidMultiaddr);
      }
      let protocol = *table.by_name(name)?;
      let segment = match protocol.shape {
        Shape::Empty => Segment::from_text(protocol, "")?,
        Shape::Path => {
          let rest: Vec<&str> = tokens.by_ref().collect();
          if rest.is_empty() {
            return Err(Error::MissingValue(protocol.name));
          }
          Segment::from_text(protocol, &rest.join("/"))?
        }
        Shape::Fixed(_) | Shape::Prefixed => {
          let text = tokens.next().ok_or(Error::MissingValue(protocol.name))?;
          Segment::from_text(protocol, text)?
        }
      };
      segments.push(segment);
    }
    Ok(Multiaddr { segments })
  }

  /// Parses the binary form against the default protocol table.
  ///
  /// # Errors
  ///
  /// See [`Multiaddr::parse_binary_with`].
  pub fn parse_binary(bytes: &[u8]) -> Result<Self> {
    Self::parse_binary_with(&DefaultProtocols, bytes)
  }

  /// Parses concatenated segments until `bytes` is used up. Every value is
  /// checked as if it had been parsed from text.
  ///
  /// # Errors
  ///
  /// * Varint errors from codes and length prefixes.
  /// * `UnknownProtocolCode` for a code `table` does not know.
  /// * `TruncatedSegment` if a value runs past the end of input.
  /// * `MalformedValue` if a value is not valid for its protocol.
  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, err))]
  pub fn parse_binary_with<T: ProtocolTable + ?Sized>(
    table: &T,
    bytes: &[u8],
  ) -> Result<Self> {
    let mut segments = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
      let (code, tail) = varint::read(rest)?;
      let protocol = *table.by_code(code)?;
      let (len, tail) = match protocol.shape {
        Shape::Empty => (0, tail),
        Shape::Fixed(n) => (n, tail),
        Shape::Prefixed | Shape::Path => {
          let (len, tail) = varint::read(tail)?;
          let len = usize::try_from(len)
            .map_err(|_| Error::TruncatedSegment(protocol.name))?;
          (len, tail)
        }
      };
      if tail.len() < len {
        return Err(Error::TruncatedSegment(protocol.name));
      }
      let (value, tail) = tail.split_at(len);
      segments.push(Segment::from_bytes(protocol, value)?);
      rest = tail;
    }
    Ok(Multiaddr { segments })
  }

  /// The binary form.
  pub fn to_binary(&self) -> Vec<u8> {
    let mut out = Vec::new();
    for segment in &self.segments {
      segment.write_binary(&mut out);
    }
    out
  }

  /// The text form, with protocol names taken from `table`.
  ///
  /// # Errors
  ///
  /// Returns `UnknownProtocolCode` if `table` lacks one of the codes.
  pub fn to_string_with<T: ProtocolTable + ?Sized>(
    &self,
    table: &T,
  ) -> Result<String> {
    let mut out = String::new();
    for segment in &self.segments {
      let name = table.by_code(segment.code())?.name;
      segment.write_text(name, &mut out)?;
    }
    if out.is_empty() {
      out.push('/');
    }
    Ok(out)
  }

  pub fn iter(&self) -> slice::Iter<Segment> { self.segments.iter() }

  pub fn len(&self) -> usize { self.segments.len() }

  pub fn is_empty(&self) -> bool { self.segments.is_empty() }

  pub fn push(&mut self, segment: Segment) { self.segments.push(segment) }

  /// Removes and returns the innermost segment.
  pub fn pop(&mut self) -> Option<Segment> { self.segments.pop() }

  /// Appends every segment of `inner` after ours.
  pub fn encapsulate(&mut self, inner: &Multiaddr) {
    self.segments.extend(inner.segments.iter().cloned())
  }
}

impl fmt::Display for Multiaddr {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.segments.is_empty() {
      return f.write_str("/");
    }
    let mut out = String::new();
    for segment in &self.segments {
      segment.write_text(segment.name(), &mut out).map_err(|_| fmt::Error)?;
    }
    f.write_str(&out)
  }
}

impl fmt::Debug for Multiaddr {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Multiaddr({})", self)
  }
}

impl FromStr for Multiaddr {
  type Err = Error;

  fn from_str(text: &str) -> Result<Self> { Self::parse_text(text) }
}

impl<'a> TryFrom<&'a str> for Multiaddr {
  type Error = Error;

  fn try_from(text: &'a str) -> Result<Self> { Self::parse_text(text) }
}

impl<'a> TryFrom<&'a [u8]> for Multiaddr {
  type Error = Error;

  fn try_from(bytes: &'a [u8]) -> Result<Self> { Self::parse_binary(bytes) }
}

impl<'a> IntoIterator for &'a Multiaddr {
  type IntoIter = slice::Iter<'a, Segment>;
  type Item = &'a Segment;

  fn into_iter(self) -> Self::IntoIter { self.segments.iter() }
}
