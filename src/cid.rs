//! Content identifiers.
//!
//! A CIDv1 is `varint(1) || varint(codec) || multihash`, written through any
//! multibase. A CIDv0 is just a sha2-256 multihash of dag-pb content,
//! written as bare base58btc.

use crate::{
  error::{
    Error,
    Result,
  },
  hasher::{
    DefaultHashers,
    HasherTable,
  },
  multibase::{
    self,
    Protocol,
  },
  multicodec::{
    self,
    CodecTable,
    DefaultCodecs,
    Ident,
  },
  multihash::Multihash,
  varint,
};
use alloc::string::{
  String,
  ToString,
};
use sp_std::{
  convert::TryFrom,
  fmt,
  str::FromStr,
  vec::Vec,
};

mod version;

pub use self::version::Version;

/// Length of a CIDv0 in base58btc.
const V0_TEXT_LEN: usize = 46;
/// Length of a CIDv0 in binary.
const V0_LEN: usize = 34;

/// A content identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cid {
  version: Version,
  codec: u64,
  hash: Multihash,
}

impl Cid {
  /// A CIDv0 for a dag-pb node.
  ///
  /// # Errors
  ///
  /// Returns `InvalidCidV0` unless `hash` is a 32 byte sha2-256 digest.
  pub fn new_v0(hash: Multihash) -> Result<Self> {
    if hash.code() != multicodec::SHA2_256 || hash.digest_len() != 32 {
      return Err(Error::InvalidCidV0);
    }
    Ok(Cid { version: Version::V0, codec: multicodec::DAG_PB, hash })
  }

  /// # Errors
  ///
  /// Returns `ValueTooLarge` if `codec` does not fit in a varint.
  pub fn new_v1(codec: u64, hash: Multihash) -> Result<Self> {
    varint::encode(codec)?;
    Ok(Cid { version: Version::V1, codec, hash })
  }

  /// # Errors
  ///
  /// See [`Cid::new_v0`] and [`Cid::new_v1`]; a v0 codec must be dag-pb.
  pub fn new(version: Version, codec: u64, hash: Multihash) -> Result<Self> {
    match version {
      Version::V0 if codec != multicodec::DAG_PB => Err(Error::InvalidCidV0),
      Version::V0 => Self::new_v0(hash),
      Version::V1 => Self::new_v1(codec, hash),
    }
  }

  /// Hashes `content` and wraps it as a CIDv1, using the default tables.
  ///
  /// # Errors
  ///
  /// See [`Cid::from_content_with`].
  pub fn from_content<'a, 'b, C, F>(
    content: &[u8],
    codec: C,
    function: F,
  ) -> Result<Self>
  where
    C: Into<Ident<'a>>,
    F: Into<Ident<'b>>, {
    Self::from_content_with(
      &DefaultCodecs,
      &DefaultHashers,
      content,
      codec,
      function,
    )
  }

  /// Hashes `content` and wraps it as a CIDv1.
  ///
  /// # Errors
  ///
  /// * `UnknownName` if `codec` is a name `codecs` does not know.
  /// * The errors of [`Multihash::construct_with`].
  pub fn from_content_with<'a, 'b, T, H, C, F>(
    codecs: &T,
    hashers: &H,
    content: &[u8],
    codec: C,
    function: F,
  ) -> Result<Self>
  where
    T: CodecTable + ?Sized,
    H: HasherTable + ?Sized,
    C: Into<Ident<'a>>,
    F: Into<Ident<'b>>, {
    let codec = codec.into().resolve(codecs)?;
    let hash = Multihash::construct_with(codecs, hashers, content, function)?;
    Self::new_v1(codec, hash)
  }

  /// Parses a CID string: a 46 character `Qm…` CIDv0, or a multibase CIDv1.
  ///
  /// # Errors
  ///
  /// * Multibase errors from the text.
  /// * The errors of [`Cid::from_bytes`].
  /// * `InvalidCidV0Base` for a CIDv0 carrying a multibase marker.
  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, err))]
  pub fn parse(text: &str) -> Result<Self> {
    if text.len() == V0_TEXT_LEN && text.starts_with("Qm") {
      let bytes = Protocol::Base58Btc.decode_body(text.as_bytes())?;
      return Self::from_bytes(&bytes);
    }
    let (_, bytes) = multibase::decode(text)?;
    let cid = Self::from_bytes(&bytes)?;
    if cid.version.is_v0() {
      return Err(Error::InvalidCidV0Base);
    }
    Ok(cid)
  }

  /// Parses a binary CID. Exactly 34 bytes starting `0x12 0x20` is a CIDv0;
  /// anything else must start with version 1.
  ///
  /// # Errors
  ///
  /// * Varint errors from the version and codec fields.
  /// * `UnknownVersion` for a version other than 1.
  /// * Multihash errors from the remainder.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    if bytes.len() == V0_LEN && bytes[0] == 0x12 && bytes[1] == 0x20 {
      return Self::new_v0(Multihash::parse(bytes)?);
    }
    let (version, rest) = varint::read(bytes)?;
    if version != u64::from(Version::V1) {
      return Err(Error::UnknownVersion(version));
    }
    let (codec, rest) = varint::read(rest)?;
    let hash = Multihash::parse(rest)?;
    Ok(Cid { version: Version::V1, codec, hash })
  }

  pub fn version(&self) -> Version { self.version }

  /// The content codec.
  pub fn codec(&self) -> u64 { self.codec }

  pub fn hash(&self) -> &Multihash { &self.hash }

  /// The binary form.
  pub fn to_bytes(&self) -> Vec<u8> {
    match self.version {
      Version::V0 => self.hash.to_bytes(),
      Version::V1 => {
        let mut bytes = Vec::with_capacity(self.hash.size() + 4);
        bytes.push(1);
        varint::push(self.codec, &mut bytes);
        bytes.extend_from_slice(self.hash.as_bytes());
        bytes
      }
    }
  }

  /// The text form in `base`. A CIDv0 is bare base58btc and nothing else.
  ///
  /// # Errors
  ///
  /// * `InvalidCidV0Base` for a CIDv0 and any `base` but base58btc.
  /// * `InvalidUtf8` for identity, see [`multibase::encode`].
  pub fn to_string_of_base(&self, base: Protocol) -> Result<String> {
    match self.version {
      Version::V0 if base != Protocol::Base58Btc => Err(Error::InvalidCidV0Base),
      Version::V0 => {
        let mut out = String::with_capacity(V0_TEXT_LEN);
        base.encode_body(self.hash.as_bytes(), &mut out)?;
        Ok(out)
      }
      Version::V1 => multibase::encode(base, self.to_bytes()),
    }
  }

  /// A description such as
  /// `base32 - cidv1 - raw - sha2-256-256-6e6f…`, using the default table.
  ///
  /// # Errors
  ///
  /// See [`Cid::human_readable_with`].
  pub fn human_readable(&self, base: Protocol) -> Result<String> {
    self.human_readable_with(&DefaultCodecs, base)
  }

  /// `<base> - cidv<n> - <codec> - <function>-<digest bits>-<hex digest>`.
  /// Meant for people; it does not parse back.
  ///
  /// # Errors
  ///
  /// Returns `UnknownCode` if `codecs` cannot name the codec or the hash
  /// function.
  pub fn human_readable_with<T: CodecTable + ?Sized>(
    &self,
    codecs: &T,
    base: Protocol,
  ) -> Result<String> {
    let mut out = String::new();
    out.push_str(base.name());
    out.push_str(" - cidv");
    out.push_str(if self.version.is_v0() { "0" } else { "1" });
    out.push_str(" - ");
    out.push_str(codecs.name_of(self.codec)?);
    out.push_str(" - ");
    out.push_str(codecs.name_of(self.hash.code())?);
    out.push('-');
    out.push_str(&(self.hash.digest_len() * 8).to_string());
    out.push('-');
    Protocol::Base16.encode_body(self.hash.digest(), &mut out)?;
    Ok(out)
  }

  /// The same content as a CIDv1. A CIDv1 is returned unchanged.
  pub fn into_v1(self) -> Self {
    Cid { version: Version::V1, codec: self.codec, hash: self.hash }
  }
}

impl fmt::Display for Cid {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let base = match self.version {
      Version::V0 => Protocol::Base58Btc,
      Version::V1 => Protocol::Base32,
    };
    f.write_str(&self.to_string_of_base(base).map_err(|_| fmt::Error)?)
  }
}

impl fmt::Debug for Cid {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Cid({})", self)
  }
}

impl FromStr for Cid {
  type Err = Error;

  fn from_str(text: &str) -> Result<Self> { Self::parse(text) }
}

impl<'a> TryFrom<&'a str> for Cid {
  type Error = Error;

  fn try_from(text: &'a str) -> Result<Self> { Self::parse(text) }
}

impl TryFrom<String> for Cid {
  type Error = Error;

  fn try_from(text: String) -> Result<Self> { Self::parse(&text) }
}

impl<'a> TryFrom<&'a [u8]> for Cid {
  type Error = Error;

  fn try_from(bytes: &'a [u8]) -> Result<Self> { Self::from_bytes(bytes) }
}

impl From<Cid> for Vec<u8> {
  fn from(cid: Cid) -> Self { cid.to_bytes() }
}
