//! Self-describing digests: `varint(code) || varint(len) || digest`.

use crate::{
  error::{
    Error,
    Result,
  },
  hasher::{
    DefaultHashers,
    HasherTable,
  },
  multicodec::{
    CodecTable,
    DefaultCodecs,
    Ident,
  },
  varint,
};
use alloc::borrow::ToOwned;
use sp_std::{
  convert::TryFrom,
  fmt,
  vec::Vec,
};

/// An owned multihash whose length field always matches its digest.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Multihash {
  bytes: Vec<u8>,
  code: u64,
  digest_start: usize,
}

impl Multihash {
  /// Hashes `plaintext` with `function` using the default tables.
  ///
  /// # Errors
  ///
  /// See [`Multihash::construct_with`].
  pub fn construct<'a, I: Into<Ident<'a>>>(
    plaintext: &[u8],
    function: I,
  ) -> Result<Self> {
    Self::construct_with(&DefaultCodecs, &DefaultHashers, plaintext, function)
  }

  /// Hashes `plaintext` with `function`, which is either a code or a name
  /// looked up in `codecs`.
  ///
  /// # Errors
  ///
  /// * `UnknownFunction` if `function` is a name `codecs` does not know.
  /// * `UnsupportedFunction` if `hashers` has no routine for the code.
  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, err))]
  pub fn construct_with<'a, C, H, I>(
    codecs: &C,
    hashers: &H,
    plaintext: &[u8],
    function: I,
  ) -> Result<Self>
  where
    C: CodecTable + ?Sized,
    H: HasherTable + ?Sized,
    I: Into<Ident<'a>>, {
    let code = match function.into() {
      Ident::Code(code) => code,
      Ident::Name(name) => codecs
        .code_of(name)
        .map_err(|_| Error::UnknownFunction(name.to_owned()))?,
    };
    let hash = hashers.resolve(code)?;
    Self::wrap(code, &hash(plaintext))
  }

  /// Wraps an existing digest. The length field is taken from `digest`.
  ///
  /// # Errors
  ///
  /// Returns `ValueTooLarge` if `code` does not fit in a varint.
  pub fn wrap(code: u64, digest: &[u8]) -> Result<Self> {
    let code_varint = varint::encode(code)?;
    let len_varint = varint::encode(digest.len() as u64)?;
    let digest_start = code_varint.len() + len_varint.len();
    let mut bytes = Vec::with_capacity(digest_start + digest.len());
    bytes.extend_from_slice(code_varint.as_bytes());
    bytes.extend_from_slice(len_varint.as_bytes());
    bytes.extend_from_slice(digest);
    Ok(Multihash { bytes, code, digest_start })
  }

  /// Parses a complete multihash. The bytes after the two varints must be
  /// exactly as long as the length field says.
  ///
  /// # Errors
  ///
  /// * Varint errors from either header field.
  /// * `TruncatedDigest` if the digest region is shorter or longer than
  ///   declared.
  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, err))]
  pub fn parse(bytes: &[u8]) -> Result<Self> {
    let (code, code_len) = varint::decode(bytes)?;
    let (expected, len_len) = varint::decode(&bytes[code_len..])?;
    let digest_start = code_len + len_len;
    let actual = bytes.len() - digest_start;
    if expected != actual as u64 {
      return Err(Error::TruncatedDigest { expected, actual });
    }
    Ok(Multihash { bytes: bytes.to_vec(), code, digest_start })
  }

  /// The hash function code.
  pub fn code(&self) -> u64 { self.code }

  /// The declared, and actual, digest length in bytes.
  pub fn digest_len(&self) -> usize { self.bytes.len() - self.digest_start }

  pub fn digest(&self) -> &[u8] { &self.bytes[self.digest_start..] }

  /// Length of the whole encoding.
  pub fn size(&self) -> usize { self.bytes.len() }

  pub fn as_bytes(&self) -> &[u8] { &self.bytes }

  pub fn to_bytes(&self) -> Vec<u8> { self.bytes.clone() }

  pub fn into_bytes(self) -> Vec<u8> { self.bytes }
}

impl AsRef<[u8]> for Multihash {
  fn as_ref(&self) -> &[u8] { self.as_bytes() }
}

impl<'a> TryFrom<&'a [u8]> for Multihash {
  type Error = Error;

  fn try_from(bytes: &'a [u8]) -> Result<Self> { Self::parse(bytes) }
}

impl TryFrom<Vec<u8>> for Multihash {
  type Error = Error;

  fn try_from(bytes: Vec<u8>) -> Result<Self> { Self::parse(&bytes) }
}

impl fmt::Debug for Multihash {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Multihash(0x{:x}, ", self.code)?;
    for byte in self.digest() {
      write!(f, "{:02x}", byte)?;
    }
    write!(f, ")")
  }
}
