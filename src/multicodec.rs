//! The slice of the multicodec table these formats need.
//!
//! Lookups go through [`CodecTable`] so callers can swap in their own table;
//! [`DefaultCodecs`] is the compiled-in one.

use crate::error::{
  Error,
  Result,
};
use alloc::borrow::ToOwned;

pub const IDENTITY: u64 = 0x00;
pub const SHA1: u64 = 0x11;
pub const SHA2_256: u64 = 0x12;
pub const SHA2_512: u64 = 0x13;
pub const SHA3_512: u64 = 0x14;
pub const SHA3_384: u64 = 0x15;
pub const SHA3_256: u64 = 0x16;
pub const SHA3_224: u64 = 0x17;
pub const SHAKE_128: u64 = 0x18;
pub const SHAKE_256: u64 = 0x19;
pub const KECCAK_224: u64 = 0x1a;
pub const KECCAK_256: u64 = 0x1b;
pub const KECCAK_384: u64 = 0x1c;
pub const KECCAK_512: u64 = 0x1d;
pub const BLAKE3: u64 = 0x1e;
pub const MD4: u64 = 0xd4;
pub const MD5: u64 = 0xd5;
pub const BLAKE2B_256: u64 = 0xb220;
pub const BLAKE2B_512: u64 = 0xb240;
pub const BLAKE2S_256: u64 = 0xb260;

pub const CBOR: u64 = 0x51;
pub const RAW: u64 = 0x55;
pub const DAG_PB: u64 = 0x70;
pub const DAG_CBOR: u64 = 0x71;
pub const LIBP2P_KEY: u64 = 0x72;
pub const GIT_RAW: u64 = 0x78;
pub const DAG_JOSE: u64 = 0x85;
pub const DAG_JSON: u64 = 0x0129;
pub const JSON: u64 = 0x0200;

static TABLE: [(&str, u64); 29] = [
  ("identity", IDENTITY),
  ("sha1", SHA1),
  ("sha2-256", SHA2_256),
  ("sha2-512", SHA2_512),
  ("sha3-512", SHA3_512),
  ("sha3-384", SHA3_384),
  ("sha3-256", SHA3_256),
  ("sha3-224", SHA3_224),
  ("shake-128", SHAKE_128),
  ("shake-256", SHAKE_256),
  ("keccak-224", KECCAK_224),
  ("keccak-256", KECCAK_256),
  ("keccak-384", KECCAK_384),
  ("keccak-512", KECCAK_512),
  ("blake3", BLAKE3),
  ("md4", MD4),
  ("md5", MD5),
  ("blake2b-256", BLAKE2B_256),
  ("blake2b-512", BLAKE2B_512),
  ("blake2s-256", BLAKE2S_256),
  ("cbor", CBOR),
  ("raw", RAW),
  ("dag-pb", DAG_PB),
  ("dag-cbor", DAG_CBOR),
  ("libp2p-key", LIBP2P_KEY),
  ("git-raw", GIT_RAW),
  ("dag-jose", DAG_JOSE),
  ("dag-json", DAG_JSON),
  ("json", JSON),
];

/// Name/code lookups against a multicodec table.
pub trait CodecTable {
  /// # Errors
  ///
  /// Returns `UnknownName` if the table has no entry called `name`.
  fn code_of(&self, name: &str) -> Result<u64>;

  /// # Errors
  ///
  /// Returns `UnknownCode` if the table has no entry for `code`.
  fn name_of(&self, code: u64) -> Result<&str>;
}

/// The compiled-in table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultCodecs;

impl CodecTable for DefaultCodecs {
  fn code_of(&self, name: &str) -> Result<u64> {
    TABLE
      .iter()
      .find(|(n, _)| *n == name)
      .map(|(_, code)| *code)
      .ok_or_else(|| Error::UnknownName(name.to_owned()))
  }

  fn name_of(&self, code: u64) -> Result<&str> {
    TABLE
      .iter()
      .find(|(_, c)| *c == code)
      .map(|(name, _)| *name)
      .ok_or(Error::UnknownCode(code))
  }
}

/// A codec named either by its code or by its table name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ident<'a> {
  Code(u64),
  Name(&'a str),
}

impl<'a> Ident<'a> {
  /// Resolves to a code. Codes pass through without consulting `table`.
  ///
  /// # Errors
  ///
  /// Returns `UnknownName` for a name `table` does not know.
  pub fn resolve<T: CodecTable + ?Sized>(self, table: &T) -> Result<u64> {
    match self {
      Ident::Code(code) => Ok(code),
      Ident::Name(name) => table.code_of(name),
    }
  }
}

impl<'a> From<u64> for Ident<'a> {
  fn from(code: u64) -> Self { Ident::Code(code) }
}

impl<'a> From<&'a str> for Ident<'a> {
  fn from(name: &'a str) -> Self { Ident::Name(name) }
}
