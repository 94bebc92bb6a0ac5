use alloc::string::String;
use thiserror::Error;

/// Type alias to use this library's [`Error`] type in a `Result`.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
  /// The value needs more than 63 bits.
  #[error("Value does not fit in a 63 bit varint.")]
  ValueTooLarge,
  /// A signed value below zero was given to the varint encoder.
  #[error("Negative values cannot be varint encoded.")]
  NegativeValue,
  /// Every byte up to the end of input had its continuation bit set.
  #[error("Varint is missing its terminating byte.")]
  Truncated,
  /// More than 9 bytes were read before the varint terminated.
  #[error("Varint is longer than 9 bytes.")]
  Overlong,
  /// The varint has a redundant trailing zero group.
  #[error("Varint is not minimally encoded.")]
  NotMinimal,

  #[error("Cannot decode an empty multibase string.")]
  EmptyInput,
  #[error("Unknown multibase marker {0:?}.")]
  UnknownProtocol(char),
  #[error("Invalid characters for {0}.")]
  InvalidCharacters(&'static str),
  #[error("Misaligned or mis-padded {0} input.")]
  AlignmentError(&'static str),
  /// An identity payload that is not UTF-8 was asked for as a `String`.
  #[error("Identity payload is not valid UTF-8.")]
  InvalidUtf8,

  #[error("Unknown multicodec name {0:?}.")]
  UnknownName(String),
  #[error("Unknown multicodec code 0x{0:x}.")]
  UnknownCode(u64),

  #[error("Unknown hash function {0:?}.")]
  UnknownFunction(String),
  #[error("Hash function 0x{0:x} has no implementation.")]
  UnsupportedFunction(u64),
  #[error("Multihash declares {expected} digest bytes but {actual} follow.")]
  TruncatedDigest { expected: u64, actual: usize },

  #[error("Multiaddr must start with '/'.")]
  InvalidMultiaddr,
  #[error("Unknown multiaddr protocol {0:?}.")]
  UnknownProtocolName(String),
  #[error("Unknown multiaddr protocol code 0x{0:x}.")]
  UnknownProtocolCode(u64),
  #[error("Multiaddr protocol {0} requires a value.")]
  MissingValue(&'static str),
  #[error("Malformed value for multiaddr protocol {0}.")]
  MalformedValue(&'static str),
  #[error("Multiaddr segment {0} is truncated.")]
  TruncatedSegment(&'static str),

  #[error("Unknown cid version {0}.")]
  UnknownVersion(u64),
  #[error("CIDv0 requires a sha2-256 multihash and the dag-pb codec.")]
  InvalidCidV0,
  #[error("CIDv0 can only be rendered as base58btc.")]
  InvalidCidV0Base,
}
