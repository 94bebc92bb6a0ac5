//! # sp-multiformats
//!
//! Self-describing formats from [multiformats](https://multiformats.io) for
//! `no_std` use:
//!
//! * [`varint`]: unsigned LEB128 integers, capped at 63 bits
//! * [`multibase`]: text encodings tagged with a marker character
//! * [`multihash`]: digests tagged with their function and length
//! * [`multiaddr`]: network addresses as protocol/value segments
//! * [`cid`]: content identifiers built from a codec and a multihash
//!
//! The codec table, the hash routines and the multiaddr protocol table are
//! reached through traits ([`CodecTable`], [`HasherTable`],
//! [`ProtocolTable`]); the `*_with` constructors take them explicitly and the
//! rest use the compiled-in defaults.

#![deny(
  clippy::missing_errors_doc,
  clippy::missing_panics_doc,
  clippy::missing_safety_doc
)]
#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[macro_use]
extern crate alloc;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod cid;
pub mod error;
pub mod hasher;
pub mod multiaddr;
pub mod multibase;
pub mod multicodec;
pub mod multihash;
#[cfg(feature = "serde-codec")]
pub mod serde_codec;
pub mod varint;

pub use self::{
  cid::{
    Cid,
    Version,
  },
  error::{
    Error,
    Result,
  },
  hasher::{
    DefaultHashers,
    HashFn,
    HasherTable,
  },
  multiaddr::{
    DefaultProtocols,
    Multiaddr,
    ProtocolTable,
    Segment,
  },
  multibase::Protocol,
  multicodec::{
    CodecTable,
    DefaultCodecs,
    Ident,
  },
  multihash::Multihash,
  varint::Varint,
};
