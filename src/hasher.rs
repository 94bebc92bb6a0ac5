//! Hash routines keyed by multicodec code.
//!
//! Which routines [`DefaultHashers`] carries depends on the enabled hash
//! features; a code whose feature is off resolves to `UnsupportedFunction`
//! just like md5 or shake, which have no implementation at all.

use crate::{
  error::{
    Error,
    Result,
  },
  multicodec,
};
use sp_std::vec::Vec;

#[cfg(any(feature = "sha1", feature = "sha2", feature = "sha3"))]
use digest::Digest;

/// A one-shot hash routine.
pub type HashFn = fn(&[u8]) -> Vec<u8>;

/// Maps a function code to its implementation.
pub trait HasherTable {
  /// # Errors
  ///
  /// Returns `UnsupportedFunction` if `code` has no implementation here.
  fn resolve(&self, code: u64) -> Result<HashFn>;
}

/// The hashers compiled into this build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultHashers;

impl HasherTable for DefaultHashers {
  fn resolve(&self, code: u64) -> Result<HashFn> {
    let hasher: HashFn = match code {
      multicodec::IDENTITY => identity,
      #[cfg(feature = "sha1")]
      multicodec::SHA1 => sha1_160,
      #[cfg(feature = "sha2")]
      multicodec::SHA2_256 => sha2_256,
      #[cfg(feature = "sha2")]
      multicodec::SHA2_512 => sha2_512,
      #[cfg(feature = "sha3")]
      multicodec::SHA3_224 => sha3_224,
      #[cfg(feature = "sha3")]
      multicodec::SHA3_256 => sha3_256,
      #[cfg(feature = "sha3")]
      multicodec::SHA3_384 => sha3_384,
      #[cfg(feature = "sha3")]
      multicodec::SHA3_512 => sha3_512,
      #[cfg(feature = "sha3")]
      multicodec::KECCAK_224 => keccak_224,
      #[cfg(feature = "sha3")]
      multicodec::KECCAK_256 => keccak_256,
      #[cfg(feature = "sha3")]
      multicodec::KECCAK_384 => keccak_384,
      #[cfg(feature = "sha3")]
      multicodec::KECCAK_512 => keccak_512,
      #[cfg(feature = "blake2b")]
      multicodec::BLAKE2B_256 => blake2b_256,
      #[cfg(feature = "blake2b")]
      multicodec::BLAKE2B_512 => blake2b_512,
      #[cfg(feature = "blake2s")]
      multicodec::BLAKE2S_256 => blake2s_256,
      #[cfg(feature = "blake3")]
      multicodec::BLAKE3 => blake3_256,
      _ => {
        #[cfg(feature = "tracing")]
        tracing::debug!(code, "hash function has no implementation");
        return Err(Error::UnsupportedFunction(code));
      }
    };
    Ok(hasher)
  }
}

fn identity(input: &[u8]) -> Vec<u8> { input.to_vec() }

#[cfg(feature = "sha1")]
fn sha1_160(input: &[u8]) -> Vec<u8> { sha1::Sha1::digest(input).to_vec() }

#[cfg(feature = "sha2")]
fn sha2_256(input: &[u8]) -> Vec<u8> { sha_2::Sha256::digest(input).to_vec() }

#[cfg(feature = "sha2")]
fn sha2_512(input: &[u8]) -> Vec<u8> { sha_2::Sha512::digest(input).to_vec() }

#[cfg(feature = "sha3")]
fn sha3_224(input: &[u8]) -> Vec<u8> { sha_3::Sha3_224::digest(input).to_vec() }

#[cfg(feature = "sha3")]
fn sha3_256(input: &[u8]) -> Vec<u8> { sha_3::Sha3_256::digest(input).to_vec() }

#[cfg(feature = "sha3")]
fn sha3_384(input: &[u8]) -> Vec<u8> { sha_3::Sha3_384::digest(input).to_vec() }

#[cfg(feature = "sha3")]
fn sha3_512(input: &[u8]) -> Vec<u8> { sha_3::Sha3_512::digest(input).to_vec() }

#[cfg(feature = "sha3")]
fn keccak_224(input: &[u8]) -> Vec<u8> {
  sha_3::Keccak224::digest(input).to_vec()
}

#[cfg(feature = "sha3")]
fn keccak_256(input: &[u8]) -> Vec<u8> {
  sha_3::Keccak256::digest(input).to_vec()
}

#[cfg(feature = "sha3")]
fn keccak_384(input: &[u8]) -> Vec<u8> {
  sha_3::Keccak384::digest(input).to_vec()
}

#[cfg(feature = "sha3")]
fn keccak_512(input: &[u8]) -> Vec<u8> {
  sha_3::Keccak512::digest(input).to_vec()
}

#[cfg(feature = "blake2b")]
fn blake2b_256(input: &[u8]) -> Vec<u8> {
  blake2b_simd::Params::new().hash_length(32).hash(input).as_bytes().to_vec()
}

#[cfg(feature = "blake2b")]
fn blake2b_512(input: &[u8]) -> Vec<u8> {
  blake2b_simd::Params::new().hash_length(64).hash(input).as_bytes().to_vec()
}

#[cfg(feature = "blake2s")]
fn blake2s_256(input: &[u8]) -> Vec<u8> {
  blake2s_simd::Params::new().hash_length(32).hash(input).as_bytes().to_vec()
}

#[cfg(feature = "blake3")]
fn blake3_256(input: &[u8]) -> Vec<u8> { blake3::hash(input).as_bytes().to_vec() }
