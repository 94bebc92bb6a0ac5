use crate::error::{
  Error,
  Result,
};
use sp_std::convert::TryFrom;

/// The version of a CID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Version {
  /// Legacy: a bare sha2-256 multihash, implicitly dag-pb.
  V0,
  /// Self-describing: version, codec and multihash.
  V1,
}

impl Version {
  pub fn is_v0(self) -> bool { self == Version::V0 }
}

impl From<Version> for u64 {
  fn from(version: Version) -> u64 {
    match version {
      Version::V0 => 0,
      Version::V1 => 1,
    }
  }
}

impl TryFrom<u64> for Version {
  type Error = Error;

  fn try_from(raw: u64) -> Result<Self> {
    match raw {
      0 => Ok(Version::V0),
      1 => Ok(Version::V1),
      _ => Err(Error::UnknownVersion(raw)),
    }
  }
}
