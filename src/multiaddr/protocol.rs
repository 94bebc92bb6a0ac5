//! The multiaddr protocol table.

use crate::error::{
  Error,
  Result,
};
use alloc::borrow::ToOwned;

/// How a protocol's value is laid out in the binary form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
  /// No value.
  Empty,
  /// Exactly this many bytes.
  Fixed(usize),
  /// A varint length, then that many bytes.
  Prefixed,
  /// Like `Prefixed`, but in text the value is the rest of the address.
  Path,
}

/// How a protocol's value is written in the text form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
  None,
  /// Dotted quad.
  Ip4,
  Ip6,
  /// Decimal, two bytes big-endian.
  Port,
  /// Prefix length of an address block, one byte.
  Cidr,
  /// Text stored as its UTF-8 bytes.
  Utf8,
  /// A peer id: a multihash, written bare base58btc or as a CID.
  P2p,
  /// `<base32 v2 service id>:<port>`
  Onion,
  /// `<base32 v3 service id>:<port>`
  Onion3,
  /// Any multibase-encoded multihash.
  Certhash,
  /// Decimal, eight bytes big-endian.
  Memory,
}

/// One row of a protocol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProtocolInfo {
  pub name: &'static str,
  pub code: u64,
  pub shape: Shape,
  pub codec: Codec,
}

impl ProtocolInfo {
  pub const fn new(
    name: &'static str,
    code: u64,
    shape: Shape,
    codec: Codec,
  ) -> Self {
    ProtocolInfo { name, code, shape, codec }
  }
}

/// Lookups against a multiaddr protocol table.
pub trait ProtocolTable {
  /// # Errors
  ///
  /// Returns `UnknownProtocolName` if nothing is called `name`.
  fn by_name(&self, name: &str) -> Result<&ProtocolInfo>;

  /// # Errors
  ///
  /// Returns `UnknownProtocolCode` if nothing has `code`.
  fn by_code(&self, code: u64) -> Result<&ProtocolInfo>;
}

pub const IP4: u64 = 4;
pub const TCP: u64 = 6;
pub const DCCP: u64 = 33;
pub const IP6: u64 = 41;
pub const IP6ZONE: u64 = 42;
pub const IPCIDR: u64 = 43;
pub const DNS: u64 = 53;
pub const DNS4: u64 = 54;
pub const DNS6: u64 = 55;
pub const DNSADDR: u64 = 56;
pub const SCTP: u64 = 132;
pub const UDP: u64 = 273;
pub const P2P_WEBRTC_STAR: u64 = 275;
pub const P2P_WEBRTC_DIRECT: u64 = 276;
pub const WEBRTC_DIRECT: u64 = 280;
pub const WEBRTC: u64 = 281;
pub const P2P_CIRCUIT: u64 = 290;
pub const UDT: u64 = 301;
pub const UTP: u64 = 302;
pub const UNIX: u64 = 400;
pub const P2P: u64 = 421;
pub const HTTPS: u64 = 443;
pub const ONION: u64 = 444;
pub const ONION3: u64 = 445;
pub const TLS: u64 = 448;
pub const SNI: u64 = 449;
pub const NOISE: u64 = 454;
pub const QUIC: u64 = 460;
pub const QUIC_V1: u64 = 461;
pub const WEBTRANSPORT: u64 = 465;
pub const CERTHASH: u64 = 466;
pub const WS: u64 = 477;
pub const WSS: u64 = 478;
pub const P2P_WEBSOCKET_STAR: u64 = 479;
pub const HTTP: u64 = 480;
pub const MEMORY: u64 = 777;

static TABLE: [ProtocolInfo; 36] = [
  ProtocolInfo::new("ip4", IP4, Shape::Fixed(4), Codec::Ip4),
  ProtocolInfo::new("tcp", TCP, Shape::Fixed(2), Codec::Port),
  ProtocolInfo::new("dccp", DCCP, Shape::Fixed(2), Codec::Port),
  ProtocolInfo::new("ip6", IP6, Shape::Fixed(16), Codec::Ip6),
  ProtocolInfo::new("ip6zone", IP6ZONE, Shape::Prefixed, Codec::Utf8),
  ProtocolInfo::new("ipcidr", IPCIDR, Shape::Fixed(1), Codec::Cidr),
  ProtocolInfo::new("dns", DNS, Shape::Prefixed, Codec::Utf8),
  ProtocolInfo::new("dns4", DNS4, Shape::Prefixed, Codec::Utf8),
  ProtocolInfo::new("dns6", DNS6, Shape::Prefixed, Codec::Utf8),
  ProtocolInfo::new("dnsaddr", DNSADDR, Shape::Prefixed, Codec::Utf8),
  ProtocolInfo::new("sctp", SCTP, Shape::Fixed(2), Codec::Port),
  ProtocolInfo::new("udp", UDP, Shape::Fixed(2), Codec::Port),
  ProtocolInfo::new("p2p-webrtc-star", P2P_WEBRTC_STAR, Shape::Empty, Codec::None),
  ProtocolInfo::new(
    "p2p-webrtc-direct",
    P2P_WEBRTC_DIRECT,
    Shape::Empty,
    Codec::None,
  ),
  ProtocolInfo::new("webrtc-direct", WEBRTC_DIRECT, Shape::Empty, Codec::None),
  ProtocolInfo::new("webrtc", WEBRTC, Shape::Empty, Codec::None),
  ProtocolInfo::new("p2p-circuit", P2P_CIRCUIT, Shape::Empty, Codec::None),
  ProtocolInfo::new("udt", UDT, Shape::Empty, Codec::None),
  ProtocolInfo::new("utp", UTP, Shape::Empty, Codec::None),
  ProtocolInfo::new("unix", UNIX, Shape::Path, Codec::Utf8),
  ProtocolInfo::new("p2p", P2P, Shape::Prefixed, Codec::P2p),
  ProtocolInfo::new("https", HTTPS, Shape::Empty, Codec::None),
  ProtocolInfo::new("onion", ONION, Shape::Fixed(12), Codec::Onion),
  ProtocolInfo::new("onion3", ONION3, Shape::Fixed(37), Codec::Onion3),
  ProtocolInfo::new("tls", TLS, Shape::Empty, Codec::None),
  ProtocolInfo::new("sni", SNI, Shape::Prefixed, Codec::Utf8),
  ProtocolInfo::new("noise", NOISE, Shape::Empty, Codec::None),
  ProtocolInfo::new("quic", QUIC, Shape::Empty, Codec::None),
  ProtocolInfo::new("quic-v1", QUIC_V1, Shape::Empty, Codec::None),
  ProtocolInfo::new("webtransport", WEBTRANSPORT, Shape::Empty, Codec::None),
  ProtocolInfo::new("certhash", CERTHASH, Shape::Prefixed, Codec::Certhash),
  ProtocolInfo::new("ws", WS, Shape::Empty, Codec::None),
  ProtocolInfo::new("wss", WSS, Shape::Empty, Codec::None),
  ProtocolInfo::new(
    "p2p-websocket-star",
    P2P_WEBSOCKET_STAR,
    Shape::Empty,
    Codec::None,
  ),
  ProtocolInfo::new("http", HTTP, Shape::Empty, Codec::None),
  ProtocolInfo::new("memory", MEMORY, Shape::Fixed(8), Codec::Memory),
];

/// The libp2p protocol table. `ipfs` is accepted as a name for `p2p` but
/// never produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultProtocols;

impl ProtocolTable for DefaultProtocols {
  fn by_name(&self, name: &str) -> Result<&ProtocolInfo> {
    let name = if name == "ipfs" { "p2p" } else { name };
    TABLE
      .iter()
      .find(|info| info.name == name)
      .ok_or_else(|| Error::UnknownProtocolName(name.to_owned()))
  }

  fn by_code(&self, code: u64) -> Result<&ProtocolInfo> {
    TABLE
      .iter()
      .find(|info| info.code == code)
      .ok_or(Error::UnknownProtocolCode(code))
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;

  #[test]
  fn rows_are_unique() {
    for (i, info) in TABLE.iter().enumerate() {
      for other in &TABLE[i + 1..] {
        assert_ne!(info.name, other.name);
        assert_ne!(info.code, other.code);
      }
      assert_eq!(DefaultProtocols.by_name(info.name), Ok(info));
      assert_eq!(DefaultProtocols.by_code(info.code), Ok(info));
    }
  }

  #[test]
  fn ipfs_is_an_alias() {
    let info = DefaultProtocols.by_name("ipfs").unwrap();
    assert_eq!(info.name, "p2p");
    assert_eq!(info.code, P2P);
  }

  #[test]
  fn misses() {
    assert_eq!(
      DefaultProtocols.by_name("tcp6"),
      Err(Error::UnknownProtocolName("tcp6".to_owned()))
    );
    assert_eq!(DefaultProtocols.by_code(5), Err(Error::UnknownProtocolCode(5)));
  }
}
