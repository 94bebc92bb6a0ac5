//! Text and binary forms of protocol values.
//!
//! Both directions validate. Any bytes accepted here render to text, and that
//! text parses back to the same bytes. The input text itself is not kept:
//! `0080` renders as `80`, and an uppercase onion id as lowercase.

use super::protocol::{
  Codec,
  ProtocolInfo,
  Shape,
};
use crate::{
  cid::Cid,
  error::{
    Error,
    Result,
  },
  multibase::{
    self,
    Protocol,
  },
  multihash::Multihash,
};
use alloc::string::{
  String,
  ToString,
};
use byteorder::{
  BigEndian,
  ByteOrder,
};
use core::net::{
  Ipv4Addr,
  Ipv6Addr,
};
use sp_std::{
  convert::TryFrom,
  str::{
    self,
    FromStr,
  },
  vec::Vec,
};

/// Binary value for `text`, without any length prefix.
///
/// # Errors
///
/// Returns `MalformedValue` if `text` is not a valid value for `info`.
pub fn parse(info: &ProtocolInfo, text: &str) -> Result<Vec<u8>> {
  let bytes = match info.codec {
    Codec::None => Some(Vec::new()),
    Codec::Ip4 => text.parse::<Ipv4Addr>().ok().map(|ip| ip.octets().to_vec()),
    Codec::Ip6 => text.parse::<Ipv6Addr>().ok().map(|ip| ip.octets().to_vec()),
    Codec::Port => decimal::<u16>(text).map(|port| {
      let mut buf = vec![0; 2];
      BigEndian::write_u16(&mut buf, port);
      buf
    }),
    Codec::Cidr => decimal::<u8>(text).map(|bits| vec![bits]),
    Codec::Utf8 if text.is_empty() => None,
    Codec::Utf8 => Some(text.as_bytes().to_vec()),
    Codec::P2p => peer_id(text),
    Codec::Onion => onion(text, 16, 10),
    Codec::Onion3 => onion(text, 56, 35),
    Codec::Certhash => multibase::decode(text)
      .ok()
      .and_then(|(_, bytes)| Multihash::parse(&bytes).ok())
      .map(Multihash::into_bytes),
    Codec::Memory => decimal::<u64>(text).map(|n| {
      let mut buf = vec![0; 8];
      BigEndian::write_u64(&mut buf, n);
      buf
    }),
  };
  let bytes = bytes.ok_or(Error::MalformedValue(info.name))?;
  match info.shape {
    Shape::Fixed(n) if bytes.len() != n => Err(Error::MalformedValue(info.name)),
    _ => Ok(bytes),
  }
}

/// Appends the text form of `bytes` to `out`.
///
/// # Errors
///
/// Returns `MalformedValue` if `bytes` is not a valid value for `info`.
pub fn render(
  info: &ProtocolInfo,
  bytes: &[u8],
  out: &mut String,
) -> Result<()> {
  write_value(info, bytes, out).ok_or(Error::MalformedValue(info.name))
}

fn write_value(info: &ProtocolInfo, bytes: &[u8], out: &mut String) -> Option<()> {
  match info.codec {
    Codec::None if bytes.is_empty() => {}
    Codec::None => return None,
    Codec::Ip4 => {
      let octets = <[u8; 4]>::try_from(bytes).ok()?;
      out.push_str(&Ipv4Addr::from(octets).to_string());
    }
    Codec::Ip6 => {
      let octets = <[u8; 16]>::try_from(bytes).ok()?;
      out.push_str(&Ipv6Addr::from(octets).to_string());
    }
    Codec::Port if bytes.len() == 2 => {
      out.push_str(&BigEndian::read_u16(bytes).to_string());
    }
    Codec::Cidr if bytes.len() == 1 => out.push_str(&bytes[0].to_string()),
    Codec::Utf8 => {
      let text = str::from_utf8(bytes).ok()?;
      if text.is_empty() || (info.shape != Shape::Path && text.contains('/')) {
        return None;
      }
      out.push_str(text);
    }
    Codec::P2p => {
      Multihash::parse(bytes).ok()?;
      Protocol::Base58Btc.encode_body(bytes, out).ok()?;
    }
    Codec::Onion => write_onion(bytes, 10, out)?,
    Codec::Onion3 => write_onion(bytes, 35, out)?,
    Codec::Certhash => {
      Multihash::parse(bytes).ok()?;
      out.push(Protocol::Base64Url.marker());
      Protocol::Base64Url.encode_body(bytes, out).ok()?;
    }
    Codec::Memory if bytes.len() == 8 => {
      out.push_str(&BigEndian::read_u64(bytes).to_string());
    }
    Codec::Port | Codec::Cidr | Codec::Memory => return None,
  }
  Some(())
}

/// Unsigned decimal with no sign and no surrounding junk.
fn decimal<T: FromStr>(text: &str) -> Option<T> {
  if text.is_empty() || !text.bytes().all(|c| c.is_ascii_digit()) {
    return None;
  }
  text.parse().ok()
}

/// A peer id is a multihash. Legacy ids are bare base58btc (`Qm…`, `1…`);
/// anything else must be a CID.
fn peer_id(text: &str) -> Option<Vec<u8>> {
  if text.starts_with('Q') || text.starts_with('1') {
    let bytes = Protocol::Base58Btc.decode_body(text.as_bytes()).ok()?;
    Multihash::parse(&bytes).ok().map(Multihash::into_bytes)
  }
  else {
    Cid::from_str(text).ok().map(|cid| cid.hash().to_bytes())
  }
}

fn onion(text: &str, chars: usize, id_len: usize) -> Option<Vec<u8>> {
  let (id, port) = text.split_once(':')?;
  if id.len() != chars {
    return None;
  }
  let id = id.to_ascii_lowercase();
  let mut bytes = Protocol::Base32.decode_body(id.as_bytes()).ok()?;
  if bytes.len() != id_len {
    return None;
  }
  let port = decimal::<u16>(port).filter(|port| *port != 0)?;
  let mut buf = [0u8; 2];
  BigEndian::write_u16(&mut buf, port);
  bytes.extend_from_slice(&buf);
  Some(bytes)
}

fn write_onion(bytes: &[u8], id_len: usize, out: &mut String) -> Option<()> {
  if bytes.len() != id_len + 2 {
    return None;
  }
  let (id, port) = bytes.split_at(id_len);
  let port = BigEndian::read_u16(port);
  if port == 0 {
    return None;
  }
  Protocol::Base32.encode_body(id, out).ok()?;
  out.push(':');
  out.push_str(&port.to_string());
  Some(())
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::multiaddr::protocol::{
    DefaultProtocols,
    ProtocolTable,
  };

  fn info(name: &str) -> ProtocolInfo {
    *DefaultProtocols.by_name(name).unwrap()
  }

  fn roundtrip(name: &str, text: &str) -> Vec<u8> {
    let info = info(name);
    let bytes = parse(&info, text).unwrap();
    let mut out = String::new();
    render(&info, &bytes, &mut out).unwrap();
    assert_eq!(out, text);
    bytes
  }

  #[test]
  fn addresses() {
    assert_eq!(roundtrip("ip4", "127.0.0.1"), vec![127, 0, 0, 1]);
    assert_eq!(
      hex::encode(roundtrip("ip6", "2001:8a0:7ac5:4201:3ac9:86ff:fe31:7095")),
      "200108a07ac542013ac986fffe317095"
    );
    assert_eq!(roundtrip("ip6", "::1").len(), 16);
    assert_eq!(roundtrip("ipcidr", "24"), vec![24]);
  }

  #[test]
  fn ports() {
    assert_eq!(roundtrip("tcp", "5000"), vec![0x13, 0x88]);
    assert_eq!(roundtrip("udp", "65535"), vec![0xff, 0xff]);
    for bad in ["65536", "-1", "+80", "", "80a"].iter() {
      assert_eq!(
        parse(&info("tcp"), bad),
        Err(Error::MalformedValue("tcp")),
        "{}",
        bad
      );
    }
  }

  #[test]
  fn onion_services() {
    assert_eq!(
      hex::encode(roundtrip("onion", "timaq4ygg2iegci7:1234")),
      "9a18087306369043091f04d2"
    );
    assert_eq!(
      roundtrip(
        "onion3",
        "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopnpyyd:1234"
      )
      .len(),
      37
    );
    let malformed = [
      ("onion", "timaq4ygg2iegci:80"),
      ("onion", "timaq4ygg2iegci7:-1"),
      ("onion", "timaq4ygg2iegci7:0"),
      ("onion", "timaq4ygg2iegci7"),
      ("onion3", "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopyyd:1234"),
      ("onion3", "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopnpyyd"),
    ];
    for &(name, text) in malformed.iter() {
      assert!(parse(&info(name), text).is_err(), "{}", text);
    }
  }

  #[test]
  fn onion_ids_fold_case() {
    let onion = info("onion");
    let lower = parse(&onion, "timaq4ygg2iegci7:1234").unwrap();
    assert_eq!(parse(&onion, "TIMAQ4YGG2IEGCI7:1234"), Ok(lower.clone()));
    assert_eq!(parse(&onion, "TimaQ4ygg2iegci7:1234"), Ok(lower.clone()));
    let mut out = String::new();
    render(&onion, &lower, &mut out).unwrap();
    assert_eq!(out, "timaq4ygg2iegci7:1234");
    let onion3 = info("onion3");
    let v3 = "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopnpyyd:1234";
    assert_eq!(parse(&onion3, &v3.to_ascii_uppercase()), parse(&onion3, v3));
  }

  #[test]
  fn text_is_canonicalized() {
    let tcp = info("tcp");
    let bytes = parse(&tcp, "0080").unwrap();
    assert_eq!(bytes, vec![0x00, 0x50]);
    let mut out = String::new();
    render(&tcp, &bytes, &mut out).unwrap();
    assert_eq!(out, "80");
    assert_eq!(parse(&tcp, &out), Ok(bytes));
    assert_eq!(roundtrip("memory", "0"), vec![0; 8]);
    let memory = parse(&info("memory"), "007").unwrap();
    assert_eq!(roundtrip("memory", "7"), memory);
  }

  #[test]
  fn peer_ids() {
    let legacy = "QmcgpsyWgH8Y8ajJz1Cu72KnS5uo2Aa2LpzU7kinSupNKC";
    let bytes = roundtrip("p2p", legacy);
    assert_eq!(
      hex::encode(&bytes),
      "1220d52ebb89d85b02a284948203a62ff28389c57c9f42beec4ec20db76a68911c0b"
    );
    let as_cid = "bafzbeigvf25ytwc3akrijfecaotc74udrhcxzh2cx3we5qqnw5vgrei4bm";
    assert_eq!(parse(&info("p2p"), as_cid), Ok(bytes));
    assert!(parse(&info("p2p"), "Qmcgpsy").is_err());
  }

  #[test]
  fn certhashes() {
    let text = "uEiC5TSe5k00-CKUuUtfafav6xITv43pTgO6QiPes4u_N6Q";
    let bytes = roundtrip("certhash", text);
    assert_eq!(bytes.len(), 34);
    let as_hex =
      "f1220b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
    assert_eq!(parse(&info("certhash"), as_hex), Ok(bytes));
    assert!(parse(&info("certhash"), "f1220").is_err());
  }

  #[test]
  fn names_and_memory() {
    assert_eq!(roundtrip("dns4", "ipfs.io"), b"ipfs.io");
    assert_eq!(roundtrip("unix", "a/b/c"), b"a/b/c");
    assert_eq!(parse(&info("dns"), ""), Err(Error::MalformedValue("dns")));
    assert_eq!(roundtrip("memory", "1234"), vec![0, 0, 0, 0, 0, 0, 0x04, 0xd2]);
  }

  #[test]
  fn binary_is_revalidated() {
    let mut out = String::new();
    let cases: [(&str, &[u8]); 6] = [
      ("ip4", &[127, 0, 0]),
      ("tcp", &[1]),
      ("dns", &[0xff, 0xfe]),
      ("dns", b"a/b"),
      ("p2p", &[0x12, 0x20, 0x00]),
      ("onion", &[0; 12]),
    ];
    for &(name, bytes) in cases.iter() {
      assert_eq!(
        render(&info(name), bytes, &mut out),
        Err(Error::MalformedValue(info(name).name))
      );
    }
  }
}
