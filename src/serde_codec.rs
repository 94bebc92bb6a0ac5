//! Serde support.
//!
//! Human-readable formats get the text form (a CID string, a multiaddr path,
//! a base58btc multibase multihash); everything else gets the binary form.

use crate::{
  cid::Cid,
  error,
  multiaddr::Multiaddr,
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
use core::marker::PhantomData;
use serde::{
  de::{
    self,
    Deserialize,
    Deserializer,
    SeqAccess,
    Visitor,
  },
  ser::{
    self,
    Serialize,
    Serializer,
  },
};
use sp_std::{
  fmt,
  vec::Vec,
};

/// A value with a text form and a binary form.
trait Forms: Sized {
  const EXPECTING: &'static str;

  fn to_text(&self) -> error::Result<String>;

  fn to_binary(&self) -> Vec<u8>;

  fn from_text(text: &str) -> error::Result<Self>;

  fn from_binary(bytes: &[u8]) -> error::Result<Self>;
}

impl Forms for Cid {
  const EXPECTING: &'static str = "a CID string or binary CID";

  fn to_text(&self) -> error::Result<String> { Ok(self.to_string()) }

  fn to_binary(&self) -> Vec<u8> { self.to_bytes() }

  fn from_text(text: &str) -> error::Result<Self> { Cid::parse(text) }

  fn from_binary(bytes: &[u8]) -> error::Result<Self> { Cid::from_bytes(bytes) }
}

impl Forms for Multihash {
  const EXPECTING: &'static str = "a multibase string or binary multihash";

  fn to_text(&self) -> error::Result<String> {
    multibase::encode(Protocol::Base58Btc, self.as_bytes())
  }

  fn to_binary(&self) -> Vec<u8> { self.to_bytes() }

  fn from_text(text: &str) -> error::Result<Self> {
    let (_, bytes) = multibase::decode(text)?;
    Multihash::parse(&bytes)
  }

  fn from_binary(bytes: &[u8]) -> error::Result<Self> { Multihash::parse(bytes) }
}

impl Forms for Multiaddr {
  const EXPECTING: &'static str = "a multiaddr string or binary multiaddr";

  fn to_text(&self) -> error::Result<String> { Ok(self.to_string()) }

  fn to_binary(&self) -> Vec<u8> { Multiaddr::to_binary(self) }

  fn from_text(text: &str) -> error::Result<Self> { Multiaddr::parse_text(text) }

  fn from_binary(bytes: &[u8]) -> error::Result<Self> {
    Multiaddr::parse_binary(bytes)
  }
}

fn serialize<T: Forms, S: Serializer>(
  value: &T,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  if serializer.is_human_readable() {
    match value.to_text() {
      Ok(text) => serializer.serialize_str(&text),
      Err(e) => Err(ser::Error::custom(e)),
    }
  }
  else {
    serializer.serialize_bytes(&value.to_binary())
  }
}

fn deserialize<'de, T: Forms, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<T, D::Error> {
  let visitor = FormsVisitor(PhantomData);
  if deserializer.is_human_readable() {
    deserializer.deserialize_str(visitor)
  }
  else {
    deserializer.deserialize_bytes(visitor)
  }
}

struct FormsVisitor<T>(PhantomData<T>);

impl<'de, T: Forms> Visitor<'de> for FormsVisitor<T> {
  type Value = T;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(T::EXPECTING)
  }

  fn visit_str<E: de::Error>(self, text: &str) -> Result<T, E> {
    T::from_text(text).map_err(E::custom)
  }

  fn visit_bytes<E: de::Error>(self, bytes: &[u8]) -> Result<T, E> {
    T::from_binary(bytes).map_err(E::custom)
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
    let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
    while let Some(byte) = seq.next_element::<u8>()? {
      bytes.push(byte);
    }
    T::from_binary(&bytes).map_err(de::Error::custom)
  }
}

impl Serialize for Cid {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serialize(self, serializer)
  }
}

impl<'de> Deserialize<'de> for Cid {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserialize(deserializer)
  }
}

impl Serialize for Multihash {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serialize(self, serializer)
  }
}

impl<'de> Deserialize<'de> for Multihash {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserialize(deserializer)
  }
}

impl Serialize for Multiaddr {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serialize(self, serializer)
  }
}

impl<'de> Deserialize<'de> for Multiaddr {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserialize(deserializer)
  }
}
