//! Core type definitions for Superswap

use serde::{Deserialize, Serialize};
use std::fmt;

/// EVM chain identifier (e.g. 10 for Optimism, 8453 for Base)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EVM address (20 bytes, `0x`-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Length of an EVM address in bytes
    pub const LEN: usize = 20;

    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the address into its raw bytes.
    ///
    /// Returns `None` unless the string is `0x` followed by exactly 40 hex digits.
    pub fn to_bytes(&self) -> Option<[u8; Self::LEN]> {
        let digits = self.0.strip_prefix("0x")?;
        let bytes = hex::decode(digits).ok()?;
        bytes.try_into().ok()
    }

    pub fn is_valid(&self) -> bool {
        self.to_bytes().is_some()
    }

    /// Compare two addresses ignoring checksum casing
    pub fn matches(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde adapter writing a `BigUint` as a base-10 string.
///
/// Use with `#[serde(with = "superswap_core::amount_string")]`.
pub mod amount_string {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        s.parse::<BigUint>().map_err(serde::de::Error::custom)
    }
}

/// Same as [`amount_string`] for a list of amounts.
pub mod amount_string_vec {
    use num_bigint::BigUint;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[BigUint], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_str_radix(10))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Vec<String> = Deserialize::deserialize(deserializer)?;
        raw.iter()
            .map(|s| s.parse::<BigUint>().map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Constants
pub mod constants {
    /// Decimals of every token the superswapper routes
    pub const TOKEN_DECIMALS: u32 = 18;

    /// 1 token in its smallest unit (10^18)
    pub const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;
}
