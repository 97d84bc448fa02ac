use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use borsh::{BorshDeserialize, BorshSerialize};
use derive_more::{Display, Into};
use thiserror::Error;

/// Human readable part of every address.
const HRP: &str = "sov";

/// Why a string is not an address.
#[derive(Debug, Error)]
pub enum Bech32ParseError {
    /// Not bech32 at all.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// Encoded with another human readable part than `sov`.
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    /// Encoded with bech32 instead of bech32m.
    #[error("Address must be bech32m encoded")]
    WrongVariant,
    /// The payload is not 32 bytes.
    #[error("Invalid address length {0}, should be 32")]
    InvalidLength(usize),
}

/// A checked bech32m address string, e.g. `sov1qypq...`.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    BorshDeserialize,
    BorshSerialize,
    Debug,
    PartialEq,
    Clone,
    Eq,
    Into,
    Display,
)]
#[serde(try_from = "String", into = "String")]
#[display(fmt = "{}", "value")]
pub struct AddressBech32 {
    value: String,
}

impl AddressBech32 {
    fn encode(bytes: &[u8; 32]) -> Result<Self, bech32::Error> {
        let value = bech32::encode(HRP, bytes.to_base32(), Variant::Bech32m)?;
        Ok(Self { value })
    }

    fn decode(value: &str) -> Result<[u8; 32], Bech32ParseError> {
        let (hrp, data, variant) = bech32::decode(value)?;
        if hrp != HRP {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }
        if variant != Variant::Bech32m {
            return Err(Bech32ParseError::WrongVariant);
        }

        let bytes = Vec::<u8>::from_base32(&data)?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| Bech32ParseError::InvalidLength(bytes.len()))
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)?;
        Ok(Self {
            value: s.to_owned(),
        })
    }
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)?;
        Ok(Self { value })
    }
}

/// A 32 byte account or module address. Shown and parsed as bech32m with the
/// `sov` prefix, stored as the raw bytes.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize)]
pub struct Address([u8; 32]);

impl Address {
    /// The address made of `bytes`.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    fn to_bech32(self) -> Result<AddressBech32, bech32::Error> {
        AddressBech32::encode(&self.0)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; 32]>::try_from(bytes)
            .map_err(|_| anyhow::anyhow!("Address must be 32 bytes long"))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<AddressBech32> for Address {
    type Error = Bech32ParseError;

    fn try_from(addr: AddressBech32) -> Result<Self, Self::Error> {
        AddressBech32::decode(&addr.value).map(Self)
    }
}

impl FromStr for Address {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressBech32::decode(s).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bech32 = self.to_bech32().map_err(|_| fmt::Error)?;
        write!(f, "{bech32}")
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

// Human readable formats get the bech32m string, binary ones the raw bytes.
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let bech32 = self.to_bech32().map_err(serde::ser::Error::custom)?;
            serde::Serialize::serialize(&bech32, serializer)
        } else {
            serde::Serialize::serialize(&self.0, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let bech32: AddressBech32 = serde::Deserialize::deserialize(deserializer)?;
            Self::try_from(bech32).map_err(serde::de::Error::custom)
        } else {
            <[u8; 32] as serde::Deserialize>::deserialize(deserializer).map(Self)
        }
    }
}

impl schemars::JsonSchema for Address {
    fn schema_name() -> String {
        "Address".to_owned()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(gen)
    }
}
