//! Account identifiers.
//!
//! - `validator` - The network's native address-decoding rule
//! - [`AccountIdentifier`] - An address that already passed that rule

mod validator;

pub use validator::{decode, validate, AddressError, ADDRESS_BYTES};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ExplorerError;

/// A validated Solana account address.
///
/// The only way to build one is through [`AccountIdentifier::parse`], so
/// every instance is decodable by the network's address scheme. The input
/// string is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountIdentifier(Arc<str>);

impl AccountIdentifier {
    /// Validate `raw` and wrap it.
    pub fn parse(raw: &str) -> Result<Self, ExplorerError> {
        match validator::decode(raw) {
            Ok(_) => Ok(Self(Arc::from(raw))),
            Err(_) => Err(ExplorerError::InvalidIdentifier(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw public key bytes.
    pub fn to_bytes(&self) -> [u8; ADDRESS_BYTES] {
        // Construction guarantees the string decodes.
        validator::decode(&self.0).unwrap_or([0u8; ADDRESS_BYTES])
    }

    /// Leading slice of the address, at most `len` characters.
    pub fn prefix(&self, len: usize) -> &str {
        // base58 is ASCII, byte slicing is char slicing.
        &self.0[..len.min(self.0.len())]
    }

    /// Trailing slice of the address, at most `len` characters.
    pub fn suffix(&self, len: usize) -> &str {
        &self.0[self.0.len().saturating_sub(len)..]
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountIdentifier {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountIdentifier {
    type Error = ExplorerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl Serialize for AccountIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccountIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
