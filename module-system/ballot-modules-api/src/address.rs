use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32};
use borsh::{BorshDeserialize, BorshSerialize};
use derive_more::{Display, Into};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Number of bytes in an [`Address`].
pub const ADDRESS_LEN: usize = 20;

const HRP: &str = "ballot";

/// The identity type every module is generic over.
pub trait BasicAddress:
    Eq
    + PartialEq
    + Hash
    + Clone
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + AsRef<[u8]>
    + for<'a> TryFrom<&'a [u8], Error = anyhow::Error>
    + BorshSerialize
    + BorshDeserialize
    + Serialize
    + DeserializeOwned
    + From<[u8; 32]>
    + FromStr<Err = anyhow::Error>
    + 'static
{
}

/// Error returned when parsing a bech32m address string.
#[derive(Debug, Error)]
pub enum Bech32ParseError {
    /// The string is not valid bech32.
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    /// The human readable part is not `ballot`.
    #[error("Wrong HRP: {0}")]
    WrongHRP(String),
    /// The payload does not have [`ADDRESS_LEN`] bytes.
    #[error("Invalid address length {0}, expected {ADDRESS_LEN}")]
    InvalidLength(usize),
}

/// A bech32m encoded [`Address`].
#[derive(
    serde::Serialize,
    serde::Deserialize,
    borsh::BorshDeserialize,
    borsh::BorshSerialize,
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

/// A 160-bit identity, displayed as bech32m with the `ballot` human readable part.
#[derive(
    PartialEq, Clone, Copy, Eq, PartialOrd, Ord, BorshDeserialize, BorshSerialize, Hash,
    schemars::JsonSchema,
)]
pub struct Address {
    addr: [u8; ADDRESS_LEN],
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.addr
    }
}

impl Address {
    /// Creates a new address containing the given bytes
    pub const fn new(addr: [u8; ADDRESS_LEN]) -> Self {
        Self { addr }
    }
}

impl<'a> TryFrom<&'a [u8]> for Address {
    type Error = anyhow::Error;

    fn try_from(addr: &'a [u8]) -> Result<Self, Self::Error> {
        let addr: [u8; ADDRESS_LEN] = addr
            .try_into()
            .map_err(|_| anyhow::anyhow!("Address must be {ADDRESS_LEN} bytes long"))?;
        Ok(Self { addr })
    }
}

/// Keeps the trailing 20 bytes of a 32 byte digest.
impl From<[u8; 32]> for Address {
    fn from(hash: [u8; 32]) -> Self {
        let mut addr = [0u8; ADDRESS_LEN];
        addr.copy_from_slice(&hash[32 - ADDRESS_LEN..]);
        Self { addr }
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = AddressBech32::from_str(s)?;
        Ok(Self {
            addr: addr.to_byte_array()?,
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AddressBech32::from(self))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", AddressBech32::from(self))
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serde::Serialize::serialize(&AddressBech32::from(self), serializer)
        } else {
            serde::Serialize::serialize(&self.addr, serializer)
        }
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let address_bech32: AddressBech32 = serde::Deserialize::deserialize(deserializer)?;
            let addr = address_bech32
                .to_byte_array()
                .map_err(serde::de::Error::custom)?;
            Ok(Address { addr })
        } else {
            let addr = <[u8; ADDRESS_LEN] as serde::Deserialize>::deserialize(deserializer)?;
            Ok(Address { addr })
        }
    }
}

impl BasicAddress for Address {}

fn vec_to_bech32m(vec: &[u8], hrp: &str) -> Result<String, bech32::Error> {
    let data = vec.to_base32();
    bech32::encode(hrp, data, bech32::Variant::Bech32m)
}

fn bech32m_to_decoded_vec(bech32_addr: &str) -> Result<(String, Vec<u8>), bech32::Error> {
    let (hrp, data, _) = bech32::decode(bech32_addr)?;
    let vec = Vec::<u8>::from_base32(&data)?;
    Ok((hrp, vec))
}

impl AddressBech32 {
    fn to_byte_array(&self) -> Result<[u8; ADDRESS_LEN], Bech32ParseError> {
        let (_, data) = bech32m_to_decoded_vec(&self.value)?;
        data.as_slice()
            .try_into()
            .map_err(|_| Bech32ParseError::InvalidLength(data.len()))
    }
}

impl From<&Address> for AddressBech32 {
    fn from(addr: &Address) -> Self {
        // Encoding a fixed-length payload under a constant, valid HRP cannot fail.
        let value = vec_to_bech32m(&addr.addr, HRP).expect("valid bech32m HRP");
        AddressBech32 { value }
    }
}

impl From<Address> for AddressBech32 {
    fn from(addr: Address) -> Self {
        AddressBech32::from(&addr)
    }
}

impl TryFrom<String> for AddressBech32 {
    type Error = Bech32ParseError;

    fn try_from(addr: String) -> Result<Self, Bech32ParseError> {
        AddressBech32::from_str(&addr)
    }
}

impl FromStr for AddressBech32 {
    type Err = Bech32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, data) = bech32m_to_decoded_vec(s)?;

        if hrp != HRP {
            return Err(Bech32ParseError::WrongHRP(hrp));
        }
        if data.len() != ADDRESS_LEN {
            return Err(Bech32ParseError::InvalidLength(data.len()));
        }

        Ok(AddressBech32 {
            value: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bech32_display_round_trips() {
        let address = Address::new([7; ADDRESS_LEN]);
        let encoded = address.to_string();

        assert!(encoded.starts_with("ballot1"));
        assert_eq!(encoded.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_rejects_wrong_hrp_and_length() {
        let other_hrp = vec_to_bech32m(&[1; ADDRESS_LEN], "sov").unwrap();
        assert!(matches!(
            AddressBech32::from_str(&other_hrp),
            Err(Bech32ParseError::WrongHRP(hrp)) if hrp == "sov"
        ));

        let too_long = vec_to_bech32m(&[1; 32], HRP).unwrap();
        assert!(matches!(
            AddressBech32::from_str(&too_long),
            Err(Bech32ParseError::InvalidLength(32))
        ));
        assert!(Address::try_from(&[0u8; 19][..]).is_err());
    }

    #[test]
    fn test_hash_keeps_trailing_bytes() {
        let mut hash = [0u8; 32];
        hash[12..].copy_from_slice(&[9; ADDRESS_LEN]);
        assert_eq!(Address::from(hash), Address::new([9; ADDRESS_LEN]));
    }

    #[test]
    fn test_serde_json_uses_bech32() {
        let address = Address::new([3; ADDRESS_LEN]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
    }
}
