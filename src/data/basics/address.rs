// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::str::FromStr;

use data_encoding::HEXLOWER_PERMISSIVE;
use rand::{thread_rng, RngCore};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha512Trunc256};
use thiserror::Error;

/// Number of bytes in an account identity.
pub const ADDRESS_LEN: usize = 20;

const HEX_PREFIX: &str = "0x";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is missing the 0x prefix")]
    MissingPrefix,
    #[error("address is not valid hex")]
    InvalidHex,
    #[error("address has {0} bytes, expected {}", ADDRESS_LEN)]
    WrongLength(usize),
}

/// An account identity on the token ledger.
///
/// Participants, committees, the registry and the admin are all addressed this way.
/// The all-zero address is reserved and never a valid participant.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The reserved all-zero address.
    pub const ZERO: Address = Address([0; ADDRESS_LEN]);

    /// Checks if an address is the zero value.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Deterministically derives an address from a domain tag and a list of inputs.
    ///
    /// The address is the first 20 bytes of SHA-512/256 over the tag followed by every input.
    pub fn derive(tag: &str, inputs: &[&[u8]]) -> Self {
        let mut hasher = Sha512Trunc256::new();
        hasher.update(tag.as_bytes());
        for input in inputs {
            hasher.update(input);
        }
        let digest = hasher.finalize();

        let mut addr = Address::ZERO;
        addr.0.copy_from_slice(&digest[..ADDRESS_LEN]);
        addr
    }

    /// Generates a fresh address from the thread-local RNG.
    pub fn random() -> Self {
        let mut addr = Address::ZERO;
        while addr.is_zero() {
            thread_rng().fill_bytes(&mut addr.0);
        }
        addr
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Parses a `0x`-prefixed hex string, accepting either letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix(HEX_PREFIX).ok_or(AddressError::MissingPrefix)?;
        let decoded = HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|_| AddressError::InvalidHex)?;

        if decoded.len() != ADDRESS_LEN {
            return Err(AddressError::WrongLength(decoded.len()));
        }

        let mut addr = Address::ZERO;
        addr.0.copy_from_slice(&decoded);
        Ok(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEX_PREFIX)?;
        f.write_str(&HEXLOWER_PERMISSIVE.encode(&self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AddressVisitor;

        impl<'de> Visitor<'de> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 0x-prefixed hex address")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
                Address::from_str(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}
