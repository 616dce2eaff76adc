// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits of the token.
pub const DECIMALS: u32 = 18;

/// Ticker of the token amounts are displayed in.
pub const SYMBOL: &str = "mPKR";

/// Base units in one whole token.
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("amount is not a decimal number")]
    Malformed,
    #[error("amount has more than {} fractional digits", DECIMALS)]
    TooPrecise,
    #[error("amount does not fit into 128 bits")]
    Overflow,
}

/// Token quantity in base units (10^-18 of a whole token).
/// It is wrapped in a struct to nudge developers to use the checked arithmetic below.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TokenAmount(pub u128);

/// A committee round index. The first round of every committee is `Round(1)`.
#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Round(pub u64);

/// Seconds since the Unix epoch, as reported by the host.
#[derive(
    Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    /// Amount of `n` whole tokens.
    pub fn tokens(n: u64) -> Self {
        Self(u128::from(n) * UNITS_PER_TOKEN)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn checked_mul(self, n: u64) -> Option<Self> {
        self.0.checked_mul(u128::from(n)).map(Self)
    }

    /// Takes `bps` basis points of this amount, rounding down.
    pub fn basis_points(self, bps: u32) -> Option<Self> {
        self.0
            .checked_mul(u128::from(bps))
            .map(|x| Self(x / 10_000))
    }

    /// Parses a decimal token amount such as `"1000"` or `"0.25"` into base units.
    pub fn parse_units(s: &str) -> Result<Self, UnitsError> {
        let s = s.trim();
        let (whole, frac) = match s.find('.') {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(UnitsError::Malformed);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(UnitsError::Malformed);
        }
        if frac.len() > DECIMALS as usize {
            return Err(UnitsError::TooPrecise);
        }

        let whole = match whole {
            "" => 0,
            w => w.parse::<u128>().map_err(|_| UnitsError::Overflow)?,
        };
        let mut frac_units = 0u128;
        for (i, b) in frac.bytes().enumerate() {
            let digit = u128::from(b - b'0');
            frac_units += digit * 10u128.pow(DECIMALS - 1 - i as u32);
        }

        whole
            .checked_mul(UNITS_PER_TOKEN)
            .and_then(|w| w.checked_add(frac_units))
            .map(Self)
            .ok_or(UnitsError::Overflow)
    }

    /// Formats base units as a decimal token amount without trailing zeros.
    pub fn format_units(&self) -> String {
        let whole = self.0 / UNITS_PER_TOKEN;
        let frac = self.0 % UNITS_PER_TOKEN;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:018}", frac);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_units(), SYMBOL)
    }
}

impl Add for TokenAmount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

// 128-bit integers are carried as decimal strings of base units so that both
// JSON and MessagePack keep them exact.
impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        u128::from_str(&s).map(Self).map_err(de::Error::custom)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Round {
    /// The round every committee starts in.
    pub const FIRST: Round = Round(1);

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Zero-based position of this round in a rotation of length `n`.
    pub fn rotation_index(&self, n: usize) -> usize {
        (self.0.saturating_sub(1) % n as u64) as usize
    }
}

impl Add for Round {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Timestamp {
    /// Adds a number of seconds, saturating at the far end of time.
    pub fn saturating_add(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds from `self` until `later`, or zero if `later` is not after `self`.
    pub fn until(self, later: Self) -> u64 {
        later.0.saturating_sub(self.0)
    }
}
