// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::data::basics::TokenAmount;
use crate::data::registry::MIN_PARTICIPANTS;

/// Basis points in a whole.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Specifies the protocol-wide settings a registry is created with.
///
/// A committee copies the fee rate at creation, so changing these later
/// only affects committees created afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Upper bound on the number of participants of a single committee.
    /// Each participant adds one round and one contribution per round,
    /// so this bounds the work a committee can ever cause.
    pub max_participants: usize,

    /// Share of every pot paid to the registry admin, in basis points.
    /// 500 takes 5% of each pot.
    pub fee_bps: u32,

    /// Amount minted by a single faucet request on test ledgers.
    pub faucet_amount: TokenAmount,
}

lazy_static! {
    pub static ref DEFAULT_PARAMS: Params = Params {
        max_participants: 50,
        fee_bps: 500,
        faucet_amount: TokenAmount::tokens(10_000),
    };
}

impl Default for Params {
    fn default() -> Self {
        DEFAULT_PARAMS.clone()
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        if self.fee_bps > BPS_DENOMINATOR {
            return Err(ConfigError::FeeTooHigh(self.fee_bps));
        }
        if self.max_participants < MIN_PARTICIPANTS {
            return Err(ConfigError::MaxParticipantsTooLow(
                self.max_participants,
                MIN_PARTICIPANTS,
            ));
        }
        Ok(())
    }
}
