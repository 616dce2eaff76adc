// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Per-group ROSCA ledger.
//!
//! A committee collects `amount_per_round` from each of its N participants every
//! round and pays the pot, minus the admin fee, to one participant in a rotation
//! fixed at creation. After N distributions every participant was paid exactly
//! once and the committee is completed.

mod contribution;
mod payout;
pub mod timer;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::basics::{Address, Round, TokenAmount, Timestamp};
use crate::data::errors::Result;
use crate::token::{TokenLedger, TransferError};

pub use timer::RoundTimer;

/// Lifecycle state of a committee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Collecting contributions for the given round.
    Active(Round),
    /// Every round has been distributed.
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active(round) => write!(f, "Active (round {})", round),
            Status::Completed => write!(f, "Completed"),
        }
    }
}

/// Summary of a committee's progress, as shown to participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeInfo {
    pub current_round: Round,
    pub total_rounds: u64,
    pub amount_per_round: TokenAmount,
    pub round_duration: u64,
    pub round_start_time: Timestamp,
    pub all_paid: bool,
}

/// Creation parameters of a committee, as submitted to the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terms {
    /// Rotation order: `participants[i]` receives the pot of round `i + 1`.
    pub participants: Vec<Address>,
    pub amount_per_round: TokenAmount,
    /// Length of a round in seconds.
    pub round_duration: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    /// Custody account holding the contributions of the current round.
    address: Address,
    token: Address,
    /// Receives the fee of every distribution.
    admin: Address,
    creator: Address,

    participants: Vec<Address>,
    amount_per_round: TokenAmount,
    round_duration: u64,
    fee_bps: u32,

    /// In `1..=participants.len() + 1`; the last value means completed.
    current_round: Round,
    round_start_time: Timestamp,

    /// Who paid in which round. A round's entry is only ever added to.
    paid: BTreeMap<Round, BTreeSet<Address>>,
    payout_received: BTreeSet<Address>,
}

impl Committee {
    /// Creates a committee in its first round. The terms must already be validated.
    pub(crate) fn new(
        address: Address,
        token: Address,
        admin: Address,
        creator: Address,
        terms: Terms,
        fee_bps: u32,
        now: Timestamp,
    ) -> Self {
        Self {
            address,
            token,
            admin,
            creator,
            participants: terms.participants,
            amount_per_round: terms.amount_per_round,
            round_duration: terms.round_duration,
            fee_bps,
            current_round: Round::FIRST,
            round_start_time: now,
            paid: BTreeMap::new(),
            payout_received: BTreeSet::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The token this committee collects and pays out.
    pub fn token(&self) -> Address {
        self.token
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn creator(&self) -> Address {
        self.creator
    }

    pub fn participants(&self) -> &[Address] {
        &self.participants
    }

    pub fn participants_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_participant(&self, account: &Address) -> bool {
        self.participants.contains(account)
    }

    pub fn amount_per_round(&self) -> TokenAmount {
        self.amount_per_round
    }

    pub fn round_duration(&self) -> u64 {
        self.round_duration
    }

    /// Share of each pot retained as fee, in basis points.
    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    pub fn current_round(&self) -> Round {
        self.current_round
    }

    /// One round per participant.
    pub fn total_rounds(&self) -> u64 {
        self.participants.len() as u64
    }

    pub fn round_start_time(&self) -> Timestamp {
        self.round_start_time
    }

    pub fn status(&self) -> Status {
        if self.is_completed() {
            Status::Completed
        } else {
            Status::Active(self.current_round)
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_round.0 > self.total_rounds()
    }

    pub fn has_paid(&self, round: Round, participant: &Address) -> bool {
        self.paid
            .get(&round)
            .map_or(false, |payers| payers.contains(participant))
    }

    pub fn has_received_payout(&self, participant: &Address) -> bool {
        self.payout_received.contains(participant)
    }

    /// Number of participants that paid in `round`.
    pub fn paid_count(&self, round: Round) -> usize {
        self.paid.get(&round).map_or(0, |payers| payers.len())
    }

    /// Returns true iff every participant paid in `round`.
    pub fn all_paid_in(&self, round: Round) -> bool {
        self.participants.iter().all(|p| self.has_paid(round, p))
    }

    /// Returns true iff every participant paid in the current round.
    pub fn all_participants_paid(&self) -> bool {
        self.all_paid_in(self.current_round)
    }

    /// The participant receiving the pot of the current round.
    ///
    /// This only depends on the round and the rotation order, never on who paid.
    pub fn current_winner(&self) -> Address {
        self.winner_of(self.current_round)
    }

    /// The participant receiving the pot of `round`, i.e. `participants[(round - 1) mod N]`.
    pub fn winner_of(&self, round: Round) -> Address {
        self.participants[round.rotation_index(self.participants.len())]
    }

    /// Sum of all contributions of one round.
    pub fn pot(&self) -> TokenAmount {
        TokenAmount(
            self.amount_per_round
                .0
                .saturating_mul(self.participants.len() as u128),
        )
    }

    pub fn info(&self) -> CommitteeInfo {
        CommitteeInfo {
            current_round: self.current_round,
            total_rounds: self.total_rounds(),
            amount_per_round: self.amount_per_round,
            round_duration: self.round_duration,
            round_start_time: self.round_start_time,
            all_paid: self.all_participants_paid(),
        }
    }

    /// Rejects ledgers of a different token than the one this committee was created for.
    fn check_token<L: TokenLedger>(&self, ledger: &L) -> Result<()> {
        let got = ledger.token();
        if got != self.token {
            return Err(TransferError::WrongToken {
                expected: self.token,
                got,
            }
            .into());
        }
        Ok(())
    }
}
