// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::basics::{Address, Round, TokenAmount, Timestamp};

/// Records emitted by the registry and its committees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    CommitteeCreated {
        committee: Address,
        creator: Address,
        participants: Vec<Address>,
        amount_per_round: TokenAmount,
        round_duration: u64,
    },
    Contribution {
        committee: Address,
        participant: Address,
        round: Round,
        amount: TokenAmount,
    },
    PotDistributed {
        committee: Address,
        round: Round,
        winner: Address,
        amount: TokenAmount,
        fee: TokenAmount,
    },
    RoundAdvanced {
        committee: Address,
        new_round: Round,
        start_time: Timestamp,
    },
}

impl Event {
    /// The committee this event is about.
    pub fn committee(&self) -> Address {
        match self {
            Event::CommitteeCreated { committee, .. }
            | Event::Contribution { committee, .. }
            | Event::PotDistributed { committee, .. }
            | Event::RoundAdvanced { committee, .. } => *committee,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CommitteeCreated {
                committee,
                creator,
                participants,
                amount_per_round,
                round_duration,
            } => write!(
                f,
                "CommitteeCreated {} by {}: {} participants, {} per round, {}s rounds",
                committee,
                creator,
                participants.len(),
                amount_per_round,
                round_duration
            ),
            Event::Contribution {
                committee,
                participant,
                round,
                amount,
            } => write!(
                f,
                "Contribution {}: {} paid {} in round {}",
                committee, participant, amount, round
            ),
            Event::PotDistributed {
                committee,
                round,
                winner,
                amount,
                fee,
            } => write!(
                f,
                "PotDistributed {}: round {} paid {} to {} (fee {})",
                committee, round, amount, winner, fee
            ),
            Event::RoundAdvanced {
                committee,
                new_round,
                start_time,
            } => write!(
                f,
                "RoundAdvanced {}: round {} started at {}",
                committee, new_round, start_time
            ),
        }
    }
}
