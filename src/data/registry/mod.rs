// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Committee factory.
//!
//! Committees live in an append-only arena in creation order. They are looked
//! up by their custody address and additionally indexed by creator. Committees
//! are never removed, completed ones stay queryable.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{self, ConfigError};
use crate::data::basics::{Address, Round, TokenAmount, Timestamp};
use crate::data::committee::{Committee, Terms};
use crate::data::errors::{Error, ParticipantsError, Result, ValidationError};
use crate::data::events::Event;
use crate::token::TokenLedger;

/// Smallest group a committee can rotate among.
pub const MIN_PARTICIPANTS: usize = 2;

/// Domain tag for deriving committee addresses.
const COMMITTEE_ADDRESS_TAG: &str = "qameti/committee";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    address: Address,
    token: Address,
    admin: Address,
    params: config::Params,

    committees: Vec<Committee>,
    /// Committee address to arena position.
    index: BTreeMap<Address, usize>,
    by_creator: BTreeMap<Address, Vec<usize>>,

    events: Vec<Event>,
}

impl Registry {
    /// Creates an empty registry for `token` whose fees go to `admin`.
    ///
    /// Neither may be the zero address, since no transfer can reach it.
    pub fn new(
        address: Address,
        token: Address,
        admin: Address,
        params: config::Params,
    ) -> std::result::Result<Self, ConfigError> {
        params.validate()?;
        if admin.is_zero() {
            return Err(ConfigError::ZeroAddress("admin"));
        }
        if token.is_zero() {
            return Err(ConfigError::ZeroAddress("token"));
        }
        Ok(Self {
            address,
            token,
            admin,
            params,
            committees: Vec::new(),
            index: BTreeMap::new(),
            by_creator: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// The token every committee of this registry uses.
    pub fn token(&self) -> Address {
        self.token
    }

    pub fn admin(&self) -> Address {
        self.admin
    }

    pub fn params(&self) -> &config::Params {
        &self.params
    }

    /// Checks creation parameters against the registry's limits.
    ///
    /// Returns the pot every round of such a committee would hold.
    pub fn validate_terms(
        &self,
        terms: &Terms,
    ) -> std::result::Result<TokenAmount, ValidationError> {
        let n = terms.participants.len();
        if n < MIN_PARTICIPANTS {
            return Err(ParticipantsError::TooFew(n, MIN_PARTICIPANTS).into());
        }
        if n > self.params.max_participants {
            return Err(ParticipantsError::TooMany(n, self.params.max_participants).into());
        }

        let mut seen = BTreeSet::new();
        for (i, p) in terms.participants.iter().enumerate() {
            if p.is_zero() {
                return Err(ParticipantsError::ZeroAddress(i).into());
            }
            if !seen.insert(*p) {
                return Err(ParticipantsError::Duplicate(*p).into());
            }
        }

        if terms.amount_per_round.is_zero() {
            return Err(ValidationError::InvalidAmount);
        }
        let pot = terms
            .amount_per_round
            .checked_mul(n as u64)
            .filter(|pot| pot.basis_points(self.params.fee_bps).is_some())
            .ok_or(ValidationError::InvalidAmount)?;

        if terms.round_duration == 0 {
            return Err(ValidationError::InvalidDuration);
        }
        Ok(pot)
    }

    /// Creates a committee whose first round starts at `now`, and returns its address.
    ///
    /// `participants` is the rotation order. Nothing is recorded if validation fails.
    pub fn create_committee(
        &mut self,
        creator: &Address,
        participants: Vec<Address>,
        amount_per_round: TokenAmount,
        round_duration: u64,
        now: Timestamp,
    ) -> Result<Address> {
        let terms = Terms {
            participants,
            amount_per_round,
            round_duration,
        };
        if let Err(err) = self.validate_terms(&terms) {
            warn!(
                "registry {}: rejected committee by {}: {}",
                self.address, creator, err
            );
            return Err(err.into());
        }

        let position = self.committees.len();
        let address = Address::derive(
            COMMITTEE_ADDRESS_TAG,
            &[&self.address.0[..], &(position as u64).to_be_bytes()[..]],
        );

        let event = Event::CommitteeCreated {
            committee: address,
            creator: *creator,
            participants: terms.participants.clone(),
            amount_per_round: terms.amount_per_round,
            round_duration: terms.round_duration,
        };
        let committee = Committee::new(
            address,
            self.token,
            self.admin,
            *creator,
            terms,
            self.params.fee_bps,
            now,
        );

        info!(
            "registry {}: {} created committee {} ({} participants, {} per round, {}s rounds)",
            self.address,
            creator,
            address,
            committee.participants_count(),
            committee.amount_per_round(),
            committee.round_duration()
        );

        self.committees.push(committee);
        self.index.insert(address, position);
        self.by_creator.entry(*creator).or_default().push(position);
        self.events.push(event);
        Ok(address)
    }

    /// Addresses of all committees in creation order.
    pub fn all_committees(&self) -> Vec<Address> {
        self.committees.iter().map(|c| c.address()).collect()
    }

    /// Addresses of the committees created by `creator`, in creation order.
    pub fn committees_by_creator(&self, creator: &Address) -> Vec<Address> {
        self.by_creator
            .get(creator)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&i| self.committees[i].address())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn committees_count(&self) -> usize {
        self.committees.len()
    }

    /// Address of the `index`-th committee ever created.
    pub fn committee_at(&self, index: usize) -> Option<Address> {
        self.committees.get(index).map(|c| c.address())
    }

    /// Address of the `index`-th committee created by `creator`.
    pub fn creator_committee_at(&self, creator: &Address, index: usize) -> Option<Address> {
        self.by_creator
            .get(creator)
            .and_then(|positions| positions.get(index))
            .map(|&i| self.committees[i].address())
    }

    pub fn committee(&self, address: &Address) -> Result<&Committee> {
        self.index
            .get(address)
            .map(|&i| &self.committees[i])
            .ok_or(Error::UnknownCommittee(*address))
    }

    fn committee_mut(&mut self, address: &Address) -> Result<&mut Committee> {
        match self.index.get(address) {
            Some(&i) => Ok(&mut self.committees[i]),
            None => Err(Error::UnknownCommittee(*address)),
        }
    }

    /// Contributes `caller`'s share of the current round of `committee`.
    pub fn contribute<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        committee: &Address,
        caller: &Address,
    ) -> Result<Event> {
        let event = self.committee_mut(committee)?.contribute(ledger, caller)?;
        self.events.push(event.clone());
        Ok(event)
    }

    /// Distributes the current round of `committee`.
    pub fn distribute_pot<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        committee: &Address,
        now: Timestamp,
    ) -> Result<Vec<Event>> {
        let events = self.committee_mut(committee)?.distribute_pot(ledger, now)?;
        self.events.extend(events.iter().cloned());
        Ok(events)
    }

    /// Whether `participant` paid in `round` of `committee`.
    pub fn has_paid(
        &self,
        committee: &Address,
        round: Round,
        participant: &Address,
    ) -> Result<bool> {
        Ok(self.committee(committee)?.has_paid(round, participant))
    }

    /// Every event recorded so far, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events of a single committee, oldest first.
    pub fn events_for(&self, committee: &Address) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.committee() == *committee)
            .collect()
    }
}
