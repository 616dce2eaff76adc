// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Round timer and admission gate.
//!
//! Nothing here runs on its own. Expiry is evaluated lazily against the `now`
//! supplied by the caller. The deadline only gates distribution: a participant
//! who has not paid yet may still contribute after it passed, as long as the
//! round has not been distributed.

use serde::{Deserialize, Serialize};

use super::Committee;
use crate::data::basics::{Address, Round, Timestamp};
use crate::data::errors::{PermissionError, Result, StateError};

/// Timing state of the current round at some instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    pub round: Round,
    pub deadline: Timestamp,
    pub time_remaining: u64,
    pub all_paid: bool,
    pub can_distribute: bool,
}

impl Committee {
    /// Instant from which the current round may be distributed.
    pub fn round_deadline(&self) -> Timestamp {
        self.round_start_time.saturating_add(self.round_duration)
    }

    /// Seconds until the current round may be distributed, zero once the deadline passed.
    pub fn time_remaining(&self, now: Timestamp) -> u64 {
        now.until(self.round_deadline())
    }

    pub fn is_round_elapsed(&self, now: Timestamp) -> bool {
        self.time_remaining(now) == 0
    }

    /// Returns true iff `distribute_pot` would pass its state checks at `now`.
    pub fn can_distribute(&self, now: Timestamp) -> bool {
        self.check_distributable(now).is_ok()
    }

    /// Returns true iff `caller` may contribute to the current round.
    pub fn can_contribute(&self, caller: &Address) -> bool {
        self.admit(caller).is_ok()
    }

    pub fn timer(&self, now: Timestamp) -> RoundTimer {
        RoundTimer {
            round: self.current_round,
            deadline: self.round_deadline(),
            time_remaining: self.time_remaining(now),
            all_paid: self.all_participants_paid(),
            can_distribute: self.can_distribute(now),
        }
    }

    /// Admits `caller` to the current round, returning the round it pays for.
    pub(super) fn admit(&self, caller: &Address) -> Result<Round> {
        if self.is_completed() {
            return Err(StateError::AlreadyCompleted.into());
        }
        if !self.is_participant(caller) {
            return Err(PermissionError::NotParticipant(*caller).into());
        }
        let round = self.current_round;
        if self.has_paid(round, caller) {
            return Err(StateError::AlreadyPaidThisRound {
                participant: *caller,
                round,
            }
            .into());
        }
        Ok(round)
    }

    pub(super) fn check_distributable(&self, now: Timestamp) -> Result<()> {
        if self.is_completed() {
            return Err(StateError::AlreadyCompleted.into());
        }
        let round = self.current_round;
        if !self.all_paid_in(round) {
            return Err(StateError::NotAllPaid {
                round,
                paid: self.paid_count(round),
                total: self.participants_count(),
            }
            .into());
        }
        let remaining = self.time_remaining(now);
        if remaining > 0 {
            return Err(StateError::RoundNotElapsed { round, remaining }.into());
        }
        Ok(())
    }
}
