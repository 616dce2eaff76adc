// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use tracing::{info, warn};

use super::Committee;
use crate::data::basics::{TokenAmount, Timestamp};
use crate::data::errors::Result;
use crate::data::events::Event;
use crate::token::{TokenLedger, TransferError};

impl Committee {
    /// Splits a pot into the admin fee and the winner's payout.
    pub fn split_pot(&self, pot: TokenAmount) -> Option<(TokenAmount, TokenAmount)> {
        let fee = pot.basis_points(self.fee_bps)?;
        let payout = pot.checked_sub(fee)?;
        Some((fee, payout))
    }

    /// Pays out the current round and advances to the next one.
    ///
    /// Anyone may call this once every participant paid and the round's
    /// duration elapsed. The winner is flagged and the round advanced before any
    /// transfer is made; the fee and payout transfers are applied together or not
    /// at all. On error the committee and the ledger are left unchanged.
    pub fn distribute_pot<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        now: Timestamp,
    ) -> Result<Vec<Event>> {
        self.check_token(ledger)?;
        if let Err(err) = self.check_distributable(now) {
            warn!("committee {}: rejected distribution: {}", self.address, err);
            return Err(err);
        }

        let round = self.current_round;
        let start_time = self.round_start_time;
        let winner = self.current_winner();
        let pot = self
            .amount_per_round
            .checked_mul(self.total_rounds())
            .ok_or(TransferError::Overflow)?;
        let (fee, payout) = self.split_pot(pot).ok_or(TransferError::Overflow)?;

        // Effects before transfers.
        let first_payout = self.payout_received.insert(winner);
        debug_assert!(first_payout, "{} won twice", winner);
        self.current_round = round.next();
        self.round_start_time = now;

        let custody = self.address;
        let admin = self.admin;
        let res = ledger.atomic(|l| {
            if !fee.is_zero() {
                l.transfer(&custody, &admin, fee)?;
            }
            l.transfer(&custody, &winner, payout)
        });
        if let Err(err) = res {
            if first_payout {
                self.payout_received.remove(&winner);
            }
            self.current_round = round;
            self.round_start_time = start_time;
            warn!("committee {}: distribution of round {} failed: {}", custody, round, err);
            return Err(err.into());
        }

        info!(
            "committee {}: round {} paid {} to {} (fee {})",
            custody, round, payout, winner, fee
        );

        let mut events = vec![Event::PotDistributed {
            committee: custody,
            round,
            winner,
            amount: payout,
            fee,
        }];
        if self.is_completed() {
            info!("committee {}: all {} rounds distributed", custody, self.total_rounds());
        } else {
            events.push(Event::RoundAdvanced {
                committee: custody,
                new_round: self.current_round,
                start_time: now,
            });
        }
        Ok(events)
    }
}
