// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use tracing::{info, warn};

use super::Committee;
use crate::data::basics::{Address, Round};
use crate::data::errors::Result;
use crate::data::events::Event;
use crate::token::TokenLedger;

impl Committee {
    /// Pays `caller`'s contribution for the current round into the committee's custody.
    ///
    /// The caller must have approved the committee's address for at least
    /// `amount_per_round`. On any error nothing changes, neither here nor on the ledger.
    pub fn contribute<L: TokenLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
    ) -> Result<Event> {
        self.check_token(ledger)?;
        let round = match self.admit(caller) {
            Ok(round) => round,
            Err(err) => {
                warn!(
                    "committee {}: rejected contribution of {}: {}",
                    self.address, caller, err
                );
                return Err(err);
            }
        };

        // The payment is recorded before the ledger is called.
        self.paid.entry(round).or_default().insert(*caller);

        let custody = self.address;
        let amount = self.amount_per_round;
        if let Err(err) = ledger.transfer_from(&custody, caller, &custody, amount) {
            self.unmark_paid(round, caller);
            warn!("committee {}: contribution of {} failed: {}", custody, caller, err);
            return Err(err.into());
        }

        info!(
            "committee {}: {} contributed {} in round {} ({}/{} paid)",
            custody,
            caller,
            amount,
            round,
            self.paid_count(round),
            self.participants_count()
        );

        Ok(Event::Contribution {
            committee: custody,
            participant: *caller,
            round,
            amount,
        })
    }

    fn unmark_paid(&mut self, round: Round, caller: &Address) {
        if let Some(payers) = self.paid.get_mut(&round) {
            payers.remove(caller);
            if payers.is_empty() {
                self.paid.remove(&round);
            }
        }
    }
}
