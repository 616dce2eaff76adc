// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use clap::Parser;

use qameti::data::basics::Address;

use crate::hub::{Hub, Result};

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct InfoCmd {
    #[clap(short, long)]
    committee: Address,
}

impl InfoCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let now = hub.now();
        let s = hub.open()?;
        let c = s.registry.committee(&self.committee)?;
        let info = c.info();
        let timer = c.timer(now);

        println!("Committee: {}", c.address());
        println!("Status: {}", c.status());
        println!("Creator: {}", c.creator());
        println!("Round: {} of {}", info.current_round, info.total_rounds);
        println!("Amount per round: {}", info.amount_per_round);
        println!("Round started: {}", info.round_start_time);
        println!("Deadline: {} ({}s left)", timer.deadline, timer.time_remaining);
        if !c.is_completed() {
            println!("Current winner: {}", c.current_winner());
        }
        println!("Participants:");
        for p in c.participants() {
            println!(
                "  {} paid: {:5} payout received: {}",
                p,
                c.has_paid(info.current_round, p),
                c.has_received_payout(p)
            );
        }
        println!("Ready to distribute: {}", timer.can_distribute);
        Ok(())
    }
}

#[derive(Parser)]
pub struct ListCmd {
    /// Only list committees created by this account
    #[clap(short, long)]
    creator: Option<Address>,
}

impl ListCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let s = hub.open()?;
        let committees = match &self.creator {
            Some(creator) => s.registry.committees_by_creator(creator),
            None => s.registry.all_committees(),
        };
        for address in committees {
            let c = s.registry.committee(&address)?;
            println!("{} {} ({} participants)", address, c.status(), c.participants_count());
        }
        Ok(())
    }
}

#[derive(Parser)]
pub struct EventsCmd {
    /// Only print events of this committee
    #[clap(short, long)]
    committee: Option<Address>,
}

impl EventsCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let s = hub.open()?;
        let events = match &self.committee {
            Some(c) => s.registry.events_for(c),
            None => s.registry.events().iter().collect(),
        };
        for event in events {
            println!("{}", event);
        }
        Ok(())
    }
}
