// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use clap::Parser;
use tracing::info;

use qameti::data::basics::Address;

use crate::hub::{parse_amount, Hub, Result};

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct CreateCmd {
    /// Creator of the committee
    #[clap(short, long)]
    from: Address,
    /// Comma-separated payout order
    #[clap(short, long, required = true, use_value_delimiter = true)]
    participants: Vec<Address>,
    /// Contribution per participant and round, in whole tokens
    #[clap(short, long)]
    amount: String,
    /// Round length in seconds
    #[clap(long)]
    duration: u64,
}

impl CreateCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let amount = parse_amount(&self.amount)?;
        let now = hub.now();
        let mut s = hub.open()?;
        let address = s.registry.create_committee(
            &self.from,
            self.participants.clone(),
            amount,
            self.duration,
            now,
        )?;
        s.commit()?;

        let c = s.registry.committee(&address)?;
        println!("Committee: {}", address);
        println!(
            "{} rounds of {}s, pot {} per round",
            c.total_rounds(),
            c.round_duration(),
            c.pot()
        );
        println!("Each participant must approve {} for {}", address, amount);
        Ok(())
    }
}

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct ContributeCmd {
    #[clap(short, long)]
    from: Address,
    #[clap(short, long)]
    committee: Address,
}

impl ContributeCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let mut s = hub.open()?;
        let event = s
            .registry
            .contribute(&mut s.ledger, &self.committee, &self.from)?;
        s.commit()?;
        println!("{}", event);
        Ok(())
    }
}

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct DistributeCmd {
    /// Account triggering the distribution; anyone may
    #[clap(short, long)]
    from: Address,
    #[clap(short, long)]
    committee: Address,
}

impl DistributeCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let now = hub.now();
        let mut s = hub.open()?;
        info!("{} distributes committee {}", self.from, self.committee);
        let events = s
            .registry
            .distribute_pot(&mut s.ledger, &self.committee, now)?;
        s.commit()?;
        for event in events {
            println!("{}", event);
        }
        Ok(())
    }
}
