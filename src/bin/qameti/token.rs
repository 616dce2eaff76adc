// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use clap::Parser;

use qameti::data::basics::Address;
use qameti::token::TokenLedger;

use crate::hub::{parse_amount, Hub, Result};

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct FaucetCmd {
    /// Account receiving the tokens
    #[clap(short, long)]
    from: Address,
}

impl FaucetCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let mut s = hub.open()?;
        let amount = s.ledger.faucet(&self.from)?;
        s.commit()?;
        println!("Minted {} to {}", amount, self.from);
        println!("Balance: {}", s.ledger.balance_of(&self.from));
        Ok(())
    }
}

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct ApproveCmd {
    /// Owner of the tokens
    #[clap(short, long)]
    from: Address,
    /// Account allowed to spend them, usually a committee
    #[clap(short, long)]
    spender: Address,
    /// Allowance in whole tokens, e.g. 2.5
    #[clap(short, long)]
    amount: String,
}

impl ApproveCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let amount = parse_amount(&self.amount)?;
        let mut s = hub.open()?;
        s.ledger.approve(&self.from, &self.spender, amount)?;
        s.commit()?;
        println!("{} may spend {} of {}", self.spender, amount, self.from);
        Ok(())
    }
}

/// Show token details and an account's balance
#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct BalanceCmd {
    #[clap(short, long)]
    account: Address,
}

impl BalanceCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let s = hub.open()?;
        let l = &s.ledger;
        println!("Token: {} ({}, {} decimals)", l.name(), l.symbol(), l.decimals());
        println!("Total supply: {}", l.total_supply());
        println!("Balance of {}: {}", self.account, l.balance_of(&self.account));
        Ok(())
    }
}
