// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use clap::Parser;
use tracing::info;

use qameti::config::CONFIG_FILENAME;
use qameti::data::basics::Address;
use qameti::data::registry::Registry;
use qameti::token::InMemoryLedger;

use crate::hub::{CliError, Hub, Result, Session};

#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct InitCmd {
    /// Account receiving the fee of every distribution
    #[clap(short, long)]
    admin: Address,
    /// Token address; a fresh one is generated if omitted
    #[clap(short, long)]
    token: Option<Address>,
}

impl InitCmd {
    pub fn entrypoint(&self, hub: &Hub) -> Result<()> {
        let store = hub.open_store()?;
        if !store.is_empty()? {
            return Err(CliError::AlreadyInitialized(
                hub.datadir().display().to_string(),
            ));
        }

        let params = hub.local().params.clone();
        let token = self.token.unwrap_or_else(Address::random);
        let ledger = InMemoryLedger::new(token, params.faucet_amount);
        let registry = Registry::new(Address::random(), token, self.admin, params)?;

        if !hub.datadir().join(CONFIG_FILENAME).exists() {
            hub.local().save_to_disk(&hub.datadir())?;
        }

        info!(
            "initialized registry {} for token {} in {}",
            registry.address(),
            token,
            hub.datadir().display()
        );
        println!("Registry: {}", registry.address());
        println!("Token: {} ({})", token, ledger.symbol());
        println!("Admin: {}", self.admin);

        Session::new(store, registry, ledger).commit()
    }
}
