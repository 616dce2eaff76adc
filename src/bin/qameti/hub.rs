// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::debug;

use qameti::config::{ConfigError, Local};
use qameti::data::basics::{Timestamp, TokenAmount, UnitsError};
use qameti::data::errors;
use qameti::data::registry::Registry;
use qameti::data::store::{Store, StoreError};
use qameti::token::{InMemoryLedger, TransferError};

const DB_DIR: &str = "db";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Committee(#[from] errors::Error),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("invalid amount {0:?}: {1}")]
    Amount(String, UnitsError),
    #[error("no registry in {0}, run `qameti init` first")]
    NotInitialized(String),
    #[error("{0} already holds a registry")]
    AlreadyInitialized(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// The data directory a command runs against.
pub struct Hub {
    datadir: PathBuf,
    local: Local,
    now: Option<u64>,
}

/// A loaded registry and ledger; changes are only kept after `commit`.
pub struct Session {
    store: Store,
    pub registry: Registry,
    pub ledger: InMemoryLedger,
}

impl Hub {
    pub fn new(datadir: PathBuf, local: Local, now: Option<u64>) -> Self {
        Self { datadir, local, now }
    }

    pub fn datadir(&self) -> &Path {
        &self.datadir
    }

    pub fn local(&self) -> &Local {
        &self.local
    }

    /// The `--now` override, or the system clock.
    pub fn now(&self) -> Timestamp {
        let secs = self.now.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        });
        Timestamp(secs)
    }

    pub fn open_store(&self) -> Result<Store> {
        fs::create_dir_all(&self.datadir)?;
        let path = self.datadir.join(DB_DIR);
        debug!("opening database at {}", path.display());
        Ok(Store::open(&path)?)
    }

    pub fn open(&self) -> Result<Session> {
        let store = self.open_store()?;
        match store.load()? {
            Some((registry, ledger)) => Ok(Session {
                store,
                registry,
                ledger,
            }),
            None => Err(CliError::NotInitialized(
                self.datadir.display().to_string(),
            )),
        }
    }
}

impl Session {
    pub fn new(store: Store, registry: Registry, ledger: InMemoryLedger) -> Self {
        Self {
            store,
            registry,
            ledger,
        }
    }

    pub fn commit(&self) -> Result<()> {
        self.store.save(&self.registry, &self.ledger)?;
        Ok(())
    }
}

/// Parses a whole-token amount such as `100` or `2.5`.
pub fn parse_amount(s: &str) -> Result<TokenAmount> {
    TokenAmount::parse_units(s).map_err(|e| CliError::Amount(s.to_owned(), e))
}
