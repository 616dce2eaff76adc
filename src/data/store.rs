// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Persistent snapshots of a registry and its token ledger.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::data::registry::Registry;
use crate::protocol;
use crate::token::InMemoryLedger;

const REGISTRY_KEY: &str = "registry";
const LEDGER_KEY: &str = "ledger";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access storage")]
    StorageError(#[from] sled::Error),
    #[error("failed to encode data type")]
    EncodeError(#[from] rmp_serde::encode::Error),
    #[error("failed to decode data type")]
    DecodeError(#[from] rmp_serde::decode::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// A sled database holding one registry and one ledger.
pub struct Store {
    db: sled::Db,
}

impl Store {
    pub fn open(path: &impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Opens a store that is deleted when dropped.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    /// Returns true iff nothing has been saved yet.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(!self.db.contains_key(REGISTRY_KEY)?)
    }

    /// Atomically replaces the stored registry and ledger.
    pub fn save(&self, registry: &Registry, ledger: &InMemoryLedger) -> Result<()> {
        let mut batch = sled::Batch::default();
        batch.insert(REGISTRY_KEY, protocol::encode(registry)?);
        batch.insert(LEDGER_KEY, protocol::encode(ledger)?);
        self.db.apply_batch(batch)?;
        self.db.flush()?;
        debug!(
            "saved registry {} with {} committees",
            registry.address(),
            registry.committees_count()
        );
        Ok(())
    }

    /// Restores the registry and ledger, if any were saved.
    pub fn load(&self) -> Result<Option<(Registry, InMemoryLedger)>> {
        let registry = self.get::<Registry>(REGISTRY_KEY)?;
        let ledger = self.get::<InMemoryLedger>(LEDGER_KEY)?;
        match (registry, ledger) {
            (Some(r), Some(l)) => Ok(Some((r, l))),
            _ => Ok(None),
        }
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.db.get(key)? {
            Some(raw) => Ok(Some(protocol::decode(&raw)?)),
            None => Ok(None),
        }
    }
}
