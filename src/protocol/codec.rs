// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! MessagePack encoding of persisted records.
//!
//! Structs are written as maps keyed by field name, so records stay readable
//! after fields are added.

use serde::{de::DeserializeOwned, Serialize};

pub fn encode(x: &impl Serialize) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    rmp_serde::to_vec_named(x)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, rmp_serde::decode::Error> {
    rmp_serde::from_slice::<T>(bytes)
}
