// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Rotating savings committees over an ERC-20 style token.
//!
//! A [`data::registry::Registry`] creates committees and indexes them. Each
//! [`data::committee::Committee`] collects a fixed contribution from every
//! participant per round and pays the pot, minus the registry fee, to the
//! participant whose turn it is. Token movements go through a
//! [`token::TokenLedger`].

pub mod config;
pub mod data;
pub mod protocol;
pub mod token;
