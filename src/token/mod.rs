// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! Capability boundary through which committees move funds.
//!
//! Committees never touch token bookkeeping directly. Every balance change goes
//! through a `TokenLedger`, so the engine runs unchanged against the in-memory
//! ledger in `memory` or any other implementation of the trait.

pub mod memory;

use thiserror::Error;

use crate::data::basics::{Address, TokenAmount};

pub use memory::InMemoryLedger;

/// Failures reported by the token layer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("transfer involves the zero address")]
    ZeroAddress,
    #[error("account {account} holds {balance}, needs {needed}")]
    InsufficientBalance {
        account: Address,
        balance: TokenAmount,
        needed: TokenAmount,
    },
    #[error("{spender} may spend {allowance} of {owner}, needs {needed}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        allowance: TokenAmount,
        needed: TokenAmount,
    },
    #[error("balance arithmetic overflowed")]
    Overflow,
    #[error("ledger is token {got}, expected {expected}")]
    WrongToken { expected: Address, got: Address },
    #[error("ledger rejected the transfer: {0}")]
    Rejected(String),
}

/// A fungible token ledger.
///
/// The caller of every mutating method is passed explicitly: `from` for
/// `transfer`, `owner` for `approve` and `spender` for `transfer_from`.
pub trait TokenLedger {
    /// Address identifying this token.
    fn token(&self) -> Address;

    fn balance_of(&self, account: &Address) -> TokenAmount;

    fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount;

    /// Lets `spender` withdraw up to `amount` from `owner`, replacing any previous allowance.
    fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError>;

    /// Moves `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming allowance.
    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError>;

    /// Runs `f` so that either every transfer it makes is applied or none is.
    fn atomic<T, F>(&mut self, f: F) -> Result<T, TransferError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, TransferError>;
}
