// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TokenLedger, TransferError};
use crate::data::basics::{Address, TokenAmount, DECIMALS, SYMBOL};

pub const DEFAULT_NAME: &str = "Mock PKR";
pub const DEFAULT_SYMBOL: &str = SYMBOL;

/// Fully functioning in-memory token, with a faucet for test networks.
///
/// An allowance of `TokenAmount(u128::MAX)` never decreases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryLedger {
    address: Address,
    name: String,
    symbol: String,
    faucet_amount: TokenAmount,
    total_supply: TokenAmount,
    balances: BTreeMap<Address, TokenAmount>,
    allowances: BTreeMap<Address, BTreeMap<Address, TokenAmount>>,
}

impl InMemoryLedger {
    pub fn new(address: Address, faucet_amount: TokenAmount) -> Self {
        Self {
            address,
            name: DEFAULT_NAME.to_owned(),
            symbol: DEFAULT_SYMBOL.to_owned(),
            faucet_amount,
            total_supply: TokenAmount::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u32 {
        DECIMALS
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    /// Creates `amount` new tokens in the account `to`.
    pub fn mint(&mut self, to: &Address, amount: TokenAmount) -> Result<(), TransferError> {
        if to.is_zero() {
            return Err(TransferError::ZeroAddress);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        self.total_supply = supply;
        self.balances.insert(*to, balance);
        debug!("minted {} to {}", amount, to);
        Ok(())
    }

    /// Mints the fixed faucet amount to `caller` and returns it.
    pub fn faucet(&mut self, caller: &Address) -> Result<TokenAmount, TransferError> {
        let amount = self.faucet_amount;
        self.mint(caller, amount)?;
        Ok(amount)
    }

    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError> {
        if from.is_zero() || to.is_zero() {
            return Err(TransferError::ZeroAddress);
        }

        let balance = self.balance_of(from);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientBalance {
                account: *from,
                balance,
                needed: amount,
            })?;
        self.balances.insert(*from, remaining);

        // Cannot overflow: the total supply bounds every balance.
        let credited = self.balance_of(to) + amount;
        self.balances.insert(*to, credited);

        debug!("transferred {} from {} to {}", amount, from, to);
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn token(&self) -> Address {
        self.address
    }

    fn balance_of(&self, account: &Address) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> TokenAmount {
        self.allowances
            .get(owner)
            .and_then(|a| a.get(spender))
            .copied()
            .unwrap_or_default()
    }

    fn approve(
        &mut self,
        owner: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError> {
        if owner.is_zero() || spender.is_zero() {
            return Err(TransferError::ZeroAddress);
        }
        self.allowances
            .entry(*owner)
            .or_default()
            .insert(*spender, amount);
        debug!("{} approved {} to spend {}", owner, spender, amount);
        Ok(())
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), TransferError> {
        let allowance = self.allowance(from, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientAllowance {
                owner: *from,
                spender: *spender,
                allowance,
                needed: amount,
            })?;

        self.move_balance(from, to, amount)?;

        if allowance != TokenAmount(u128::MAX) {
            self.allowances
                .entry(*from)
                .or_default()
                .insert(*spender, remaining);
        }
        Ok(())
    }

    fn atomic<T, F>(&mut self, f: F) -> Result<T, TransferError>
    where
        F: FnOnce(&mut Self) -> Result<T, TransferError>,
    {
        let snapshot = self.clone();
        let res = f(self);
        if res.is_err() {
            *self = snapshot;
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (InMemoryLedger, Address, Address) {
        let mut ledger = InMemoryLedger::new(Address::random(), TokenAmount::tokens(10_000));
        let alice = Address::random();
        let bob = Address::random();
        ledger.faucet(&alice).unwrap();
        (ledger, alice, bob)
    }

    #[test]
    fn metadata() {
        let (ledger, _, _) = setup();
        assert_eq!(ledger.name(), "Mock PKR");
        assert_eq!(ledger.symbol(), "mPKR");
        // Amounts are displayed with the ledger's own ticker.
        let shown = TokenAmount::tokens(3).to_string();
        assert_eq!(shown, format!("3 {}", ledger.symbol()));
        assert_eq!(ledger.decimals(), 18);
    }

    #[test]
    fn faucet_mints_fixed_amount() {
        let (mut ledger, alice, bob) = setup();
        assert_eq!(ledger.balance_of(&alice), TokenAmount::tokens(10_000));
        assert_eq!(ledger.faucet(&bob), Ok(TokenAmount::tokens(10_000)));
        assert_eq!(ledger.total_supply(), TokenAmount::tokens(20_000));
        assert_eq!(ledger.faucet(&Address::ZERO), Err(TransferError::ZeroAddress));
    }

    #[test]
    fn transfer_moves_balance() {
        let (mut ledger, alice, bob) = setup();
        ledger
            .transfer(&alice, &bob, TokenAmount::tokens(1))
            .unwrap();
        assert_eq!(ledger.balance_of(&alice), TokenAmount::tokens(9_999));
        assert_eq!(ledger.balance_of(&bob), TokenAmount::tokens(1));
    }

    #[test]
    fn transfer_insufficient_balance() {
        let (mut ledger, alice, bob) = setup();
        let res = ledger.transfer(&bob, &alice, TokenAmount(1));
        assert_eq!(
            res,
            Err(TransferError::InsufficientBalance {
                account: bob,
                balance: TokenAmount::ZERO,
                needed: TokenAmount(1),
            })
        );
        assert_eq!(ledger.balance_of(&alice), TokenAmount::tokens(10_000));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let (mut ledger, alice, bob) = setup();
        let spender = Address::random();
        ledger
            .approve(&alice, &spender, TokenAmount::tokens(5))
            .unwrap();
        ledger
            .transfer_from(&spender, &alice, &bob, TokenAmount::tokens(3))
            .unwrap();
        assert_eq!(ledger.allowance(&alice, &spender), TokenAmount::tokens(2));
        assert_eq!(ledger.balance_of(&bob), TokenAmount::tokens(3));

        let res = ledger.transfer_from(&spender, &alice, &bob, TokenAmount::tokens(3));
        assert!(matches!(
            res,
            Err(TransferError::InsufficientAllowance { .. })
        ));
        assert_eq!(ledger.balance_of(&bob), TokenAmount::tokens(3));
    }

    #[test]
    fn unlimited_allowance_is_not_consumed() {
        let (mut ledger, alice, bob) = setup();
        let spender = Address::random();
        ledger
            .approve(&alice, &spender, TokenAmount(u128::MAX))
            .unwrap();
        ledger
            .transfer_from(&spender, &alice, &bob, TokenAmount::tokens(3))
            .unwrap();
        assert_eq!(ledger.allowance(&alice, &spender), TokenAmount(u128::MAX));
    }

    #[test]
    fn failed_transfer_from_keeps_allowance() {
        let (mut ledger, _, bob) = setup();
        let spender = Address::random();
        ledger.approve(&bob, &spender, TokenAmount(10)).unwrap();
        let res = ledger.transfer_from(&spender, &bob, &spender, TokenAmount(10));
        assert!(matches!(res, Err(TransferError::InsufficientBalance { .. })));
        assert_eq!(ledger.allowance(&bob, &spender), TokenAmount(10));
    }

    #[test]
    fn atomic_rolls_back_partial_batches() {
        let (mut ledger, alice, bob) = setup();
        let before = ledger.clone();

        let res = ledger.atomic(|l| {
            l.transfer(&alice, &bob, TokenAmount::tokens(1))?;
            l.transfer(&bob, &alice, TokenAmount::tokens(2))
        });

        assert!(res.is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn atomic_commits_on_success() {
        let (mut ledger, alice, bob) = setup();
        ledger
            .atomic(|l| {
                l.transfer(&alice, &bob, TokenAmount::tokens(2))?;
                l.transfer(&bob, &alice, TokenAmount::tokens(1))
            })
            .unwrap();
        assert_eq!(ledger.balance_of(&bob), TokenAmount::tokens(1));
    }
}
