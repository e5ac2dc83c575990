//! Balance/allowance bookkeeping for the liquidity-receipt token.

use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::{error::ErrorCode, utils::U256};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq)]
pub struct LiquidityLedger {
    pub(crate) total_supply: U256,
    pub(crate) balances: BTreeMap<Pubkey, U256>,
    pub(crate) allowances: BTreeMap<(Pubkey, Pubkey), U256>,
}

impl LiquidityLedger {
    pub fn balance_of(&self, owner: &Pubkey) -> U256 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn mint(&mut self, to: &Pubkey, amount: U256) -> Result<()> {
        self.total_supply = self.total_supply.checked_add_err(amount)?;
        let balance = self.balance_of(to).checked_add_err(amount)?;
        self.balances.insert(*to, balance);
        Ok(())
    }

    pub(crate) fn burn(&mut self, from: &Pubkey, amount: U256) -> Result<()> {
        let balance = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientBalance)?;
        self.balances.insert(*from, balance);
        self.total_supply = self.total_supply.checked_sub_err(amount)?;
        Ok(())
    }

    pub(crate) fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: U256) -> Result<()> {
        let from_balance = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientBalance)?;
        self.balances.insert(*from, from_balance);
        let to_balance = self.balance_of(to).checked_add_err(amount)?;
        self.balances.insert(*to, to_balance);
        Ok(())
    }

    pub(crate) fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: U256) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Move the receipts, then spend `spender`'s allowance over `from`.
    /// Nothing is spent when the move fails. An allowance of `U256::MAX` is
    /// never decremented.
    pub(crate) fn transfer_from(
        &mut self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: U256,
    ) -> Result<()> {
        let allowance = self.allowance(from, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientAllowance)?;
        self.transfer(from, to, amount)?;
        if allowance != U256::MAX {
            self.allowances.insert((*from, *spender), remaining);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_from_spends_allowance() {
        let (owner, spender, to) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = LiquidityLedger::default();
        ledger.mint(&owner, U256::from(100u64)).unwrap();
        ledger.approve(&owner, &spender, U256::from(60u64));

        ledger.transfer_from(&spender, &owner, &to, U256::from(40u64)).unwrap();
        assert_eq!(ledger.allowance(&owner, &spender), U256::from(20u64));
        assert_eq!(ledger.balance_of(&to), U256::from(40u64));
        assert!(ledger.transfer_from(&spender, &owner, &to, U256::from(21u64)).is_err());
        assert_eq!(ledger.balance_of(&owner), U256::from(60u64));
    }

    #[test]
    fn failed_transfer_from_leaves_the_allowance() {
        let (owner, spender, to) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = LiquidityLedger::default();
        ledger.mint(&owner, U256::from(10u64)).unwrap();
        ledger.approve(&owner, &spender, U256::from(100u64));

        assert!(ledger.transfer_from(&spender, &owner, &to, U256::from(50u64)).is_err());
        assert_eq!(ledger.allowance(&owner, &spender), U256::from(100u64));
        assert_eq!(ledger.balance_of(&owner), U256::from(10u64));
        assert!(ledger.balance_of(&to).is_zero());
    }

    #[test]
    fn unlimited_allowance_is_not_consumed() {
        let (owner, spender) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut ledger = LiquidityLedger::default();
        ledger.mint(&owner, U256::from(5u64)).unwrap();
        ledger.approve(&owner, &spender, U256::MAX);
        ledger.transfer_from(&spender, &owner, &spender, U256::from(5u64)).unwrap();
        assert_eq!(ledger.allowance(&owner, &spender), U256::MAX);
    }

    #[test]
    fn burn_reduces_supply_and_refuses_overdraw() {
        let owner = Pubkey::new_unique();
        let mut ledger = LiquidityLedger::default();
        ledger.mint(&owner, U256::from(10u64)).unwrap();
        assert!(ledger.burn(&owner, U256::from(11u64)).is_err());
        ledger.burn(&owner, U256::from(4u64)).unwrap();
        assert_eq!(ledger.total_supply, U256::from(6u64));
    }
}
