use amm_pool::{host::emit, ExternalLedger, Pool, U256};
use anchor_lang::prelude::*;

use crate::{
    curve::WeightCalculator,
    error::ErrorCode,
    states::{StakeEntered, StakingPool},
};

impl StakingPool {
    /// Locks `amount` of `caller`'s receipts. The distributor must hold an
    /// allowance from `caller` in the pool.
    ///
    /// Steps:
    /// 1) Read the growth index from the pool.
    /// 2) Settle: credit newly realized fees to the existing stake and pay
    ///    `caller`'s share to them, so the new amount only earns later fees.
    /// 3) Pull the receipts.
    /// 4) Add the stake at its current value to the staker's weight.
    /// 5) Emit `StakeEntered`.
    pub fn stake(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        pool: &mut Pool,
        caller: &Pubkey,
        amount: U256,
    ) -> Result<U256> {
        require!(!amount.is_zero(), ErrorCode::ZeroAmount);
        self.with_lock(pool, |staking, pool| {
            // --- 1) Index ---
            let index = WeightCalculator::growth_index(pool)?;

            // --- 2) Settle ---
            let payout = staking.settle(pool, caller, index)?;
            staking.pay_out(ledger, pool, caller, caller, payout, false)?;

            // --- 3) Pull receipts ---
            let address = staking.address;
            pool.transfer_from(ledger, &address, caller, &address, amount)?;

            // --- 4) Weight ---
            let entry_value = WeightCalculator::value(amount, index)?;
            let mut staker = staking.staker(caller);
            staker.staked_balance = staker
                .staked_balance
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?;
            staker.weight = staker
                .weight
                .checked_add(entry_value)
                .ok_or(ErrorCode::MathOverflow)?;
            staking.total_staked = staking
                .total_staked
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?;
            staking.total_weight = staking
                .total_weight
                .checked_add(entry_value)
                .ok_or(ErrorCode::MathOverflow)?;
            staking.stakers.insert(*caller, staker);

            // --- 5) Notify ---
            emit(
                ledger,
                StakeEntered {
                    distributor: address,
                    staker: *caller,
                    amount,
                    staked_balance: staker.staked_balance,
                    weight: staker.weight,
                    growth_index: index,
                },
            );
            Ok(staker.weight)
        })
    }
}
