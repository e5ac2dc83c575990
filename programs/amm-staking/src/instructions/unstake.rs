use amm_pool::{host::emit, ExternalLedger, Pool, U256};
use anchor_lang::prelude::*;

use crate::{
    curve::WeightCalculator,
    error::ErrorCode,
    instructions::CollectedReward,
    states::{StakeExited, Staker, StakingPool},
};

impl StakingPool {
    /// Collect, then return the whole stake to `to`. The record stays zeroed.
    pub fn unstake(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        pool: &mut Pool,
        caller: &Pubkey,
        to: &Pubkey,
        burn_tokens: bool,
    ) -> Result<CollectedReward> {
        require!(
            !self.staker(caller).staked_balance.is_zero(),
            ErrorCode::NoStake
        );
        self.with_lock(pool, |staking, pool| {
            // --- 1) Settle and pay the fee share ---
            let index = WeightCalculator::growth_index(pool)?;
            let payout = staking.settle(pool, caller, index)?;
            let reward = staking.pay_out(ledger, pool, caller, to, payout, burn_tokens)?;

            // --- 2) Drop the stake from the totals ---
            let staker = staking.staker(caller);
            staking.total_staked = staking
                .total_staked
                .checked_sub(staker.staked_balance)
                .ok_or(ErrorCode::MathOverflow)?;
            staking.total_weight = staking
                .total_weight
                .checked_sub(staker.weight)
                .ok_or(ErrorCode::MathOverflow)?;
            staking.stakers.insert(*caller, Staker::default());
            if staking.total_staked.is_zero() {
                // nothing is owed without stake; rounding dust goes back to
                // the uncredited receipts
                staking.rewards_credited = U256::zero();
            }

            // --- 3) Return the principal ---
            let address = staking.address;
            pool.transfer(ledger, &address, to, staker.staked_balance)?;
            emit(
                ledger,
                StakeExited {
                    distributor: address,
                    staker: *caller,
                    to: *to,
                    amount: staker.staked_balance,
                },
            );
            Ok(reward)
        })
    }
}
