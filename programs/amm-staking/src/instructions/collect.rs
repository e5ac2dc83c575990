use amm_pool::{curve::AssetAmounts, host::emit, ExternalLedger, Pool, U256};
use anchor_lang::prelude::*;

use crate::{
    curve::WeightCalculator,
    error::ErrorCode,
    states::{RewardCollected, StakingPool},
};

/// What a collect paid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectedReward {
    /// Fee receipts released to the staker.
    pub liquidity: U256,
    /// Underlying assets sent to the recipient when the receipts were burned.
    pub burned: Option<AssetAmounts>,
}

impl StakingPool {
    /// Pays `caller`'s share of the fee receipts to `to`, or burns it through
    /// the pool and sends the underlying assets when `burn_tokens` is set.
    pub fn collect(
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
            let index = WeightCalculator::growth_index(pool)?;
            let payout = staking.settle(pool, caller, index)?;
            staking.pay_out(ledger, pool, caller, to, payout, burn_tokens)
        })
    }

    pub(crate) fn pay_out(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        pool: &mut Pool,
        staker: &Pubkey,
        to: &Pubkey,
        liquidity: U256,
        burn_tokens: bool,
    ) -> Result<CollectedReward> {
        if liquidity.is_zero() {
            return Ok(CollectedReward::default());
        }

        let address = self.address;
        let burned = if burn_tokens {
            let pool_address = pool.address();
            pool.transfer(ledger, &address, &pool_address, liquidity)?;
            Some(pool.burn(ledger, &address, to)?)
        } else {
            pool.transfer(ledger, &address, to, liquidity)?;
            None
        };

        let assets = burned.unwrap_or_default();
        emit(
            ledger,
            RewardCollected {
                distributor: address,
                staker: *staker,
                to: *to,
                liquidity,
                burned: burn_tokens,
                amount_base: assets.base,
                amount_token: assets.token,
            },
        );
        Ok(CollectedReward { liquidity, burned })
    }
}
