use amm_pool::U256;
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Miner {
    /// Staking token mined into the pool.
    pub balance: U256,
    /// Accumulator value at the miner's last settlement.
    pub reward_per_token_paid: U256,
    /// Settled but unclaimed reward.
    pub reward: U256,
}
