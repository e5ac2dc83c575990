use amm_pool::U256;
use anchor_lang::prelude::*;

/// Emitted when receipts are locked into the distributor.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct StakeEntered {
    pub distributor: Pubkey,
    pub staker: Pubkey,
    pub amount: U256,
    pub staked_balance: U256,
    /// Weight after the stake was applied.
    pub weight: U256,
    pub growth_index: U256,
}

/// Emitted whenever a staker's fee share is paid out, as receipts or burned
/// for the underlying assets.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct RewardCollected {
    pub distributor: Pubkey,
    pub staker: Pubkey,
    pub to: Pubkey,
    pub liquidity: U256,
    pub burned: bool,
    pub amount_base: u64,
    pub amount_token: U256,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct StakeExited {
    pub distributor: Pubkey,
    pub staker: Pubkey,
    pub to: Pubkey,
    pub amount: U256,
}
