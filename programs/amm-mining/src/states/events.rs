use amm_pool::U256;
use anchor_lang::prelude::*;

/// Emitted when governance opens or extends an epoch.
#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct EpochEnabled {
    pub mining_pool: Pubkey,
    /// Newly provided reward.
    pub reward: U256,
    /// Rate after folding in what the previous epoch had left.
    pub reward_rate: U256,
    pub start_block: u64,
    pub end_block: u64,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct MiningStarted {
    pub mining_pool: Pubkey,
    pub miner: Pubkey,
    pub amount: U256,
    pub balance: U256,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct MiningStopped {
    pub mining_pool: Pubkey,
    pub miner: Pubkey,
    pub amount: U256,
    pub balance: U256,
}

#[event]
#[derive(Debug, Clone, PartialEq)]
pub struct MiningRewardPaid {
    pub mining_pool: Pubkey,
    pub miner: Pubkey,
    pub reward: U256,
}
