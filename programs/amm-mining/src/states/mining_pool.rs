use amm_pool::{
    storage::{self, Persist, StateStore},
    Asset, ExternalLedger, U256,
};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::{curve::RewardAccumulator, error::ErrorCode, states::Miner};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct MiningPool {
    /// Address holding mined tokens and the reward fund.
    pub address: Pubkey,
    /// Only party allowed to fund epochs.
    pub governance: Pubkey,
    pub staking_token: Asset,
    pub reward_token: Asset,
    /// Epoch length in blocks.
    pub duration: u64,
    pub reward_rate: U256,
    pub mining_period_end_block: u64,
    pub last_update_block: u64,
    pub reward_per_token_stored: U256,
    pub total_supply: U256,
    pub miners: BTreeMap<Pubkey, Miner>,
    locked: bool,
}

impl MiningPool {
    pub fn new(
        address: Pubkey,
        governance: Pubkey,
        staking_token: Asset,
        reward_token: Asset,
        duration: u64,
    ) -> Result<Self> {
        require!(duration > 0, ErrorCode::InvalidDuration);
        Ok(Self {
            address,
            governance,
            staking_token,
            reward_token,
            duration,
            reward_rate: U256::zero(),
            mining_period_end_block: 0,
            last_update_block: 0,
            reward_per_token_stored: U256::zero(),
            total_supply: U256::zero(),
            miners: BTreeMap::new(),
            locked: false,
        })
    }

    pub fn miner(&self, owner: &Pubkey) -> Miner {
        self.miners.get(owner).copied().unwrap_or_default()
    }

    pub fn balance_of(&self, owner: &Pubkey) -> U256 {
        self.miner(owner).balance
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn last_block_reward_applicable(&self, block: u64) -> u64 {
        block.min(self.mining_period_end_block)
    }

    pub fn reward_per_token(&self, block: u64) -> Result<U256> {
        RewardAccumulator::reward_per_token(
            self.reward_per_token_stored,
            self.last_update_block,
            self.last_block_reward_applicable(block),
            self.reward_rate,
            self.total_supply,
        )
    }

    pub fn earned(&self, owner: &Pubkey, block: u64) -> Result<U256> {
        let miner = self.miner(owner);
        RewardAccumulator::earned(
            miner.balance,
            self.reward_per_token(block)?,
            miner.reward_per_token_paid,
            miner.reward,
        )
    }

    pub fn reward_for_duration(&self) -> Result<U256> {
        Ok(self
            .reward_rate
            .checked_mul(U256::from(self.duration))
            .ok_or(ErrorCode::MathOverflow)?)
    }

    /// Reward fund held by the pool. Mined principal is excluded when the
    /// reward and staking tokens are the same asset.
    pub fn reward_balance(&self, ledger: &dyn ExternalLedger) -> Result<U256> {
        let held = ledger.get_balance(self.reward_token, &self.address)?;
        if self.reward_token == self.staking_token {
            return Ok(held.saturating_sub(self.total_supply));
        }
        Ok(held)
    }

    pub(crate) fn with_lock<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        require!(!self.locked, ErrorCode::Locked);
        self.locked = true;
        let result = f(self);
        self.locked = false;
        result
    }

    /// Freeze accrual up to `block`, then snapshot `owner` if given. Every
    /// mutating entry point calls this first. An account with no record and
    /// nothing earned is not given one.
    pub(crate) fn update_reward(&mut self, block: u64, owner: Option<&Pubkey>) -> Result<()> {
        self.reward_per_token_stored = self.reward_per_token(block)?;
        self.last_update_block = self.last_block_reward_applicable(block);
        if let Some(owner) = owner {
            let mut miner = self.miner(owner);
            miner.reward = self.earned(owner, block)?;
            miner.reward_per_token_paid = self.reward_per_token_stored;
            if self.miners.contains_key(owner) || !miner.reward.is_zero() {
                self.miners.insert(*owner, miner);
            }
        }
        Ok(())
    }
}

impl Persist for MiningPool {
    fn save(&self, namespace: &str, store: &mut dyn StateStore) -> Result<()> {
        require!(!self.locked, ErrorCode::Locked);
        storage::clear(store, namespace);
        let key = |field: &str| storage::field_key(namespace, field);
        storage::put(store, &key("Address"), &self.address)?;
        storage::put(store, &key("Governance"), &self.governance)?;
        storage::put(store, &key("StakingToken"), &self.staking_token)?;
        storage::put(store, &key("RewardToken"), &self.reward_token)?;
        storage::put(store, &key("Duration"), &self.duration)?;
        storage::put(store, &key("RewardRate"), &self.reward_rate)?;
        storage::put(store, &key("MiningPeriodEndBlock"), &self.mining_period_end_block)?;
        storage::put(store, &key("LastUpdateBlock"), &self.last_update_block)?;
        storage::put(store, &key("RewardPerTokenStored"), &self.reward_per_token_stored)?;
        storage::put(store, &key("TotalSupply"), &self.total_supply)?;
        for (owner, miner) in &self.miners {
            storage::put(store, &key(&format!("MiningBalance:{}", owner)), &miner.balance)?;
            storage::put(
                store,
                &key(&format!("RewardPerTokenPaid:{}", owner)),
                &miner.reward_per_token_paid,
            )?;
            storage::put(store, &key(&format!("Reward:{}", owner)), &miner.reward)?;
        }
        Ok(())
    }

    fn load(namespace: &str, store: &dyn StateStore) -> Result<Self> {
        let mut mining = MiningPool::new(
            storage::require_field(store, namespace, "Address")?,
            storage::require_field(store, namespace, "Governance")?,
            storage::require_field(store, namespace, "StakingToken")?,
            storage::require_field(store, namespace, "RewardToken")?,
            storage::require_field(store, namespace, "Duration")?,
        )?;
        mining.reward_rate = storage::require_field(store, namespace, "RewardRate")?;
        mining.mining_period_end_block = storage::require_field(store, namespace, "MiningPeriodEndBlock")?;
        mining.last_update_block = storage::require_field(store, namespace, "LastUpdateBlock")?;
        mining.reward_per_token_stored = storage::require_field(store, namespace, "RewardPerTokenStored")?;
        mining.total_supply = storage::require_field(store, namespace, "TotalSupply")?;
        for (parts, balance) in storage::scan::<U256>(store, namespace, "MiningBalance")? {
            let [owner] = storage::key_parts::<1>(&parts)?;
            let owner = storage::parse_address(owner)?;
            let reward_per_token_paid =
                storage::require_field(store, namespace, &format!("RewardPerTokenPaid:{}", owner))?;
            let reward = storage::require_field(store, namespace, &format!("Reward:{}", owner))?;
            mining.miners.insert(
                owner,
                Miner {
                    balance,
                    reward_per_token_paid,
                    reward,
                },
            );
        }
        Ok(mining)
    }
}
