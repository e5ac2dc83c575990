use amm_pool::{
    storage::{self, Persist, StateStore},
    Pool, U256,
};
use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::{
    curve::{FeeShare, WeightCalculator},
    error::ErrorCode,
    states::Staker,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct StakingPool {
    /// Address holding staked and fee receipts; the pool's `fee_to`.
    pub address: Pubkey,
    /// The pool whose receipts are staked.
    pub pool: Pubkey,
    pub total_staked: U256,
    /// Sum of every staker's weight.
    pub total_weight: U256,
    /// Fee receipts credited per staked receipt, scaled by `PRECISION^2`.
    pub reward_per_receipt_stored: U256,
    /// Fee receipts credited to stakes and not yet paid out.
    pub rewards_credited: U256,
    pub stakers: BTreeMap<Pubkey, Staker>,
    locked: bool,
}

impl StakingPool {
    pub fn new(address: Pubkey, pool: Pubkey) -> Self {
        Self {
            address,
            pool,
            total_staked: U256::zero(),
            total_weight: U256::zero(),
            reward_per_receipt_stored: U256::zero(),
            rewards_credited: U256::zero(),
            stakers: BTreeMap::new(),
            locked: false,
        }
    }

    pub fn staker(&self, owner: &Pubkey) -> Staker {
        self.stakers.get(owner).copied().unwrap_or_default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Fee receipts held for stakers: everything the distributor owns in the
    /// pool beyond the staked principal.
    pub fn staking_rewards_balance(&self, pool: &Pool) -> U256 {
        pool.balance_of(&self.address).saturating_sub(self.total_staked)
    }

    /// Fee receipts realized since the last settle that no stake has been
    /// credited with yet.
    pub fn uncredited_rewards(&self, pool: &Pool) -> U256 {
        self.staking_rewards_balance(pool)
            .saturating_sub(self.rewards_credited)
    }

    /// Total exposure at `index`: the staked value above the summed weights.
    /// A freshly added stake contributes nothing until the pool grows.
    pub fn total_staked_applicable(&self, index: U256) -> Result<U256> {
        WeightCalculator::exposure(self.total_staked, self.total_weight, index)
    }

    /// Per-receipt share once the uncredited receipts are spread over the
    /// current stake, and the receipts that spreading credits.
    fn reward_per_receipt(&self, pool: &Pool) -> Result<(U256, U256)> {
        let (increment, credited) =
            FeeShare::credit(self.uncredited_rewards(pool), self.total_staked)?;
        let per_receipt = self
            .reward_per_receipt_stored
            .checked_add(increment)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok((per_receipt, credited))
    }

    /// Receipts `owner` would receive from a collect right now.
    pub fn pending_reward(&self, pool: &Pool, owner: &Pubkey) -> Result<U256> {
        let staker = self.staker(owner);
        let (per_receipt, _) = self.reward_per_receipt(pool)?;
        FeeShare::earned(
            staker.staked_balance,
            per_receipt,
            staker.reward_per_receipt_paid,
        )
    }

    /// Run `f` holding the distributor's guard; refused while the pool itself
    /// is mid-operation.
    pub(crate) fn with_lock<T>(
        &mut self,
        pool: &mut Pool,
        f: impl FnOnce(&mut Self, &mut Pool) -> Result<T>,
    ) -> Result<T> {
        require_keys_eq!(pool.address(), self.pool, ErrorCode::PoolMismatch);
        require!(!self.locked && !pool.is_locked(), ErrorCode::Locked);
        self.locked = true;
        let result = f(self, pool);
        self.locked = false;
        result
    }

    /// Credit newly realized fee receipts to the current stake, then compute
    /// `owner`'s payout and move their weight up to the value of their stake
    /// at `index`. The caller pays the returned receipts out.
    pub(crate) fn settle(&mut self, pool: &Pool, owner: &Pubkey, index: U256) -> Result<U256> {
        let (per_receipt, credited) = self.reward_per_receipt(pool)?;
        self.reward_per_receipt_stored = per_receipt;

        let mut staker = self.staker(owner);
        let payout = FeeShare::earned(
            staker.staked_balance,
            per_receipt,
            staker.reward_per_receipt_paid,
        )?;
        self.rewards_credited = self
            .rewards_credited
            .checked_add(credited)
            .and_then(|v| v.checked_sub(payout))
            .ok_or(ErrorCode::MathOverflow)?;
        staker.reward_per_receipt_paid = per_receipt;

        let value = WeightCalculator::value(staker.staked_balance, index)?;
        if value > staker.weight {
            self.total_weight = self
                .total_weight
                .checked_add(value - staker.weight)
                .ok_or(ErrorCode::MathOverflow)?;
            staker.weight = value;
        }
        self.stakers.insert(*owner, staker);
        Ok(payout)
    }
}

impl Persist for StakingPool {
    fn save(&self, namespace: &str, store: &mut dyn StateStore) -> Result<()> {
        require!(!self.locked, ErrorCode::Locked);
        storage::clear(store, namespace);
        let key = |field: &str| storage::field_key(namespace, field);
        storage::put(store, &key("Address"), &self.address)?;
        storage::put(store, &key("Pool"), &self.pool)?;
        storage::put(store, &key("TotalStaked"), &self.total_staked)?;
        storage::put(store, &key("TotalWeight"), &self.total_weight)?;
        storage::put(store, &key("RewardPerReceiptStored"), &self.reward_per_receipt_stored)?;
        storage::put(store, &key("RewardsCredited"), &self.rewards_credited)?;
        for (owner, staker) in &self.stakers {
            storage::put(store, &key(&format!("StakedBalance:{}", owner)), &staker.staked_balance)?;
            storage::put(store, &key(&format!("Weight:{}", owner)), &staker.weight)?;
            storage::put(
                store,
                &key(&format!("RewardPerReceiptPaid:{}", owner)),
                &staker.reward_per_receipt_paid,
            )?;
        }
        Ok(())
    }

    fn load(namespace: &str, store: &dyn StateStore) -> Result<Self> {
        let mut staking = StakingPool::new(
            storage::require_field(store, namespace, "Address")?,
            storage::require_field(store, namespace, "Pool")?,
        );
        staking.total_staked = storage::require_field(store, namespace, "TotalStaked")?;
        staking.total_weight = storage::require_field(store, namespace, "TotalWeight")?;
        staking.reward_per_receipt_stored =
            storage::require_field(store, namespace, "RewardPerReceiptStored")?;
        staking.rewards_credited = storage::require_field(store, namespace, "RewardsCredited")?;
        for (parts, staked_balance) in storage::scan::<U256>(store, namespace, "StakedBalance")? {
            let [owner] = storage::key_parts::<1>(&parts)?;
            let owner = storage::parse_address(owner)?;
            let weight = storage::require_field(store, namespace, &format!("Weight:{}", owner))?;
            let reward_per_receipt_paid =
                storage::require_field(store, namespace, &format!("RewardPerReceiptPaid:{}", owner))?;
            staking.stakers.insert(
                owner,
                Staker {
                    staked_balance,
                    weight,
                    reward_per_receipt_paid,
                },
            );
        }
        Ok(staking)
    }
}
