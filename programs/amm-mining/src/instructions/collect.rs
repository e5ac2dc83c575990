use amm_pool::{host::emit, ExternalLedger, U256};
use anchor_lang::prelude::*;

use crate::states::{MiningPool, MiningRewardPaid};

impl MiningPool {
    /// Pay out everything `caller` has earned so far. Returns the amount paid.
    pub fn collect(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey) -> Result<U256> {
        self.with_lock(|mining| mining.collect_unlocked(ledger, caller))
    }

    pub(crate) fn collect_unlocked(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey) -> Result<U256> {
        self.update_reward(ledger.block_height(), Some(caller))?;

        let mut miner = self.miner(caller);
        let reward = miner.reward;
        if reward.is_zero() {
            return Ok(reward);
        }
        miner.reward = U256::zero();
        self.miners.insert(*caller, miner);

        let address = self.address;
        ledger.transfer_to(self.reward_token, &address, caller, reward)?;
        emit(
            ledger,
            MiningRewardPaid {
                mining_pool: address,
                miner: *caller,
                reward,
            },
        );
        Ok(reward)
    }
}
