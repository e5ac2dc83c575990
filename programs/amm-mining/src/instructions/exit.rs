use amm_pool::{ExternalLedger, U256};
use anchor_lang::prelude::*;

use crate::states::{Miner, MiningPool};

impl MiningPool {
    /// Collect, then withdraw the whole balance. The record is left zeroed.
    /// Returns the reward paid.
    pub fn exit(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey) -> Result<U256> {
        self.with_lock(|mining| {
            let reward = mining.collect_unlocked(ledger, caller)?;
            let balance = mining.balance_of(caller);
            if !balance.is_zero() {
                mining.withdraw_unlocked(ledger, caller, balance)?;
            }
            if mining.miners.contains_key(caller) {
                mining.miners.insert(*caller, Miner::default());
            }
            Ok(reward)
        })
    }
}
