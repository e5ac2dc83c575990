use amm_pool::{host::emit, ExternalLedger, U256};
use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    states::{MiningPool, MiningStarted},
};

impl MiningPool {
    /// Settle `caller`, then pull `amount` of the staking token into the pool.
    pub fn mine(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey, amount: U256) -> Result<()> {
        require!(!amount.is_zero(), ErrorCode::CannotMineZero);
        self.with_lock(|mining| {
            mining.update_reward(ledger.block_height(), Some(caller))?;

            let address = mining.address;
            ledger.transfer_from(mining.staking_token, caller, &address, amount)?;

            let mut miner = mining.miner(caller);
            miner.reward_per_token_paid = mining.reward_per_token_stored;
            miner.balance = miner
                .balance
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?;
            mining.total_supply = mining
                .total_supply
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?;
            mining.miners.insert(*caller, miner);

            emit(
                ledger,
                MiningStarted {
                    mining_pool: address,
                    miner: *caller,
                    amount,
                    balance: miner.balance,
                },
            );
            Ok(())
        })
    }
}
