use amm_pool::{host::emit, ExternalLedger, U256};
use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    states::{MiningPool, MiningStopped},
};

impl MiningPool {
    /// Settle `caller`, then return `amount` of their mined balance.
    pub fn withdraw(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey, amount: U256) -> Result<()> {
        require!(!amount.is_zero(), ErrorCode::CannotWithdrawZero);
        self.with_lock(|mining| mining.withdraw_unlocked(ledger, caller, amount))
    }

    pub(crate) fn withdraw_unlocked(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        caller: &Pubkey,
        amount: U256,
    ) -> Result<()> {
        self.update_reward(ledger.block_height(), Some(caller))?;

        let mut miner = self.miner(caller);
        miner.balance = miner
            .balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientMiningBalance)?;
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        self.miners.insert(*caller, miner);

        let address = self.address;
        ledger.transfer_to(self.staking_token, &address, caller, amount)?;
        emit(
            ledger,
            MiningStopped {
                mining_pool: address,
                miner: *caller,
                amount,
                balance: miner.balance,
            },
        );
        Ok(())
    }
}
