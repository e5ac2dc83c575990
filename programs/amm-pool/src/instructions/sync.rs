use anchor_lang::prelude::*;

use crate::{host::ExternalLedger, states::Pool};

impl Pool {
    /// Force the recorded reserves to match the balances the pool holds.
    pub fn sync(&mut self, ledger: &mut dyn ExternalLedger) -> Result<()> {
        self.with_lock(|pool| {
            let (balance_base, balance_token) = pool.held_balances(ledger)?;
            pool.update_reserves(ledger, balance_base, balance_token);
            Ok(())
        })
    }
}
