use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    host::{emit, ExternalLedger},
    states::{FeeToUpdated, PermissioningUpdated, Pool},
};

impl Pool {
    /// Turn the protocol fee on (`Some`) or off (`None`). `k_last` follows on
    /// the next mint or burn.
    pub fn set_fee_to(
        &mut self,
        ledger: &mut dyn ExternalLedger,
        caller: &Pubkey,
        fee_to: Option<Pubkey>,
    ) -> Result<()> {
        require_keys_eq!(*caller, self.governance, ErrorCode::Unauthorized);
        require!(!self.is_locked(), ErrorCode::Locked);
        self.fee_to = fee_to;
        emit(ledger, FeeToUpdated { pool: self.address, fee_to });
        Ok(())
    }

    pub fn set_permissioned(&mut self, ledger: &mut dyn ExternalLedger, caller: &Pubkey, permissioned: bool) -> Result<()> {
        require_keys_eq!(*caller, self.governance, ErrorCode::Unauthorized);
        require!(!self.is_locked(), ErrorCode::Locked);
        self.permissioned = permissioned;
        emit(
            ledger,
            PermissioningUpdated {
                pool: self.address,
                permissioned,
            },
        );
        Ok(())
    }
}
