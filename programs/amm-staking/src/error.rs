use anchor_lang::prelude::*;

#[error_code(offset = 6100)]
pub enum ErrorCode {
    #[msg("Distributor or its pool is locked by an operation in flight")]
    Locked,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Account has nothing staked")]
    NoStake,

    #[msg("Pool does not belong to this distributor")]
    PoolMismatch,

    #[msg("Pool has no liquidity")]
    EmptyPool,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,
}
