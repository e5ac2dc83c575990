use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Pool is locked by an operation in flight")]
    Locked,

    #[msg("Insufficient liquidity for this operation")]
    InsufficientLiquidity,

    #[msg("Burn would return zero of an asset")]
    InsufficientLiquidityBurned,

    #[msg("Requested output amount is zero")]
    InsufficientOutputAmount,

    #[msg("Input does not satisfy the constant-product invariant")]
    InsufficientInputAmount,

    #[msg("Swap received no input")]
    ZeroInputAmount,

    #[msg("Recipient may not be the pool or an asset contract")]
    InvalidTo,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Insufficient allowance")]
    InsufficientAllowance,

    #[msg("Caller is not authorized for this operation")]
    Unauthorized,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("No callback registered for the swap recipient")]
    CallbackTargetMissing,

    #[msg("Persisted state could not be decoded")]
    StateCorrupted,
}
