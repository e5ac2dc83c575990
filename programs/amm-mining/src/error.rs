use anchor_lang::prelude::*;

#[error_code(offset = 6200)]
pub enum ErrorCode {
    #[msg("Mining pool is locked by an operation in flight")]
    Locked,

    #[msg("Caller is not the governance party")]
    Unauthorized,

    #[msg("Mining pool holds no reward balance")]
    InvalidBalance,

    #[msg("Provided reward too high")]
    ProvidedRewardTooHigh,

    #[msg("Cannot mine 0")]
    CannotMineZero,

    #[msg("Cannot withdraw 0")]
    CannotWithdrawZero,

    #[msg("Withdrawal exceeds mining balance")]
    InsufficientMiningBalance,

    #[msg("Epoch duration must be at least one block")]
    InvalidDuration,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,
}
