use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Withdraw amount exceeds staked balance")]
    InsufficientBalance,

    #[msg("Stake is still inside the minimum stake time")]
    FundsLocked,

    #[msg("Provided reward too high for the reward vault balance")]
    InsolventFunding,

    #[msg("Period finish must be after the last update time")]
    InvalidPeriodFinish,

    #[msg("Previous rewards period must be complete before changing the duration")]
    PeriodInProgress,

    #[msg("Cannot recover the staking token")]
    ForbiddenAsset,

    #[msg("Caller is not authorized for this operation")]
    Unauthorized,

    #[msg("Re-entrant call into a guarded operation")]
    ReentrancyDetected,

    #[msg("This action cannot be performed while the pool is paused")]
    Paused,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Invalid timestamp conversion")]
    InvalidTimestamp,

    #[msg("Input account owner is not the program admin")]
    InvalidOwner,

    #[msg("Caller has not been nominated for ownership")]
    NotNominated,

    #[msg("Token account required for this transfer is missing")]
    MissingTokenAccount,

    #[msg("Mints with a transfer fee are not supported")]
    UnsupportedMint,
}
