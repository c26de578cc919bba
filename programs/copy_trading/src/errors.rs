use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Trade amount cannot cover the computed fee.")]
    InsufficientFunds,
    #[msg("Trader account has no followers to distribute profits to.")]
    NoFollowers,
    #[msg("You are not authorized to perform this action.")]
    Unauthorized,
    #[msg("Fee rate must not exceed 100 percent.")]
    InvalidFeeRate,
    #[msg("Balance ledger has no room for another coin type.")]
    BalanceLedgerFull,
    #[msg("Math overflow in amount calculation.")]
    MathOverflow,
    #[msg("Account does not belong to this platform.")]
    PlatformMismatch,
    #[msg("Trader already has an account on this platform. Replicate instead.")]
    TraderAccountExists,
}
