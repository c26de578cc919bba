use anchor_lang::prelude::*;
use super::BalanceLedger;

/// Singleton protocol record. Collects the fee skimmed from every trade.
#[account]
pub struct Protocol {
    pub admin: Pubkey,
    /// Running count of platforms; the next platform's internal id.
    pub platform_count: u64,
    pub balances: BalanceLedger,
    pub bump: u8,
}

impl Protocol {
    // 8 discriminator + 32 admin + 8 platform_count + ledger + 1 bump
    pub const SPACE: usize = 8 + 32 + 8 + BalanceLedger::SPACE + 1;
}

/// Emitted whenever tokens leave a platform or protocol vault.
#[event]
pub struct FundsWithdrawn {
    pub source: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub recipient: Pubkey,
}
