use anchor_lang::prelude::*;
use crate::constants::{PLATFORM_SEED, TRADER_ACCOUNT_SEED};
use crate::errors::ErrorCode;
use crate::state::*;

impl<'info> DistributeProfits<'info> {
    /// Compute each follower's equal share of the trader's profit.
    /// Nothing is paid out; the share is returned and emitted with `disbursed: false`.
    pub fn distribute_profits(&self) -> Result<u64> {
        let trader_account = &self.trader_account;
        let per_follower = trader_account.profit_per_follower()?;

        msg!(
            "Profit share for {}: {} across {} followers = {} each",
            trader_account.trader,
            trader_account.total_profit,
            trader_account.follower_count,
            per_follower
        );
        emit!(ProfitsComputed {
            trader_account: trader_account.key(),
            total_profit: trader_account.total_profit,
            follower_count: trader_account.follower_count,
            per_follower,
            disbursed: false,
        });
        Ok(per_follower)
    }
}

#[derive(Accounts)]
pub struct DistributeProfits<'info> {
    #[account(
        seeds = [PLATFORM_SEED, platform.id.to_le_bytes().as_ref()],
        bump = platform.bump
    )]
    pub platform: Account<'info, TradingPlatform>,

    #[account(
        has_one = platform @ ErrorCode::PlatformMismatch,
        seeds = [TRADER_ACCOUNT_SEED, platform.key().as_ref(), trader_account.trader.as_ref()],
        bump = trader_account.bump
    )]
    pub trader_account: Account<'info, TraderAccount>,
}

#[derive(Accounts)]
pub struct ReadTraderAccount<'info> {
    pub trader_account: Account<'info, TraderAccount>,
}
