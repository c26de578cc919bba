use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Trading statistics for one trader on one platform.
///
/// # Lifecycle
/// 1. Created by the trader's first `execute_trade` on a platform
/// 2. Mutated by every `replicate_trade` against it
/// 3. Never closed
///
/// Counters and profit only grow.
#[account]
pub struct TraderAccount {
    /// The trader whose trades are being copied.
    pub trader: Pubkey,

    /// Platform the trades were routed through.
    pub platform: Pubkey,

    /// Unix timestamp of the first trade.
    pub join_date: i64,

    /// Unix timestamp of the latest trade or replication.
    pub last_trade_date: i64,

    /// Number of replications. Not a count of distinct followers.
    pub follower_count: u64,

    pub trade_count: u64,

    /// Sum of net (post-fee) amounts traded.
    pub total_profit: u64,

    /// PDA Bump.
    pub bump: u8,
}

impl TraderAccount {
    // 8 discriminator
    // + 32 (trader) + 32 (platform)
    // + 8 (join_date) + 8 (last_trade_date)
    // + 8 (follower_count) + 8 (trade_count) + 8 (total_profit)
    // + 1 (bump)
    pub const INIT_SPACE: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 1;

    /// State right after the trader's opening trade. Fails if the account already traded.
    pub fn open(
        &mut self,
        trader: Pubkey,
        platform: Pubkey,
        net_amount: u64,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(self.trade_count == 0, ErrorCode::TraderAccountExists);

        self.trader = trader;
        self.platform = platform;
        self.join_date = now;
        self.last_trade_date = now;
        self.follower_count = 0;
        self.trade_count = 1;
        self.total_profit = net_amount;
        self.bump = bump;
        Ok(())
    }

    /// Record one replication of this trader's trade.
    pub fn record_replication(&mut self, net_amount: u64, now: i64) -> Result<()> {
        let follower_count = self
            .follower_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        let trade_count = self
            .trade_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_profit = self
            .total_profit
            .checked_add(net_amount)
            .ok_or(ErrorCode::MathOverflow)?;

        self.follower_count = follower_count;
        self.trade_count = trade_count;
        self.total_profit = total_profit;
        self.last_trade_date = now;
        Ok(())
    }

    /// Equal share of profit per follower, rounded down.
    pub fn profit_per_follower(&self) -> Result<u64> {
        require!(self.follower_count > 0, ErrorCode::NoFollowers);
        Ok(self.total_profit / self.follower_count)
    }

    pub fn join_date(&self) -> i64 {
        self.join_date
    }

    pub fn trader_id(&self) -> Pubkey {
        self.trader
    }

    pub fn last_trade_date(&self) -> i64 {
        self.last_trade_date
    }

    pub fn total_profit(&self) -> u64 {
        self.total_profit
    }
}

#[event]
pub struct TradeExecuted {
    pub trader_account: Pubkey,
    pub trader: Pubkey,
    pub platform: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub timestamp: i64,
}

#[event]
pub struct TradeReplicated {
    pub trader_account: Pubkey,
    pub follower: Pubkey,
    pub platform: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub follower_count: u64,
    pub timestamp: i64,
}

/// Result of `distribute_profits`. Computed only; nothing is paid out.
#[event]
pub struct ProfitsComputed {
    pub trader_account: Pubkey,
    pub total_profit: u64,
    pub follower_count: u64,
    pub per_follower: u64,
    pub disbursed: bool,
}
