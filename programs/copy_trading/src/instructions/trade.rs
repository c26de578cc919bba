use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use crate::constants::{PLATFORM_SEED, PROTOCOL_SEED, TRADER_ACCOUNT_SEED};
use crate::errors::ErrorCode;
use crate::fees::{split_fee, FeeSplit};
use crate::state::*;

impl<'info> ExecuteTrade<'info> {
    /// Open a trader account with the trader's first trade on this platform.
    /// amount: total traded, fee included.
    pub fn execute_trade(&mut self, amount: u64, bumps: &ExecuteTradeBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let mint = self.mint.key();
        let split = route_trade(&mut self.protocol.balances, &mut self.platform, mint, amount)?;

        // 1. Protocol cut
        transfer_to_vault(
            &self.token_program,
            &self.trader,
            &self.trader_token_account,
            &self.protocol_vault,
            split.fee,
        )?;

        // 2. Platform keeps the rest
        transfer_to_vault(
            &self.token_program,
            &self.trader,
            &self.trader_token_account,
            &self.platform_vault,
            split.net,
        )?;

        let trader = self.trader.key();
        let platform = self.platform.key();
        self.trader_account
            .open(trader, platform, split.net, now, bumps.trader_account)?;

        msg!("Trade executed by {}. Amount: {}, fee: {}", trader, amount, split.fee);
        emit!(TradeExecuted {
            trader_account: self.trader_account.key(),
            trader,
            platform,
            mint,
            amount,
            fee: split.fee,
            timestamp: now,
        });
        Ok(())
    }
}

impl<'info> ReplicateTrade<'info> {
    /// Copy a trader's trade. Same fee routing as `execute_trade`; the follower pays.
    /// Any signer may replicate against any trader account on the platform.
    pub fn replicate_trade(&mut self, amount: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let mint = self.mint.key();
        let split = route_trade(&mut self.protocol.balances, &mut self.platform, mint, amount)?;

        transfer_to_vault(
            &self.token_program,
            &self.follower,
            &self.follower_token_account,
            &self.protocol_vault,
            split.fee,
        )?;
        transfer_to_vault(
            &self.token_program,
            &self.follower,
            &self.follower_token_account,
            &self.platform_vault,
            split.net,
        )?;

        self.trader_account.record_replication(split.net, now)?;

        let trader_account = &self.trader_account;
        msg!(
            "Trade of {} replicated by {}. Followers: {}, trades: {}",
            trader_account.trader,
            self.follower.key(),
            trader_account.follower_count,
            trader_account.trade_count
        );
        emit!(TradeReplicated {
            trader_account: trader_account.key(),
            follower: self.follower.key(),
            platform: self.platform.key(),
            mint,
            amount,
            fee: split.fee,
            follower_count: trader_account.follower_count,
            timestamp: now,
        });
        Ok(())
    }
}

/// Ledger side of a trade: the fee is credited to the protocol, the remainder
/// to the platform, both under `mint`. The token transfers must match the split.
pub fn route_trade(
    protocol: &mut BalanceLedger,
    platform: &mut TradingPlatform,
    mint: Pubkey,
    amount: u64,
) -> Result<FeeSplit> {
    let split = trade_fee(platform, amount)?;
    protocol.deposit(mint, split.fee)?;
    platform.balances.deposit(mint, split.net)?;
    Ok(split)
}

/// Fee charged on `amount` under the platform's current fee source.
pub fn trade_fee(platform: &TradingPlatform, amount: u64) -> Result<FeeSplit> {
    split_fee(amount, platform.effective_fee_rate())
}

fn transfer_to_vault<'info>(
    token_program: &Program<'info, Token>,
    payer: &Signer<'info>,
    from: &Account<'info, TokenAccount>,
    vault: &Account<'info, TokenAccount>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: vault.to_account_info(),
        authority: payer.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

#[derive(Accounts)]
pub struct ExecuteTrade<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED, platform.id.to_le_bytes().as_ref()],
        bump = platform.bump
    )]
    pub platform: Account<'info, TradingPlatform>,

    /// Created on first use; `open` rejects an account that already traded.
    #[account(
        init_if_needed,
        payer = trader,
        space = TraderAccount::INIT_SPACE,
        seeds = [TRADER_ACCOUNT_SEED, platform.key().as_ref(), trader.key().as_ref()],
        bump
    )]
    pub trader_account: Account<'info, TraderAccount>,

    /// Coin type being traded.
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = trader
    )]
    pub trader_token_account: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = protocol
    )]
    pub protocol_vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = platform
    )]
    pub platform_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

#[derive(Accounts)]
pub struct ReplicateTrade<'info> {
    #[account(mut)]
    pub follower: Signer<'info>,

    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED, platform.id.to_le_bytes().as_ref()],
        bump = platform.bump
    )]
    pub platform: Account<'info, TradingPlatform>,

    #[account(
        mut,
        has_one = platform @ ErrorCode::PlatformMismatch,
        seeds = [TRADER_ACCOUNT_SEED, platform.key().as_ref(), trader_account.trader.as_ref()],
        bump = trader_account.bump
    )]
    pub trader_account: Account<'info, TraderAccount>,

    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = follower
    )]
    pub follower_token_account: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = follower,
        associated_token::mint = mint,
        associated_token::authority = protocol
    )]
    pub protocol_vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = follower,
        associated_token::mint = mint,
        associated_token::authority = platform
    )]
    pub platform_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIXED_FEE_RATE;

    fn platform(fee_rate: u64) -> TradingPlatform {
        TradingPlatform {
            id: 0,
            creator: Pubkey::new_unique(),
            balances: BalanceLedger::default(),
            fee_rate,
            fee_source: FeeSource::Fixed,
            bump: 255,
        }
    }

    fn protocol() -> Protocol {
        Protocol {
            admin: Pubkey::new_unique(),
            platform_count: 1,
            balances: BalanceLedger::default(),
            bump: 255,
        }
    }

    fn blank_account() -> TraderAccount {
        TraderAccount {
            trader: Pubkey::default(),
            platform: Pubkey::default(),
            join_date: 0,
            last_trade_date: 0,
            follower_count: 0,
            trade_count: 0,
            total_profit: 0,
            bump: 0,
        }
    }

    #[test]
    fn trade_splits_fee_between_protocol_and_platform() {
        for amount in [1u64, 7, 10, 55, 999, 1_000_001] {
            let mint = Pubkey::new_unique();
            let mut protocol = protocol();
            let mut platform = platform(5);

            route_trade(&mut protocol.balances, &mut platform, mint, amount).unwrap();

            let fee = amount * FIXED_FEE_RATE / 100;
            assert_eq!(protocol.balances.amount_of(&mint), fee);
            assert_eq!(platform.balances.amount_of(&mint), amount - fee);
        }
    }

    #[test]
    fn platform_fee_source_charges_stored_rate() {
        let mint = Pubkey::new_unique();
        let mut protocol = protocol();
        let mut platform = platform(5);
        platform.fee_source = FeeSource::Platform;

        let split = route_trade(&mut protocol.balances, &mut platform, mint, 1_000).unwrap();

        assert_eq!(split, FeeSplit { fee: 50, net: 950 });
        assert_eq!(protocol.balances.amount_of(&mint), 50);
        assert_eq!(platform.balances.amount_of(&mint), 950);
    }

    #[test]
    fn trade_then_replication_scenario() {
        let mint = Pubkey::new_unique();
        let trader = Pubkey::new_unique();
        let mut protocol = protocol();
        let mut platform = platform(5);
        let platform_key = Pubkey::new_unique();
        let mut account = blank_account();

        let split = route_trade(&mut protocol.balances, &mut platform, mint, 1_000).unwrap();
        assert_eq!(split.fee, 100);
        account.open(trader, platform_key, split.net, 1_000, 253).unwrap();

        assert_eq!(platform.balances.amount_of(&mint), 900);
        assert_eq!(protocol.balances.amount_of(&mint), 100);
        assert_eq!(account.trade_count, 1);
        assert_eq!(account.follower_count, 0);
        assert_eq!(account.total_profit(), 900);

        let split = route_trade(&mut protocol.balances, &mut platform, mint, 500).unwrap();
        assert_eq!(split.fee, 50);
        account.record_replication(split.net, 1_060).unwrap();

        assert_eq!(platform.balances.amount_of(&mint), 1_350);
        assert_eq!(protocol.balances.amount_of(&mint), 150);
        assert_eq!(platform.balances.entries.len(), 1);
        assert_eq!(account.trade_count, 2);
        assert_eq!(account.follower_count, 1);
        assert_eq!(account.total_profit(), 1_350);
        assert_eq!(account.last_trade_date(), 1_060);
        assert_eq!(account.join_date(), 1_000);
    }

    #[test]
    fn full_protocol_ledger_aborts_the_trade() {
        use crate::constants::MAX_BALANCE_ENTRIES;
        use anchor_lang::error::Error;

        let mut protocol = protocol();
        let mut platform = platform(5);
        for _ in 0..MAX_BALANCE_ENTRIES {
            protocol.balances.deposit(Pubkey::new_unique(), 1).unwrap();
        }

        let mint = Pubkey::new_unique();
        let err = route_trade(&mut protocol.balances, &mut platform, mint, 1_000).unwrap_err();

        assert_eq!(err, Error::from(ErrorCode::BalanceLedgerFull));
        assert_eq!(platform.balances.amount_of(&mint), 0);
    }
}
