use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod fees;
pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::FeeSource;

declare_id!("G5LTc6aFMfCYuoLUHZ28DA3uqCguyemxE64TMzv1YgDa");

#[program]
pub mod copy_trading {
    use super::*;

    pub fn initialize_protocol(ctx: Context<InitializeProtocol>) -> Result<()> {
        ctx.accounts.initialize_protocol(&ctx.bumps)
    }

    pub fn create_platform(ctx: Context<CreatePlatform>, fee_rate: u64) -> Result<()> {
        ctx.accounts.create_platform(fee_rate, &ctx.bumps)
    }

    pub fn execute_trade(ctx: Context<ExecuteTrade>, amount: u64) -> Result<()> {
        ctx.accounts.execute_trade(amount, &ctx.bumps)
    }

    pub fn replicate_trade(ctx: Context<ReplicateTrade>, amount: u64) -> Result<()> {
        ctx.accounts.replicate_trade(amount)
    }

    pub fn distribute_profits(ctx: Context<DistributeProfits>) -> Result<u64> {
        ctx.accounts.distribute_profits()
    }

    // =========================================================================
    // Read accessors (return data)
    // =========================================================================

    pub fn get_join_date(ctx: Context<ReadTraderAccount>) -> Result<i64> {
        Ok(ctx.accounts.trader_account.join_date())
    }

    pub fn get_trader_id(ctx: Context<ReadTraderAccount>) -> Result<Pubkey> {
        Ok(ctx.accounts.trader_account.trader_id())
    }

    pub fn get_last_trade_date(ctx: Context<ReadTraderAccount>) -> Result<i64> {
        Ok(ctx.accounts.trader_account.last_trade_date())
    }

    pub fn get_total_profit(ctx: Context<ReadTraderAccount>) -> Result<u64> {
        Ok(ctx.accounts.trader_account.total_profit())
    }

    // =========================================================================
    // Cap-gated platform administration
    // =========================================================================

    pub fn update_fee_rate(ctx: Context<PlatformAdmin>, fee_rate: u64) -> Result<()> {
        ctx.accounts.update_fee_rate(fee_rate)
    }

    pub fn set_fee_source(ctx: Context<PlatformAdmin>, fee_source: FeeSource) -> Result<()> {
        ctx.accounts.set_fee_source(fee_source)
    }

    pub fn transfer_platform_cap(ctx: Context<PlatformAdmin>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_platform_cap(new_owner)
    }

    pub fn withdraw_platform_funds(ctx: Context<WithdrawPlatformFunds>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_platform_funds(amount)
    }

    pub fn withdraw_protocol_fees(ctx: Context<WithdrawProtocolFees>, amount: u64) -> Result<()> {
        ctx.accounts.withdraw_protocol_fees(amount)
    }
}
