use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use crate::constants::PROTOCOL_SEED;
use crate::errors::ErrorCode;
use crate::state::*;

impl<'info> InitializeProtocol<'info> {
    pub fn initialize_protocol(&mut self, bumps: &InitializeProtocolBumps) -> Result<()> {
        let protocol = &mut self.protocol;
        protocol.admin = self.admin.key();
        protocol.platform_count = 0;
        protocol.balances = BalanceLedger::default();
        protocol.bump = bumps.protocol;
        msg!("Protocol initialized. Admin: {}", protocol.admin);
        Ok(())
    }
}

impl<'info> WithdrawProtocolFees<'info> {
    /// Move collected fees out of the protocol vault. Admin only.
    pub fn withdraw_protocol_fees(&mut self, amount: u64) -> Result<()> {
        let mint = self.mint.key();
        let remaining = self.protocol.balances.withdraw(mint, amount)?;

        let protocol = &self.protocol;
        if amount > 0 {
            let bump = [protocol.bump];
            let seeds: &[&[u8]] = &[PROTOCOL_SEED, &bump];
            let signer = &[seeds];

            let cpi_accounts = Transfer {
                from: self.protocol_vault.to_account_info(),
                to: self.destination.to_account_info(),
                authority: protocol.to_account_info(),
            };
            let cpi_ctx = CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                cpi_accounts,
                signer,
            );
            token::transfer(cpi_ctx, amount)?;
        }

        msg!("Withdrew {} protocol fees of mint {}. Remaining: {}", amount, mint, remaining);
        emit!(FundsWithdrawn {
            source: protocol.key(),
            mint,
            amount,
            remaining,
            recipient: self.destination.key(),
        });
        Ok(())
    }
}

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(
        init,
        payer = admin,
        space = Protocol::SPACE,
        seeds = [PROTOCOL_SEED],
        bump
    )]
    pub protocol: Account<'info, Protocol>,
    #[account(mut)]
    pub admin: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct WithdrawProtocolFees<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump,
        has_one = admin @ ErrorCode::Unauthorized
    )]
    pub protocol: Account<'info, Protocol>,

    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = protocol
    )]
    pub protocol_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
