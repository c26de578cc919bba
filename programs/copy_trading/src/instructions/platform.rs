use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};
use crate::constants::{PLATFORM_CAP_SEED, PLATFORM_SEED, PROTOCOL_SEED};
use crate::errors::ErrorCode;
use crate::state::*;

impl<'info> CreatePlatform<'info> {
    /// Create a shared platform and hand its capability to the caller.
    pub fn create_platform(&mut self, fee_rate: u64, bumps: &CreatePlatformBumps) -> Result<()> {
        TradingPlatform::validate_fee_rate(fee_rate)?;

        let creator = self.creator.key();
        let platform_key = self.platform.key();
        let protocol = &mut self.protocol;

        let platform = &mut self.platform;
        platform.id = protocol.platform_count;
        platform.creator = creator;
        platform.balances = BalanceLedger::default();
        platform.fee_rate = fee_rate;
        platform.fee_source = FeeSource::Fixed;
        platform.bump = bumps.platform;

        protocol.platform_count = protocol
            .platform_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        let cap = &mut self.platform_cap;
        cap.platform = platform_key;
        cap.owner = creator;
        cap.bump = bumps.platform_cap;

        msg!("Platform {} created with fee rate {}. Cap issued to {}", platform.id, fee_rate, creator);
        emit!(PlatformCreated {
            platform: platform_key,
            id: platform.id,
            fee_rate,
            cap_owner: creator,
        });
        Ok(())
    }
}

/// Every method requires the signer to hold the platform's cap.
impl<'info> PlatformAdmin<'info> {
    pub fn update_fee_rate(&mut self, fee_rate: u64) -> Result<()> {
        TradingPlatform::validate_fee_rate(fee_rate)?;

        let platform = &mut self.platform;
        platform.fee_rate = fee_rate;
        msg!("Platform {} fee rate set to {}", platform.id, fee_rate);

        emit!(FeeRateUpdated {
            platform: platform.key(),
            fee_rate,
            fee_source: platform.fee_source,
        });
        Ok(())
    }

    /// Chooses between the protocol's fixed rate and the stored one.
    pub fn set_fee_source(&mut self, fee_source: FeeSource) -> Result<()> {
        let platform = &mut self.platform;
        platform.fee_source = fee_source;
        msg!(
            "Platform {} fee source set to {:?}. Effective rate: {}",
            platform.id,
            fee_source,
            platform.effective_fee_rate()
        );

        emit!(FeeRateUpdated {
            platform: platform.key(),
            fee_rate: platform.fee_rate,
            fee_source,
        });
        Ok(())
    }

    pub fn transfer_platform_cap(&mut self, new_owner: Pubkey) -> Result<()> {
        let cap = &mut self.platform_cap;
        let previous_owner = cap.owner;
        cap.owner = new_owner;
        msg!("Platform cap moved from {} to {}", previous_owner, new_owner);

        emit!(PlatformCapTransferred {
            platform: cap.platform,
            previous_owner,
            new_owner,
        });
        Ok(())
    }
}

impl<'info> WithdrawPlatformFunds<'info> {
    /// Move net trade proceeds out of the platform vault. Cap holder only.
    pub fn withdraw_platform_funds(&mut self, amount: u64) -> Result<()> {
        let mint = self.mint.key();
        let remaining = self.platform.balances.withdraw(mint, amount)?;

        let platform = &self.platform;
        if amount > 0 {
            let id_bytes = platform.id.to_le_bytes();
            let bump = [platform.bump];
            let seeds: &[&[u8]] = &[PLATFORM_SEED, &id_bytes, &bump];
            let signer = &[seeds];

            let cpi_accounts = Transfer {
                from: self.platform_vault.to_account_info(),
                to: self.destination.to_account_info(),
                authority: platform.to_account_info(),
            };
            let cpi_ctx = CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                cpi_accounts,
                signer,
            );
            token::transfer(cpi_ctx, amount)?;
        }

        msg!("Withdrew {} of mint {} from platform {}. Remaining: {}", amount, mint, platform.id, remaining);
        emit!(FundsWithdrawn {
            source: platform.key(),
            mint,
            amount,
            remaining,
            recipient: self.destination.key(),
        });
        Ok(())
    }
}

#[derive(Accounts)]
pub struct CreatePlatform<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol.bump
    )]
    pub protocol: Account<'info, Protocol>,

    #[account(
        init,
        payer = creator,
        space = TradingPlatform::SPACE,
        seeds = [PLATFORM_SEED, protocol.platform_count.to_le_bytes().as_ref()],
        bump
    )]
    pub platform: Account<'info, TradingPlatform>,

    #[account(
        init,
        payer = creator,
        space = TradingPlatformCap::SPACE,
        seeds = [PLATFORM_CAP_SEED, platform.key().as_ref()],
        bump
    )]
    pub platform_cap: Account<'info, TradingPlatformCap>,

    pub system_program: Program<'info, System>,
}

/// Signer must hold the platform's cap.
#[derive(Accounts)]
pub struct PlatformAdmin<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED, platform.id.to_le_bytes().as_ref()],
        bump = platform.bump
    )]
    pub platform: Account<'info, TradingPlatform>,

    #[account(
        mut,
        seeds = [PLATFORM_CAP_SEED, platform.key().as_ref()],
        bump = platform_cap.bump,
        has_one = platform @ ErrorCode::PlatformMismatch,
        has_one = owner @ ErrorCode::Unauthorized
    )]
    pub platform_cap: Account<'info, TradingPlatformCap>,
}

#[derive(Accounts)]
pub struct WithdrawPlatformFunds<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [PLATFORM_SEED, platform.id.to_le_bytes().as_ref()],
        bump = platform.bump
    )]
    pub platform: Account<'info, TradingPlatform>,

    #[account(
        seeds = [PLATFORM_CAP_SEED, platform.key().as_ref()],
        bump = platform_cap.bump,
        has_one = platform @ ErrorCode::PlatformMismatch,
        has_one = owner @ ErrorCode::Unauthorized
    )]
    pub platform_cap: Account<'info, TradingPlatformCap>,

    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = platform
    )]
    pub platform_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = mint
    )]
    pub destination: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}
