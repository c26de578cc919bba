use anchor_lang::prelude::*;
use crate::constants::{FEE_DENOMINATOR, FIXED_FEE_RATE};
use crate::errors::ErrorCode;
use super::BalanceLedger;

/// Which rate a platform charges on each trade.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeeSource {
    /// The module-wide `FIXED_FEE_RATE`, regardless of the stored rate.
    #[default]
    Fixed,
    /// The platform's own `fee_rate`.
    Platform,
}

/// Shared trading venue. Holds the net proceeds of every trade routed through it.
#[account]
pub struct TradingPlatform {
    /// Internal id, also the PDA seed.
    pub id: u64,
    pub creator: Pubkey,
    pub balances: BalanceLedger,
    /// Percent of each trade, `0..=100`.
    pub fee_rate: u64,
    pub fee_source: FeeSource,
    pub bump: u8,
}

impl TradingPlatform {
    // 8 discriminator + 8 id + 32 creator + ledger + 8 fee_rate + 1 fee_source + 1 bump
    pub const SPACE: usize = 8 + 8 + 32 + BalanceLedger::SPACE + 8 + 1 + 1;

    pub fn effective_fee_rate(&self) -> u64 {
        match self.fee_source {
            FeeSource::Fixed => FIXED_FEE_RATE,
            FeeSource::Platform => self.fee_rate,
        }
    }

    pub fn validate_fee_rate(fee_rate: u64) -> Result<()> {
        require!(fee_rate <= FEE_DENOMINATOR, ErrorCode::InvalidFeeRate);
        Ok(())
    }
}

/// Proof of authority over one platform. Transferable; never consumed.
#[account]
pub struct TradingPlatformCap {
    pub platform: Pubkey,
    pub owner: Pubkey,
    pub bump: u8,
}

impl TradingPlatformCap {
    // 8 discriminator + 32 platform + 32 owner + 1 bump
    pub const SPACE: usize = 8 + 32 + 32 + 1;
}

#[event]
pub struct PlatformCreated {
    pub platform: Pubkey,
    pub id: u64,
    pub fee_rate: u64,
    pub cap_owner: Pubkey,
}

#[event]
pub struct FeeRateUpdated {
    pub platform: Pubkey,
    pub fee_rate: u64,
    pub fee_source: FeeSource,
}

#[event]
pub struct PlatformCapTransferred {
    pub platform: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn platform(fee_rate: u64, fee_source: FeeSource) -> TradingPlatform {
        TradingPlatform {
            id: 0,
            creator: Pubkey::new_unique(),
            balances: BalanceLedger::default(),
            fee_rate,
            fee_source,
            bump: 255,
        }
    }

    #[test]
    fn fixed_source_ignores_stored_rate() {
        assert_eq!(platform(5, FeeSource::Fixed).effective_fee_rate(), FIXED_FEE_RATE);
    }

    #[test]
    fn platform_source_uses_stored_rate() {
        assert_eq!(platform(5, FeeSource::Platform).effective_fee_rate(), 5);
    }

    #[test]
    fn fee_rate_is_capped_at_denominator() {
        assert!(TradingPlatform::validate_fee_rate(0).is_ok());
        assert!(TradingPlatform::validate_fee_rate(FEE_DENOMINATOR).is_ok());
        let err = TradingPlatform::validate_fee_rate(FEE_DENOMINATOR + 1).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::InvalidFeeRate));
    }
}
