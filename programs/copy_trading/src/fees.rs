use anchor_lang::prelude::*;
use crate::constants::FEE_DENOMINATOR;
use crate::errors::ErrorCode;

/// A traded amount divided into the protocol's cut and what the platform keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: u64,
    pub net: u64,
}

/// fee = floor(amount * rate / 100), computed in u128 so large amounts cannot overflow.
pub fn split_fee(amount: u64, rate: u64) -> Result<FeeSplit> {
    let fee = (amount as u128)
        .checked_mul(rate as u128)
        .ok_or(ErrorCode::MathOverflow)?
        .checked_div(FEE_DENOMINATOR as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    let fee = u64::try_from(fee).map_err(|_| ErrorCode::MathOverflow)?;

    // Only reachable with a rate above 100, which platform creation refuses.
    require!(amount >= fee, ErrorCode::InsufficientFunds);

    Ok(FeeSplit {
        fee,
        net: amount - fee,
    })
}
