/// Protocol fee rate, in percent, applied when a platform uses `FeeSource::Fixed`.
/// Independent of the platform's own stored `fee_rate`.
pub const FIXED_FEE_RATE: u64 = 10;

/// Fee rates are expressed in hundredths of the traded amount.
pub const FEE_DENOMINATOR: u64 = 100;

/// Distinct mints a single balance ledger can hold. Account space is fixed at creation.
pub const MAX_BALANCE_ENTRIES: usize = 16;

pub const PROTOCOL_SEED: &[u8] = b"protocol";
pub const PLATFORM_SEED: &[u8] = b"trading_platform";
pub const PLATFORM_CAP_SEED: &[u8] = b"platform_cap";
pub const TRADER_ACCOUNT_SEED: &[u8] = b"trader_account";
