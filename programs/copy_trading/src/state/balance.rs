use anchor_lang::prelude::*;
use crate::constants::MAX_BALANCE_ENTRIES;
use crate::errors::ErrorCode;

/// Accumulated amount of a single coin type, keyed by its mint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceEntry {
    pub mint: Pubkey,
    pub amount: u64,
}

impl BalanceEntry {
    // 32 mint + 8 amount
    pub const SPACE: usize = 32 + 8;
}

/// Mapping from coin type to accumulated amount.
///
/// Mirrors the SPL vault accounts held by the owning record: every token moved
/// into a vault is recorded here under the vault's mint, so balances of
/// different coin types can be read from a single account.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceLedger {
    pub entries: Vec<BalanceEntry>,
}

impl BalanceLedger {
    // 4 vec_len + fixed capacity
    pub const SPACE: usize = 4 + BalanceEntry::SPACE * MAX_BALANCE_ENTRIES;

    /// Upsert-merge: an existing mint is summed in place, a new mint appends an entry.
    pub fn deposit(&mut self, mint: Pubkey, amount: u64) -> Result<u64> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.mint == mint) {
            entry.amount = entry
                .amount
                .checked_add(amount)
                .ok_or(ErrorCode::MathOverflow)?;
            return Ok(entry.amount);
        }

        require!(
            self.entries.len() < MAX_BALANCE_ENTRIES,
            ErrorCode::BalanceLedgerFull
        );
        self.entries.push(BalanceEntry { mint, amount });
        Ok(amount)
    }

    /// Debit `amount` of `mint`. The entry stays in place at zero.
    pub fn withdraw(&mut self, mint: Pubkey, amount: u64) -> Result<u64> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.mint == mint)
            .ok_or(ErrorCode::InsufficientFunds)?;
        entry.amount = entry
            .amount
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        Ok(entry.amount)
    }

    pub fn amount_of(&self, mint: &Pubkey) -> u64 {
        self.entries
            .iter()
            .find(|e| e.mint == *mint)
            .map(|e| e.amount)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn repeated_deposits_of_one_mint_accumulate() {
        let mint = Pubkey::new_unique();
        let mut ledger = BalanceLedger::default();

        ledger.deposit(mint, 5).unwrap();
        let total = ledger.deposit(mint, 7).unwrap();

        assert_eq!(total, 12);
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.amount_of(&mint), 12);
    }

    #[test]
    fn distinct_mints_get_separate_entries() {
        let usdc = Pubkey::new_unique();
        let wsol = Pubkey::new_unique();
        let mut ledger = BalanceLedger::default();

        ledger.deposit(usdc, 100).unwrap();
        ledger.deposit(wsol, 3).unwrap();
        ledger.deposit(usdc, 1).unwrap();

        assert_eq!(ledger.entries.len(), 2);
        assert_eq!(ledger.amount_of(&usdc), 101);
        assert_eq!(ledger.amount_of(&wsol), 3);
        assert_eq!(ledger.amount_of(&Pubkey::new_unique()), 0);
    }

    #[test]
    fn zero_deposit_still_registers_the_mint() {
        let mint = Pubkey::new_unique();
        let mut ledger = BalanceLedger::default();

        ledger.deposit(mint, 0).unwrap();

        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.amount_of(&mint), 0);
    }

    #[test]
    fn ledger_rejects_mints_beyond_capacity() {
        let mut ledger = BalanceLedger::default();
        for _ in 0..MAX_BALANCE_ENTRIES {
            ledger.deposit(Pubkey::new_unique(), 1).unwrap();
        }

        let err = ledger.deposit(Pubkey::new_unique(), 1).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::BalanceLedgerFull));

        // Known mints still merge once full.
        let known = ledger.entries[0].mint;
        assert_eq!(ledger.deposit(known, 4).unwrap(), 5);
    }

    #[test]
    fn deposit_overflow_is_reported() {
        let mint = Pubkey::new_unique();
        let mut ledger = BalanceLedger::default();
        ledger.deposit(mint, u64::MAX).unwrap();

        let err = ledger.deposit(mint, 1).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::MathOverflow));
        assert_eq!(ledger.amount_of(&mint), u64::MAX);
    }

    #[test]
    fn withdraw_debits_and_guards_balance() {
        let mint = Pubkey::new_unique();
        let mut ledger = BalanceLedger::default();
        ledger.deposit(mint, 900).unwrap();

        assert_eq!(ledger.withdraw(mint, 400).unwrap(), 500);

        let err = ledger.withdraw(mint, 501).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::InsufficientFunds));
        assert_eq!(ledger.amount_of(&mint), 500);

        let err = ledger.withdraw(Pubkey::new_unique(), 1).unwrap_err();
        assert_eq!(err, Error::from(ErrorCode::InsufficientFunds));
    }
}
