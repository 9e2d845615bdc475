//! Token ledger seam.
//!
//! The machine never owns balances; it moves funds through a [`TokenLedger`]
//! between participants and its own pool account. [`transfer`] and
//! [`transfer_from`] run every check before touching the ledger, so a failed
//! movement leaves balances and allowances untouched.

use std::collections::BTreeMap;

use pinocchio::error::ProgramError;

use crate::{
    errors::LotteryError,
    state::{Amount, Pubkey},
};

pub trait TokenLedger {
    fn balance_of(&self, account: &Pubkey) -> Amount;

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> Amount;

    fn debit(&mut self, account: &Pubkey, amount: Amount) -> Result<(), ProgramError>;

    fn credit(&mut self, account: &Pubkey, amount: Amount) -> Result<(), ProgramError>;

    fn spend_allowance(
        &mut self,
        owner: &Pubkey,
        spender: &Pubkey,
        amount: Amount,
    ) -> Result<(), ProgramError>;
}

pub fn transfer<L: TokenLedger + ?Sized>(
    ledger: &mut L,
    from: &Pubkey,
    to: &Pubkey,
    amount: Amount,
) -> Result<(), ProgramError> {
    ensure_transferable(ledger, from, to, amount)?;
    if amount == 0 {
        return Ok(());
    }
    ledger.debit(from, amount)?;
    ledger.credit(to, amount)
}

/// Moves `amount` from `owner` to `to`, spending `spender`'s allowance.
pub fn transfer_from<L: TokenLedger + ?Sized>(
    ledger: &mut L,
    owner: &Pubkey,
    spender: &Pubkey,
    to: &Pubkey,
    amount: Amount,
) -> Result<(), ProgramError> {
    if ledger.allowance(owner, spender) < amount {
        return Err(LotteryError::InsufficientAllowance.into());
    }
    ensure_transferable(ledger, owner, to, amount)?;
    if amount == 0 {
        return Ok(());
    }
    ledger.spend_allowance(owner, spender, amount)?;
    ledger.debit(owner, amount)?;
    ledger.credit(to, amount)
}

fn ensure_transferable<L: TokenLedger + ?Sized>(
    ledger: &L,
    from: &Pubkey,
    to: &Pubkey,
    amount: Amount,
) -> Result<(), ProgramError> {
    if ledger.balance_of(from) < amount {
        return Err(LotteryError::InsufficientBalance.into());
    }
    if from != to {
        ledger
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
    }
    Ok(())
}

/// Reference ledger kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<Pubkey, Amount>,
    allowances: BTreeMap<(Pubkey, Pubkey), Amount>,
    total_supply: Amount,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self, account: &Pubkey, amount: Amount) -> Result<(), ProgramError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
        self.credit(account, amount)?;
        self.total_supply = total_supply;
        Ok(())
    }

    pub fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: Amount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, account: &Pubkey) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    fn debit(&mut self, account: &Pubkey, amount: Amount) -> Result<(), ProgramError> {
        let balance = self.balance_of(account);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(LotteryError::InsufficientBalance)?;
        self.balances.insert(*account, remaining);
        Ok(())
    }

    fn credit(&mut self, account: &Pubkey, amount: Amount) -> Result<(), ProgramError> {
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
        self.balances.insert(*account, balance);
        Ok(())
    }

    fn spend_allowance(
        &mut self,
        owner: &Pubkey,
        spender: &Pubkey,
        amount: Amount,
    ) -> Result<(), ProgramError> {
        let remaining = self
            .allowance(owner, spender)
            .checked_sub(amount)
            .ok_or(LotteryError::InsufficientAllowance)?;
        self.allowances.insert((*owner, *spender), remaining);
        Ok(())
    }
}
