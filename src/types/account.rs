//! Account-related types for the ATM bank
//!
//! This module defines the Account structure and the balance and PIN
//! operations performed on a single account.

use super::error::BankError;
use rust_decimal::Decimal;

/// Account identifier
pub type AccountId = String;

/// Account or manager PIN
///
/// Intended to be 4 digits; compared by equality only, no format validation.
pub type Pin = u32;

/// PIN assigned when an account is created without one
pub const DEFAULT_PIN: Pin = 1234;

/// Single account state
///
/// Holds the mutable balance and PIN of one account. Failed operations never
/// mutate the account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    balance: Decimal,
    pin: Pin,
}

impl Account {
    /// Create an account with the given opening balance and PIN
    pub fn new(balance: Decimal, pin: Pin) -> Self {
        Account { balance, pin }
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub(crate) fn pin(&self) -> Pin {
        self.pin
    }

    /// Withdraw `amount`, reporting why the withdrawal was rejected
    ///
    /// # Errors
    ///
    /// - `InvalidPin` if `pin` does not match
    /// - `InsufficientBalance` if `amount` exceeds the balance
    /// - `BalanceOverflow` if a negative `amount` pushes the balance out of range
    ///
    /// Negative amounts are not rejected.
    pub fn try_withdraw(&mut self, amount: Decimal, pin: Pin) -> Result<(), BankError> {
        if pin != self.pin {
            return Err(BankError::InvalidPin);
        }
        if amount > self.balance {
            return Err(BankError::insufficient_balance(self.balance, amount));
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::BalanceOverflow)?;
        Ok(())
    }

    /// Withdraw `amount`, returning `false` without mutation on a wrong PIN or
    /// insufficient balance
    pub fn withdraw(&mut self, amount: Decimal, pin: Pin) -> bool {
        self.try_withdraw(amount, pin).is_ok()
    }

    /// Credit `amount`, failing only if the balance would leave the `Decimal` range
    pub fn try_deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow)?;
        Ok(())
    }

    /// Credit `amount`; an out-of-range result leaves the balance unchanged
    pub fn deposit(&mut self, amount: Decimal) {
        self.try_deposit(amount).ok();
    }

    /// Move `amount` from this account to an already-resolved `receiver`
    ///
    /// The receiver is credited only if the withdrawal from this account
    /// succeeds; on failure neither account changes.
    pub fn try_transfer(
        &mut self,
        amount: Decimal,
        receiver: &mut Account,
        pin: Pin,
    ) -> Result<(), BankError> {
        if pin != self.pin {
            return Err(BankError::InvalidPin);
        }
        let credited = receiver
            .balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow)?;

        self.try_withdraw(amount, pin)?;
        receiver.balance = credited;
        Ok(())
    }

    /// Boolean form of [`Account::try_transfer`]
    pub fn transfer(&mut self, amount: Decimal, receiver: &mut Account, pin: Pin) -> bool {
        self.try_transfer(amount, receiver, pin).is_ok()
    }

    /// Replace the PIN if `old_pin` matches, reporting a mismatch
    pub fn try_change_pin(&mut self, old_pin: Pin, new_pin: Pin) -> Result<(), BankError> {
        if old_pin != self.pin {
            return Err(BankError::InvalidPin);
        }
        self.pin = new_pin;
        Ok(())
    }

    /// Replace the PIN if `old_pin` matches; otherwise no change
    pub fn change_pin(&mut self, old_pin: Pin, new_pin: Pin) {
        self.try_change_pin(old_pin, new_pin).ok();
    }
}

impl Default for Account {
    fn default() -> Self {
        Account::new(Decimal::ZERO, DEFAULT_PIN)
    }
}
