//! Interactive text menu
//!
//! Drives an `AccountStore` from line-based input. Each menu choice maps to
//! exactly one store operation; account-level failures are printed and the
//! menu is shown again. Only storage failures end the session with an error.
//!
//! # Main menu
//!
//! 1. Create Account
//! 2. Access Account (opens the account menu)
//! 3. Delete Account
//! 4. View All Accounts (Manager Only)
//! 5. Exit (saves before leaving)
//!
//! # Account menu
//!
//! 1. View Balance
//! 2. Withdraw Balance
//! 3. Deposit Cash
//! 4. Transfer Cash
//! 5. Change PIN
//! 6. Back to Main Menu
//!
//! End of input is treated like Exit.

mod prompt;

pub use prompt::{parse_amount, parse_pin, read_line};

use crate::core::{AccountStore, StorageBackend};
use crate::types::{BankError, Pin};
use log::debug;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

/// What the menu loop does after handling one choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Back,
    Exit,
}

/// Menu session over an input and an output stream
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Menu { input, output }
    }

    /// Consume the menu, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until Exit or end of input
    ///
    /// # Errors
    ///
    /// Returns storage and I/O errors; every other failure is reported to the
    /// user and the session continues.
    pub fn run<B: StorageBackend>(&mut self, store: &mut AccountStore<B>) -> Result<(), BankError> {
        loop {
            writeln!(self.output, "\n--- ATM System ---")?;
            writeln!(self.output, "1. Create Account")?;
            writeln!(self.output, "2. Access Account")?;
            writeln!(self.output, "3. Delete Account")?;
            writeln!(self.output, "4. View All Accounts (Manager Only)")?;
            writeln!(self.output, "5. Exit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return self.exit(store);
            };

            let flow = match choice.as_str() {
                "1" => self.create_account(store)?,
                "2" => self.access_account(store)?,
                "3" => self.delete_account(store)?,
                "4" => self.show_all_accounts(store)?,
                "5" => Flow::Exit,
                _ => self.invalid_choice(&choice)?,
            };

            if flow == Flow::Exit {
                return self.exit(store);
            }
        }
    }

    fn account_menu<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
        id: &str,
    ) -> Result<Flow, BankError> {
        loop {
            writeln!(self.output, "\n--- Account Menu ---")?;
            writeln!(self.output, "1. View Balance")?;
            writeln!(self.output, "2. Withdraw Balance")?;
            writeln!(self.output, "3. Deposit Cash")?;
            writeln!(self.output, "4. Transfer Cash")?;
            writeln!(self.output, "5. Change PIN")?;
            writeln!(self.output, "6. Back to Main Menu")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(Flow::Exit);
            };

            let flow = match choice.as_str() {
                "1" => self.view_balance(store, id)?,
                "2" => self.withdraw(store, id)?,
                "3" => self.deposit(store, id)?,
                "4" => self.transfer(store, id)?,
                "5" => self.change_pin(store, id)?,
                "6" => Flow::Back,
                _ => self.invalid_choice(&choice)?,
            };

            match flow {
                Flow::Continue => continue,
                Flow::Back => return Ok(Flow::Continue),
                Flow::Exit => return Ok(Flow::Exit),
            }
        }
    }

    fn create_account<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
    ) -> Result<Flow, BankError> {
        let Some(id) = self.prompt("Enter new account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(balance) = self.prompt_amount("Enter initial balance: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = self.prompt_pin("Set a 4-digit PIN: ")? else {
            return Ok(Flow::Exit);
        };

        let (Some(balance), Some(pin)) = (balance, pin) else {
            return self.invalid_number();
        };

        let result = store.create_account(&id, balance, pin);
        self.report(result, "Account created successfully.")
    }

    fn access_account<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
    ) -> Result<Flow, BankError> {
        let Some(id) = self.prompt("Enter your account number: ")? else {
            return Ok(Flow::Exit);
        };

        if let Err(e) = store.access_account(&id) {
            return self.report(Err(e), "");
        }
        self.account_menu(store, &id)
    }

    fn delete_account<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
    ) -> Result<Flow, BankError> {
        let Some(id) = self.prompt("Enter the account number to delete: ")? else {
            return Ok(Flow::Exit);
        };

        let result = store.delete_account(&id);
        self.report(result, &format!("Account {} has been deleted.", id))
    }

    fn show_all_accounts<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
    ) -> Result<Flow, BankError> {
        let Some(pin) = self.prompt_pin("Enter the Manager PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(pin) = pin else {
            return self.invalid_number();
        };

        match store.list_accounts(pin) {
            Ok(accounts) => {
                writeln!(self.output, "\n--- All Accounts ---")?;
                for (id, balance) in accounts {
                    writeln!(
                        self.output,
                        "Account Number: {}, Balance: ${}",
                        id,
                        format_money(balance)
                    )?;
                }
                Ok(Flow::Continue)
            }
            Err(e) => self.report(Err(e), ""),
        }
    }

    fn view_balance<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
        id: &str,
    ) -> Result<Flow, BankError> {
        let balance = store.access_account(id)?.balance();
        writeln!(
            self.output,
            "Your Current Balance is: ${}",
            format_money(balance)
        )?;
        Ok(Flow::Continue)
    }

    fn withdraw<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
        id: &str,
    ) -> Result<Flow, BankError> {
        let Some(pin) = self.prompt_pin("Enter your PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt_amount("Enter the amount to withdraw: ")? else {
            return Ok(Flow::Exit);
        };
        let (Some(pin), Some(amount)) = (pin, amount) else {
            return self.invalid_number();
        };

        let result = store.withdraw(id, amount, pin);
        self.report(result, "Withdrawal successful.")
    }

    fn deposit<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
        id: &str,
    ) -> Result<Flow, BankError> {
        let Some(amount) = self.prompt_amount("Enter the amount to deposit: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = amount else {
            return self.invalid_number();
        };

        let result = store.deposit(id, amount);
        self.report(result, "Deposit successful.")
    }

    fn transfer<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
        id: &str,
    ) -> Result<Flow, BankError> {
        let Some(pin) = self.prompt_pin("Enter your PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(receiver) = self.prompt("Enter the receiver's account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt_amount("Enter the amount to transfer: ")? else {
            return Ok(Flow::Exit);
        };
        let (Some(pin), Some(amount)) = (pin, amount) else {
            return self.invalid_number();
        };

        let result = store.transfer(id, &receiver, amount, pin);
        self.report(result, "Transfer successful.")
    }

    fn change_pin<B: StorageBackend>(
        &mut self,
        store: &mut AccountStore<B>,
        id: &str,
    ) -> Result<Flow, BankError> {
        let Some(old_pin) = self.prompt_pin("Enter your old PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(new_pin) = self.prompt_pin("Enter your new PIN: ")? else {
            return Ok(Flow::Exit);
        };
        let (Some(old_pin), Some(new_pin)) = (old_pin, new_pin) else {
            return self.invalid_number();
        };

        match store.change_pin(id, old_pin, new_pin) {
            Err(BankError::InvalidPin) => {
                writeln!(self.output, "Invalid old PIN.")?;
                Ok(Flow::Continue)
            }
            result => self.report(result, "PIN changed successfully."),
        }
    }

    fn exit<B: StorageBackend>(&mut self, store: &mut AccountStore<B>) -> Result<(), BankError> {
        store.save()?;
        writeln!(self.output, "Exiting... Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print the outcome of a store operation
    ///
    /// Storage and I/O errors are returned; all other errors are shown to the
    /// user. An empty `success` message prints nothing.
    fn report(&mut self, result: Result<(), BankError>, success: &str) -> Result<Flow, BankError> {
        match result {
            Ok(()) => {
                if !success.is_empty() {
                    writeln!(self.output, "{}", success)?;
                }
            }
            Err(e @ (BankError::Io { .. } | BankError::StorageCorrupt { .. })) => return Err(e),
            Err(e) => writeln!(self.output, "{}", user_message(&e))?,
        }
        Ok(Flow::Continue)
    }

    fn invalid_choice(&mut self, choice: &str) -> Result<Flow, BankError> {
        debug!("Invalid menu choice '{choice}'");
        writeln!(self.output, "Invalid choice, please try again.")?;
        Ok(Flow::Continue)
    }

    fn invalid_number(&mut self) -> Result<Flow, BankError> {
        writeln!(self.output, "Invalid number, please try again.")?;
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, BankError> {
        read_line(&mut self.input, &mut self.output, text)
    }

    /// Prompt for an amount; the inner `None` means the input did not parse
    fn prompt_amount(&mut self, text: &str) -> Result<Option<Option<Decimal>>, BankError> {
        Ok(self.prompt(text)?.map(|line| parse_amount(&line)))
    }

    /// Prompt for a PIN; the inner `None` means the input did not parse
    fn prompt_pin(&mut self, text: &str) -> Result<Option<Option<Pin>>, BankError> {
        Ok(self.prompt(text)?.map(|line| parse_pin(&line)))
    }
}

/// Message shown to the user for a rejected operation
pub fn user_message(error: &BankError) -> String {
    match error {
        BankError::InvalidPin => "Invalid PIN.".to_string(),
        BankError::InsufficientBalance { .. } => "Insufficient Balance.".to_string(),
        BankError::AccountNotFound { .. } => "Account not found.".to_string(),
        BankError::AccountAlreadyExists { .. } => "Account already exists.".to_string(),
        BankError::AuthorizationFailed => "Invalid Manager PIN.".to_string(),
        BankError::BalanceOverflow => "Amount too large.".to_string(),
        other => other.to_string(),
    }
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
