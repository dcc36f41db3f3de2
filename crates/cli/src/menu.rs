//! Numbered text menu over a [`Directory`].

use std::io::{self, BufRead, Write};

use ledgerbell_core::{AccountId, DomainError, Money};

use crate::directory::Directory;
use crate::error::DirectoryError;

const MENU: &str = "\n========== Bank System ==========\n\
1. Create User\n\
2. Create Account\n\
3. Deposit\n\
4. Withdraw\n\
5. Transfer\n\
6. Check Balance\n\
7. Exit\n";

/// Prompt and error messages for reading one account id.
struct AccountPrompt {
    prompt: &'static str,
    invalid: &'static str,
    not_found: &'static str,
}

const ACCOUNT: AccountPrompt = AccountPrompt {
    prompt: "Enter account ID: ",
    invalid: "Invalid account ID.",
    not_found: "Account not found.",
};

const SOURCE_ACCOUNT: AccountPrompt = AccountPrompt {
    prompt: "Enter source account ID: ",
    invalid: "Invalid source account ID.",
    not_found: "Source account not found.",
};

const TARGET_ACCOUNT: AccountPrompt = AccountPrompt {
    prompt: "Enter target account ID: ",
    invalid: "Invalid target account ID.",
    not_found: "Target account not found.",
};

/// Interactive loop reading commands from `input` and echoing to `output`.
///
/// End of input behaves like choosing Exit.
pub struct Menu<R, W> {
    directory: Directory,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(directory: Directory, input: R, output: W) -> Self {
        Self {
            directory,
            input,
            output,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn into_parts(self) -> (Directory, W) {
        (self.directory, self.output)
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter option number: ")? else {
                writeln!(self.output, "Exiting...")?;
                return Ok(());
            };

            match line.parse::<i64>() {
                Ok(1) => self.create_user()?,
                Ok(2) => self.create_account()?,
                Ok(3) => self.deposit()?,
                Ok(4) => self.withdraw()?,
                Ok(5) => self.transfer()?,
                Ok(6) => self.check_balance()?,
                Ok(7) => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                Ok(_) => writeln!(self.output, "Invalid option. Please try again.")?,
                Err(_) => writeln!(self.output, "Invalid input. Please try again.")?,
            }
        }
    }

    fn create_user(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Enter user name: ")? else {
            return Ok(());
        };
        match self.directory.create_user(&name) {
            Ok(user) => writeln!(self.output, "User {} created successfully.", user.name()),
            Err(err) => self.report(&err),
        }
    }

    fn create_account(&mut self) -> io::Result<()> {
        if self.directory.users().is_empty() {
            return writeln!(self.output, "No users found. Please create a user first.");
        }
        let Some(name) = self.prompt("Enter user name: ")? else {
            return Ok(());
        };
        if self.directory.find_user(&name).is_none() {
            return writeln!(self.output, "User not found.");
        }
        let Some(balance) = self.read_amount("Enter initial balance: ", "Invalid balance amount.")?
        else {
            return Ok(());
        };
        match self.directory.create_account(&name, balance) {
            Ok(id) => writeln!(self.output, "Account created successfully. Account ID: {id}"),
            Err(err) => self.report(&err),
        }
    }

    fn deposit(&mut self) -> io::Result<()> {
        let Some(id) = self.read_existing_account(&ACCOUNT)? else {
            return Ok(());
        };
        let Some(amount) = self.read_amount("Enter deposit amount: ", "Invalid deposit amount.")?
        else {
            return Ok(());
        };
        match self.directory.deposit(id, amount) {
            Ok(_) => writeln!(self.output, "Deposit successful."),
            Err(err) => self.report(&err),
        }
    }

    fn withdraw(&mut self) -> io::Result<()> {
        let Some(id) = self.read_existing_account(&ACCOUNT)? else {
            return Ok(());
        };
        let Some(amount) =
            self.read_amount("Enter withdrawal amount: ", "Invalid withdrawal amount.")?
        else {
            return Ok(());
        };
        match self.directory.withdraw(id, amount) {
            Ok(_) => writeln!(self.output, "Withdrawal successful."),
            Err(err) => self.report(&err),
        }
    }

    fn transfer(&mut self) -> io::Result<()> {
        if self.directory.accounts().len() < 2 {
            return writeln!(
                self.output,
                "At least two accounts are required to perform a transfer."
            );
        }
        let Some(from) = self.read_existing_account(&SOURCE_ACCOUNT)? else {
            return Ok(());
        };
        let Some(to) = self.read_existing_account(&TARGET_ACCOUNT)? else {
            return Ok(());
        };
        let Some(amount) = self.read_amount("Enter transfer amount: ", "Invalid transfer amount.")?
        else {
            return Ok(());
        };
        match self.directory.transfer(from, to, amount) {
            Ok(_) => writeln!(self.output, "Transfer successful."),
            Err(err) => self.report(&err),
        }
    }

    fn check_balance(&mut self) -> io::Result<()> {
        let Some(id) = self.read_existing_account(&ACCOUNT)? else {
            return Ok(());
        };
        match self.directory.balance(id) {
            Ok(balance) => writeln!(self.output, "Account balance: {balance}"),
            Err(err) => self.report(&err),
        }
    }

    /// Prompt for an account id and resolve it.
    ///
    /// Any integer is a well-formed id; zero, negative and unallocated ids
    /// are reported as not found. Returns `None` (after telling the user
    /// why) when there is nothing to act on.
    fn read_existing_account(&mut self, messages: &AccountPrompt) -> io::Result<Option<AccountId>> {
        if self.directory.accounts().is_empty() {
            writeln!(self.output, "No accounts found. Please create an account first.")?;
            return Ok(None);
        }
        let Some(raw) = self.prompt(messages.prompt)? else {
            return Ok(None);
        };
        let Ok(raw_id) = raw.parse::<i64>() else {
            writeln!(self.output, "{}", messages.invalid)?;
            return Ok(None);
        };
        let id = u64::try_from(raw_id)
            .ok()
            .and_then(|raw_id| AccountId::try_from(raw_id).ok())
            .filter(|id| self.directory.account(*id).is_ok());
        if id.is_none() {
            writeln!(self.output, "{}", messages.not_found)?;
        }
        Ok(id)
    }

    fn read_amount(&mut self, prompt: &str, invalid: &str) -> io::Result<Option<Money>> {
        let Some(raw) = self.prompt(prompt)? else {
            return Ok(None);
        };
        match raw.parse::<Money>() {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.output, "{invalid}")?;
                Ok(None)
            }
        }
    }

    /// Write `text`, then read one trimmed line. `None` on end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, err: &DirectoryError) -> io::Result<()> {
        tracing::debug!(error = %err, "menu operation rejected");
        match err {
            DirectoryError::Domain(DomainError::InsufficientFunds {
                requested,
                available,
            }) => writeln!(
                self.output,
                "Insufficient funds: requested {requested}, available {available}."
            ),
            DirectoryError::Domain(DomainError::Validation(msg)) => {
                writeln!(self.output, "Rejected: {msg}.")
            }
            DirectoryError::SameAccount(_) => {
                writeln!(self.output, "Source and target accounts must differ.")
            }
            other => writeln!(self.output, "Error: {other}."),
        }
    }
}
