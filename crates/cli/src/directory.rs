//! Owner of every user and account created during a session.

use std::io::Write;
use std::sync::Arc;

use ledgerbell_accounting::{Account, TransferReceipt, User, ValidationPolicy};
use ledgerbell_core::{AccountId, DomainError, IdAllocator, Money};

use crate::error::{DirectoryError, DirectoryResult};

type WriterFactory = Box<dyn Fn() -> Box<dyn Write + Send>>;

/// Users and accounts for the life of the process.
///
/// Accounts are kept in allocation order, which is ascending id order.
pub struct Directory {
    policy: ValidationPolicy,
    ids: IdAllocator,
    users: Vec<Arc<User>>,
    accounts: Vec<Account>,
    user_output: WriterFactory,
}

impl Directory {
    /// Users created here print their notifications to stdout.
    pub fn new(policy: ValidationPolicy) -> Self {
        Self::with_user_output(policy, std::io::stdout)
    }

    /// Users created here print to writers produced by `make_writer`.
    pub fn with_user_output<F, W>(policy: ValidationPolicy, make_writer: F) -> Self
    where
        F: Fn() -> W + 'static,
        W: Write + Send + 'static,
    {
        Self {
            policy,
            ids: IdAllocator::new(),
            users: Vec::new(),
            accounts: Vec::new(),
            user_output: Box::new(move || Box::new(make_writer())),
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn users(&self) -> &[Arc<User>] {
        &self.users
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn create_user(&mut self, name: &str) -> DirectoryResult<Arc<User>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("user name cannot be empty").into());
        }

        let user = Arc::new(User::with_writer(name, (self.user_output)()));
        self.users.push(user.clone());
        tracing::info!(user = %name, "user created");
        Ok(user)
    }

    /// First user registered under exactly `name`.
    pub fn find_user(&self, name: &str) -> Option<&Arc<User>> {
        self.users.iter().find(|u| u.name() == name.trim())
    }

    /// Open an account for an existing user and subscribe that user to it.
    pub fn create_account(
        &mut self,
        user_name: &str,
        initial_balance: Money,
    ) -> DirectoryResult<AccountId> {
        if self.users.is_empty() {
            return Err(DirectoryError::NoUsers);
        }
        let user = self
            .find_user(user_name)
            .cloned()
            .ok_or_else(|| DirectoryError::UnknownUser(user_name.trim().to_string()))?;

        let id = self.ids.allocate()?;
        let mut account = Account::open(id, initial_balance, self.policy)?;
        account.subscribe(user.clone());
        self.accounts.push(account);

        tracing::info!(account_id = %id, user = %user.name(), balance = %initial_balance, "account created");
        Ok(id)
    }

    pub fn account(&self, id: AccountId) -> DirectoryResult<&Account> {
        let idx = self.index_of(id)?;
        Ok(&self.accounts[idx])
    }

    pub fn balance(&self, id: AccountId) -> DirectoryResult<Money> {
        Ok(self.account(id)?.balance())
    }

    pub fn deposit(&mut self, id: AccountId, amount: Money) -> DirectoryResult<Money> {
        Ok(self.account_mut(id)?.deposit(amount)?)
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Money) -> DirectoryResult<Money> {
        Ok(self.account_mut(id)?.withdraw(amount)?)
    }

    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Money,
    ) -> DirectoryResult<TransferReceipt> {
        if self.accounts.len() < 2 {
            return Err(DirectoryError::NotEnoughAccounts);
        }
        let source = self.index_of(from)?;
        let target = self.index_of(to)?;
        if source == target {
            return Err(DirectoryError::SameAccount(from));
        }

        let (source, target) = self.pair_mut(source, target);
        Ok(source.transfer(amount, target)?)
    }

    fn index_of(&self, id: AccountId) -> DirectoryResult<usize> {
        if self.accounts.is_empty() {
            return Err(DirectoryError::NoAccounts);
        }
        self.accounts
            .binary_search_by_key(&id, Account::id_typed)
            .map_err(|_| DirectoryError::UnknownAccount(id))
    }

    fn account_mut(&mut self, id: AccountId) -> DirectoryResult<&mut Account> {
        let idx = self.index_of(id)?;
        Ok(&mut self.accounts[idx])
    }

    fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Account, &mut Account) {
        if a < b {
            let (left, right) = self.accounts.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.accounts.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }
}

impl core::fmt::Debug for Directory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Directory")
            .field("policy", &self.policy)
            .field("users", &self.users)
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}
