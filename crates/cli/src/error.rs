use thiserror::Error;

use ledgerbell_core::{AccountId, DomainError};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failures resolving or driving entities held by the directory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no users exist yet")]
    NoUsers,

    #[error("no accounts exist yet")]
    NoAccounts,

    #[error("at least two accounts are required for a transfer")]
    NotEnoughAccounts,

    #[error("user {0:?} not found")]
    UnknownUser(String),

    #[error("account {0} not found")]
    UnknownAccount(AccountId),

    #[error("cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
