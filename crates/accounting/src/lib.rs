//! Accounts, their balance-mutation rules, and the users who watch them.
//!
//! Pure domain logic only: no IO besides what an observer chooses to do.

pub mod account;
pub mod shared;
pub mod user;

pub use account::{Account, TransferReceipt, ValidationPolicy};
pub use shared::SharedAccount;
pub use user::User;
