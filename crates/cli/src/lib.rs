//! Interactive front end: the directory of users and accounts, and the
//! numbered text menu that drives it.

pub mod config;
pub mod directory;
pub mod error;
pub mod menu;

pub use config::{CliConfig, ConfigError};
pub use directory::Directory;
pub use error::{DirectoryError, DirectoryResult};
pub use menu::Menu;
