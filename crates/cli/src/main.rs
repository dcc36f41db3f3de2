use anyhow::Context;

use ledgerbell_cli::{CliConfig, Directory, Menu};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env().context("invalid configuration")?;
    ledgerbell_observability::init(config.log_format, &config.log_filter);

    tracing::info!(validation = ?config.validation, "starting ledgerbell");

    let stdin = std::io::stdin();
    let mut menu = Menu::new(
        Directory::new(config.validation),
        stdin.lock(),
        std::io::stdout(),
    );
    menu.run().context("terminal I/O failed")?;

    let directory = menu.directory();
    tracing::info!(
        users = directory.users().len(),
        accounts = directory.accounts().len(),
        "session ended"
    );
    Ok(())
}
