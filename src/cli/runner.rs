use anyhow::Result;
use clap::Parser;

use super::{Cli, Commands};
use crate::cli_cmds::*;
use crate::settings::SettingsStore;

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();

    let store = SettingsStore::new(cli.config.unwrap_or_else(SettingsStore::default_path));

    match cli.command.unwrap_or(Commands::Run { now: false }) {
        Commands::Run { now } => {
            cmd_run(store, cli.dir, now).await?;
        }
        Commands::Once => {
            cmd_once(store, cli.dir).await?;
        }
        Commands::Status { json } => {
            cmd_status(&store, cli.dir.as_deref(), json)?;
        }
        Commands::Reset => {
            cmd_reset(&store)?;
        }
        Commands::Interval { min, max } => {
            cmd_interval(&store, min, max)?;
        }
    }

    Ok(())
}
