use clap::Subcommand;

use super::catalog::CommandsArgs;
use super::locate::LocateArgs;
use super::record::RecordArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Replay a scripted scenario through the capture machine
    Record(RecordArgs),

    /// Show locator candidates for one element of a scenario document
    Locate(LocateArgs),

    /// List the command catalogue
    Commands(CommandsArgs),

    /// Show the effective configuration
    Config,
}
