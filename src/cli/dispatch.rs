use super::catalog::cmd_commands;
use super::config::cmd_config;
use super::env::CliArgs;
use super::locate::cmd_locate;
use super::record::cmd_record;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    let output = cli.output.clone();
    match cli.command.clone() {
        Commands::Record(args) => cmd_record(args, ctx, output).await,
        Commands::Locate(args) => cmd_locate(args, ctx, output).await,
        Commands::Commands(args) => cmd_commands(args, output),
        Commands::Config => cmd_config(ctx, output),
    }
}
