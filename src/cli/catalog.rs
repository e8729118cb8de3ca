use anyhow::Result;
use clap::Args;
use command_registry::Command;
use step_model::StepVariant;

use crate::cli::output::{emit_structured, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct CommandsArgs {
    /// Only list commands producing this step variant (e.g. `typeText`)
    #[arg(long)]
    pub variant: Option<String>,
}

pub fn cmd_commands(args: CommandsArgs, output: OutputFormat) -> Result<()> {
    let variant = args
        .variant
        .as_deref()
        .map(str::parse::<StepVariant>)
        .transpose()?;
    let commands: Vec<&Command> = match variant {
        Some(variant) => command_registry::by_variant(variant).collect(),
        None => command_registry::all().iter().collect(),
    };

    if emit_structured(&commands, &output)? {
        return Ok(());
    }
    for command in &commands {
        let scope = if command.element_scoped { "element" } else { "page" };
        println!(
            "{:<24} {:<26} {:<8} {}",
            command.key,
            command.produces.as_str(),
            scope,
            command.label
        );
    }
    println!("{} command(s)", commands.len());
    Ok(())
}
