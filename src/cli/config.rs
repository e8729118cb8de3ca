use anyhow::Result;

use crate::cli::context::CliContext;
use crate::cli::output::{emit_structured, OutputFormat};

pub fn cmd_config(ctx: &CliContext, output: OutputFormat) -> Result<()> {
    if emit_structured(ctx.config(), &output)? {
        return Ok(());
    }
    match ctx.config_path() {
        Some(path) => println!("Current configuration ({}):", path.display()),
        None => println!("Current configuration (built-in defaults):"),
    }
    print!("{}", serde_yaml::to_string(ctx.config())?);
    Ok(())
}
