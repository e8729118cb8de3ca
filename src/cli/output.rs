use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

/// Print `payload` in a machine format; returns false for `Human`, which the
/// caller renders itself.
pub fn emit_structured<T: Serialize>(payload: &T, output: &OutputFormat) -> Result<bool> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(payload)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(payload)?),
        OutputFormat::Human => return Ok(false),
    }
    Ok(true)
}
