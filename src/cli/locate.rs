use std::path::PathBuf;

use action_locator::{LocatorCandidate, LocatorSynthesizer};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::{emit_structured, OutputFormat};
use crate::cli::record::read_scenario;

#[derive(Args, Clone, Debug)]
pub struct LocateArgs {
    /// Scenario file whose document is searched
    pub scenario: PathBuf,

    /// `ref` of the element to locate
    #[arg(short, long)]
    pub target: String,
}

#[derive(Serialize)]
struct LocateReport {
    target: String,
    candidates: Vec<LocatorCandidate>,
}

pub async fn cmd_locate(args: LocateArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let scenario = read_scenario(&args.scenario).await?;
    let doc = scenario.build_document()?;
    let element = doc
        .by_ref(&args.target)
        .with_context(|| format!("No element with ref '{}' in scenario document", args.target))?;

    let synth = LocatorSynthesizer::new(ctx.config().locator.clone());
    let report = LocateReport {
        candidates: synth.synthesize_detailed(&doc, element),
        target: args.target,
    };

    if emit_structured(&report, &output)? {
        return Ok(());
    }
    if report.candidates.is_empty() {
        println!("{}: no unique locator found", report.target);
        return Ok(());
    }
    for (idx, candidate) in report.candidates.iter().enumerate() {
        println!(
            "{}. {}  ({})",
            idx + 1,
            candidate.selector,
            candidate.strategy.name()
        );
    }
    Ok(())
}
