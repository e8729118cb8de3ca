use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use capture_core::{HighlightUpdate, OutboundMessage};
use clap::Args;
use step_model::Step;
use tokio::fs;

use crate::cli::context::CliContext;
use crate::cli::output::{emit_structured, OutputFormat};
use crate::scenario::{self, Scenario};

#[derive(Args, Clone, Debug)]
pub struct RecordArgs {
    /// Scenario file (YAML or JSON)
    pub scenario: PathBuf,

    /// Print only the produced steps
    #[arg(long)]
    pub steps_only: bool,
}

pub async fn cmd_record(args: RecordArgs, ctx: &CliContext, output: OutputFormat) -> Result<()> {
    let scenario = read_scenario(&args.scenario).await?;
    let report = scenario::run(&scenario, ctx.config())
        .with_context(|| format!("Failed to run scenario {}", args.scenario.display()))?;

    if args.steps_only {
        let steps: Vec<&Step> = report.messages().filter_map(OutboundMessage::as_step).collect();
        if !emit_structured(&steps, &output)? {
            for step in steps {
                println!("{}", describe_step(step));
            }
        }
        return Ok(());
    }

    if emit_structured(&report, &output)? {
        return Ok(());
    }

    for entry in &report.entries {
        let marker = if entry.intercepted { " [intercepted]" } else { "" };
        println!("#{} {}{}", entry.index, entry.event, marker);
        for message in &entry.messages {
            println!("    -> {}", describe_message(message));
        }
    }
    println!(
        "{} step(s) produced, final mode: {}",
        report.steps_produced, report.final_mode
    );
    Ok(())
}

pub async fn read_scenario(path: &Path) -> Result<Scenario> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    Scenario::parse(&content).with_context(|| format!("Failed to parse scenario {}", path.display()))
}

fn describe_message(message: &OutboundMessage) -> String {
    match message {
        OutboundMessage::StepProduced(step) => describe_step(step),
        OutboundMessage::SetPicking(on) => format!("set_picking({on})"),
        OutboundMessage::Highlight(HighlightUpdate::Show(rect)) => format!(
            "highlight at ({}, {}) {}x{}",
            rect.x, rect.y, rect.width, rect.height
        ),
        OutboundMessage::Highlight(HighlightUpdate::Hide) => "highlight hidden".to_string(),
    }
}

fn describe_step(step: &Step) -> String {
    format!(
        "step {} [{}] locator={}",
        step.command_key().unwrap_or("-"),
        step.variant(),
        step.primary_locator().unwrap_or("<none>")
    )
}
