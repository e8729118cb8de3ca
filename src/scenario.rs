//! Scripted capture sessions: a document plus an ordered list of events and
//! inbound signals, replayed through a [`CaptureMachine`].

use std::fmt;
use std::sync::Arc;

use action_locator::LocatorSynthesizer;
use capture_core::{
    CaptureMachine, CaptureMode, DomEvent, InboundSignal, OutboundMessage, RecordingHost,
};
use perceiver_dom::{ElementRef, InMemoryDocument, NodeSpec};
use serde::{Deserialize, Serialize};
use step_builder::StepBuilder;
use stepcapture_event_bus::{drain, EventBus, InMemoryBus};
use tracing::{debug, info};

use crate::config::RecorderConfig;
use crate::errors::ScenarioError;

const BUS_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub document: NodeSpec,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioEvent {
    SetRecording(bool),
    SetPicking(bool),
    FocusIn(String),
    FocusOut(String),
    /// Changes a field's live value without notifying the recorder.
    Input { target: String, value: String },
    /// Selects the option at `selected`, then fires a change event.
    Change { target: String, selected: usize },
    Activate(String),
    /// `None` moves the pointer off every element.
    Hover(Option<String>),
    Navigate(String),
}

impl fmt::Display for ScenarioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioEvent::SetRecording(on) => write!(f, "set_recording({on})"),
            ScenarioEvent::SetPicking(on) => write!(f, "set_picking({on})"),
            ScenarioEvent::FocusIn(target) => write!(f, "focus_in({target})"),
            ScenarioEvent::FocusOut(target) => write!(f, "focus_out({target})"),
            ScenarioEvent::Input { target, value } => write!(f, "input({target}, {value:?})"),
            ScenarioEvent::Change { target, selected } => {
                write!(f, "change({target}, option #{selected})")
            }
            ScenarioEvent::Activate(target) => write!(f, "activate({target})"),
            ScenarioEvent::Hover(Some(target)) => write!(f, "hover({target})"),
            ScenarioEvent::Hover(None) => f.write_str("hover(none)"),
            ScenarioEvent::Navigate(url) => write!(f, "navigate({url})"),
        }
    }
}

impl Scenario {
    /// Parse YAML; JSON documents are valid YAML and parse too.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn build_document(&self) -> Result<InMemoryDocument, ScenarioError> {
        Ok(InMemoryDocument::from_spec(&self.document)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub event: String,
    pub intercepted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<OutboundMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub steps_produced: usize,
    pub final_mode: CaptureMode,
    pub entries: Vec<ReportEntry>,
}

impl ScenarioReport {
    pub fn messages(&self) -> impl Iterator<Item = &OutboundMessage> {
        self.entries.iter().flat_map(|entry| entry.messages.iter())
    }
}

pub fn builder_from(config: &RecorderConfig) -> StepBuilder {
    StepBuilder::new(
        LocatorSynthesizer::new(config.locator.clone()),
        config.steps.clone(),
    )
}

/// Replay `scenario` and collect what the machine published after each event.
pub fn run(scenario: &Scenario, config: &RecorderConfig) -> Result<ScenarioReport, ScenarioError> {
    let mut doc = scenario.build_document()?;
    let bus = InMemoryBus::<OutboundMessage>::new(BUS_CAPACITY);
    let mut rx = bus.subscribe();
    let mut machine = CaptureMachine::new(
        builder_from(config),
        config.capture.clone(),
        RecordingHost::new(),
        Arc::clone(&bus),
    );

    let mut entries = Vec::with_capacity(scenario.events.len());
    for (index, event) in scenario.events.iter().enumerate() {
        debug!(index, %event, "scenario event");
        let resolve = |reference: &str| -> Result<ElementRef, ScenarioError> {
            doc.by_ref(reference).ok_or_else(|| ScenarioError::UnknownRef {
                index,
                reference: reference.to_string(),
            })
        };

        let disposition = match event {
            ScenarioEvent::SetRecording(on) => {
                machine.apply(InboundSignal::SetRecording(*on));
                None
            }
            ScenarioEvent::SetPicking(on) => {
                machine.apply(InboundSignal::SetPicking(*on));
                None
            }
            ScenarioEvent::FocusIn(target) => {
                let element = resolve(target)?;
                Some(machine.handle(&doc, DomEvent::FocusIn(element)))
            }
            ScenarioEvent::FocusOut(target) => {
                let element = resolve(target)?;
                Some(machine.handle(&doc, DomEvent::FocusOut(element)))
            }
            ScenarioEvent::Input { target, value } => {
                let element = resolve(target)?;
                doc.set_value(element, value);
                None
            }
            ScenarioEvent::Change { target, selected } => {
                let element = resolve(target)?;
                doc.set_selected(element, *selected);
                Some(machine.handle(&doc, DomEvent::Change(element)))
            }
            ScenarioEvent::Activate(target) => {
                let element = resolve(target)?;
                Some(machine.handle(&doc, DomEvent::Activation(element)))
            }
            ScenarioEvent::Hover(target) => {
                let element = target.as_deref().map(resolve).transpose()?;
                Some(machine.handle(&doc, DomEvent::PointerMove(element)))
            }
            ScenarioEvent::Navigate(url) => {
                Some(machine.handle(&doc, DomEvent::Navigated(url.clone())))
            }
        };

        entries.push(ReportEntry {
            index,
            event: event.to_string(),
            intercepted: disposition.is_some_and(|d| d.is_intercepted()),
            messages: drain(&mut rx),
        });
    }

    let report = ScenarioReport {
        steps_produced: entries
            .iter()
            .flat_map(|entry| entry.messages.iter())
            .filter(|message| message.as_step().is_some())
            .count(),
        final_mode: machine.mode(),
        entries,
    };
    info!(
        events = scenario.events.len(),
        steps = report.steps_produced,
        mode = %report.final_mode,
        "scenario finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: &str = r#"
document:
  tag: body
  children:
    - tag: input
      ref: email
      attrs: { id: email, type: email }
    - tag: button
      ref: submit
      attrs: { data-testid: login-submit }
events:
  - set_recording: true
  - focus_in: email
  - input: { target: email, value: "me@example.com" }
  - focus_out: email
  - set_picking: true
  - hover: submit
  - activate: submit
  - set_picking: false
"#;

    #[test]
    fn login_scenario_produces_two_steps() {
        let scenario = Scenario::parse(LOGIN).unwrap();
        let report = run(&scenario, &RecorderConfig::default()).unwrap();
        assert_eq!(report.steps_produced, 2);
        assert_eq!(report.final_mode, CaptureMode::Recording);
        assert!(report.entries[6].intercepted);

        let exits = report
            .messages()
            .filter(|m| **m == OutboundMessage::SetPicking(false))
            .count();
        assert_eq!(exits, 1);
    }

    #[test]
    fn unknown_reference_is_reported() {
        let scenario = Scenario::parse(
            "document: { tag: body }\nevents:\n  - set_recording: true\n  - activate: ghost\n",
        )
        .unwrap();
        let err = run(&scenario, &RecorderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::UnknownRef { index: 1, ref reference } if reference == "ghost"
        ));
    }

    #[test]
    fn hover_null_hides_outline() {
        let scenario = Scenario::parse(
            "document: { tag: body }\nevents:\n  - set_picking: true\n  - hover: ~\n",
        )
        .unwrap();
        let report = run(&scenario, &RecorderConfig::default()).unwrap();
        assert_eq!(
            report.entries[1].messages,
            vec![OutboundMessage::Highlight(capture_core::HighlightUpdate::Hide)]
        );
    }
}
