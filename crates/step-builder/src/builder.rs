use action_locator::LocatorSynthesizer;
use command_registry::Command;
use perceiver_dom::{DocumentPort, ElementRef};
use serde::{Deserialize, Serialize};
use step_model::{Step, StepAction, StepFields};
use stepcapture_core_types::{DEFAULT_STEP_TIMEOUT_MS, MAIN_SCOPE};
use tracing::{debug, info};

/// The element a step acts on, together with the document it lives in.
#[derive(Clone, Copy)]
pub struct ElementTarget<'a> {
    pub doc: &'a dyn DocumentPort,
    pub element: ElementRef,
}

impl<'a> ElementTarget<'a> {
    pub fn new(doc: &'a dyn DocumentPort, element: ElementRef) -> Self {
        Self { doc, element }
    }
}

/// Structural defaults, the lowest merge layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDefaults {
    pub scope_hint: String,
    pub timeout_ms: u64,
}

impl Default for StepDefaults {
    fn default() -> Self {
        Self {
            scope_hint: MAIN_SCOPE.to_string(),
            timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepBuilder {
    synth: LocatorSynthesizer,
    defaults: StepDefaults,
}

impl StepBuilder {
    pub fn new(synth: LocatorSynthesizer, defaults: StepDefaults) -> Self {
        Self { synth, defaults }
    }

    pub fn synthesizer(&self) -> &LocatorSynthesizer {
        &self.synth
    }

    pub fn defaults(&self) -> &StepDefaults {
        &self.defaults
    }

    /// Build a step for `key`. `None` when the key is not in the registry.
    pub fn build(
        &self,
        key: &str,
        target: Option<ElementTarget<'_>>,
        observed: Option<&StepFields>,
    ) -> Option<Step> {
        let command = command_registry::lookup(key)?;
        let candidates = self.locate(target);
        let step = self.assemble(command, self.structural_layer(command), observed, candidates);
        info!(
            command = command.key,
            variant = %step.variant(),
            step_id = %step.id(),
            "step built"
        );
        Some(step)
    }

    /// Like [`Self::build`], but a lookup miss yields an undetermined step that
    /// keeps the synthesized locators.
    pub fn build_or_undetermined(
        &self,
        key: &str,
        target: Option<ElementTarget<'_>>,
        observed: Option<&StepFields>,
    ) -> Step {
        if let Some(step) = self.build(key, target, observed) {
            return step;
        }
        debug!(key, "unknown command, emitting undetermined step");
        let label = observed
            .and_then(|fields| fields.label.clone())
            .unwrap_or_default();
        let mut step = self.placeholder(label);
        step.set_locator_candidates(self.locate(target));
        step
    }

    /// A manually authored step awaiting command selection.
    pub fn manual(&self, label: impl Into<String>) -> Step {
        self.placeholder(label.into())
    }

    /// Re-target `step` at another command. The id and locator candidates are
    /// kept, like the step's own label, scope and timeout unless the command or
    /// observed layers say otherwise.
    pub fn rebuild(&self, step: &Step, key: &str, observed: Option<&StepFields>) -> Option<Step> {
        let command = command_registry::lookup(key)?;
        let lowest = StepFields {
            label: Some(if step.label.is_empty() {
                command.label.to_string()
            } else {
                step.label.clone()
            }),
            description: Some(step.description.clone()),
            scope_hint: Some(step.scope_hint.clone()),
            timeout_ms: Some(step.timeout_ms),
            ..StepFields::default()
        };
        let merged = lowest
            .overlay(&command.default_fields)
            .overlay(observed.unwrap_or(&StepFields::default()));

        let mut rebuilt = step.clone();
        rebuilt
            .rebuild(
                command.key.to_string(),
                StepAction::from_fields(command.produces, &merged),
            )
            .ok()?;
        apply_common(&mut rebuilt, &merged);
        info!(
            command = command.key,
            variant = %rebuilt.variant(),
            step_id = %rebuilt.id(),
            "step rebuilt"
        );
        Some(rebuilt)
    }

    fn structural_layer(&self, command: &Command) -> StepFields {
        StepFields {
            label: Some(command.label.to_string()),
            description: Some(String::new()),
            scope_hint: Some(self.defaults.scope_hint.clone()),
            timeout_ms: Some(self.defaults.timeout_ms),
            ..StepFields::default()
        }
    }

    fn assemble(
        &self,
        command: &Command,
        structural: StepFields,
        observed: Option<&StepFields>,
        candidates: Vec<String>,
    ) -> Step {
        let merged = match observed {
            Some(observed) => structural.overlay(&command.default_fields).overlay(observed),
            None => structural.overlay(&command.default_fields),
        };
        let mut step = Step::new(
            Some(command.key.to_string()),
            StepAction::from_fields(command.produces, &merged),
        );
        apply_common(&mut step, &merged);
        step.set_locator_candidates(candidates);
        step
    }

    fn placeholder(&self, label: String) -> Step {
        let mut step = Step::undetermined(label);
        step.scope_hint = self.defaults.scope_hint.clone();
        step.timeout_ms = self.defaults.timeout_ms;
        step
    }

    fn locate(&self, target: Option<ElementTarget<'_>>) -> Vec<String> {
        match target {
            Some(target) => self.synth.synthesize(target.doc, target.element),
            None => Vec::new(),
        }
    }
}

fn apply_common(step: &mut Step, merged: &StepFields) {
    if let Some(label) = &merged.label {
        step.label = label.clone();
    }
    if let Some(description) = &merged.description {
        step.description = description.clone();
    }
    if let Some(scope_hint) = &merged.scope_hint {
        step.scope_hint = scope_hint.clone();
    }
    if let Some(timeout_ms) = merged.timeout_ms {
        step.timeout_ms = timeout_ms;
    }
}
