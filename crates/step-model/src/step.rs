use serde::{Deserialize, Serialize};
use stepcapture_core_types::{StepId, DEFAULT_STEP_TIMEOUT_MS, MAIN_SCOPE};

use crate::errors::StepError;
use crate::fields::StepFields;
use crate::variant::{
    Comparator, MouseButton, NavigationKind, SelectBy, StepVariant, TextInputMode, TouchKind,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatePayload {
    pub url: String,
    pub navigation: NavigationKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickPayload {
    pub button: MouseButton,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeTextPayload {
    pub text: String,
    pub input_mode: TextInputMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPayload {
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollPayload {
    pub delta_x: i64,
    pub delta_y: i64,
    pub into_view: bool,
}

/// Predicate over one property of the target element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementConditionPayload {
    pub property: String,
    pub comparator: Comparator,
    pub expected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToPayload {
    pub offset_x: i64,
    pub offset_y: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragAndDropPayload {
    pub drop_target: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPayload {
    pub script: String,
    pub is_async: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePayload {
    pub other_locator: String,
    pub property: String,
    pub comparator: Comparator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotPayload {
    pub file_name: String,
    pub full_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptionPayload {
    pub select_by: SelectBy,
    pub option_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPayload {
    pub touch: TouchKind,
}

/// Page-level predicate (`url contains "/done"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitUntilPayload {
    pub condition: String,
    pub comparator: Comparator,
    pub expected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PausePayload {
    pub duration_ms: u64,
}

/// Variant-specific payload. The tag is the step's authoritative discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum StepAction {
    Navigate(NavigatePayload),
    Click(ClickPayload),
    DoubleClick,
    TypeText(TypeTextPayload),
    KeyDown(KeyPayload),
    KeyUp(KeyPayload),
    Scroll(ScrollPayload),
    WaitForElementCondition(ElementConditionPayload),
    MoveTo(MoveToPayload),
    DragAndDrop(DragAndDropPayload),
    ExecuteScript(ScriptPayload),
    CompareElements(ComparePayload),
    SaveScreenshot(ScreenshotPayload),
    SelectOption(SelectOptionPayload),
    TouchAction(TouchPayload),
    WaitUntilCondition(WaitUntilPayload),
    Pause(PausePayload),
    Debug,
    Undetermined,
}

impl StepAction {
    pub fn variant(&self) -> StepVariant {
        match self {
            StepAction::Navigate(_) => StepVariant::Navigate,
            StepAction::Click(_) => StepVariant::Click,
            StepAction::DoubleClick => StepVariant::DoubleClick,
            StepAction::TypeText(_) => StepVariant::TypeText,
            StepAction::KeyDown(_) => StepVariant::KeyDown,
            StepAction::KeyUp(_) => StepVariant::KeyUp,
            StepAction::Scroll(_) => StepVariant::Scroll,
            StepAction::WaitForElementCondition(_) => StepVariant::WaitForElementCondition,
            StepAction::MoveTo(_) => StepVariant::MoveTo,
            StepAction::DragAndDrop(_) => StepVariant::DragAndDrop,
            StepAction::ExecuteScript(_) => StepVariant::ExecuteScript,
            StepAction::CompareElements(_) => StepVariant::CompareElements,
            StepAction::SaveScreenshot(_) => StepVariant::SaveScreenshot,
            StepAction::SelectOption(_) => StepVariant::SelectOption,
            StepAction::TouchAction(_) => StepVariant::TouchAction,
            StepAction::WaitUntilCondition(_) => StepVariant::WaitUntilCondition,
            StepAction::Pause(_) => StepVariant::Pause,
            StepAction::Debug => StepVariant::Debug,
            StepAction::Undetermined => StepVariant::Undetermined,
        }
    }

    /// Build the payload for `variant` from merged fields.
    ///
    /// Fields still missing take the payload type's zero value; fields that do
    /// not belong to the variant are ignored.
    pub fn from_fields(variant: StepVariant, fields: &StepFields) -> Self {
        let s = |v: &Option<String>| v.clone().unwrap_or_default();
        match variant {
            StepVariant::Navigate => StepAction::Navigate(NavigatePayload {
                url: s(&fields.url),
                navigation: fields.navigation.unwrap_or_default(),
            }),
            StepVariant::Click => StepAction::Click(ClickPayload {
                button: fields.button.unwrap_or_default(),
            }),
            StepVariant::DoubleClick => StepAction::DoubleClick,
            StepVariant::TypeText => StepAction::TypeText(TypeTextPayload {
                text: s(&fields.text),
                input_mode: fields.input_mode.unwrap_or_default(),
            }),
            StepVariant::KeyDown => StepAction::KeyDown(KeyPayload {
                key: s(&fields.key),
            }),
            StepVariant::KeyUp => StepAction::KeyUp(KeyPayload {
                key: s(&fields.key),
            }),
            StepVariant::Scroll => StepAction::Scroll(ScrollPayload {
                delta_x: fields.delta_x.unwrap_or_default(),
                delta_y: fields.delta_y.unwrap_or_default(),
                into_view: fields.into_view.unwrap_or_default(),
            }),
            StepVariant::WaitForElementCondition => {
                StepAction::WaitForElementCondition(ElementConditionPayload {
                    property: s(&fields.property),
                    comparator: fields.comparator.unwrap_or_default(),
                    expected: s(&fields.expected),
                })
            }
            StepVariant::MoveTo => StepAction::MoveTo(MoveToPayload {
                offset_x: fields.offset_x.unwrap_or_default(),
                offset_y: fields.offset_y.unwrap_or_default(),
            }),
            StepVariant::DragAndDrop => StepAction::DragAndDrop(DragAndDropPayload {
                drop_target: s(&fields.drop_target),
                duration_ms: fields.duration_ms.unwrap_or_default(),
            }),
            StepVariant::ExecuteScript => StepAction::ExecuteScript(ScriptPayload {
                script: s(&fields.script),
                is_async: fields.is_async.unwrap_or_default(),
            }),
            StepVariant::CompareElements => StepAction::CompareElements(ComparePayload {
                other_locator: s(&fields.other_locator),
                property: s(&fields.property),
                comparator: fields.comparator.unwrap_or_default(),
            }),
            StepVariant::SaveScreenshot => StepAction::SaveScreenshot(ScreenshotPayload {
                file_name: s(&fields.file_name),
                full_page: fields.full_page.unwrap_or_default(),
            }),
            StepVariant::SelectOption => StepAction::SelectOption(SelectOptionPayload {
                select_by: fields.select_by.unwrap_or_default(),
                option_value: s(&fields.option_value),
            }),
            StepVariant::TouchAction => StepAction::TouchAction(TouchPayload {
                touch: fields.touch.unwrap_or_default(),
            }),
            StepVariant::WaitUntilCondition => StepAction::WaitUntilCondition(WaitUntilPayload {
                condition: s(&fields.condition),
                comparator: fields.comparator.unwrap_or_default(),
                expected: s(&fields.expected),
            }),
            StepVariant::Pause => StepAction::Pause(PausePayload {
                duration_ms: fields.duration_ms.unwrap_or_default(),
            }),
            StepVariant::Debug => StepAction::Debug,
            StepVariant::Undetermined => StepAction::Undetermined,
        }
    }
}

/// One recordable/replayable action.
///
/// `primary_locator` always equals the first locator candidate; the candidate
/// list can only be replaced through [`Step::set_locator_candidates`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StepWire")]
pub struct Step {
    id: StepId,
    command_key: Option<String>,
    pub label: String,
    pub description: String,
    locator_candidates: Vec<String>,
    primary_locator: Option<String>,
    pub scope_hint: String,
    pub timeout_ms: u64,
    #[serde(flatten)]
    action: StepAction,
}

impl Step {
    pub fn new(command_key: Option<String>, action: StepAction) -> Self {
        Self {
            id: StepId::new(),
            command_key,
            label: String::new(),
            description: String::new(),
            locator_candidates: Vec::new(),
            primary_locator: None,
            scope_hint: MAIN_SCOPE.to_string(),
            timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
            action,
        }
    }

    /// Placeholder awaiting command selection.
    pub fn undetermined(label: impl Into<String>) -> Self {
        let mut step = Self::new(None, StepAction::Undetermined);
        step.label = label.into();
        step
    }

    pub fn id(&self) -> &StepId {
        &self.id
    }

    pub fn command_key(&self) -> Option<&str> {
        self.command_key.as_deref()
    }

    pub fn variant(&self) -> StepVariant {
        self.action.variant()
    }

    pub fn action(&self) -> &StepAction {
        &self.action
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self.action, StepAction::Undetermined)
    }

    pub fn locator_candidates(&self) -> &[String] {
        &self.locator_candidates
    }

    pub fn primary_locator(&self) -> Option<&str> {
        self.primary_locator.as_deref()
    }

    pub fn set_locator_candidates(&mut self, candidates: Vec<String>) {
        self.primary_locator = candidates.first().cloned();
        self.locator_candidates = candidates;
    }

    /// Replace the payload with a command's, keeping id and locators.
    pub fn rebuild(&mut self, command_key: String, action: StepAction) -> Result<(), StepError> {
        if matches!(action, StepAction::Undetermined) {
            return Err(StepError::RevertToUndetermined);
        }
        self.command_key = Some(command_key);
        self.action = action;
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepWire {
    id: StepId,
    #[serde(default)]
    command_key: Option<String>,
    #[serde(default)]
    label: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    locator_candidates: Vec<String>,
    #[serde(default = "default_scope")]
    scope_hint: String,
    #[serde(default = "default_timeout")]
    timeout_ms: u64,
    #[serde(flatten)]
    action: StepAction,
}

fn default_scope() -> String {
    MAIN_SCOPE.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_STEP_TIMEOUT_MS
}

impl From<StepWire> for Step {
    fn from(wire: StepWire) -> Self {
        // primary locator is always re-derived from the candidate list
        Self {
            id: wire.id,
            command_key: wire.command_key,
            label: wire.label,
            description: wire.description,
            primary_locator: wire.locator_candidates.first().cloned(),
            locator_candidates: wire.locator_candidates,
            scope_hint: wire.scope_hint,
            timeout_ms: wire.timeout_ms,
            action: wire.action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_locator_tracks_first_candidate() {
        let mut step = Step::new(Some("click".into()), StepAction::Click(ClickPayload::default()));
        assert_eq!(step.primary_locator(), None);
        step.set_locator_candidates(vec!["#a".into(), "body > a".into()]);
        assert_eq!(step.primary_locator(), Some("#a"));
        step.set_locator_candidates(Vec::new());
        assert_eq!(step.primary_locator(), None);
    }

    #[test]
    fn serialized_step_carries_variant_tag_and_defaults() {
        let step = Step::new(
            Some("setValue".into()),
            StepAction::TypeText(TypeTextPayload {
                text: "ab".into(),
                input_mode: TextInputMode::Replace,
            }),
        );
        let value = serde_json::to_value(&step).unwrap();
        assert_eq!(value["variant"], "typeText");
        assert_eq!(value["text"], "ab");
        assert_eq!(value["inputMode"], "replace");
        assert_eq!(value["scopeHint"], "main");
        assert_eq!(value["timeoutMs"], 5000);
        assert_eq!(value["commandKey"], "setValue");
    }

    #[test]
    fn deserializing_rederives_primary_locator() {
        let json = r##"{
            "id": "s-1",
            "variant": "click",
            "button": "right",
            "locatorCandidates": ["#go"],
            "primaryLocator": "#stale"
        }"##;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.primary_locator(), Some("#go"));
        assert_eq!(step.variant(), StepVariant::Click);
        assert_eq!(step.timeout_ms, 5000);
        assert_eq!(
            step.action(),
            &StepAction::Click(ClickPayload {
                button: MouseButton::Right
            })
        );
    }

    #[test]
    fn rebuild_refuses_undetermined() {
        let mut step = Step::undetermined("manual");
        let id = step.id().clone();
        step.rebuild("pause".into(), StepAction::Pause(PausePayload { duration_ms: 10 }))
            .unwrap();
        assert_eq!(step.id(), &id);
        assert_eq!(step.variant(), StepVariant::Pause);
        assert_eq!(
            step.rebuild("x".into(), StepAction::Undetermined),
            Err(StepError::RevertToUndetermined)
        );
        assert_eq!(step.variant(), StepVariant::Pause);
    }

    #[test]
    fn from_fields_zero_fills_missing_payload() {
        let action = StepAction::from_fields(StepVariant::Scroll, &StepFields::default());
        assert_eq!(action, StepAction::Scroll(ScrollPayload::default()));
        let action = StepAction::from_fields(StepVariant::TypeText, &StepFields::text("hi"));
        assert_eq!(
            action,
            StepAction::TypeText(TypeTextPayload {
                text: "hi".into(),
                input_mode: TextInputMode::Replace
            })
        );
    }
}
