use serde::{Deserialize, Serialize};

use crate::variant::{
    Comparator, MouseButton, NavigationKind, SelectBy, TextInputMode, TouchKind,
};

macro_rules! step_fields {
    ($( $(#[$doc:meta])* $field:ident : $ty:ty => $wire:literal ),* $(,)?) => {
        /// Partial step record: every field is optional.
        ///
        /// Used both for command defaults and for observed payloads. A field that
        /// is `None` never overrides anything during [`StepFields::overlay`].
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct StepFields {
            $(
                $(#[$doc])*
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl StepFields {
            /// Per-field merge where `upper` wins whenever it has a value.
            pub fn overlay(&self, upper: &StepFields) -> StepFields {
                StepFields {
                    $( $field: upper.$field.clone().or_else(|| self.$field.clone()), )*
                }
            }

            /// Serialized names of the fields that carry a value.
            pub fn present_fields(&self) -> Vec<&'static str> {
                let mut out = Vec::new();
                $( if self.$field.is_some() { out.push($wire); } )*
                out
            }
        }
    };
}

step_fields! {
    label: String => "label",
    description: String => "description",
    scope_hint: String => "scopeHint",
    timeout_ms: u64 => "timeoutMs",
    url: String => "url",
    navigation: NavigationKind => "navigation",
    button: MouseButton => "button",
    /// Typed or assigned text value
    text: String => "text",
    input_mode: TextInputMode => "inputMode",
    key: String => "key",
    delta_x: i64 => "deltaX",
    delta_y: i64 => "deltaY",
    into_view: bool => "intoView",
    /// Element property a condition inspects (`visible`, `text`, ...)
    property: String => "property",
    comparator: Comparator => "comparator",
    expected: String => "expected",
    offset_x: i64 => "offsetX",
    offset_y: i64 => "offsetY",
    /// Locator of the element to drop onto
    drop_target: String => "dropTarget",
    duration_ms: u64 => "durationMs",
    script: String => "script",
    is_async: bool => "isAsync",
    other_locator: String => "otherLocator",
    file_name: String => "fileName",
    full_page: bool => "fullPage",
    select_by: SelectBy => "selectBy",
    option_value: String => "optionValue",
    touch: TouchKind => "touch",
    /// Page-level expression evaluated by wait-until steps
    condition: String => "condition",
}

/// Fields shared by every variant.
pub const COMMON_FIELDS: [&str; 4] = ["label", "description", "scopeHint", "timeoutMs"];

impl StepFields {
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self {
            url: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn option_value(value: impl Into<String>) -> Self {
        Self {
            option_value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn key(value: impl Into<String>) -> Self {
        Self {
            key: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_prefers_upper_only_where_present() {
        let lower = StepFields {
            text: Some(String::new()),
            input_mode: Some(TextInputMode::Clear),
            timeout_ms: Some(5000),
            ..StepFields::default()
        };
        let upper = StepFields {
            timeout_ms: Some(200),
            ..StepFields::default()
        };
        let merged = lower.overlay(&upper);
        assert_eq!(merged.text.as_deref(), Some(""));
        assert_eq!(merged.input_mode, Some(TextInputMode::Clear));
        assert_eq!(merged.timeout_ms, Some(200));
    }

    #[test]
    fn absent_json_fields_stay_absent() {
        let observed: StepFields = serde_json::from_str(r#"{"text":"ab"}"#).unwrap();
        assert_eq!(observed.present_fields(), vec!["text"]);
        let json = serde_json::to_string(&observed).unwrap();
        assert_eq!(json, r#"{"text":"ab"}"#);
    }

    #[test]
    fn explicit_null_does_not_clobber() {
        let observed: StepFields = serde_json::from_str(r#"{"text":null}"#).unwrap();
        let merged = StepFields::text("kept").overlay(&observed);
        assert_eq!(merged.text.as_deref(), Some("kept"));
    }
}
