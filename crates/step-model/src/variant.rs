use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StepError;

/// Discriminant of the step union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepVariant {
    Navigate,
    Click,
    DoubleClick,
    TypeText,
    KeyDown,
    KeyUp,
    Scroll,
    WaitForElementCondition,
    MoveTo,
    DragAndDrop,
    ExecuteScript,
    CompareElements,
    SaveScreenshot,
    SelectOption,
    TouchAction,
    WaitUntilCondition,
    Pause,
    Debug,
    Undetermined,
}

impl StepVariant {
    pub const ALL: [StepVariant; 19] = [
        StepVariant::Navigate,
        StepVariant::Click,
        StepVariant::DoubleClick,
        StepVariant::TypeText,
        StepVariant::KeyDown,
        StepVariant::KeyUp,
        StepVariant::Scroll,
        StepVariant::WaitForElementCondition,
        StepVariant::MoveTo,
        StepVariant::DragAndDrop,
        StepVariant::ExecuteScript,
        StepVariant::CompareElements,
        StepVariant::SaveScreenshot,
        StepVariant::SelectOption,
        StepVariant::TouchAction,
        StepVariant::WaitUntilCondition,
        StepVariant::Pause,
        StepVariant::Debug,
        StepVariant::Undetermined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepVariant::Navigate => "navigate",
            StepVariant::Click => "click",
            StepVariant::DoubleClick => "doubleClick",
            StepVariant::TypeText => "typeText",
            StepVariant::KeyDown => "keyDown",
            StepVariant::KeyUp => "keyUp",
            StepVariant::Scroll => "scroll",
            StepVariant::WaitForElementCondition => "waitForElementCondition",
            StepVariant::MoveTo => "moveTo",
            StepVariant::DragAndDrop => "dragAndDrop",
            StepVariant::ExecuteScript => "executeScript",
            StepVariant::CompareElements => "compareElements",
            StepVariant::SaveScreenshot => "saveScreenshot",
            StepVariant::SelectOption => "selectOption",
            StepVariant::TouchAction => "touchAction",
            StepVariant::WaitUntilCondition => "waitUntilCondition",
            StepVariant::Pause => "pause",
            StepVariant::Debug => "debug",
            StepVariant::Undetermined => "undetermined",
        }
    }

    /// Names of the payload fields this variant carries (camelCase, as serialized).
    pub fn payload_fields(&self) -> &'static [&'static str] {
        match self {
            StepVariant::Navigate => &["url", "navigation"],
            StepVariant::Click => &["button"],
            StepVariant::TypeText => &["text", "inputMode"],
            StepVariant::KeyDown | StepVariant::KeyUp => &["key"],
            StepVariant::Scroll => &["deltaX", "deltaY", "intoView"],
            StepVariant::WaitForElementCondition => &["property", "comparator", "expected"],
            StepVariant::MoveTo => &["offsetX", "offsetY"],
            StepVariant::DragAndDrop => &["dropTarget", "durationMs"],
            StepVariant::ExecuteScript => &["script", "isAsync"],
            StepVariant::CompareElements => &["otherLocator", "property", "comparator"],
            StepVariant::SaveScreenshot => &["fileName", "fullPage"],
            StepVariant::SelectOption => &["selectBy", "optionValue"],
            StepVariant::TouchAction => &["touch"],
            StepVariant::WaitUntilCondition => &["condition", "comparator", "expected"],
            StepVariant::Pause => &["durationMs"],
            StepVariant::DoubleClick | StepVariant::Debug | StepVariant::Undetermined => &[],
        }
    }
}

impl fmt::Display for StepVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepVariant {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepVariant::ALL
            .iter()
            .copied()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StepError::UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationKind {
    #[default]
    Goto,
    Back,
    Forward,
    Refresh,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextInputMode {
    #[default]
    Replace,
    Append,
    Clear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Comparator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectBy {
    #[default]
    VisibleText,
    Value,
    Index,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchKind {
    #[default]
    Tap,
    LongPress,
    DoubleTap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_parse_back() {
        for variant in StepVariant::ALL {
            assert_eq!(variant.as_str().parse::<StepVariant>().unwrap(), variant);
        }
        assert!("teleport".parse::<StepVariant>().is_err());
    }

    #[test]
    fn serde_name_matches_as_str() {
        for variant in StepVariant::ALL {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.as_str()));
        }
    }
}
