use action_locator::LocatorPolicyView;
use capture_core::CapturePolicyView;
use serde::{Deserialize, Serialize};
use step_builder::StepDefaults;

/// Effective recorder configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub locator: LocatorPolicyView,
    pub capture: CapturePolicyView,
    pub steps: StepDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = r#"
locator:
  max_candidates: 2
steps:
  timeout_ms: 750
"#;
        let config: RecorderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.locator.max_candidates, 2);
        assert!(config.locator.strict_class_filter);
        assert_eq!(config.steps.timeout_ms, 750);
        assert_eq!(config.steps.scope_hint, "main");
        assert_eq!(config.capture, CapturePolicyView::default());
    }

    #[test]
    fn empty_document_is_default() {
        let config: RecorderConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, RecorderConfig::default());
    }
}
