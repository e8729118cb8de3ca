//! Core types for locator synthesis

use serde::{Deserialize, Serialize};

/// Locator strategy enumeration, highest confidence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorStrategy {
    /// Test-identification attribute (`data-testid` and friends)
    TestId,

    /// Element `id` attribute
    ElementId,

    /// `name` attribute qualified by tag
    NameAttribute,

    /// `aria-label` qualified by tag
    AriaLabel,

    /// Stable-looking class tokens qualified by tag
    StableClass,

    /// Tag path from `body`, only used when nothing else was accepted
    StructuralPath,
}

impl LocatorStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            LocatorStrategy::TestId => "test-id",
            LocatorStrategy::ElementId => "id",
            LocatorStrategy::NameAttribute => "name",
            LocatorStrategy::AriaLabel => "aria-label",
            LocatorStrategy::StableClass => "class",
            LocatorStrategy::StructuralPath => "path",
        }
    }

    /// Attribute-based strategies in the order they are attempted.
    pub fn attribute_chain() -> [LocatorStrategy; 5] {
        [
            LocatorStrategy::TestId,
            LocatorStrategy::ElementId,
            LocatorStrategy::NameAttribute,
            LocatorStrategy::AriaLabel,
            LocatorStrategy::StableClass,
        ]
    }
}

/// One accepted locator together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorCandidate {
    pub selector: String,
    pub strategy: LocatorStrategy,
}

/// Tunables for candidate generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorPolicyView {
    /// Upper bound on emitted candidates (at least one is always allowed)
    pub max_candidates: usize,

    /// Also reject class tokens containing digits
    pub strict_class_filter: bool,

    /// Test-id attributes, first present one wins
    pub test_id_attributes: Vec<String>,
}

impl Default for LocatorPolicyView {
    fn default() -> Self {
        Self {
            max_candidates: 5,
            strict_class_filter: true,
            test_id_attributes: vec![
                "data-testid".to_string(),
                "data-test-id".to_string(),
                "data-test".to_string(),
                "data-qa".to_string(),
            ],
        }
    }
}

impl LocatorPolicyView {
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    pub fn with_strict_class_filter(mut self, strict: bool) -> Self {
        self.strict_class_filter = strict;
        self
    }

    pub(crate) fn bound(&self) -> usize {
        self.max_candidates.max(1)
    }
}
