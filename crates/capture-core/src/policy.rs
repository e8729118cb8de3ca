use serde::{Deserialize, Serialize};

/// Ids of the recorder's own surfaces inside the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapturePolicyView {
    /// Container hosting the recorder UI; activations and hovers inside it are ignored.
    pub reserved_container_id: String,
    /// The non-interactive highlight outline element.
    pub outline_element_id: String,
}

impl Default for CapturePolicyView {
    fn default() -> Self {
        Self {
            reserved_container_id: "__stepcapture-root".to_string(),
            outline_element_id: "__stepcapture-outline".to_string(),
        }
    }
}
