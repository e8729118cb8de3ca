use perceiver_dom::{DocumentPort, ElementRef};
use serde::{Deserialize, Serialize};
use stepcapture_core_types::Rect;
use tracing::debug;

use crate::policy::CapturePolicyView;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "rect", rename_all = "snake_case")]
pub enum HighlightUpdate {
    /// Draw the outline at this viewport-relative box.
    Show(Rect),
    Hide,
}

/// Computes outline updates for hover targets while picking.
#[derive(Debug, Clone, Default)]
pub struct HighlightCoordinator {
    policy: CapturePolicyView,
}

impl HighlightCoordinator {
    pub fn new(policy: CapturePolicyView) -> Self {
        Self { policy }
    }

    /// `None` means the target is one of the recorder's own surfaces and the
    /// current outline stays as it is.
    pub fn update(
        &self,
        doc: &dyn DocumentPort,
        hovered: Option<ElementRef>,
    ) -> Option<HighlightUpdate> {
        let Some(element) = hovered else {
            return Some(HighlightUpdate::Hide);
        };
        if self.is_own_surface(doc, element) {
            debug!(%element, "hover over recorder surface ignored");
            return None;
        }
        let update = match doc.bounding_rect(element) {
            Some(rect) if !rect.is_empty() => HighlightUpdate::Show(rect),
            _ => HighlightUpdate::Hide,
        };
        Some(update)
    }

    fn is_own_surface(&self, doc: &dyn DocumentPort, element: ElementRef) -> bool {
        doc.attribute(element, "id").as_deref() == Some(self.policy.outline_element_id.as_str())
            || doc.is_within(element, &self.policy.reserved_container_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceiver_dom::{InMemoryDocument, NodeSpec};

    fn page() -> InMemoryDocument {
        let mut doc = InMemoryDocument::from_spec(
            &NodeSpec::new("body")
                .with_child(NodeSpec::new("a").with_ref("link"))
                .with_child(NodeSpec::new("span").with_ref("hidden"))
                .with_child(
                    NodeSpec::new("div")
                        .with_attr("id", "__stepcapture-root")
                        .with_child(NodeSpec::new("button").with_ref("panel")),
                )
                .with_child(
                    NodeSpec::new("div")
                        .with_ref("outline")
                        .with_attr("id", "__stepcapture-outline"),
                ),
        )
        .unwrap();
        let link = doc.by_ref("link").unwrap();
        doc.set_rect(link, Rect::new(10.0, 20.0, 80.0, 16.0));
        let outline = doc.by_ref("outline").unwrap();
        doc.set_rect(outline, Rect::new(10.0, 20.0, 80.0, 16.0));
        doc
    }

    #[test]
    fn shows_box_of_hovered_element() {
        let doc = page();
        let coordinator = HighlightCoordinator::default();
        assert_eq!(
            coordinator.update(&doc, doc.by_ref("link")),
            Some(HighlightUpdate::Show(Rect::new(10.0, 20.0, 80.0, 16.0)))
        );
    }

    #[test]
    fn boxless_element_and_null_hide() {
        let doc = page();
        let coordinator = HighlightCoordinator::default();
        assert_eq!(
            coordinator.update(&doc, doc.by_ref("hidden")),
            Some(HighlightUpdate::Hide)
        );
        assert_eq!(coordinator.update(&doc, None), Some(HighlightUpdate::Hide));
    }

    #[test]
    fn own_surfaces_are_ignored() {
        let doc = page();
        let coordinator = HighlightCoordinator::default();
        assert_eq!(coordinator.update(&doc, doc.by_ref("outline")), None);
        assert_eq!(coordinator.update(&doc, doc.by_ref("panel")), None);
    }

    #[test]
    fn update_serializes_with_action_tag() {
        let json = serde_json::to_value(HighlightUpdate::Show(Rect::new(1.0, 2.0, 3.0, 4.0))).unwrap();
        assert_eq!(json["action"], "show");
        assert_eq!(json["rect"]["width"], 3.0);
        let json = serde_json::to_value(HighlightUpdate::Hide).unwrap();
        assert_eq!(json["action"], "hide");
    }
}
