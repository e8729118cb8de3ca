use stepcapture_core_types::{ElementRef, Rect};

use crate::errors::SelectorError;

/// Read/observe access to the host document.
///
/// The recorder core never mutates page content through this port. Hosts back it
/// with whatever node handles they have; `query_all` must evaluate the selector
/// grammar documented in [`crate::selector`] and return matches in document order.
pub trait DocumentPort {
    fn body(&self) -> Option<ElementRef>;
    /// Lower-cased tag name.
    fn tag_name(&self, element: ElementRef) -> Option<String>;
    fn attribute(&self, element: ElementRef, name: &str) -> Option<String>;
    fn parent(&self, element: ElementRef) -> Option<ElementRef>;
    fn children(&self, element: ElementRef) -> Vec<ElementRef>;
    /// Live value of form controls.
    fn value(&self, element: ElementRef) -> Option<String>;
    /// Visible text of the currently selected option of a `<select>`.
    fn selected_option_text(&self, element: ElementRef) -> Option<String>;
    fn bounding_rect(&self, element: ElementRef) -> Option<Rect>;
    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, SelectorError>;

    fn resolve_first_match(&self, selector: &str) -> Result<Option<ElementRef>, SelectorError> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// True when `element` or one of its ancestors carries `id="container_id"`.
    fn is_within(&self, element: ElementRef, container_id: &str) -> bool {
        let mut current = Some(element);
        while let Some(node) = current {
            if self.attribute(node, "id").as_deref() == Some(container_id) {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}
