use perceiver_dom::{DocumentPort, ElementRef};

const TEXT_INPUT_TYPES: [&str; 8] = [
    "text", "email", "password", "search", "tel", "url", "number", "",
];

/// Text inputs and textareas, the only controls whose edits are tracked.
pub fn is_text_field(doc: &dyn DocumentPort, element: ElementRef) -> bool {
    match doc.tag_name(element).as_deref() {
        Some("textarea") => true,
        Some("input") => {
            let kind = doc
                .attribute(element, "type")
                .map(|kind| kind.trim().to_ascii_lowercase())
                .unwrap_or_default();
            TEXT_INPUT_TYPES.contains(&kind.as_str())
        }
        _ => false,
    }
}

pub fn is_select(doc: &dyn DocumentPort, element: ElementRef) -> bool {
    doc.tag_name(element).as_deref() == Some("select")
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceiver_dom::{InMemoryDocument, NodeSpec};

    #[test]
    fn classifies_controls() {
        let doc = InMemoryDocument::from_spec(
            &NodeSpec::new("body")
                .with_child(NodeSpec::new("input").with_ref("plain"))
                .with_child(NodeSpec::new("input").with_ref("mail").with_attr("type", "EMAIL"))
                .with_child(NodeSpec::new("input").with_ref("box").with_attr("type", "checkbox"))
                .with_child(NodeSpec::new("textarea").with_ref("area"))
                .with_child(NodeSpec::new("select").with_ref("pick"))
                .with_child(NodeSpec::new("div").with_ref("div")),
        )
        .unwrap();
        let r = |name: &str| doc.by_ref(name).unwrap();

        assert!(is_text_field(&doc, r("plain")));
        assert!(is_text_field(&doc, r("mail")));
        assert!(is_text_field(&doc, r("area")));
        assert!(!is_text_field(&doc, r("box")));
        assert!(!is_text_field(&doc, r("pick")));
        assert!(!is_text_field(&doc, r("div")));
        assert!(is_select(&doc, r("pick")));
        assert!(!is_select(&doc, r("area")));
    }
}
