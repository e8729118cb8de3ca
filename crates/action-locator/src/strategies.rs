//! Candidate generation strategies
//!
//! Each strategy contributes at most one selector string for an element. The
//! test-id strategy may offer one alternative per configured attribute; the
//! synthesizer tries them in order. Proposals are not validated here.

use perceiver_dom::{is_identifier, quote_attr_value, DocumentPort, ElementRef};

use crate::types::{LocatorPolicyView, LocatorStrategy};

/// Propose a selector for `element` using one attribute-based strategy.
///
/// Returns `None` when the element lacks the attribute the strategy relies on.
/// The structural path is produced by [`structural_path`] instead.
pub fn propose<D>(
    strategy: LocatorStrategy,
    doc: &D,
    element: ElementRef,
    policy: &LocatorPolicyView,
) -> Option<String>
where
    D: DocumentPort + ?Sized,
{
    match strategy {
        LocatorStrategy::TestId => policy
            .test_id_attributes
            .iter()
            .find_map(|attr| test_id_selector(doc, element, attr)),
        LocatorStrategy::ElementId => non_empty_attr(doc, element, "id").map(|id| {
            if is_identifier(&id) {
                format!("#{id}")
            } else {
                format!("[id={}]", quote_attr_value(&id))
            }
        }),
        LocatorStrategy::NameAttribute => {
            let tag = doc.tag_name(element)?;
            non_empty_attr(doc, element, "name")
                .map(|name| format!("{tag}[name={}]", quote_attr_value(&name)))
        }
        LocatorStrategy::AriaLabel => {
            let tag = doc.tag_name(element)?;
            non_empty_attr(doc, element, "aria-label")
                .map(|label| format!("{tag}[aria-label={}]", quote_attr_value(&label)))
        }
        LocatorStrategy::StableClass => {
            let tag = doc.tag_name(element)?;
            let class_attr = doc.attribute(element, "class")?;
            let mut tokens: Vec<&str> = Vec::new();
            for token in class_attr.split_whitespace() {
                if is_stable_class(token, policy.strict_class_filter) && !tokens.contains(&token)
                {
                    tokens.push(token);
                }
            }
            if tokens.is_empty() {
                return None;
            }
            Some(format!("{tag}.{}", tokens.join(".")))
        }
        LocatorStrategy::StructuralPath => structural_path(doc, element),
    }
}

/// Every selector `strategy` can offer for `element`, most preferred first.
///
/// Only [`LocatorStrategy::TestId`] yields more than one entry.
pub fn proposals<D>(
    strategy: LocatorStrategy,
    doc: &D,
    element: ElementRef,
    policy: &LocatorPolicyView,
) -> Vec<String>
where
    D: DocumentPort + ?Sized,
{
    match strategy {
        LocatorStrategy::TestId => policy
            .test_id_attributes
            .iter()
            .filter_map(|attr| test_id_selector(doc, element, attr))
            .collect(),
        other => propose(other, doc, element, policy).into_iter().collect(),
    }
}

/// Class tokens that look hand-written rather than generated.
///
/// Rejects tokens with a colon (utility variants like `md:flex`) or a double
/// underscore (CSS-module hashes like `btn__x3f`); strict mode also rejects any
/// digit.
pub fn is_stable_class(token: &str, strict: bool) -> bool {
    if token.is_empty() || token.contains(':') || token.contains("__") {
        return false;
    }
    !(strict && token.chars().any(|c| c.is_ascii_digit()))
}

/// Tag path from `body` down to `element`, e.g. `body > ul > li:nth-of-type(3)`.
///
/// A level gets an `:nth-of-type` index only when its parent has more than one
/// child with the same tag. Returns `None` for elements outside the body.
pub fn structural_path<D>(doc: &D, element: ElementRef) -> Option<String>
where
    D: DocumentPort + ?Sized,
{
    let body = doc.body()?;
    if element == body {
        return Some("body".to_string());
    }

    let mut segments = Vec::new();
    let mut current = element;
    loop {
        let parent = doc.parent(current)?;
        let tag = doc.tag_name(current)?;
        let same_tag: Vec<ElementRef> = doc
            .children(parent)
            .into_iter()
            .filter(|sibling| doc.tag_name(*sibling).as_deref() == Some(tag.as_str()))
            .collect();
        if same_tag.len() > 1 {
            let position = same_tag.iter().position(|s| *s == current)? + 1;
            segments.push(format!("{tag}:nth-of-type({position})"));
        } else {
            segments.push(tag);
        }
        if parent == body {
            break;
        }
        current = parent;
    }
    segments.push("body".to_string());
    segments.reverse();
    Some(segments.join(" > "))
}

fn test_id_selector<D>(doc: &D, element: ElementRef, attr: &str) -> Option<String>
where
    D: DocumentPort + ?Sized,
{
    non_empty_attr(doc, element, attr)
        .map(|value| format!("[{}={}]", attr, quote_attr_value(&value)))
}

fn non_empty_attr<D>(doc: &D, element: ElementRef, name: &str) -> Option<String>
where
    D: DocumentPort + ?Sized,
{
    doc.attribute(element, name)
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perceiver_dom::{InMemoryDocument, NodeSpec};

    #[test]
    fn test_stable_class_filter() {
        assert!(is_stable_class("btn-primary", true));
        assert!(!is_stable_class("md:flex", false));
        assert!(!is_stable_class("Card__title", false));
        assert!(!is_stable_class("col-6", true));
        assert!(is_stable_class("col-6", false));
    }

    #[test]
    fn test_id_prefers_first_configured_attribute() {
        let doc = InMemoryDocument::from_spec(
            &NodeSpec::new("button")
                .with_ref("b")
                .with_attr("data-qa", "qa-save")
                .with_attr("data-testid", "save"),
        )
        .unwrap();
        let b = doc.by_ref("b").unwrap();
        let policy = LocatorPolicyView::default();
        assert_eq!(
            propose(LocatorStrategy::TestId, &doc, b, &policy).as_deref(),
            Some(r#"[data-testid="save"]"#)
        );
    }

    #[test]
    fn test_id_offers_every_configured_attribute_in_order() {
        let doc = InMemoryDocument::from_spec(
            &NodeSpec::new("button")
                .with_ref("b")
                .with_attr("data-qa", "qa-save")
                .with_attr("data-testid", "save"),
        )
        .unwrap();
        let b = doc.by_ref("b").unwrap();
        let policy = LocatorPolicyView::default();
        assert_eq!(
            proposals(LocatorStrategy::TestId, &doc, b, &policy),
            vec![r#"[data-testid="save"]"#.to_string(), r#"[data-qa="qa-save"]"#.to_string()]
        );
        assert_eq!(proposals(LocatorStrategy::AriaLabel, &doc, b, &policy), Vec::<String>::new());
    }

    #[test]
    fn test_id_falls_back_to_attribute_form_for_odd_ids() {
        let doc = InMemoryDocument::from_spec(
            &NodeSpec::new("div").with_ref("d").with_attr("id", "123 main"),
        )
        .unwrap();
        let d = doc.by_ref("d").unwrap();
        assert_eq!(
            propose(LocatorStrategy::ElementId, &doc, d, &LocatorPolicyView::default())
                .as_deref(),
            Some(r#"[id="123 main"]"#)
        );
    }

    #[test]
    fn test_structural_path_indexes_only_ambiguous_levels() {
        let doc = InMemoryDocument::from_spec(
            &NodeSpec::new("body").with_child(
                NodeSpec::new("ul")
                    .with_child(NodeSpec::new("li"))
                    .with_child(NodeSpec::new("li").with_child(NodeSpec::new("a").with_ref("link"))),
            ),
        )
        .unwrap();
        let link = doc.by_ref("link").unwrap();
        assert_eq!(
            structural_path(&doc, link).as_deref(),
            Some("body > ul > li:nth-of-type(2) > a")
        );
        assert_eq!(
            structural_path(&doc, doc.body().unwrap()).as_deref(),
            Some("body")
        );
    }

    #[test]
    fn test_class_strategy_skips_unstable_tokens() {
        let doc = InMemoryDocument::from_spec(
            &NodeSpec::new("a")
                .with_ref("a")
                .with_attr("class", "nav-link hover:underline css__9x nav-link item2"),
        )
        .unwrap();
        let a = doc.by_ref("a").unwrap();
        let policy = LocatorPolicyView::default();
        assert_eq!(
            propose(LocatorStrategy::StableClass, &doc, a, &policy).as_deref(),
            Some("a.nav-link")
        );
        let lenient = LocatorPolicyView::default().with_strict_class_filter(false);
        assert_eq!(
            propose(LocatorStrategy::StableClass, &doc, a, &lenient).as_deref(),
            Some("a.nav-link.item2")
        );
    }
}
