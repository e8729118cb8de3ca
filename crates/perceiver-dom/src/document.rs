use std::collections::{BTreeMap, HashMap};

use stepcapture_core_types::{ElementRef, Rect};
use tracing::debug;

use crate::errors::{DocumentError, SelectorError};
use crate::model::NodeSpec;
use crate::ports::DocumentPort;
use crate::selector::Selector;

#[derive(Clone, Debug)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: String,
    value: Option<String>,
    selected: Option<usize>,
    rect: Option<Rect>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            text: String::new(),
            value: None,
            selected: None,
            rect: None,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena-backed document used by the CLI scenarios and by tests.
///
/// Always rooted at `<html>` with a `<body>` child. Detached nodes stay in the
/// arena but are no longer reachable from the root, so queries stop seeing them.
#[derive(Clone, Debug)]
pub struct InMemoryDocument {
    nodes: Vec<Node>,
    root: usize,
    body: usize,
    refs: HashMap<String, ElementRef>,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node::new("html")],
            root: 0,
            body: 0,
            refs: HashMap::new(),
        };
        doc.body = doc.push_node(0, Node::new("body"));
        doc
    }

    /// Build a document from a node spec.
    ///
    /// An `html` root keeps its `head` and first `body` child; any other child is
    /// moved to the end of the body, which is created when missing. A `body` root
    /// is wrapped in `html`, anything else is placed inside a fresh `html > body`.
    pub fn from_spec(spec: &NodeSpec) -> Result<Self, DocumentError> {
        let tag = spec.tag.to_ascii_lowercase();
        let mut doc = Self {
            nodes: vec![Node::new("html")],
            root: 0,
            body: 0,
            refs: HashMap::new(),
        };
        match tag.as_str() {
            "html" => {
                doc.fill_node(0, spec)?;
                let mut body = None;
                let mut stray = Vec::new();
                for child in &spec.children {
                    match child.tag.to_ascii_lowercase().as_str() {
                        "head" => {
                            doc.append_spec(ElementRef(0), child)?;
                        }
                        "body" if body.is_none() => {
                            body = Some(doc.append_spec(ElementRef(0), child)?);
                        }
                        _ => stray.push(child),
                    }
                }
                let body = match body {
                    Some(el) => el,
                    None => ElementRef(doc.push_node(0, Node::new("body")) as u64),
                };
                doc.body = body.0 as usize;
                for child in stray {
                    doc.append_spec(body, child)?;
                }
            }
            "body" => {
                let body = doc.append_spec(ElementRef(0), spec)?;
                doc.body = body.0 as usize;
            }
            _ => {
                doc.body = doc.push_node(0, Node::new("body"));
                doc.append_spec(ElementRef(doc.body as u64), spec)?;
            }
        }
        debug!(nodes = doc.nodes.len(), "built in-memory document");
        Ok(doc)
    }

    pub fn root(&self) -> ElementRef {
        ElementRef(self.root as u64)
    }

    /// Resolve a `ref` name given in a node spec.
    pub fn by_ref(&self, name: &str) -> Option<ElementRef> {
        self.refs.get(name).copied()
    }

    pub fn append(&mut self, parent: ElementRef, tag: &str) -> ElementRef {
        let idx = self.push_node(parent.0 as usize, Node::new(tag));
        ElementRef(idx as u64)
    }

    pub fn append_spec(
        &mut self,
        parent: ElementRef,
        spec: &NodeSpec,
    ) -> Result<ElementRef, DocumentError> {
        self.check_node(parent)?;
        let idx = self.push_node(parent.0 as usize, Node::new(&spec.tag));
        self.fill_node(idx, spec)?;
        let element = ElementRef(idx as u64);
        for child in &spec.children {
            self.append_spec(element, child)?;
        }
        Ok(element)
    }

    pub fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attrs
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, element: ElementRef, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attrs.remove(&name.to_ascii_lowercase());
        }
    }

    pub fn set_text(&mut self, element: ElementRef, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_string();
        }
    }

    pub fn set_value(&mut self, element: ElementRef, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.value = Some(value.to_string());
        }
    }

    pub fn set_selected(&mut self, element: ElementRef, index: usize) {
        if let Some(node) = self.node_mut(element) {
            node.selected = Some(index);
        }
    }

    pub fn set_rect(&mut self, element: ElementRef, rect: Rect) {
        if let Some(node) = self.node_mut(element) {
            node.rect = Some(rect);
        }
    }

    /// Unlink a node (and its subtree) from its parent.
    pub fn detach(&mut self, element: ElementRef) {
        let idx = element.0 as usize;
        let Some(parent) = self.nodes.get(idx).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent].children.retain(|child| *child != idx);
        self.nodes[idx].parent = None;
    }

    /// Every element reachable from the root, in document order.
    pub fn elements(&self) -> Vec<ElementRef> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            out.push(ElementRef(idx as u64));
            stack.extend(self.nodes[idx].children.iter().rev().copied());
        }
        out
    }

    fn push_node(&mut self, parent: usize, mut node: Node) -> usize {
        let idx = self.nodes.len();
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(idx);
        idx
    }

    fn fill_node(&mut self, idx: usize, spec: &NodeSpec) -> Result<(), DocumentError> {
        if let Some(name) = &spec.reference {
            if self.refs.contains_key(name) {
                return Err(DocumentError::DuplicateRef(name.clone()));
            }
            self.refs.insert(name.clone(), ElementRef(idx as u64));
        }
        let node = &mut self.nodes[idx];
        for (key, value) in &spec.attrs {
            node.attrs.insert(key.to_ascii_lowercase(), value.clone());
        }
        node.text = spec.text.clone().unwrap_or_default();
        node.value = spec.value.clone();
        node.selected = spec.selected;
        node.rect = spec.rect;
        Ok(())
    }

    fn check_node(&self, element: ElementRef) -> Result<(), DocumentError> {
        if self.node(element).is_some() {
            Ok(())
        } else {
            Err(DocumentError::UnknownNode(element.to_string()))
        }
    }

    fn node(&self, element: ElementRef) -> Option<&Node> {
        self.nodes.get(element.0 as usize)
    }

    fn node_mut(&mut self, element: ElementRef) -> Option<&mut Node> {
        self.nodes.get_mut(element.0 as usize)
    }

    fn descendants_with_tag(&self, idx: usize, tag: &str, out: &mut Vec<usize>) {
        for child in &self.nodes[idx].children {
            if self.nodes[*child].tag == tag {
                out.push(*child);
            }
            self.descendants_with_tag(*child, tag, out);
        }
    }
}

impl DocumentPort for InMemoryDocument {
    fn body(&self) -> Option<ElementRef> {
        Some(ElementRef(self.body as u64))
    }

    fn tag_name(&self, element: ElementRef) -> Option<String> {
        self.node(element).map(|n| n.tag.clone())
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        self.node(element)
            .and_then(|n| n.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    fn parent(&self, element: ElementRef) -> Option<ElementRef> {
        self.node(element)
            .and_then(|n| n.parent)
            .map(|idx| ElementRef(idx as u64))
    }

    fn children(&self, element: ElementRef) -> Vec<ElementRef> {
        self.node(element)
            .map(|n| n.children.iter().map(|idx| ElementRef(*idx as u64)).collect())
            .unwrap_or_default()
    }

    fn value(&self, element: ElementRef) -> Option<String> {
        let node = self.node(element)?;
        if let Some(value) = &node.value {
            return Some(value.clone());
        }
        match node.tag.as_str() {
            "textarea" => Some(node.text.clone()),
            "input" => Some(node.attrs.get("value").cloned().unwrap_or_default()),
            "select" => self.selected_option_text(element),
            _ => None,
        }
    }

    fn selected_option_text(&self, element: ElementRef) -> Option<String> {
        let node = self.node(element)?;
        if node.tag != "select" {
            return None;
        }
        let mut options = Vec::new();
        self.descendants_with_tag(element.0 as usize, "option", &mut options);
        let idx = options.get(node.selected.unwrap_or(0))?;
        Some(self.nodes[*idx].text.trim().to_string())
    }

    fn bounding_rect(&self, element: ElementRef) -> Option<Rect> {
        self.node(element).and_then(|n| n.rect)
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, SelectorError> {
        let parsed = Selector::parse(selector)?;
        Ok(parsed.select(self, self.elements()))
    }
}
