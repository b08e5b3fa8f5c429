//! Document capability used by the license form.
//!
//! The form controller never touches a concrete page. It works through the
//! [`Document`] trait, which exposes the handful of element operations the
//! form needs plus the `for_each_element`/`reduce_elements` helpers over
//! named element collections. [`MemoryDocument`] is the in-process
//! implementation used by the CLI driver and the tests.

use std::collections::BTreeMap;

use crate::error::DomError;

/// Handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Event types the form listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Input,
    Click,
}

pub trait Document {
    /// The root element; always connected.
    fn body(&self) -> ElementId;

    /// First connected element, in document order, whose `id` attribute matches.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Every connected element, in document order, whose `name` attribute matches.
    fn elements_by_name(&self, name: &str) -> Vec<ElementId>;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError>;

    /// Detaches the element from its parent. Removing a detached element is a no-op.
    fn remove(&mut self, element: ElementId) -> Result<(), DomError>;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn children(&self, element: ElementId) -> Vec<ElementId>;

    fn tag(&self, element: ElementId) -> Option<String>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str)
        -> Result<(), DomError>;

    /// Current value; falls back to the `value` attribute, then to "".
    fn value(&self, element: ElementId) -> Option<String>;

    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DomError>;

    fn is_disabled(&self, element: ElementId) -> bool;

    fn set_disabled(&mut self, element: ElementId, disabled: bool) -> Result<(), DomError>;

    fn text(&self, element: ElementId) -> Option<String>;

    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), DomError>;

    fn add_event_listener(&mut self, element: ElementId, kind: EventKind)
        -> Result<(), DomError>;

    fn has_event_listener(&self, element: ElementId, kind: EventKind) -> bool;

    fn is_connected(&self, element: ElementId) -> bool;

    fn body_attribute(&self, name: &str) -> Option<String> {
        self.attribute(self.body(), name)
    }

    /// Runs `f` over a snapshot of the elements named `name`, so `f` may
    /// remove or add elements without disturbing the iteration.
    fn for_each_element<F>(&mut self, name: &str, mut f: F) -> Result<(), DomError>
    where
        Self: Sized,
        F: FnMut(&mut Self, ElementId) -> Result<(), DomError>,
    {
        for element in self.elements_by_name(name) {
            f(self, element)?;
        }

        Ok(())
    }

    fn reduce_elements<T, F>(&self, name: &str, init: T, mut f: F) -> T
    where
        Self: Sized,
        F: FnMut(T, &Self, ElementId) -> T,
    {
        self.elements_by_name(name)
            .into_iter()
            .fold(init, |acc, element| f(acc, self, element))
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    value: Option<String>,
    disabled: bool,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    listeners: Vec<EventKind>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Node {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            value: None,
            disabled: false,
            text: String::new(),
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }
}

const BODY: ElementId = ElementId(0);

/// Arena-backed document rooted at a `body` element.
///
/// Removed elements stay in the arena (handles never dangle) but are no
/// longer reachable from the body, so lookups skip them.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        MemoryDocument {
            nodes: vec![Node::new("body")],
        }
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, element: ElementId) -> Result<&Node, DomError> {
        self.nodes
            .get(element.0)
            .ok_or(DomError::UnknownElement(element))
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node, DomError> {
        self.nodes
            .get_mut(element.0)
            .ok_or(DomError::UnknownElement(element))
    }

    // Pre-order walk from the body, i.e. document order.
    fn connected(&self) -> Vec<ElementId> {
        let mut ordered = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![BODY];

        while let Some(current) = stack.pop() {
            ordered.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }

        ordered
    }

    fn find_connected<P>(&self, predicate: P) -> Vec<ElementId>
    where
        P: Fn(&Node) -> bool,
    {
        self.connected()
            .into_iter()
            .filter(|element| predicate(&self.nodes[element.0]))
            .collect()
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, of: ElementId) -> bool {
        let mut cursor = Some(of);

        while let Some(current) = cursor {
            if current == candidate {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|node| node.parent);
        }

        false
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> ElementId {
        BODY
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.find_connected(|node| node.attributes.get("id").is_some_and(|v| v == id))
            .into_iter()
            .next()
    }

    fn elements_by_name(&self, name: &str) -> Vec<ElementId> {
        self.find_connected(|node| node.attributes.get("name").is_some_and(|v| v == name))
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));

        ElementId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        if child == BODY {
            return Err(DomError::RootImmutable);
        }
        self.node(parent)?;
        self.node(child)?;

        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest(child));
        }

        self.remove(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);

        Ok(())
    }

    fn remove(&mut self, element: ElementId) -> Result<(), DomError> {
        if element == BODY {
            return Err(DomError::RootImmutable);
        }

        if let Some(parent) = self.node_mut(element)?.parent.take() {
            self.node_mut(parent)?.children.retain(|c| *c != element);
        }

        Ok(())
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).ok().and_then(|node| node.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.node(element)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn tag(&self, element: ElementId) -> Option<String> {
        self.node(element).ok().map(|node| node.tag.clone())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.node(element).ok()?.attributes.get(name).cloned()
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.node_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());

        Ok(())
    }

    fn value(&self, element: ElementId) -> Option<String> {
        let node = self.node(element).ok()?;

        Some(
            node.value
                .clone()
                .or_else(|| node.attributes.get("value").cloned())
                .unwrap_or_default(),
        )
    }

    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DomError> {
        self.node_mut(element)?.value = Some(value.to_string());

        Ok(())
    }

    fn is_disabled(&self, element: ElementId) -> bool {
        self.node(element).is_ok_and(|node| node.disabled)
    }

    fn set_disabled(&mut self, element: ElementId, disabled: bool) -> Result<(), DomError> {
        self.node_mut(element)?.disabled = disabled;

        Ok(())
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.node(element).ok().map(|node| node.text.clone())
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), DomError> {
        self.node_mut(element)?.text = text.to_string();

        Ok(())
    }

    fn add_event_listener(
        &mut self,
        element: ElementId,
        kind: EventKind,
    ) -> Result<(), DomError> {
        let node = self.node_mut(element)?;

        if !node.listeners.contains(&kind) {
            node.listeners.push(kind);
        }

        Ok(())
    }

    fn has_event_listener(&self, element: ElementId, kind: EventKind) -> bool {
        self.node(element)
            .is_ok_and(|node| node.listeners.contains(&kind))
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.node(element).is_ok() && self.is_ancestor_or_self(BODY, element)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Document, ElementId, EventKind, MemoryDocument};
    use crate::error::DomError;

    fn named(doc: &mut MemoryDocument, parent: ElementId, name: &str, id: &str) -> ElementId {
        let element = doc.create_element("input");
        doc.set_attribute(element, "name", name).expect("set name");
        doc.set_attribute(element, "id", id).expect("set id");
        doc.append_child(parent, element).expect("append");
        element
    }

    #[rstest]
    fn lookups_follow_document_order_and_skip_detached_elements() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let list = doc.create_element("ul");
        doc.append_child(body, list).expect("append list");
        let first = named(&mut doc, list, "param", "a");
        let tail = named(&mut doc, body, "param", "c");
        let second = named(&mut doc, list, "param", "b");

        assert_eq!(doc.elements_by_name("param"), vec![first, second, tail]);

        doc.remove(second).expect("remove");

        assert_eq!(doc.elements_by_name("param"), vec![first, tail]);
        assert_eq!(doc.element_by_id("b"), None);
        assert!(!doc.is_connected(second));
    }

    #[rstest]
    fn removing_a_parent_disconnects_its_subtree() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let item = doc.create_element("li");
        doc.append_child(body, item).expect("append");
        let input = named(&mut doc, item, "param", "year");

        doc.remove(item).expect("remove");

        assert!(!doc.is_connected(input));
        assert!(doc.elements_by_name("param").is_empty());
    }

    #[rstest]
    fn body_cannot_be_removed_or_nested() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let div = doc.create_element("div");
        doc.append_child(body, div).expect("append");

        assert_eq!(doc.remove(body), Err(DomError::RootImmutable));
        assert_eq!(doc.append_child(div, body), Err(DomError::RootImmutable));
        assert_eq!(
            doc.append_child(div, div),
            Err(DomError::HierarchyRequest(div))
        );
    }

    #[rstest]
    fn value_falls_back_to_attribute_then_empty() {
        let mut doc = MemoryDocument::new();
        let button = doc.create_element("button");
        let input = doc.create_element("input");
        doc.set_attribute(button, "value", "acme/widgets")
            .expect("set value attribute");

        assert_eq!(doc.value(button).as_deref(), Some("acme/widgets"));
        assert_eq!(doc.value(input).as_deref(), Some(""));

        doc.set_value(input, "2024").expect("set value");
        assert_eq!(doc.value(input).as_deref(), Some("2024"));
    }

    #[rstest]
    fn reduce_and_for_each_visit_named_elements() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        named(&mut doc, body, "param", "year");
        named(&mut doc, body, "param", "fullname");

        doc.for_each_element("param", |doc, element| doc.set_value(element, "x"))
            .expect("for each");

        let joined = doc.reduce_elements("param", String::new(), |mut acc, doc, element| {
            acc.push_str(&doc.attribute(element, "id").unwrap_or_default());
            acc
        });
        let all_filled = doc.reduce_elements("param", true, |state, doc, element| {
            state && doc.value(element).is_some_and(|v| !v.is_empty())
        });

        assert_eq!(joined, "yearfullname");
        assert!(all_filled);
    }

    #[rstest]
    fn listeners_are_recorded_once_per_kind() {
        let mut doc = MemoryDocument::new();
        let select = doc.create_element("select");
        doc.add_event_listener(select, EventKind::Change)
            .expect("listen");
        doc.add_event_listener(select, EventKind::Change)
            .expect("listen again");

        assert!(doc.has_event_listener(select, EventKind::Change));
        assert!(!doc.has_event_listener(select, EventKind::Click));
    }
}
