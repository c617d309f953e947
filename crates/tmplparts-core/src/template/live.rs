//! Parts bound to locations inside one instance's tree

use crate::dom;
use crate::error::Result;
use markup5ever::QualName;
use markup5ever_rcdom::Handle;
use std::cell::RefCell;
use std::rc::Rc;

use super::skeleton::{AttrSegment, AttributeLayout};

/// Content substituted at a child part
#[derive(Debug, Clone)]
pub enum Content {
    /// Becomes a new text node
    Text(String),
    /// Inserted as is, after detaching it from any previous parent
    Node(Handle),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Handle> for Content {
    fn from(node: Handle) -> Self {
        Content::Node(node)
    }
}

impl From<&Handle> for Content {
    fn from(node: &Handle) -> Self {
        Content::Node(node.clone())
    }
}

/// Value assigned to an attribute part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Removes a whole-value attribute; empty text for a segment
    Absent,
    Text(String),
}

impl AttrValue {
    fn into_text(self) -> String {
        match self {
            AttrValue::Absent => String::new(),
            AttrValue::Text(text) => text,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::Text(text.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(text)
    }
}

/// `true` keeps the attribute with an empty value, `false` removes it
impl From<bool> for AttrValue {
    fn from(present: bool) -> Self {
        if present {
            AttrValue::Text(String::new())
        } else {
            AttrValue::Absent
        }
    }
}

impl<T: Into<String>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(text) => AttrValue::Text(text.into()),
            None => AttrValue::Absent,
        }
    }
}

/// A live part: child position or attribute value
#[derive(Debug)]
pub enum LivePart {
    Child(ChildLivePart),
    Attribute(AttributeLivePart),
}

impl LivePart {
    pub fn expression(&self) -> &str {
        match self {
            LivePart::Child(part) => part.expression(),
            LivePart::Attribute(part) => part.expression(),
        }
    }

    pub fn as_child(&self) -> Option<&ChildLivePart> {
        match self {
            LivePart::Child(part) => Some(part),
            LivePart::Attribute(_) => None,
        }
    }

    pub fn as_child_mut(&mut self) -> Option<&mut ChildLivePart> {
        match self {
            LivePart::Child(part) => Some(part),
            LivePart::Attribute(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeLivePart> {
        match self {
            LivePart::Attribute(part) => Some(part),
            LivePart::Child(_) => None,
        }
    }

    pub fn as_attribute_mut(&mut self) -> Option<&mut AttributeLivePart> {
        match self {
            LivePart::Attribute(part) => Some(part),
            LivePart::Child(_) => None,
        }
    }
}

/// A point in a child list holding zero or more substituted nodes
///
/// The location is an empty text anchor the part keeps for its whole life;
/// substituted content sits directly before it.
#[derive(Debug)]
pub struct ChildLivePart {
    expression: String,
    parent: Handle,
    anchor: Handle,
    /// Current content; empty until the first substitution
    nodes: Vec<Handle>,
}

impl ChildLivePart {
    pub(crate) fn new(expression: String, parent: Handle, anchor: Handle) -> Self {
        Self {
            expression,
            parent,
            anchor,
            nodes: Vec::new(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Node whose children hold this part's content
    pub fn parent(&self) -> &Handle {
        &self.parent
    }

    /// Nodes currently substituted at this location
    pub fn nodes(&self) -> &[Handle] {
        &self.nodes
    }

    /// Text of the current content
    pub fn text(&self) -> String {
        self.nodes.iter().map(dom::text_content).collect()
    }

    /// Replaces the current content with `items`, in order
    ///
    /// Strings become text nodes. The previous content is removed, so calling
    /// this repeatedly keeps only the last call's content. Nodes another part
    /// has since taken over are left where they are. An empty sequence leaves
    /// only the anchor.
    pub fn replace_with<I, C>(&mut self, items: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Content>,
    {
        let mut incoming = Vec::new();
        for item in items {
            let node = match item.into() {
                Content::Text(text) => dom::create_text(&text),
                Content::Node(node) => node,
            };
            if Rc::ptr_eq(&node, &self.anchor) || is_inclusive_ancestor(&node, &self.parent) {
                tracing::debug!(
                    "skipping ancestor node substituted at '{}'",
                    self.expression
                );
                continue;
            }
            incoming.push(node);
        }

        self.remove_content();
        for node in &incoming {
            dom::detach(node);
        }

        let index = match dom::index_of(&self.parent, &self.anchor) {
            Some(index) => index,
            None => {
                dom::append(&self.parent, self.anchor.clone());
                self.parent.children.borrow().len() - 1
            }
        };
        for (offset, node) in incoming.iter().enumerate() {
            dom::insert_at(&self.parent, index + offset, node.clone());
        }
        self.nodes = incoming;
    }

    /// Detaches the run of this part's nodes directly before the anchor
    fn remove_content(&mut self) {
        let previous = std::mem::take(&mut self.nodes);
        let Some(mut index) = dom::index_of(&self.parent, &self.anchor) else {
            return;
        };
        while index > 0 {
            let sibling = self.parent.children.borrow()[index - 1].clone();
            if !previous.iter().any(|node| Rc::ptr_eq(node, &sibling)) {
                break;
            }
            dom::detach(&sibling);
            index -= 1;
        }
    }

    /// Parses `markup` as a fragment and substitutes its top-level nodes
    pub fn replace_html(&mut self, markup: &str) -> Result<()> {
        let template = dom::parse_fragment(markup)?;
        let mut nodes = Vec::new();
        if let Some(fragment) = dom::template_contents(&template) {
            nodes.extend(fragment.children.borrow().iter().cloned());
        }
        self.replace_with(nodes);
        Ok(())
    }

    /// Removes the content, leaving an empty anchor
    pub fn clear(&mut self) {
        self.replace_with(std::iter::empty::<Content>());
    }
}

fn is_inclusive_ancestor(candidate: &Handle, node: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if Rc::ptr_eq(&n, candidate) {
            return true;
        }
        current = dom::parent_of(&n);
    }
    false
}

/// Live state of one templated attribute, shared by its parts
#[derive(Debug)]
pub(crate) struct AttributeSlot {
    element: Handle,
    name: QualName,
    /// Attributes that precede this one in the source, for re-insertion
    /// after a whole-value removal
    preceding: Vec<QualName>,
    segments: Vec<SlotSegment>,
    present: bool,
}

#[derive(Debug)]
enum SlotSegment {
    Literal(String),
    Value(String),
}

impl AttributeSlot {
    pub(crate) fn new(element: Handle, layout: &AttributeLayout) -> Self {
        let segments = layout
            .segments
            .iter()
            .map(|segment| match segment {
                AttrSegment::Literal(text) => SlotSegment::Literal(text.clone()),
                AttrSegment::Slot => SlotSegment::Value(String::new()),
            })
            .collect();
        let preceding = dom::attribute_names(&element)
            .into_iter()
            .take(layout.position)
            .collect();
        Self {
            element,
            name: layout.name.clone(),
            preceding,
            segments,
            present: true,
        }
    }

    /// Index into `segments` of the n-th value slot
    pub(crate) fn slot_index(&self, segment_index: usize) -> Option<usize> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| matches!(segment, SlotSegment::Value(_)))
            .nth(segment_index)
            .map(|(index, _)| index)
    }

    fn render(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                SlotSegment::Literal(text) | SlotSegment::Value(text) => text.as_str(),
            })
            .collect()
    }

    fn set(&mut self, index: usize, value: String) {
        if let Some(SlotSegment::Value(current)) = self.segments.get_mut(index) {
            *current = value;
        }
        self.present = true;
        let position = self.restore_position();
        dom::set_attribute(&self.element, &self.name, &self.render(), position);
    }

    fn remove(&mut self) {
        self.present = false;
        dom::remove_attribute(&self.element, &self.name);
    }

    /// Index just after the last present attribute that precedes this one
    /// in the source
    fn restore_position(&self) -> usize {
        dom::attribute_names(&self.element)
            .iter()
            .rposition(|name| self.preceding.contains(name))
            .map_or(0, |index| index + 1)
    }

    fn get(&self, index: usize) -> Option<String> {
        match self.segments.get(index) {
            Some(SlotSegment::Value(value)) if self.present => Some(value.clone()),
            _ => None,
        }
    }
}

/// A value slot inside an attribute of one instance's tree
#[derive(Debug)]
pub struct AttributeLivePart {
    expression: String,
    name: QualName,
    whole: bool,
    segment_index: usize,
    /// Index of this part's value in the slot's segments
    slot_index: usize,
    slot: Rc<RefCell<AttributeSlot>>,
}

impl AttributeLivePart {
    pub(crate) fn new(
        expression: String,
        whole: bool,
        segment_index: usize,
        slot: Rc<RefCell<AttributeSlot>>,
    ) -> Self {
        let (name, slot_index) = {
            let state = slot.borrow();
            let slot_index = state.slot_index(segment_index).unwrap_or(usize::MAX);
            (state.name.clone(), slot_index)
        };
        Self {
            expression,
            name,
            whole,
            segment_index,
            slot_index,
            slot,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn attribute_name(&self) -> &QualName {
        &self.name
    }

    /// Element that owns the attribute
    pub fn element(&self) -> Handle {
        self.slot.borrow().element.clone()
    }

    /// Position among the attribute's expression segments
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    /// Whether presence and value are both driven by this part
    pub fn is_whole(&self) -> bool {
        self.whole
    }

    /// Current value of this part; `None` once a whole-value attribute is removed
    pub fn value(&self) -> Option<String> {
        self.slot.borrow().get(self.slot_index)
    }

    /// Sets this part's value and rewrites the attribute from its segments
    ///
    /// For a whole-value part `AttrValue::Absent` removes the attribute and a
    /// later text value restores it at its original position.
    pub fn set_value(&mut self, value: impl Into<AttrValue>) {
        let mut slot = self.slot.borrow_mut();
        match (self.whole, value.into()) {
            (true, AttrValue::Absent) => slot.remove(),
            (_, value) => slot.set(self.slot_index, value.into_text()),
        }
    }
}
