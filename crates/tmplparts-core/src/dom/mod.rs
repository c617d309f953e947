//! Tree model primitives over `markup5ever_rcdom`
//!
//! The engine touches host trees only through these helpers: node creation,
//! insertion and removal that keep parent pointers consistent, and attribute
//! access.

mod parse;
mod serialize;

pub use parse::{parse_fragment, parse_template};
pub use serialize::to_html;

use markup5ever::tendril::StrTendril;
use markup5ever::{Attribute, LocalName, QualName, namespace_url, ns};
use markup5ever_rcdom::{Handle, Node, NodeData};
use std::cell::RefCell;
use std::rc::Rc;


/// Creates a detached text node
pub fn create_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(text)),
    })
}

/// Creates a detached HTML element with no attributes
pub fn create_element(local: &str) -> Handle {
    let name = QualName::new(None, ns!(html), LocalName::from(local));
    let template = name.local.as_ref() == "template";
    new_element(name, Vec::new(), template)
}

/// Creates an empty fragment root
pub fn create_fragment() -> Handle {
    Node::new(NodeData::Document)
}

/// Creates an element node, allocating a contents fragment for `<template>`
pub(crate) fn new_element(name: QualName, attrs: Vec<Attribute>, template: bool) -> Handle {
    Node::new(NodeData::Element {
        name,
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(template.then(create_fragment)),
        mathml_annotation_xml_integration_point: false,
    })
}


/// Returns the parent of a node, if attached
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|w| w.upgrade());
    node.parent.set(weak);
    parent
}

/// Position of `child` within `parent`'s children
pub fn index_of(parent: &Handle, child: &Handle) -> Option<usize> {
    parent
        .children
        .borrow()
        .iter()
        .position(|c| Rc::ptr_eq(c, child))
}

/// Appends `child` as the last child of `parent`, detaching it first
pub fn append(parent: &Handle, child: Handle) {
    detach(&child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Inserts `child` at `index` (clamped to the child count), detaching it first
pub fn insert_at(parent: &Handle, index: usize, child: Handle) {
    detach(&child);
    child.parent.set(Some(Rc::downgrade(parent)));
    let mut children = parent.children.borrow_mut();
    let index = index.min(children.len());
    children.insert(index, child);
}

/// Inserts `child` immediately before `reference`, or appends when
/// `reference` is not a child of `parent`
pub fn insert_before(parent: &Handle, reference: &Handle, child: Handle) {
    match index_of(parent, reference) {
        Some(index) => insert_at(parent, index, child),
        None => append(parent, child),
    }
}

/// Removes a node from its parent; no-op for detached nodes
pub fn detach(node: &Handle) {
    let Some(parent) = parent_of(node) else {
        return;
    };
    node.parent.set(None);
    parent
        .children
        .borrow_mut()
        .retain(|c| !Rc::ptr_eq(c, node));
}

/// Reads an attribute value by local name
pub fn get_attribute(node: &Handle, local: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == local)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Sets an attribute, replacing its value in place or inserting it at
/// `position` (clamped) when absent. Returns `false` for non-elements.
pub fn set_attribute(node: &Handle, name: &QualName, value: &str, position: usize) -> bool {
    let NodeData::Element { attrs, .. } = &node.data else {
        return false;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|a| a.name == *name) {
        Some(attr) => attr.value = StrTendril::from_slice(value),
        None => {
            let position = position.min(attrs.len());
            attrs.insert(
                position,
                Attribute {
                    name: name.clone(),
                    value: StrTendril::from_slice(value),
                },
            );
        }
    }
    true
}

/// Attribute names of an element in order; empty for other nodes
pub(crate) fn attribute_names(node: &Handle) -> Vec<QualName> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs.borrow().iter().map(|a| a.name.clone()).collect(),
        _ => Vec::new(),
    }
}

/// Removes an attribute, returning the index it occupied
pub fn remove_attribute(node: &Handle, name: &QualName) -> Option<usize> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    let mut attrs = attrs.borrow_mut();
    let index = attrs.iter().position(|a| a.name == *name)?;
    attrs.remove(index);
    Some(index)
}

/// Content fragment of a `<template>` element
pub fn template_contents(node: &Handle) -> Option<Handle> {
    match &node.data {
        NodeData::Element {
            template_contents, ..
        } => template_contents.borrow().clone(),
        _ => None,
    }
}

/// Whether the node is an HTML `<template>` element
pub fn is_template(node: &Handle) -> bool {
    matches!(&node.data, NodeData::Element { name, .. } if name.local.as_ref() == "template")
}

/// Concatenated text of a node and its descendants
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}
