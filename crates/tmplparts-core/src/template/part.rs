//! Template parts and their addresses within a skeleton

use markup5ever::QualName;
use markup5ever_rcdom::Handle;

/// One step from a node towards a descendant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// The n-th child
    Child(usize),
    /// The content fragment of a `<template>` element
    Contents,
}

/// Address of a node relative to a skeleton root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<PathStep>);

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn child(&self, index: usize) -> Self {
        let mut steps = self.0.clone();
        steps.push(PathStep::Child(index));
        Self(steps)
    }

    pub fn contents(&self) -> Self {
        let mut steps = self.0.clone();
        steps.push(PathStep::Contents);
        Self(steps)
    }

    /// Follows the path from `root`. `None` if the tree no longer has that shape.
    pub fn resolve(&self, root: &Handle) -> Option<Handle> {
        let mut node = root.clone();
        for step in &self.0 {
            node = match step {
                PathStep::Child(index) => node.children.borrow().get(*index)?.clone(),
                PathStep::Contents => crate::dom::template_contents(&node)?,
            };
        }
        Some(node)
    }
}

/// Where a part attaches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartLocation {
    /// A point in a child list, marked by an empty anchor text node
    Child {
        /// Node whose children hold the anchor
        parent: NodePath,
        /// Position of the anchor among the parent's children at extraction
        anchor_index: usize,
    },
    /// A value slot inside an attribute
    Attribute {
        element: NodePath,
        name: QualName,
        /// Position among the attribute's expression segments
        segment_index: usize,
        /// Presence and value are both driven by the processor
        whole: bool,
    },
}

/// A tracked, substitutable location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub(crate) expression: String,
    pub(crate) location: PartLocation,
    pub(crate) target: Target,
}

/// Pre-order ordinals of the nodes a part binds to in a built skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Child { parent: usize, anchor: usize },
    /// Index into the template's attribute layouts and the n-th value slot
    Attribute { layout: usize, segment: usize },
}

impl Part {
    /// The placeholder text, trimmed and never interpreted
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn location(&self) -> &PartLocation {
        &self.location
    }

    pub fn is_child(&self) -> bool {
        matches!(self.location, PartLocation::Child { .. })
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.location, PartLocation::Attribute { .. })
    }
}
