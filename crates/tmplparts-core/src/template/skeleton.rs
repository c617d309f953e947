//! Placeholder-free template trees
//!
//! A skeleton is owned data (no `Rc`), so a template can be shared between
//! threads. Building it yields a fresh rcdom tree plus every node it created
//! in pre-order, which is how parts find their anchors without re-walking.

use crate::dom;
use markup5ever::tendril::StrTendril;
use markup5ever::{Attribute, QualName};
use markup5ever_rcdom::{Handle, Node, NodeData};

/// Node of a skeleton tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SkeletonNode {
    Element {
        name: QualName,
        attrs: Vec<(QualName, String)>,
        /// Content fragment, for `<template>` elements
        contents: Option<Vec<SkeletonNode>>,
        children: Vec<SkeletonNode>,
    },
    /// Literal text, or an empty child-part anchor
    Text(String),
    Comment(String),
}

/// Root of a skeleton tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Skeleton {
    pub(crate) children: Vec<SkeletonNode>,
}

impl Skeleton {
    /// Builds a detached rcdom fragment. `nodes[0]` is the root; the rest
    /// follow in pre-order (element, its contents fragment, contents, children).
    pub(crate) fn build(&self) -> (Handle, Vec<Handle>) {
        let root = dom::create_fragment();
        let mut nodes = vec![root.clone()];
        for child in &self.children {
            let node = child.build(&mut nodes);
            dom::append(&root, node);
        }
        (root, nodes)
    }
}

impl SkeletonNode {
    fn build(&self, nodes: &mut Vec<Handle>) -> Handle {
        match self {
            SkeletonNode::Text(text) => {
                let node = dom::create_text(text);
                nodes.push(node.clone());
                node
            }
            SkeletonNode::Comment(text) => {
                let node = Node::new(NodeData::Comment {
                    contents: StrTendril::from_slice(text),
                });
                nodes.push(node.clone());
                node
            }
            SkeletonNode::Element {
                name,
                attrs,
                contents,
                children,
            } => {
                let attrs = attrs
                    .iter()
                    .map(|(name, value)| Attribute {
                        name: name.clone(),
                        value: StrTendril::from_slice(value),
                    })
                    .collect();
                let node = dom::new_element(name.clone(), attrs, contents.is_some());
                nodes.push(node.clone());

                if let (Some(contents), Some(fragment)) = (contents, dom::template_contents(&node))
                {
                    nodes.push(fragment.clone());
                    for child in contents {
                        let built = child.build(nodes);
                        dom::append(&fragment, built);
                    }
                }
                for child in children {
                    let built = child.build(nodes);
                    dom::append(&node, built);
                }
                node
            }
        }
    }
}

/// One piece of a templated attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrSegment {
    Literal(String),
    /// Value supplied by an attribute part
    Slot,
}

/// Segment layout of one templated attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeLayout {
    /// Pre-order ordinal of the owning element in the built tree
    pub(crate) element: usize,
    pub(crate) name: QualName,
    /// Index of the attribute in the element's attribute list
    pub(crate) position: usize,
    pub(crate) segments: Vec<AttrSegment>,
    pub(crate) whole: bool,
}
