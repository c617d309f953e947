//! Part extraction
//!
//! Walks a source tree once, in pre-order (attributes before children, both
//! in source order), and produces the skeleton plus the ordered part list.

use crate::config::EngineConfig;
use crate::config::consts::attributes;
use crate::dom;
use markup5ever::{Attribute, QualName};
use markup5ever_rcdom::{Handle, NodeData};
use std::rc::Rc;

use super::Template;
use super::part::{NodePath, Part, PartLocation, Target};
use super::skeleton::{AttrSegment, AttributeLayout, Skeleton, SkeletonNode};
use super::tokenize::{Segment, tokenize};

/// What to do when the walk reaches a nested `<template>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedTemplateAction {
    /// Extract its placeholders as parts of the outer template
    #[default]
    Extract,
    /// Copy it unchanged; its placeholders yield no parts
    Verbatim,
}

type NestedHook<'a> = Box<dyn FnMut(&Handle) -> NestedTemplateAction + 'a>;

/// Builds templates from source trees
pub struct Extractor<'a> {
    config: &'a EngineConfig,
    nested_hook: Option<NestedHook<'a>>,
}

/// Accumulated output of one walk
struct Walk {
    parts: Vec<Part>,
    layouts: Vec<AttributeLayout>,
    /// Pre-order ordinal of the next skeleton node; 0 is the root
    next_ordinal: usize,
}

impl Walk {
    fn take_ordinal(&mut self) -> usize {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        ordinal
    }
}

impl<'a> Extractor<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            nested_hook: None,
        }
    }

    /// Installs a callback consulted before the walk enters a nested template
    ///
    /// The callback may modify the nested template's own attributes and
    /// contents, or move it out of the source entirely; the walk reads the
    /// tree as the callback leaves it. A template no longer in place yields
    /// nothing.
    pub fn with_nested_hook(
        mut self,
        hook: impl FnMut(&Handle) -> NestedTemplateAction + 'a,
    ) -> Self {
        self.nested_hook = Some(Box::new(hook));
        self
    }

    /// Extracts a template from `source`
    ///
    /// A `<template>` element contributes its content fragment; any other node
    /// contributes its children. The source is only read.
    pub fn extract(&mut self, source: &Handle) -> Template {
        let content = dom::template_contents(source).unwrap_or_else(|| source.clone());
        let declared_processor = if dom::is_template(source) {
            dom::get_attribute(source, attributes::PROCESSOR_TYPE)
        } else {
            None
        };

        let mut walk = Walk {
            parts: Vec::new(),
            layouts: Vec::new(),
            next_ordinal: 1,
        };
        let children = self.walk_children(&content, &NodePath::root(), 0, &mut walk);

        tracing::debug!(
            "extracted template: {} parts, {} templated attributes",
            walk.parts.len(),
            walk.layouts.len()
        );

        Template {
            skeleton: Skeleton { children },
            parts: walk.parts,
            layouts: walk.layouts,
            declared_processor,
        }
    }

    fn walk_children(
        &mut self,
        parent: &Handle,
        path: &NodePath,
        parent_ordinal: usize,
        walk: &mut Walk,
    ) -> Vec<SkeletonNode> {
        let mut out = Vec::new();
        // Snapshot so the nested hook may rearrange this child list
        let children: Vec<Handle> = parent.children.borrow().clone();
        for child in &children {
            match &child.data {
                NodeData::Text { contents } => {
                    let text = contents.borrow();
                    if text.is_empty() {
                        walk.take_ordinal();
                        out.push(SkeletonNode::Text(String::new()));
                        continue;
                    }
                    for segment in tokenize(&text) {
                        let ordinal = walk.take_ordinal();
                        match segment {
                            Segment::Literal(literal) => {
                                out.push(SkeletonNode::Text(literal.to_string()))
                            }
                            Segment::Expression(expression) => {
                                walk.parts.push(Part {
                                    expression: expression.to_string(),
                                    location: PartLocation::Child {
                                        parent: path.clone(),
                                        anchor_index: out.len(),
                                    },
                                    target: Target::Child {
                                        parent: parent_ordinal,
                                        anchor: ordinal,
                                    },
                                });
                                out.push(SkeletonNode::Text(String::new()));
                            }
                        }
                    }
                }
                NodeData::Element { name, attrs, .. } => {
                    // The hook runs before any borrow of the nested template
                    let action = if dom::is_template(child) {
                        let action = self.nested_action(child);
                        if !is_child_of(child, parent) {
                            tracing::trace!("nested template moved by hook, skipping");
                            continue;
                        }
                        action
                    } else {
                        NestedTemplateAction::Extract
                    };
                    let node = match action {
                        NestedTemplateAction::Extract => {
                            let node_path = path.child(out.len());
                            self.walk_element(child, name, &attrs.borrow(), &node_path, walk)
                        }
                        NestedTemplateAction::Verbatim => {
                            tracing::debug!("copying nested template verbatim");
                            verbatim_element(child, name, &attrs.borrow(), walk)
                        }
                    };
                    out.push(node);
                }
                NodeData::Comment { contents } => {
                    walk.take_ordinal();
                    out.push(SkeletonNode::Comment(contents.to_string()));
                }
                _ => tracing::trace!("skipping non-content node in template"),
            }
        }
        out
    }

    fn walk_element(
        &mut self,
        node: &Handle,
        name: &QualName,
        attrs: &[Attribute],
        path: &NodePath,
        walk: &mut Walk,
    ) -> SkeletonNode {
        let ordinal = walk.take_ordinal();
        let mut skeleton_attrs = Vec::new();
        for (position, attr) in attrs.iter().enumerate() {
            let segments: Vec<Segment> = tokenize(&attr.value).collect();
            if !segments.iter().any(Segment::is_expression) {
                skeleton_attrs.push((attr.name.clone(), attr.value.to_string()));
                continue;
            }

            let whole =
                segments.len() == 1 && self.config.is_boolean_attribute(attr.name.local.as_ref());
            let layout = walk.layouts.len();
            let mut layout_segments = Vec::with_capacity(segments.len());
            let mut skeleton_value = String::new();
            let mut segment_index = 0;

            for segment in segments {
                match segment {
                    Segment::Literal(literal) => {
                        skeleton_value.push_str(literal);
                        layout_segments.push(AttrSegment::Literal(literal.to_string()));
                    }
                    Segment::Expression(expression) => {
                        layout_segments.push(AttrSegment::Slot);
                        walk.parts.push(Part {
                            expression: expression.to_string(),
                            location: PartLocation::Attribute {
                                element: path.clone(),
                                name: attr.name.clone(),
                                segment_index,
                                whole,
                            },
                            target: Target::Attribute {
                                layout,
                                segment: segment_index,
                            },
                        });
                        segment_index += 1;
                    }
                }
            }

            walk.layouts.push(AttributeLayout {
                element: ordinal,
                name: attr.name.clone(),
                position,
                segments: layout_segments,
                whole,
            });
            skeleton_attrs.push((attr.name.clone(), skeleton_value));
        }

        let contents = dom::template_contents(node).map(|fragment| {
            let fragment_ordinal = walk.take_ordinal();
            self.walk_children(&fragment, &path.contents(), fragment_ordinal, walk)
        });
        let children = self.walk_children(node, path, ordinal, walk);

        SkeletonNode::Element {
            name: name.clone(),
            attrs: skeleton_attrs,
            contents,
            children,
        }
    }

    fn nested_action(&mut self, node: &Handle) -> NestedTemplateAction {
        match self.nested_hook.as_mut() {
            Some(hook) => hook(node),
            None => NestedTemplateAction::Extract,
        }
    }
}

fn is_child_of(node: &Handle, parent: &Handle) -> bool {
    dom::parent_of(node).is_some_and(|p| Rc::ptr_eq(&p, parent))
}

/// Copies a subtree without tokenizing it, consuming ordinals in build order
fn verbatim(node: &Handle, walk: &mut Walk) -> Option<SkeletonNode> {
    match &node.data {
        NodeData::Text { contents } => {
            walk.take_ordinal();
            Some(SkeletonNode::Text(contents.borrow().to_string()))
        }
        NodeData::Comment { contents } => {
            walk.take_ordinal();
            Some(SkeletonNode::Comment(contents.to_string()))
        }
        NodeData::Element { name, attrs, .. } => {
            Some(verbatim_element(node, name, &attrs.borrow(), walk))
        }
        _ => None,
    }
}

fn verbatim_element(
    node: &Handle,
    name: &QualName,
    attrs: &[Attribute],
    walk: &mut Walk,
) -> SkeletonNode {
    walk.take_ordinal();
    let attrs = attrs
        .iter()
        .map(|a| (a.name.clone(), a.value.to_string()))
        .collect();
    let contents = dom::template_contents(node).map(|fragment| {
        walk.take_ordinal();
        verbatim_children(&fragment, walk)
    });
    let children = verbatim_children(node, walk);
    SkeletonNode::Element {
        name: name.clone(),
        attrs,
        contents,
        children,
    }
}

fn verbatim_children(node: &Handle, walk: &mut Walk) -> Vec<SkeletonNode> {
    node.children
        .borrow()
        .iter()
        .filter_map(|child| verbatim(child, walk))
        .collect()
}
