//! Template module - placeholder parts over markup trees
//!
//! A [`Template`] is extracted once from a source tree: every `{{expr}}` in a
//! text node or attribute value becomes a [`Part`], in document order, and the
//! placeholders are replaced by empty anchors in a skeleton. Instantiating
//! clones the skeleton, binds a [`LivePart`] to each anchor and hands them to a
//! [`Processor`]. [`Instance::update`] re-runs a processor over the same live
//! parts in place.
//!
//! ## Syntax
//!
//! - Child position: `<p>{{name}} world</p>`
//! - Attribute position: `<div class="foo {{y}} {{z}}">`
//! - Whole-value attribute: `<input disabled="{{off}}">` (boolean attributes only)
//! - Unterminated `{{` is literal text

mod cache;
mod extract;
mod instance;
mod live;
mod params;
mod part;
mod processor;
mod skeleton;
mod tokenize;

pub use cache::TemplateCache;
pub use extract::{Extractor, NestedTemplateAction};
pub use instance::Instance;
pub use live::{AttrValue, AttributeLivePart, ChildLivePart, Content, LivePart};
pub use params::{Params, ParamsProcessor};
pub use part::{NodePath, Part, PartLocation, PathStep};
pub use processor::{BindingResolver, Processor, processor_fn};
pub use tokenize::{Segment, Segments, tokenize};

use crate::config::EngineConfig;
use markup5ever_rcdom::Handle;
use skeleton::{AttributeLayout, Skeleton};

/// Immutable pairing of a skeleton and its ordered parts
///
/// Holds no `Rc`, so it can be shared across threads behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    skeleton: Skeleton,
    parts: Vec<Part>,
    layouts: Vec<AttributeLayout>,
    declared_processor: Option<String>,
}

impl Template {
    /// Extracts a template with the default configuration
    pub fn extract(source: &Handle) -> Self {
        Self::extract_with(source, &EngineConfig::default())
    }

    /// Extracts a template with `config`
    pub fn extract_with(source: &Handle, config: &EngineConfig) -> Self {
        Extractor::new(config).extract(source)
    }

    /// Parts in document order
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Processor name declared by the source `<template type="...">`
    pub fn declared_processor(&self) -> Option<&str> {
        self.declared_processor.as_deref()
    }

    /// Builds a fresh, independently owned copy of the skeleton
    ///
    /// Anchors are empty text nodes; templated attributes hold only their
    /// literal text.
    pub fn clone_tree(&self) -> Handle {
        self.skeleton.build().0
    }
}

#[cfg(test)]
mod tests;
