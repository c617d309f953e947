//! Test utilities for tmplparts
//!
//! This crate provides shared testing utilities used across the tmplparts workspace.

use markup5ever_rcdom::Handle;
use std::collections::HashMap;
use std::convert::Infallible;
use tmplparts_core::{LivePart, Processor, dom};

/// Parses loose markup into a `<template>` source tree
///
/// # Panics
///
/// Panics if the markup cannot be parsed.
///
/// # Examples
///
/// ```rust
/// use tmplparts_testkit::fixture;
///
/// let source = fixture("<p>{{name}}</p>");
/// assert!(tmplparts_core::dom::is_template(&source));
/// ```
pub fn fixture(markup: &str) -> Handle {
    dom::parse_fragment(markup).expect("Failed to parse template fixture")
}

/// Text substitutions keyed by expression
pub type Substitutions = HashMap<String, String>;

/// Builds substitutions from `(expression, value)` pairs
pub fn substitutions(pairs: &[(&str, &str)]) -> Substitutions {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Processor that fills parts from [`Substitutions`] and records every call
///
/// Child parts receive a single text node; attribute parts receive the text as
/// their value. Expressions without a substitution are left untouched.
#[derive(Debug, Default)]
pub struct RecordingProcessor {
    calls: Vec<Vec<String>>,
}

impl RecordingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the processor ran
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Expressions seen on each call, in the order received
    pub fn calls(&self) -> &[Vec<String>] {
        &self.calls
    }
}

impl Processor<Substitutions> for RecordingProcessor {
    type Error = Infallible;

    fn process(
        &mut self,
        parts: &mut [LivePart],
        params: &Substitutions,
    ) -> Result<(), Infallible> {
        self.calls
            .push(parts.iter().map(|p| p.expression().to_string()).collect());

        for part in parts.iter_mut() {
            let Some(value) = params.get(part.expression()) else {
                continue;
            };
            match part {
                LivePart::Child(child) => child.replace_with([value.as_str()]),
                LivePart::Attribute(attribute) => attribute.set_value(value.as_str()),
            }
        }
        Ok(())
    }
}

/// Serializes a node's children after collapsing whitespace between tags
pub fn normalized_html(node: &Handle) -> String {
    let html = dom::to_html(node);
    let mut out = String::with_capacity(html.len());
    let mut pending_space = false;
    for c in html.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.ends_with('>') && c != '<' {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}
