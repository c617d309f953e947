//! Markup parsing into rcdom trees

use crate::error::{PartsError, Result};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, RcDom};

use super::is_template;

/// Parses a markup document and returns its first `<template>` element
///
/// The tree is whatever the HTML parser builds, so placeholders in positions
/// the content model relocates (e.g. loose text inside `<table>`) arrive
/// relocated.
///
/// # Errors
///
/// Returns `TemplateParse` if the input cannot be read and
/// `TemplateNotFound` if no `<template>` element exists.
///
/// The returned element is detached from the parsed document.
pub fn parse_template(markup: &str) -> Result<Handle> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut markup.as_bytes())
        .map_err(|e| PartsError::TemplateParse(e.to_string()))?;

    let template = find_template(&dom.document).ok_or(PartsError::TemplateNotFound)?;
    // Dropping the document empties every node still attached to it
    super::detach(&template);
    Ok(template)
}

/// Parses loose markup as the content of a fresh `<template>` element
///
/// `markup` must not itself close the wrapping template.
pub fn parse_fragment(markup: &str) -> Result<Handle> {
    parse_template(&format!("<template>{markup}</template>"))
}

/// Depth-first search for the first `<template>` element
fn find_template(node: &Handle) -> Option<Handle> {
    if is_template(node) {
        return Some(node.clone());
    }
    node.children.borrow().iter().find_map(find_template)
}
