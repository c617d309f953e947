//! Constants shared across the engine

/// Attributes whose value is driven as a whole (presence and value) when the
/// attribute value is exactly one placeholder
pub mod attributes {
    /// HTML boolean attributes
    pub const BOOLEAN: &[&str] = &[
        "allowfullscreen",
        "async",
        "autofocus",
        "autoplay",
        "checked",
        "controls",
        "default",
        "defer",
        "disabled",
        "formnovalidate",
        "hidden",
        "inert",
        "ismap",
        "itemscope",
        "loop",
        "multiple",
        "muted",
        "nomodule",
        "novalidate",
        "open",
        "playsinline",
        "readonly",
        "required",
        "reversed",
        "selected",
    ];

    /// Attribute on a `<template>` element naming the processor to bind
    pub const PROCESSOR_TYPE: &str = "type";
}
