//! Shared test helpers for template tests

use crate::dom;
use crate::template::{LivePart, Template};
use std::collections::HashMap;
use std::convert::Infallible;
use toml::{Value, toml};

use super::Params;

/// Extract a template from loose markup
pub(super) fn extract(markup: &str) -> Template {
    let source = dom::parse_fragment(markup).unwrap();
    Template::extract(&source)
}

/// Processor that substitutes text by expression from a map
pub(super) fn fill(
    parts: &mut [LivePart],
    values: &HashMap<&str, &str>,
) -> Result<(), Infallible> {
    for part in parts.iter_mut() {
        let Some(value) = values.get(part.expression()).copied() else {
            continue;
        };
        match part {
            LivePart::Child(child) => child.replace_with([value]),
            LivePart::Attribute(attribute) => attribute.set_value(value),
        }
    }
    Ok(())
}

/// Build a substitution map from pairs
pub(super) fn values<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
    pairs.iter().copied().collect()
}

/// Params fixture with scalars, arrays and a table
pub(super) fn sample_params() -> Params {
    let data = toml! {
        title = "Hello"
        count = 3
        hidden = false
        open = true
        tags = ["a", "b"]

        [user]
        name = "Ada"
        role = "admin"
    };
    Params::new(Value::Table(data))
}
