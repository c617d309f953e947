//! Default processor: expressions as dotted keys into TOML params

use crate::config::EngineConfig;
use crate::error::{PartsError, Result};
use toml::Value;

use super::live::{AttrValue, LivePart};
use super::processor::Processor;

/// Params holding TOML data for the default processor
#[derive(Debug, Clone)]
pub struct Params {
    data: Value,
}

impl Params {
    /// Create params from a TOML value
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Parse params from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(text).map_err(|e| PartsError::ParamsParse(e.to_string()))?;
        Ok(Self::new(Value::Table(table)))
    }

    /// Get the underlying TOML value
    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// Looks up each part's expression in [`Params`] and substitutes the value
///
/// - Scalars become text; booleans toggle whole-value attributes
/// - Arrays become consecutive text nodes in child position and
///   space-separated text in attributes
/// - Tables are an error
/// - Missing keys leave the part untouched unless strict
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsProcessor {
    strict: bool,
}

impl ParamsProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails on expressions missing from params
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            strict: config.strict_params,
        }
    }
}

impl Processor<Params> for ParamsProcessor {
    type Error = PartsError;

    fn process(&mut self, parts: &mut [LivePart], params: &Params) -> Result<()> {
        for part in parts.iter_mut() {
            let expression = part.expression().to_string();
            let Some(value) = resolve_key(params.data(), &expression) else {
                if self.strict {
                    return Err(PartsError::ParamUndefined { expression });
                }
                tracing::trace!("no param for '{}', leaving part untouched", expression);
                continue;
            };

            match part {
                LivePart::Child(child) => child.replace_with(child_texts(value, &expression)?),
                LivePart::Attribute(attribute) => {
                    let value = match value {
                        Value::Boolean(present) if attribute.is_whole() => AttrValue::from(*present),
                        other => AttrValue::Text(stringify_value(other, &expression)?),
                    };
                    attribute.set_value(value);
                }
            }
        }
        Ok(())
    }
}

/// Resolve a dotted key from TOML data
pub(crate) fn resolve_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = data;
    for part in key.split('.') {
        current = match current {
            Value::Table(table) => table.get(part)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Stringify a TOML value; arrays join with a single space
pub(crate) fn stringify_value(value: &Value, key: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| stringify_value(item, key))
            .collect::<Result<Vec<_>>>()?
            .join(" ")),
        Value::Table(_) => Err(PartsError::ParamTable {
            expression: key.to_string(),
        }),
    }
}

/// Text nodes for a child part: one per array item, otherwise one
fn child_texts(value: &Value, key: &str) -> Result<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(|item| stringify_value(item, key)).collect(),
        other => Ok(vec![stringify_value(other, key)?]),
    }
}
