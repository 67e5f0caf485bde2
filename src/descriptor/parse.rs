//! Descriptor ingestion from JSON state.
//!
//! Shared application state is usually plain data: `remove` can only be a
//! boolean-ish sentinel and `removePath` only a string when well-formed. Values
//! of the wrong type are classified by type tag rather than rejected, so a
//! malformed `remove` or `removePath` never keeps a component from rendering.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use super::{ComponentDescriptor, RemoveSpec};
use crate::types::ComponentId;

/// Errors raised while reading descriptors out of JSON state.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    /// Missing `id`/`type`, or `type` is not a string.
    #[error("malformed component descriptor: {0}")]
    Malformed(#[from] serde_json::Error),
    /// `id` is neither a string nor a number.
    #[error("component id must be a string or a number, got {0}")]
    InvalidId(Value),
    /// The component list is not a JSON array.
    #[error("component list must be an array, got {0}")]
    NotAList(&'static str),
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    id: Value,
    #[serde(rename = "type")]
    component_type: String,
    #[serde(default)]
    props: Value,
    #[serde(default, deserialize_with = "present")]
    remove: Option<Value>,
    #[serde(rename = "removePath", default)]
    remove_path: Option<Value>,
}

/// Integral numbers name the same id however they are written: `4` and `4.0`
/// both read as `"4"`.
fn number_id(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Distinguishes `"remove": null` (present, falsy) from an absent field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ComponentDescriptor {
    /// Read one descriptor from a JSON object.
    pub fn from_json(value: &Value) -> Result<Self, DescriptorError> {
        let raw = RawDescriptor::deserialize(value)?;

        let id = match raw.id {
            Value::String(s) => ComponentId::from(s),
            Value::Number(n) => ComponentId::from(number_id(&n)),
            other => return Err(DescriptorError::InvalidId(other)),
        };

        let remove_path = match raw.remove_path {
            Some(Value::String(path)) => Some(path),
            _ => None,
        };

        Ok(Self {
            remove: RemoveSpec::from_value(raw.remove.as_ref()),
            remove_path,
            props: raw.props,
            ..Self::new(id, raw.component_type)
        })
    }
}

/// Read a whole component list.
///
/// Entries that cannot be read are skipped with a warning. Only a value that
/// is not an array at all is an error.
pub fn parse_components(value: &Value) -> Result<Vec<ComponentDescriptor>, DescriptorError> {
    let Value::Array(entries) = value else {
        return Err(DescriptorError::NotAList(json_type_name(value)));
    };

    let mut components = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match ComponentDescriptor::from_json(entry) {
            Ok(component) => components.push(component),
            Err(err) => warn!("skipping component descriptor at position {position}: {err}"),
        }
    }
    Ok(components)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
