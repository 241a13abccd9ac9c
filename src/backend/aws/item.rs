//! Conversion between JSON items and DynamoDB attribute maps.

use crate::backend::Item;
use crate::error::{ConfigError, Result};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value as JsonValue};
use std::collections::HashMap;

/// Convert a JSON item into a DynamoDB attribute map.
pub fn item_to_attribute_map(item: &Item) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(key, value)| (key.clone(), json_to_attribute(value)))
        .collect()
}

/// Convert a DynamoDB attribute map into a JSON item.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidItem`] for binary attributes, numbers that do
/// not fit a JSON number, or attribute types this crate does not know.
pub fn attribute_map_to_item(attributes: &HashMap<String, AttributeValue>) -> Result<Item> {
    attributes
        .iter()
        .map(|(key, value)| Ok((key.clone(), attribute_to_json(value)?)))
        .collect()
}

fn json_to_attribute(value: &JsonValue) -> AttributeValue {
    match value {
        JsonValue::Null => AttributeValue::Null(true),
        JsonValue::Bool(b) => AttributeValue::Bool(*b),
        JsonValue::Number(n) => AttributeValue::N(n.to_string()),
        JsonValue::String(s) => AttributeValue::S(s.clone()),
        JsonValue::Array(values) => AttributeValue::L(values.iter().map(json_to_attribute).collect()),
        JsonValue::Object(map) => AttributeValue::M(item_to_attribute_map(map)),
    }
}

fn attribute_to_json(value: &AttributeValue) -> Result<JsonValue> {
    match value {
        AttributeValue::Null(_) => Ok(JsonValue::Null),
        AttributeValue::Bool(b) => Ok(JsonValue::Bool(*b)),
        AttributeValue::N(n) => parse_number(n).map(JsonValue::Number),
        AttributeValue::S(s) => Ok(JsonValue::String(s.clone())),
        AttributeValue::Ss(values) => Ok(JsonValue::Array(
            values.iter().cloned().map(JsonValue::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n).map(JsonValue::Number))
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_json)
            .collect::<Result<Vec<_>>>()
            .map(JsonValue::Array),
        AttributeValue::M(map) => attribute_map_to_item(map).map(JsonValue::Object),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(ConfigError::InvalidItem(
            "binary attributes are not supported".to_string(),
        )),
        other => Err(ConfigError::InvalidItem(format!(
            "unknown attribute type: {:?}",
            other
        ))),
    }
}

fn parse_number(raw: &str) -> Result<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Number::from(u));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ConfigError::InvalidItem(format!("invalid number: {}", raw)))
}
