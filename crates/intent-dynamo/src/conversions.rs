//! Flat item ⇄ DynamoDB attribute map.

use aws_sdk_dynamodb::types::AttributeValue;
use intent_core::{Item, PaymentError, PaymentResult};
use serde_json::{Number, Value};
use std::collections::HashMap;

pub type AttributeMap = HashMap<String, AttributeValue>;

/// Convert a stored item into DynamoDB attributes
pub fn to_attribute_map(item: Item) -> AttributeMap {
    item.into_iter()
        .map(|(name, value)| (name, to_attribute(value)))
        .collect()
}

/// Convert DynamoDB attributes back into a stored item
pub fn from_attribute_map(attributes: AttributeMap) -> PaymentResult<Item> {
    attributes
        .into_iter()
        .map(|(name, attribute)| {
            let value = from_attribute(&name, attribute)?;
            Ok((name, value))
        })
        .collect()
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::String(s) => AttributeValue::S(s),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Null => AttributeValue::Null(true),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.into_iter()
                .map(|(k, v)| (k, to_attribute(v)))
                .collect(),
        ),
    }
}

fn from_attribute(name: &str, attribute: AttributeValue) -> PaymentResult<Value> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s)),
        AttributeValue::N(n) => parse_number(name, &n),
        AttributeValue::Bool(b) => Ok(Value::Bool(b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .into_iter()
            .map(|v| from_attribute(name, v))
            .collect::<PaymentResult<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::M(map) => map
            .into_iter()
            .map(|(k, v)| Ok((k, from_attribute(name, v)?)))
            .collect::<PaymentResult<serde_json::Map<_, _>>>()
            .map(Value::Object),
        other => Err(PaymentError::Serialization(format!(
            "Unsupported attribute type for {}: {:?}",
            name, other
        ))),
    }
}

fn parse_number(name: &str, raw: &str) -> PaymentResult<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Number(i.into()));
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(Value::Number(u.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| {
            PaymentError::Serialization(format!("Attribute {} is not a number: {}", name, raw))
        })
}
