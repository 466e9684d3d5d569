//! Property data types.

use crate::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;

/// The declared data type of an entity or relationship property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
}

impl DataType {
    /// Resolve a schema type name to a data type.
    /// Accepts the common spellings case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(DataType::String),
            "int" | "integer" | "long" => Some(DataType::Integer),
            "float" | "double" => Some(DataType::Float),
            "bool" | "boolean" => Some(DataType::Boolean),
            "datetime" | "timestamp" => Some(DataType::DateTime),
            _ => None,
        }
    }

    /// Canonical name as it appears in schema text.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "int",
            DataType::Float => "float",
            DataType::Boolean => "bool",
            DataType::DateTime => "datetime",
        }
    }

    /// Parse a raw constant literal as this data type.
    /// Returns None if the literal does not denote a value of this type.
    pub fn parse_literal(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match self {
            DataType::String => Some(Value::String(raw.to_string())),
            DataType::Integer => raw.parse::<i64>().ok().map(Value::Int),
            DataType::Float => raw.parse::<f64>().ok().map(Value::Float),
            DataType::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            DataType::DateTime => parse_datetime_millis(raw).map(Value::Timestamp),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` date.
fn parse_datetime_millis(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}
