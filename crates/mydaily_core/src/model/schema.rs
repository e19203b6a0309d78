//! Resource schema descriptors and payload casting.
//!
//! # Responsibility
//! - Describe each resource kind (fields, kinds, requirements, defaults).
//! - Cast untyped JSON payloads into stored field values.
//!
//! # Invariants
//! - Keys not declared by the schema never reach the store.
//! - Timestamps are always stored as `YYYY-MM-DDTHH:MM:SS.mmmZ` strings.
//! - Integral numbers are stored as JSON integers.
//! - Create payloads enforce requirements and defaults; patches only cast.

use crate::model::document::Fields;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";
// Largest magnitude an f64 can hold without losing integer precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Value kind of one schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Timestamp,
}

impl FieldKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Timestamp => "timestamp",
        }
    }
}

/// Value filled in on create when the payload leaves a field out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Creation time of the document.
    Now,
}

/// One declared field of a resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
        }
    }

    const fn defaulted(name: &'static str, kind: FieldKind, default: FieldDefault) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: Some(default),
        }
    }
}

/// Static description of one resource collection.
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Human-readable resource name used in logs.
    pub name: &'static str,
    /// Store collection holding this resource.
    pub collection: &'static str,
    /// Declared fields in output order.
    pub fields: &'static [FieldSpec],
}

/// Daily log entries: the date defaults to the creation time.
pub static DAILY_ENTRY: ResourceSchema = ResourceSchema {
    name: "daily",
    collection: "dailies",
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::defaulted("date", FieldKind::Timestamp, FieldDefault::Now),
    ],
};

/// Overtime entries.
pub static OVERTIME_ENTRY: ResourceSchema = ResourceSchema {
    name: "overtime",
    collection: "horasextras",
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("date", FieldKind::Timestamp),
        FieldSpec::required("hours", FieldKind::Number),
    ],
};

/// Free-form notes.
pub static NOTE: ResourceSchema = ResourceSchema {
    name: "note",
    collection: "notas",
    fields: &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::required("date", FieldKind::Timestamp),
    ],
};

/// Payload rejected by a resource schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload is not a JSON object.
    NotAnObject,
    /// A required field is absent, null or empty.
    MissingField(&'static str),
    /// A field value cannot be cast to the declared kind.
    InvalidValue {
        field: &'static str,
        kind: FieldKind,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "payload must be a JSON object"),
            Self::MissingField(field) => write!(f, "field `{field}` is required"),
            Self::InvalidValue { field, kind } => {
                write!(f, "field `{field}` is not a valid {}", kind.as_str())
            }
        }
    }
}

impl Error for ValidationError {}

impl ResourceSchema {
    /// Looks up one declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Builds the fields of a new document from a create payload.
    ///
    /// Casts declared fields, fills defaults for absent or null values and
    /// then enforces requirements.
    pub fn build_new(&self, payload: &Value, now: DateTime<Utc>) -> Result<Fields, ValidationError> {
        let source = payload.as_object().ok_or(ValidationError::NotAnObject)?;
        let mut fields = Fields::new();

        for spec in self.fields {
            let mut value = match source.get(spec.name) {
                Some(raw) => Some(cast_value(spec, raw)?),
                None => None,
            };

            if value.as_ref().map_or(true, Value::is_null) {
                if let Some(FieldDefault::Now) = spec.default {
                    value = Some(Value::String(format_timestamp(now)));
                }
            }

            if spec.required && is_blank(value.as_ref()) {
                return Err(ValidationError::MissingField(spec.name));
            }

            if let Some(value) = value {
                fields.insert(spec.name.to_string(), value);
            }
        }

        Ok(fields)
    }

    /// Builds a partial update from an update payload.
    ///
    /// Only declared fields present in the payload are kept; requirements and
    /// defaults are not applied.
    pub fn build_patch(&self, payload: &Value) -> Result<Fields, ValidationError> {
        let source = payload.as_object().ok_or(ValidationError::NotAnObject)?;
        let mut patch = Fields::new();

        for spec in self.fields {
            if let Some(raw) = source.get(spec.name) {
                patch.insert(spec.name.to_string(), cast_value(spec, raw)?);
            }
        }

        Ok(patch)
    }
}

/// Renders a timestamp in the stored wire format.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format(TIMESTAMP_OUTPUT_FORMAT).to_string()
}

/// Parses the textual timestamp forms accepted in payloads.
///
/// Inputs without an offset are interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn cast_value(spec: &FieldSpec, raw: &Value) -> Result<Value, ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: spec.name,
        kind: spec.kind,
    };

    if raw.is_null() {
        return Ok(Value::Null);
    }

    match spec.kind {
        FieldKind::Text => match raw {
            Value::String(_) => Ok(raw.clone()),
            Value::Number(number) => Ok(Value::String(number.to_string())),
            Value::Bool(flag) => Ok(Value::String(flag.to_string())),
            _ => Err(invalid()),
        },
        FieldKind::Number => match raw {
            Value::Number(number) => match number.as_f64() {
                Some(value) if !number.is_i64() && !number.is_u64() => Ok(normalize_number(value)),
                _ => Ok(raw.clone()),
            },
            Value::String(text) if text.trim().is_empty() => Ok(Value::Null),
            Value::String(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(normalize_number)
                .ok_or_else(invalid),
            Value::Bool(flag) => Ok(Value::from(i64::from(*flag))),
            _ => Err(invalid()),
        },
        FieldKind::Timestamp => match raw {
            Value::String(text) if text.trim().is_empty() => Ok(Value::Null),
            Value::String(text) => parse_timestamp(text)
                .map(|parsed| Value::String(format_timestamp(parsed)))
                .ok_or_else(invalid),
            Value::Number(number) => number
                .as_f64()
                .filter(|millis| millis.is_finite())
                .and_then(|millis| DateTime::from_timestamp_millis(millis.trunc() as i64))
                .map(|parsed| Value::String(format_timestamp(parsed)))
                .ok_or_else(invalid),
            _ => Err(invalid()),
        },
    }
}

fn normalize_number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}
