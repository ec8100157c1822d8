//! Casting between request fields, stored documents and entity values.
//!
//! Request bodies arrive as loose JSON objects. Each schema field is cast the
//! way a document mapper in strict mode would: compatible scalars are coerced,
//! anything else is a [`DbError::CastError`].

use crate::errors::custom::DbError;
use bson::{Bson, Document};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serializer;
use serde_json::{Map, Number, Value};

/// A parsed request body.
pub type Fields = Map<String, Value>;

/// Largest integer a JavaScript number represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn cast_error(field: &str, expected: &str, value: &Value) -> DbError {
    DbError::CastError(format!(
        "Cast to {} failed for value {} at path \"{}\"",
        expected, value, field
    ))
}

fn number_to_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if !number.is_i64() && !number.is_u64() && is_integral(value) => {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

fn is_integral(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}

/******************************************/
// Request field casting
/******************************************/
pub fn text(fields: &Fields, field: &str) -> Result<Option<String>, DbError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(Value::Number(value)) => Ok(Some(number_to_text(value))),
        Some(Value::Bool(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(cast_error(field, "string", other)),
    }
}

pub fn number(fields: &Fields, field: &str) -> Result<Option<f64>, DbError> {
    let value = match fields.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) if raw.trim().is_empty() => return Ok(None),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(cast_error(field, "Number", value)),
    }
}

pub fn date(fields: &Fields, field: &str) -> Result<Option<DateTime<Utc>>, DbError> {
    let value = match fields.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    let parsed = match value {
        Value::String(raw) => parse_date(raw.trim()),
        Value::Number(millis) => millis
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed
        .map(|date| Some(truncate_to_millis(date)))
        .ok_or_else(|| cast_error(field, "date", value))
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Stored dates carry millisecond precision; values are truncated up front so
/// a record reads back exactly as it was returned at creation.
pub fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    bson::DateTime::from_chrono(date).to_chrono()
}

pub fn required<T>(value: Option<T>, field: &str) -> Result<T, DbError> {
    value.ok_or_else(|| DbError::ValidationError(format!("Path `{}` is required.", field)))
}

/// Like [`required`], but an empty string is missing too.
pub fn required_text(value: Option<String>, field: &str) -> Result<String, DbError> {
    required(value.filter(|text| !text.is_empty()), field)
}

/******************************************/
// Stored document reading
/******************************************/
pub fn read_text(document: &Document, field: &str) -> Result<Option<String>, DbError> {
    match document.get(field) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(value)) => Ok(Some(value.clone())),
        Some(Bson::Int32(value)) => Ok(Some(value.to_string())),
        Some(Bson::Int64(value)) => Ok(Some(value.to_string())),
        Some(Bson::Double(value)) if is_integral(*value) => Ok(Some(format!("{}", *value as i64))),
        Some(Bson::Double(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(DbError::CastError(format!(
            "stored field `{}` is not text: {}",
            field, other
        ))),
    }
}

pub fn read_number(document: &Document, field: &str) -> Result<Option<f64>, DbError> {
    match document.get(field) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::Double(value)) => Ok(Some(*value)),
        Some(Bson::Int32(value)) => Ok(Some(f64::from(*value))),
        Some(Bson::Int64(value)) => Ok(Some(*value as f64)),
        Some(other) => Err(DbError::CastError(format!(
            "stored field `{}` is not a number: {}",
            field, other
        ))),
    }
}

pub fn read_date(document: &Document, field: &str) -> Result<Option<DateTime<Utc>>, DbError> {
    match document.get(field) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(value)) => Ok(Some(value.to_chrono())),
        Some(other) => Err(DbError::CastError(format!(
            "stored field `{}` is not a date: {}",
            field, other
        ))),
    }
}

pub fn read_version(document: &Document) -> Result<i32, DbError> {
    match document.get("__v") {
        None | Some(Bson::Null) => Ok(0),
        Some(Bson::Int32(value)) => Ok(*value),
        Some(Bson::Int64(value)) => i32::try_from(*value)
            .map_err(|_| DbError::CastError(format!("stored `__v` out of range: {}", value))),
        Some(other) => Err(DbError::CastError(format!(
            "stored `__v` is not an integer: {}",
            other
        ))),
    }
}

/// Writes `value` only when present, so absent optional fields stay absent.
pub fn set_optional(document: &mut Document, field: &str, value: Option<impl Into<Bson>>) {
    if let Some(value) = value {
        document.insert(field, value.into());
    }
}

/******************************************/
// JSON rendering
/******************************************/
/// Integral numbers render without a fractional part, like a JavaScript
/// client would print them.
pub fn serialize_js_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(number) if is_integral(*number) => serializer.serialize_i64(*number as i64),
        Some(number) => serializer.serialize_f64(*number),
        None => serializer.serialize_none(),
    }
}

pub fn serialize_js_date<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn serialize_object_id<S: Serializer>(
    value: &bson::oid::ObjectId,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_hex())
}
