//! Runtime record values: a tagged variant over everything the wire format
//! can carry.

use std::collections::HashMap;

/// A record: field label to value. Equality ignores insertion order.
pub type Record = HashMap<String, Value>;

/// Dynamically-typed value carried by a record field.
///
/// The encoder matches a value's variant against the field's declared
/// [`SchemaType`]; the widened `I64`/`F64` forms are narrowed into smaller
/// declared widths when the value fits (see [`Encoder`]). The decoder always
/// produces the exact-width variant of the declared type.
///
/// [`SchemaType`]: crate::SchemaType
/// [`Encoder`]: crate::Encoder
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Str(String),
    /// Ordered sequence; elements share the field's declared element type.
    List(Vec<Value>),
    /// Key-value pairs in caller order; keys are primitive per the schema.
    Map(Vec<(Value, Value)>),
    /// Nested record encoded against a referenced model.
    Record(Record),
}

impl Value {
    /// Short name of the runtime shape, used in error context.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::I8(_) => "int8",
            Value::I16(_) => "int16",
            Value::I32(_) => "int32",
            Value::I64(_) => "int64",
            Value::F32(_) => "float32",
            Value::F64(_) => "float64",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
        }
    }
}

/// JSON `null` cannot be represented on the wire: fields are either present
/// with a typed value or absent from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("JSON null has no wire representation")]
pub struct NullValueError;

impl TryFrom<serde_json::Value> for Value {
    type Error = NullValueError;

    /// Converts a JSON tree into a record value. Numbers arrive in the
    /// widened `I64`/`F64` forms; objects become nested records.
    fn try_from(v: serde_json::Value) -> Result<Value, NullValueError> {
        match v {
            serde_json::Value::Null => Err(NullValueError),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::I64(i))
                } else {
                    Ok(Value::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => Ok(Value::Str(s)),
            serde_json::Value::Array(arr) => {
                let items = arr
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(items))
            }
            serde_json::Value::Object(obj) => {
                let mut record = Record::with_capacity(obj.len());
                for (key, val) in obj {
                    record.insert(key, Value::try_from(val)?);
                }
                Ok(Value::Record(record))
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> serde_json::Value {
        match v {
            Value::I8(n) => serde_json::Value::from(n),
            Value::I16(n) => serde_json::Value::from(n),
            Value::I32(n) => serde_json::Value::from(n),
            Value::I64(n) => serde_json::Value::from(n),
            Value::F32(n) => serde_json::Value::from(n),
            Value::F64(n) => serde_json::Value::from(n),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Str(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (key, val) in entries {
                    let key = match key {
                        Value::Str(s) => s,
                        other => serde_json::Value::from(other).to_string(),
                    };
                    map.insert(key, serde_json::Value::from(val));
                }
                serde_json::Value::Object(map)
            }
            Value::Record(record) => {
                let mut map = serde_json::Map::with_capacity(record.len());
                for (key, val) in record {
                    map.insert(key, serde_json::Value::from(val));
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
