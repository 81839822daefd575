//! Wire encoding: walks a record against a model's field table.

use schemapack_buffers::Writer;

use crate::model::Model;
use crate::registry::Registry;
use crate::types::SchemaType;
use crate::value::{Record, Value};
use crate::MAX_DEPTH;

/// Encoding error.
///
/// Runtime and recoverable: the record, not the schema, is at fault. Nothing
/// is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The record carries a label the model does not declare.
    #[error("label not found in model: {0}")]
    UnknownLabel(String),
    /// A `model(name)` reference names a model absent from the registry.
    #[error("model not registered: {0}")]
    UnknownModel(String),
    /// The value's runtime shape does not match the field's declared type.
    #[error("can not apply {actual} value to {expected}")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },
    /// A widened numeric value does not fit the declared width.
    #[error("value {value} out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
    /// A string, list, map, or nested record is too long for its 2-byte
    /// count prefix.
    #[error("{what} length {len} exceeds the u16 count prefix")]
    Oversize { what: &'static str, len: usize },
    /// Value nesting exceeds [`MAX_DEPTH`].
    #[error("schema nesting too deep")]
    TooDeep,
}

fn mismatch(type_: &SchemaType, value: &Value) -> EncodeError {
    EncodeError::TypeMismatch {
        expected: type_.to_string(),
        actual: value.kind(),
    }
}

fn count_prefix(what: &'static str, len: usize) -> Result<u16, EncodeError> {
    u16::try_from(len).map_err(|_| EncodeError::Oversize { what, len })
}

/// Encodes records against registered models.
///
/// Holds a shared reference to the [`Registry`] so `model(name)` fields can
/// be resolved at use time; the internal write buffer is reused across
/// `encode` calls.
pub struct Encoder<'a> {
    registry: &'a Registry,
    writer: Writer,
}

impl<'a> Encoder<'a> {
    pub fn new(registry: &'a Registry) -> Encoder<'a> {
        Encoder {
            registry,
            writer: Writer::new(),
        }
    }

    /// Encodes `record` against `model` into a fresh byte buffer.
    ///
    /// Fields are emitted in the record's iteration order; the wire format
    /// does not require a canonical order. An empty record encodes to an
    /// empty buffer.
    pub fn encode(&mut self, model: &Model, record: &Record) -> Result<Vec<u8>, EncodeError> {
        match self.write_record(model, record, 0) {
            Ok(()) => Ok(self.writer.flush()),
            Err(err) => {
                // discard partial output so the next encode starts clean
                let _ = self.writer.flush();
                Err(err)
            }
        }
    }

    fn write_record(
        &mut self,
        model: &Model,
        record: &Record,
        depth: usize,
    ) -> Result<(), EncodeError> {
        if depth > MAX_DEPTH {
            return Err(EncodeError::TooDeep);
        }
        for (label, value) in record {
            let (index, type_) = model
                .field_by_label(label)
                .ok_or_else(|| EncodeError::UnknownLabel(label.clone()))?;
            self.writer.u8(index);
            self.write_value(value, type_, depth)?;
        }
        Ok(())
    }

    fn write_value(
        &mut self,
        value: &Value,
        type_: &SchemaType,
        depth: usize,
    ) -> Result<(), EncodeError> {
        if depth > MAX_DEPTH {
            return Err(EncodeError::TooDeep);
        }
        match type_ {
            SchemaType::Int8 => match value {
                Value::I8(n) => {
                    self.writer.i8(*n);
                    Ok(())
                }
                Value::I64(n) => {
                    let narrowed = i8::try_from(*n).map_err(|_| EncodeError::OutOfRange {
                        value: n.to_string(),
                        target: "int8",
                    })?;
                    self.writer.i8(narrowed);
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Int16 => match value {
                Value::I16(n) => {
                    self.writer.i16(*n);
                    Ok(())
                }
                Value::I64(n) => {
                    let narrowed = i16::try_from(*n).map_err(|_| EncodeError::OutOfRange {
                        value: n.to_string(),
                        target: "int16",
                    })?;
                    self.writer.i16(narrowed);
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Int32 => match value {
                Value::I32(n) => {
                    self.writer.i32(*n);
                    Ok(())
                }
                Value::I64(n) => {
                    let narrowed = i32::try_from(*n).map_err(|_| EncodeError::OutOfRange {
                        value: n.to_string(),
                        target: "int32",
                    })?;
                    self.writer.i32(narrowed);
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Int64 => match value {
                Value::I64(n) => {
                    self.writer.i64(*n);
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Float32 => match value {
                Value::F32(n) => {
                    self.writer.f32(*n);
                    Ok(())
                }
                Value::F64(n) => {
                    // NaN and infinities fail the range check, as does any
                    // magnitude beyond f32
                    if n.abs() <= f32::MAX as f64 {
                        self.writer.f32(*n as f32);
                        Ok(())
                    } else {
                        Err(EncodeError::OutOfRange {
                            value: n.to_string(),
                            target: "float32",
                        })
                    }
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Float64 => match value {
                Value::F64(n) => {
                    self.writer.f64(*n);
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Bool => match value {
                Value::Bool(b) => {
                    self.writer.u8(u8::from(*b));
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::String => match value {
                Value::Str(s) => {
                    let len = count_prefix("string", s.len())?;
                    self.writer.u16(len);
                    self.writer.utf8(s);
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::List(element) => match value {
                Value::List(items) => {
                    let count = count_prefix("list", items.len())?;
                    self.writer.u16(count);
                    for item in items {
                        self.write_value(item, element, depth + 1)?;
                    }
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Map(key_type, value_type) => match value {
                Value::Map(entries) => {
                    let count = count_prefix("map", entries.len())?;
                    self.writer.u16(count);
                    for (key, val) in entries {
                        self.write_value(key, key_type, depth + 1)?;
                        self.write_value(val, value_type, depth + 1)?;
                    }
                    Ok(())
                }
                _ => Err(mismatch(type_, value)),
            },
            SchemaType::Model(name) => {
                let registry = self.registry;
                let nested = registry
                    .get(name)
                    .ok_or_else(|| EncodeError::UnknownModel(name.clone()))?;
                match value {
                    Value::Record(record) => {
                        // field count, not byte length: the decoder uses it
                        // as its loop bound
                        let count = count_prefix("record", record.len())?;
                        self.writer.u16(count);
                        self.write_record(nested, record, depth + 1)
                    }
                    _ => Err(mismatch(type_, value)),
                }
            }
        }
    }
}
