//! Wire decoding: walks a byte buffer against a model's field table.

use schemapack_buffers::{BufferError, Reader};

use crate::model::Model;
use crate::registry::Registry;
use crate::types::SchemaType;
use crate::value::{Record, Value};
use crate::MAX_DEPTH;

/// Decoding error.
///
/// Runtime and recoverable, but permanent for the given buffer: malformed
/// input is never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input buffer is absent.
    #[error("input buffer is absent")]
    NilInput,
    /// A field index in the buffer is not declared by the model, which
    /// indicates the buffer was encoded against an incompatible schema.
    #[error("index not found in model: {0}")]
    UnknownIndex(u8),
    /// A `model(name)` reference names a model absent from the registry.
    #[error("model not registered: {0}")]
    UnknownModel(String),
    /// Fewer bytes remain than a payload requires.
    #[error("unexpected end of buffer")]
    UnexpectedEnd,
    /// A boolean payload byte is neither 0 nor 1.
    #[error("bool byte must be 0 or 1, got {0}")]
    InvalidBool(u8),
    /// A string payload is not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// Buffer nesting exceeds [`MAX_DEPTH`].
    #[error("schema nesting too deep")]
    TooDeep,
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> DecodeError {
        match err {
            BufferError::EndOfBuffer => DecodeError::UnexpectedEnd,
            BufferError::InvalidUtf8 => DecodeError::InvalidUtf8,
        }
    }
}

/// Decodes byte buffers against registered models.
///
/// Holds a shared reference to the [`Registry`] so `model(name)` fields can
/// be resolved at use time.
pub struct Decoder<'a> {
    registry: &'a Registry,
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a Registry) -> Decoder<'a> {
        Decoder { registry }
    }

    /// Decodes `data` against `model`.
    ///
    /// Reads `[index byte][payload]` pairs until the buffer is exhausted. If
    /// the buffer repeats an index, the last value wins. An empty buffer
    /// decodes to an empty record.
    pub fn decode(&self, model: &Model, data: &[u8]) -> Result<Record, DecodeError> {
        let mut reader = Reader::new(data);
        self.read_record(model, &mut reader, usize::MAX, 0)
    }

    /// Like [`decode`], for possibly-absent input: `None` is rejected with
    /// [`DecodeError::NilInput`] before any cursor work begins.
    ///
    /// [`decode`]: Decoder::decode
    pub fn decode_opt(&self, model: &Model, data: Option<&[u8]>) -> Result<Record, DecodeError> {
        match data {
            Some(data) => self.decode(model, data),
            None => Err(DecodeError::NilInput),
        }
    }

    /// Reads at most `limit` fields, stopping early when the buffer ends on
    /// a field boundary. `limit` is the parent's declared field count for
    /// nested records and effectively unbounded at the top level.
    fn read_record(
        &self,
        model: &Model,
        reader: &mut Reader<'_>,
        limit: usize,
        depth: usize,
    ) -> Result<Record, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::TooDeep);
        }
        let mut record = Record::new();
        let mut read = 0;
        while read < limit && !reader.is_empty() {
            let index = reader.try_u8()?;
            let (label, type_) = model
                .field(index)
                .ok_or(DecodeError::UnknownIndex(index))?;
            let value = self.read_value(reader, type_, depth)?;
            record.insert(label.to_string(), value);
            read += 1;
        }
        Ok(record)
    }

    fn read_value(
        &self,
        reader: &mut Reader<'_>,
        type_: &SchemaType,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::TooDeep);
        }
        match type_ {
            SchemaType::Int8 => Ok(Value::I8(reader.try_i8()?)),
            SchemaType::Int16 => Ok(Value::I16(reader.try_i16()?)),
            SchemaType::Int32 => Ok(Value::I32(reader.try_i32()?)),
            SchemaType::Int64 => Ok(Value::I64(reader.try_i64()?)),
            SchemaType::Float32 => Ok(Value::F32(reader.try_f32()?)),
            SchemaType::Float64 => Ok(Value::F64(reader.try_f64()?)),
            SchemaType::Bool => match reader.try_u8()? {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                other => Err(DecodeError::InvalidBool(other)),
            },
            SchemaType::String => {
                let len = reader.try_u16()? as usize;
                let s = reader.try_utf8(len)?;
                Ok(Value::Str(s.to_string()))
            }
            SchemaType::List(element) => {
                let count = reader.try_u16()? as usize;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.read_value(reader, element, depth + 1)?);
                }
                Ok(Value::List(items))
            }
            SchemaType::Map(key_type, value_type) => {
                let count = reader.try_u16()? as usize;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.read_value(reader, key_type, depth + 1)?;
                    let val = self.read_value(reader, value_type, depth + 1)?;
                    entries.push((key, val));
                }
                Ok(Value::Map(entries))
            }
            SchemaType::Model(name) => {
                let count = reader.try_u16()? as usize;
                let nested = self
                    .registry
                    .get(name)
                    .ok_or_else(|| DecodeError::UnknownModel(name.clone()))?;
                let record = self.read_record(nested, reader, count, depth + 1)?;
                Ok(Value::Record(record))
            }
        }
    }
}
