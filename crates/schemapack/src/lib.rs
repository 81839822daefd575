//! Schema-driven binary serialization.
//!
//! A [`Model`] is a named, immutable schema: an ordered set of typed fields,
//! each carrying a one-byte wire index, a string label, and a [`SchemaType`]
//! descriptor. Models live in an explicit [`Registry`] that the [`Encoder`]
//! and [`Decoder`] consult whenever a field references a nested model.
//!
//! The wire format is a bare concatenation of `[index byte][payload]` pairs:
//! fixed-width big-endian numerics, one-byte booleans, and 2-byte big-endian
//! count prefixes for strings (bytes), lists (elements), maps (entries), and
//! nested records (fields). There is no header, framing, or checksum.
//!
//! ```
//! use schemapack::{Decoder, Encoder, Field, Record, Registry, SchemaType, Value};
//!
//! let mut registry = Registry::new();
//! registry
//!     .define(
//!         "City",
//!         vec![
//!             Field::new(0, "name", SchemaType::String),
//!             Field::new(1, "population", SchemaType::Int32),
//!         ],
//!     )
//!     .unwrap();
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), Value::Str("Cairo".to_string()));
//! record.insert("population".to_string(), Value::I32(10_000_000));
//!
//! let model = registry.get("City").unwrap();
//! let bytes = Encoder::new(&registry).encode(model, &record).unwrap();
//! let decoded = Decoder::new(&registry).decode(model, &bytes).unwrap();
//! assert_eq!(decoded, record);
//! ```

mod decoder;
mod encoder;
mod model;
mod registry;
mod types;
mod value;

pub use decoder::{DecodeError, Decoder};
pub use encoder::{EncodeError, Encoder};
pub use model::{Field, Model};
pub use registry::{ConfigError, Registry};
pub use types::SchemaType;
pub use value::{NullValueError, Record, Value};

/// Maximum nesting depth of the type grammar accepted by the encoder and
/// decoder. Deeper schemas or buffers fail with a dedicated error instead of
/// exhausting the stack.
pub const MAX_DEPTH: usize = 64;
