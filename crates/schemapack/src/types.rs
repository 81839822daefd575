//! The type grammar: primitive kinds plus list, map, and model composites.

use std::fmt;

use crate::registry::ConfigError;

/// A field's type descriptor.
///
/// Composites nest arbitrarily: `list(list(int8))`, `map(string,model(City))`.
/// Map keys are restricted to primitive kinds; [`SchemaType::map_of`] enforces
/// this when a descriptor is built and [`Registry::define`] re-checks the
/// whole tree, so a malformed descriptor can never be registered.
///
/// [`Registry::define`]: crate::Registry::define
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    String,
    /// Homogeneous ordered sequence.
    List(Box<SchemaType>),
    /// Mapping with a primitive key type.
    Map(Box<SchemaType>, Box<SchemaType>),
    /// Reference to a registered model, resolved at encode/decode time.
    Model(String),
}

impl SchemaType {
    /// Builds a `list(element)` descriptor.
    pub fn list_of(element: SchemaType) -> SchemaType {
        SchemaType::List(Box::new(element))
    }

    /// Builds a `map(key,value)` descriptor.
    ///
    /// Fails when `key` is not a primitive kind; a schema with a composite
    /// map key is a configuration error, not a data error.
    pub fn map_of(key: SchemaType, value: SchemaType) -> Result<SchemaType, ConfigError> {
        if !key.is_primitive() {
            return Err(ConfigError::NonPrimitiveMapKey(key.to_string()));
        }
        Ok(SchemaType::Map(Box::new(key), Box::new(value)))
    }

    /// Builds a `model(name)` reference to a registered model.
    ///
    /// The referent does not need to exist yet; it is resolved when the
    /// descriptor is first used to encode or decode.
    pub fn model_ref(name: impl Into<String>) -> SchemaType {
        SchemaType::Model(name.into())
    }

    /// Whether this descriptor is one of the primitive kinds.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            SchemaType::List(_) | SchemaType::Map(_, _) | SchemaType::Model(_)
        )
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Int8 => write!(f, "int8"),
            SchemaType::Int16 => write!(f, "int16"),
            SchemaType::Int32 => write!(f, "int32"),
            SchemaType::Int64 => write!(f, "int64"),
            SchemaType::Float32 => write!(f, "float32"),
            SchemaType::Float64 => write!(f, "float64"),
            SchemaType::Bool => write!(f, "bool"),
            SchemaType::String => write!(f, "string"),
            SchemaType::List(element) => write!(f, "list({element})"),
            SchemaType::Map(key, value) => write!(f, "map({key},{value})"),
            SchemaType::Model(name) => write!(f, "model({name})"),
        }
    }
}
