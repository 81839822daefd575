//! Compiled schemas: indexed, labeled, typed field tables.

use std::collections::HashMap;
use std::fmt;

use crate::registry::ConfigError;
use crate::types::SchemaType;

/// One schema entry: a one-byte wire index, a label, and a type descriptor.
#[derive(Debug, Clone)]
pub struct Field {
    pub index: u8,
    pub label: String,
    pub type_: SchemaType,
}

impl Field {
    pub fn new(index: u8, label: impl Into<String>, type_: SchemaType) -> Field {
        Field {
            index,
            label: label.into(),
            type_,
        }
    }
}

/// A named, immutable schema. Built by [`Registry::define`].
///
/// Exposes the two derived lookup tables the codec walks: index to
/// `(label, type)` and label to index.
///
/// [`Registry::define`]: crate::Registry::define
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    by_index: HashMap<u8, (String, SchemaType)>,
    by_label: HashMap<String, u8>,
}

impl Model {
    /// Validates `fields` and compiles the lookup tables.
    pub(crate) fn build(name: String, fields: Vec<Field>) -> Result<Model, ConfigError> {
        let mut by_index = HashMap::with_capacity(fields.len());
        let mut by_label = HashMap::with_capacity(fields.len());
        for field in fields {
            if field.label.is_empty() {
                return Err(ConfigError::EmptyLabel(field.index));
            }
            check_map_keys(&field.type_)?;
            if by_label.contains_key(&field.label) {
                return Err(ConfigError::DuplicateLabel(field.label));
            }
            if by_index.contains_key(&field.index) {
                return Err(ConfigError::DuplicateIndex(field.index));
            }
            by_label.insert(field.label.clone(), field.index);
            by_index.insert(field.index, (field.label, field.type_));
        }
        Ok(Model {
            name,
            by_index,
            by_label,
        })
    }

    /// The model's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a field by its wire index.
    pub fn field(&self, index: u8) -> Option<(&str, &SchemaType)> {
        let (label, type_) = self.by_index.get(&index)?;
        Some((label.as_str(), type_))
    }

    /// Looks up a field's index and type by its label.
    pub fn field_by_label(&self, label: &str) -> Option<(u8, &SchemaType)> {
        let index = *self.by_label.get(label)?;
        let (_, type_) = self.by_index.get(&index)?;
        Some((index, type_))
    }

    /// The field table as `(index, label, type)` triples, sorted by index.
    pub fn fields(&self) -> Vec<(u8, &str, &SchemaType)> {
        let mut fields: Vec<_> = self
            .by_index
            .iter()
            .map(|(index, (label, type_))| (*index, label.as_str(), type_))
            .collect();
        fields.sort_by_key(|(index, _, _)| *index);
        fields
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {} {{", self.name)?;
        for (i, (index, label, type_)) in self.fields().into_iter().enumerate() {
            let sep = if i == 0 { "" } else { "," };
            write!(f, "{sep} {index}: {label} {type_}")?;
        }
        write!(f, " }}")
    }
}

/// Walks a descriptor tree and rejects any map whose key type is composite.
/// Referenced models are validated at their own definition, not here.
fn check_map_keys(type_: &SchemaType) -> Result<(), ConfigError> {
    match type_ {
        SchemaType::List(element) => check_map_keys(element),
        SchemaType::Map(key, value) => {
            if !key.is_primitive() {
                return Err(ConfigError::NonPrimitiveMapKey(key.to_string()));
            }
            check_map_keys(value)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_sorted_by_index() {
        let model = Model::build(
            "person".to_string(),
            vec![
                Field::new(1, "age", SchemaType::Int8),
                Field::new(0, "name", SchemaType::String),
            ],
        )
        .unwrap();
        assert_eq!(model.to_string(), "model person { 0: name string, 1: age int8 }");
    }

    #[test]
    fn lookup_tables_agree() {
        let model = Model::build(
            "m".to_string(),
            vec![Field::new(7, "flag", SchemaType::Bool)],
        )
        .unwrap();
        assert_eq!(model.field(7), Some(("flag", &SchemaType::Bool)));
        assert_eq!(model.field_by_label("flag"), Some((7, &SchemaType::Bool)));
        assert_eq!(model.field(0), None);
        assert_eq!(model.field_by_label("nope"), None);
    }

    #[test]
    fn nested_map_key_rejected() {
        // map buried inside a list still gets its key checked
        let bad = SchemaType::list_of(SchemaType::Map(
            Box::new(SchemaType::list_of(SchemaType::Int8)),
            Box::new(SchemaType::Int8),
        ));
        let err = Model::build("m".to_string(), vec![Field::new(0, "x", bad)]).unwrap_err();
        assert!(matches!(err, ConfigError::NonPrimitiveMapKey(_)));
    }
}
