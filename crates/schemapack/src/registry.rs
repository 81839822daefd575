//! The model table, passed explicitly to the encoder and decoder.

use std::collections::HashMap;

use crate::model::{Field, Model};

/// Schema construction error.
///
/// These are fatal misconfigurations raised at definition time; callers are
/// expected to abort startup rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("model name must not be empty")]
    EmptyModelName,
    #[error("model already defined: {0}")]
    DuplicateModel(String),
    #[error("field label must not be empty (index {0})")]
    EmptyLabel(u8),
    #[error("duplicate field label: {0}")]
    DuplicateLabel(String),
    #[error("duplicate field index: {0}")]
    DuplicateIndex(u8),
    #[error("map key type must be primitive, got {0}")]
    NonPrimitiveMapKey(String),
}

/// Table of defined models, keyed by name.
///
/// [`define`] is the only mutation path; define every model before handing
/// shared references to encoders and decoders. `&mut` registration cannot
/// overlap `&` reads, so interleaving definition with in-flight encode or
/// decode calls requires wrapping the registry in an external lock (e.g.
/// `RwLock<Registry>`).
///
/// A model may reference another model that has not been defined yet; the
/// reference is resolved when it is first used, so mutually-referential
/// schemas work as long as registration completes before the first encode or
/// decode.
///
/// [`define`]: Registry::define
#[derive(Debug, Default)]
pub struct Registry {
    models: HashMap<String, Model>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Validates and registers a model, returning a handle to the compiled
    /// schema. Fails on an empty or duplicate model name, a duplicate field
    /// label or index, an empty field label, or a composite map key anywhere
    /// in a field's type tree.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<&Model, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyModelName);
        }
        if self.models.contains_key(&name) {
            return Err(ConfigError::DuplicateModel(name));
        }
        let model = Model::build(name.clone(), fields)?;
        Ok(self.models.entry(name).or_insert(model))
    }

    /// Looks up a model by name.
    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Iterates over every defined model, in no particular order.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Number of defined models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
