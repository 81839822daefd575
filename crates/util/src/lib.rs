//! Utility collaborators shared by schemapack services: a string-keyed LRU
//! cache and a `.env` loader.

pub mod cache;
pub mod envfile;

pub use cache::Cache;
