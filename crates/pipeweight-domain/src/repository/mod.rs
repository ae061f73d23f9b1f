//! Repository trait definitions for spec table sources

use pipeweight_types::Error;

use crate::model::{builtin_table, SpecTable};

/// Source of the spec table used for a process lifetime
pub trait SpecTableRepository {
    /// Human readable origin (for logs and `specs` output)
    fn describe(&self) -> String;

    /// Load the table. Called once at startup.
    fn load_table(&self) -> Result<SpecTable, Error>;
}

/// The compiled-in catalogue
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSpecRepository;

impl SpecTableRepository for BuiltinSpecRepository {
    fn describe(&self) -> String {
        "built-in catalogue".to_string()
    }

    fn load_table(&self) -> Result<SpecTable, Error> {
        Ok(builtin_table())
    }
}
