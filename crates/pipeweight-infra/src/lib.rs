//! Infrastructure layer - file loaders and repository implementations

pub mod entry_loader;
pub mod persistence;
pub mod spec_table_loader;
