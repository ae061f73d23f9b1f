//! Persistence implementations
//!
//! File-based implementations of the repository traits.

mod file_spec_table_repo;

pub use file_spec_table_repo::FileSpecTableRepository;
