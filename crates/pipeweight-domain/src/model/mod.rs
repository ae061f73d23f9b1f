//! Domain model types

pub mod catalog;
pub mod pipe_spec;

pub use catalog::builtin_table;
pub use pipe_spec::{PipeSpec, SpecKey, SpecTable};
