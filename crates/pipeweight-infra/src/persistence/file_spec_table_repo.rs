//! File-based implementation of SpecTableRepository

use std::path::PathBuf;

use pipeweight_domain::model::SpecTable;
use pipeweight_domain::repository::SpecTableRepository;
use pipeweight_types::Error;

use crate::spec_table_loader::SpecTableLoader;

/// Spec table read from a TOML file
pub struct FileSpecTableRepository {
    toml_path: PathBuf,
}

impl FileSpecTableRepository {
    pub fn new(toml_path: PathBuf) -> Self {
        Self { toml_path }
    }
}

impl SpecTableRepository for FileSpecTableRepository {
    fn describe(&self) -> String {
        format!("spec table file {}", self.toml_path.display())
    }

    fn load_table(&self) -> Result<SpecTable, Error> {
        let table = SpecTableLoader::load_from_file(&self.toml_path)?;
        tracing::info!(
            path = %self.toml_path.display(),
            specs = table.len(),
            "loaded spec table"
        );
        Ok(table)
    }
}
