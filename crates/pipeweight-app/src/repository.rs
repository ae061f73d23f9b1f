//! Repository adapters for the spec table

use std::path::PathBuf;

use pipeweight_domain::model::SpecTable;
use pipeweight_domain::repository::{BuiltinSpecRepository, SpecTableRepository};
use pipeweight_infra::persistence::FileSpecTableRepository;
use pipeweight_types::Result;

use crate::config::Config;

/// Pick the spec table source: an explicit override, the configured file, or
/// the built-in catalogue
pub fn open_spec_repository(
    config: &Config,
    override_path: Option<PathBuf>,
) -> Box<dyn SpecTableRepository> {
    match override_path.or_else(|| config.spec_table.clone()) {
        Some(path) => Box::new(FileSpecTableRepository::new(path)),
        None => Box::new(BuiltinSpecRepository),
    }
}

/// Load the spec table once for the process lifetime
pub fn load_spec_table(config: &Config, override_path: Option<PathBuf>) -> Result<SpecTable> {
    let repo = open_spec_repository(config, override_path);
    let table = repo.load_table()?;
    tracing::debug!(source = %repo.describe(), specs = table.len(), "spec table ready");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_by_default() {
        let repo = open_spec_repository(&Config::default(), None);
        assert_eq!(repo.describe(), "built-in catalogue");
        assert_eq!(load_spec_table(&Config::default(), None).unwrap().len(), 20);
    }

    #[test]
    fn test_override_wins_over_config() {
        let config = Config {
            spec_table: Some(PathBuf::from("/from/config.toml")),
            ..Config::default()
        };
        let repo = open_spec_repository(&config, Some(PathBuf::from("/from/flag.toml")));
        assert!(repo.describe().contains("/from/flag.toml"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let config = Config {
            spec_table: Some(PathBuf::from("/nonexistent/specs.toml")),
            ..Config::default()
        };
        assert!(load_spec_table(&config, None).is_err());
    }
}
