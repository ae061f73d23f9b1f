//! Spec table loader from TOML
//!
//! Replaces the compiled-in catalogue with a table read from a file:
//!
//! ```toml
//! [[specs]]
//! material = "SS"
//! thickness = "1mm"
//! shape = "Round"
//! pipe_type = "1-inch"
//! weight_per_unit_length = 0.3
//! price_per_mass = 150
//! ```

use std::fs;
use std::path::Path;

use pipeweight_domain::model::{PipeSpec, SpecTable};
use pipeweight_types::{ConfigError, Error, Result};
use serde::Deserialize;

/// Container for parsing a spec table file
#[derive(Debug, Deserialize)]
struct SpecTableFile {
    specs: Vec<PipeSpec>,
}

pub struct SpecTableLoader;

impl SpecTableLoader {
    /// Load a spec table from a TOML file
    pub fn load_from_file(path: &Path) -> Result<SpecTable> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to read spec table file {}: {}",
                path.display(),
                e
            )))
        })?;

        Self::load_from_str(&content)
    }

    /// Load a spec table from TOML text
    pub fn load_from_str(toml_content: &str) -> Result<SpecTable> {
        let file: SpecTableFile = toml::from_str(toml_content).map_err(|e| {
            Error::Config(ConfigError::ParseError(format!(
                "Failed to parse spec table TOML: {}",
                e
            )))
        })?;

        if file.specs.is_empty() {
            return Err(Error::Config(ConfigError::InvalidValue(
                "spec table contains no specs".to_string(),
            )));
        }

        SpecTable::from_specs(file.specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeweight_domain::model::SpecKey;

    const SAMPLE: &str = r#"
[[specs]]
material = "SS"
thickness = "1mm"
shape = "Round"
pipe_type = "2-inch"
weight_per_unit_length = 0.6
price_per_mass = 155

[[specs]]
material = "MS"
thickness = "1.2mm"
shape = "Square"
pipeType = "2x2-inch"
weightPerUnitLength = 0.8
pricePerMass = 145
"#;

    #[test]
    fn test_load_from_str() {
        let table = SpecTableLoader::load_from_str(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);
        let spec = table
            .get(&SpecKey::new("SS", "1mm", "Round", "2-inch"))
            .unwrap();
        assert!((spec.weight_per_unit_length - 0.6).abs() < f64::EPSILON);
        assert!(table
            .get(&SpecKey::new("MS", "1.2mm", "Square", "2x2-inch"))
            .is_some());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(SpecTableLoader::load_from_str("specs = []").is_err());
    }

    #[test]
    fn test_unknown_material_rejected() {
        let bad = SAMPLE.replace("\"MS\"", "\"CU\"");
        assert!(SpecTableLoader::load_from_str(&bad).is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = SpecTableLoader::load_from_file(Path::new("/nonexistent/specs.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
