//! Spec table type definitions

use std::collections::HashMap;
use std::fmt;

use pipeweight_types::{Error, Material, PipeEntry, Shape, Thickness};
use serde::{Deserialize, Serialize};

/// Lookup key: `material-thickness-shape-pipeType`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecKey(String);

impl SpecKey {
    pub fn new(material: &str, thickness: &str, shape: &str, pipe_type: &str) -> Self {
        SpecKey(format!("{}-{}-{}-{}", material, thickness, shape, pipe_type))
    }

    /// Derive the key of a submitted entry. No consistency checks are made;
    /// a size that does not exist for the shape just produces an unknown key.
    pub fn for_entry(entry: &PipeEntry) -> Self {
        Self::new(
            &entry.material,
            &entry.thickness,
            &entry.shape,
            &entry.pipe_type,
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit constants for one material/thickness/shape/size combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeSpec {
    pub material: Material,
    pub thickness: Thickness,
    pub shape: Shape,
    /// Size code
    #[serde(alias = "pipe_type")]
    pub pipe_type: String,
    /// Weight per unit length (kg/m)
    #[serde(alias = "weight_per_unit_length")]
    pub weight_per_unit_length: f64,
    /// Price per kg
    #[serde(alias = "price_per_mass")]
    pub price_per_mass: f64,
}

impl PipeSpec {
    pub fn key(&self) -> SpecKey {
        SpecKey::new(
            self.material.code(),
            self.thickness.code(),
            self.shape.code(),
            &self.pipe_type,
        )
    }
}

/// Immutable table of known pipe specs.
///
/// Built once at startup and shared by reference; there is no way to mutate
/// it after construction.
#[derive(Debug, Clone)]
pub struct SpecTable {
    /// Specs in catalogue order
    specs: Vec<PipeSpec>,
    index: HashMap<SpecKey, usize>,
}

impl SpecTable {
    /// Build a table, rejecting duplicate keys
    pub fn from_specs<I>(specs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = PipeSpec>,
    {
        let specs: Vec<PipeSpec> = specs.into_iter().collect();
        let mut index = HashMap::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if index.insert(spec.key(), i).is_some() {
                return Err(Error::InvalidInput(format!(
                    "duplicate pipe spec: {}",
                    spec.key()
                )));
            }
        }
        Ok(Self { specs, index })
    }

    /// Build a table keeping the first spec seen for each key
    pub(crate) fn first_wins<I>(specs: I) -> Self
    where
        I: IntoIterator<Item = PipeSpec>,
    {
        let mut table = Self {
            specs: Vec::new(),
            index: HashMap::new(),
        };
        for spec in specs {
            let key = spec.key();
            if !table.index.contains_key(&key) {
                table.index.insert(key, table.specs.len());
                table.specs.push(spec);
            }
        }
        table
    }

    /// Exact-key lookup
    pub fn get(&self, key: &SpecKey) -> Option<&PipeSpec> {
        self.index.get(key).map(|&i| &self.specs[i])
    }

    /// Look up the spec a submitted entry refers to
    pub fn lookup(&self, entry: &PipeEntry) -> Option<&PipeSpec> {
        self.get(&SpecKey::for_entry(entry))
    }

    pub fn specs(&self) -> &[PipeSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Size codes offered for a shape, in catalogue order without duplicates
    pub fn sizes_for(&self, shape: Shape) -> Vec<&str> {
        let mut sizes: Vec<&str> = Vec::new();
        for spec in self.specs.iter().filter(|s| s.shape == shape) {
            if !sizes.contains(&spec.pipe_type.as_str()) {
                sizes.push(&spec.pipe_type);
            }
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pipe_type: &str, weight: f64, price: f64) -> PipeSpec {
        PipeSpec {
            material: Material::Ss,
            thickness: Thickness::Mm1,
            shape: Shape::Round,
            pipe_type: pipe_type.to_string(),
            weight_per_unit_length: weight,
            price_per_mass: price,
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(spec("1-inch", 0.3, 150.0).key().as_str(), "SS-1mm-Round-1-inch");
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = SpecTable::from_specs(vec![spec("1-inch", 0.3, 150.0), spec("1-inch", 0.4, 1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = SpecTable::from_specs(vec![spec("1-inch", 0.3, 150.0)]).unwrap();
        let hit = PipeEntry::new(Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", 1.0);
        let miss = PipeEntry::new(Material::Ss, Thickness::Mm1, Shape::Square, "1-inch", 1.0);
        assert!(table.lookup(&hit).is_some());
        assert!(table.lookup(&miss).is_none());

        let mut lowercase = hit.clone();
        lowercase.material = "ss".to_string();
        assert!(table.lookup(&lowercase).is_none());
    }

    #[test]
    fn test_deserialize_snake_case_aliases() {
        let spec: PipeSpec = serde_json::from_str(
            r#"{"material":"MS","thickness":"1.2mm","shape":"Square","pipe_type":"2x2-inch","weight_per_unit_length":0.7,"price_per_mass":210}"#,
        )
        .unwrap();
        assert_eq!(spec.key().as_str(), "MS-1.2mm-Square-2x2-inch");
        assert!((spec.price_per_mass - 210.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_wins_drops_later_duplicates() {
        let table = SpecTable::first_wins([
            spec("1-inch", 0.3, 150.0),
            spec("1x1-inch", 0.4, 160.0),
            spec("1-inch", 9.9, 999.0),
        ]);
        assert_eq!(table.len(), 2);
        let key = SpecKey::new("SS", "1mm", "Round", "1-inch");
        assert_eq!(table.get(&key).unwrap().weight_per_unit_length, 0.3);
    }
}
