//! Built-in pipe spec catalogue

use pipeweight_types::{Material, Shape, Thickness};

use super::pipe_spec::{PipeSpec, SpecTable};

// (material, thickness, shape, size, weight per unit length, price per kg)
const CATALOG: &[(Material, Thickness, Shape, &str, f64, f64)] = &[
    (Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", 0.3, 150.0),
    (Material::Ss, Thickness::Mm12, Shape::Round, "1-inch", 0.35, 160.0),
    (Material::Ms, Thickness::Mm1, Shape::Round, "1-inch", 0.2, 100.0),
    (Material::Ms, Thickness::Mm12, Shape::Round, "1-inch", 0.25, 110.0),
    (Material::Ss, Thickness::Mm1, Shape::Round, "1/2-inch", 0.18, 120.0),
    (Material::Ss, Thickness::Mm12, Shape::Round, "1/2-inch", 0.22, 125.0),
    (Material::Ms, Thickness::Mm1, Shape::Round, "1/2-inch", 0.15, 90.0),
    (Material::Ms, Thickness::Mm12, Shape::Round, "1/2-inch", 0.2, 95.0),
    (Material::Ss, Thickness::Mm1, Shape::Square, "1x1-inch", 0.4, 180.0),
    (Material::Ss, Thickness::Mm12, Shape::Square, "1x1-inch", 0.45, 190.0),
    (Material::Ms, Thickness::Mm1, Shape::Square, "1x1-inch", 0.3, 130.0),
    (Material::Ms, Thickness::Mm12, Shape::Square, "1x1-inch", 0.35, 140.0),
    (Material::Ss, Thickness::Mm1, Shape::Square, "1-1/4x1-1/4-inch", 0.5, 200.0),
    (Material::Ss, Thickness::Mm12, Shape::Square, "1-1/4x1-1/4-inch", 0.55, 210.0),
    (Material::Ms, Thickness::Mm1, Shape::Square, "1-1/4x1-1/4-inch", 0.4, 160.0),
    (Material::Ms, Thickness::Mm12, Shape::Square, "1-1/4x1-1/4-inch", 0.45, 170.0),
    (Material::Ss, Thickness::Mm1, Shape::Square, "1-1/2x1-1/2-inch", 0.6, 220.0),
    (Material::Ss, Thickness::Mm12, Shape::Square, "1-1/2x1-1/2-inch", 0.65, 230.0),
    (Material::Ms, Thickness::Mm1, Shape::Square, "1-1/2x1-1/2-inch", 0.5, 180.0),
    (Material::Ms, Thickness::Mm12, Shape::Square, "1-1/2x1-1/2-inch", 0.55, 190.0),
];

/// Build the compiled-in spec table
pub fn builtin_table() -> SpecTable {
    let specs = CATALOG
        .iter()
        .map(|&(material, thickness, shape, size, weight, price)| PipeSpec {
            material,
            thickness,
            shape,
            pipe_type: size.to_string(),
            weight_per_unit_length: weight,
            price_per_mass: price,
        });

    // Keys in CATALOG are unique, checked by test_builtin_keys_unique
    SpecTable::first_wins(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecKey;

    #[test]
    fn test_builtin_keys_unique() {
        assert_eq!(builtin_table().len(), CATALOG.len());
        assert_eq!(builtin_table().len(), 20);
    }

    #[test]
    fn test_known_constants() {
        let table = builtin_table();
        let spec = table
            .get(&SpecKey::new("MS", "1mm", "Square", "1x1-inch"))
            .unwrap();
        assert!((spec.weight_per_unit_length - 0.3).abs() < f64::EPSILON);
        assert!((spec.price_per_mass - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sizes_per_shape() {
        let table = builtin_table();
        assert_eq!(table.sizes_for(Shape::Round), vec!["1-inch", "1/2-inch"]);
        assert_eq!(
            table.sizes_for(Shape::Square),
            vec!["1x1-inch", "1-1/4x1-1/4-inch", "1-1/2x1-1/2-inch"]
        );
    }
}
