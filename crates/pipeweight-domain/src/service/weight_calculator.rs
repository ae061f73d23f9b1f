//! Weight and price aggregation over a list of pipe entries

use pipeweight_types::{CalculationRequest, CalculationResponse, Error, PipeEntry};
use serde::{Deserialize, Serialize};

use super::rounding::to_fixed;
use crate::model::{SpecKey, SpecTable};

/// Contribution of one matched entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Position of the entry in the submitted list
    pub index: usize,
    pub key: SpecKey,
    pub length_m: f64,
    /// weight = weight per unit length x length
    pub weight: f64,
    /// price = weight x price per kg / 1000
    pub price: f64,
}

/// Summed weight and price across all matched entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub total_weight: f64,
    pub total_price: f64,
    pub lines: Vec<LineItem>,
    /// Indices of entries whose key is not in the table
    pub unmatched: Vec<usize>,
}

impl Aggregate {
    pub fn formatted_weight(&self) -> String {
        to_fixed(self.total_weight, 2)
    }

    pub fn formatted_price(&self) -> String {
        to_fixed(self.total_price, 2)
    }

    /// Endpoint response body
    pub fn to_response(&self) -> CalculationResponse {
        CalculationResponse {
            total_weight: self.formatted_weight(),
            total_price: self.formatted_price(),
        }
    }
}

/// Aggregate weight and price for `entries`.
///
/// Entries whose key is unknown contribute nothing and are only recorded in
/// `unmatched`. Lengths are used as given: negative lengths give negative
/// totals and a NaN length makes both totals NaN.
pub fn aggregate(entries: &[PipeEntry], table: &SpecTable) -> Result<Aggregate, Error> {
    if entries.is_empty() {
        return Err(Error::EmptySubmission);
    }

    let mut result = Aggregate::default();

    for (index, entry) in entries.iter().enumerate() {
        let key = SpecKey::for_entry(entry);
        let Some(spec) = table.get(&key) else {
            tracing::debug!(index, key = %key, "no pipe spec for entry, skipping");
            result.unmatched.push(index);
            continue;
        };

        let length_m = entry.length.meters();
        if !length_m.is_finite() || length_m < 0.0 {
            tracing::warn!(index, key = %key, length_m, "suspicious pipe length");
        }

        let weight = spec.weight_per_unit_length * length_m;
        let price = (weight * spec.price_per_mass) / 1000.0;
        result.total_weight += weight;
        result.total_price += price;
        result.lines.push(LineItem {
            index,
            key,
            length_m,
            weight,
            price,
        });
    }

    Ok(result)
}

/// Handle a full request body: a missing or empty `pipesData` is rejected
pub fn calculate(
    request: &CalculationRequest,
    table: &SpecTable,
) -> Result<CalculationResponse, Error> {
    let entries = request.pipes_data.as_deref().unwrap_or_default();
    aggregate(entries, table).map(|agg| agg.to_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builtin_table;
    use pipeweight_types::{Length, Material, Shape, Thickness};

    fn entry(m: Material, t: Thickness, s: Shape, size: &str, length: f64) -> PipeEntry {
        PipeEntry::new(m, t, s, size, length)
    }

    #[test]
    fn test_single_round_pipe() {
        let table = builtin_table();
        let entries = vec![entry(Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", 10.0)];
        let agg = aggregate(&entries, &table).unwrap();
        assert_eq!(agg.formatted_weight(), "3.00");
        assert_eq!(agg.formatted_price(), "0.45");
        assert_eq!(agg.lines.len(), 1);
        assert!(agg.unmatched.is_empty());
    }

    #[test]
    fn test_two_pipes_round_half_up() {
        let table = builtin_table();
        let entries = vec![
            entry(Material::Ms, Thickness::Mm1, Shape::Square, "1x1-inch", 5.0),
            entry(Material::Ss, Thickness::Mm12, Shape::Round, "1-inch", 2.0),
        ];
        let response = aggregate(&entries, &table).unwrap().to_response();
        assert_eq!(response.total_weight, "2.20");
        assert_eq!(response.total_price, "0.31");
    }

    #[test]
    fn test_unknown_size_contributes_zero() {
        let table = builtin_table();
        let entries = vec![
            entry(Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", 10.0),
            // Square-only size on a round pipe
            entry(Material::Ss, Thickness::Mm1, Shape::Round, "1x1-inch", 100.0),
        ];
        let agg = aggregate(&entries, &table).unwrap();
        assert_eq!(agg.formatted_weight(), "3.00");
        assert_eq!(agg.formatted_price(), "0.45");
        assert_eq!(agg.unmatched, vec![1]);
    }

    #[test]
    fn test_all_unknown_is_zero_not_error() {
        let table = builtin_table();
        let entries = vec![entry(Material::Ms, Thickness::Mm1, Shape::Square, "20*20", 3.0)];
        let response = aggregate(&entries, &table).unwrap().to_response();
        assert_eq!(response.total_weight, "0.00");
        assert_eq!(response.total_price, "0.00");
    }

    #[test]
    fn test_empty_list_rejected() {
        let table = builtin_table();
        assert!(matches!(aggregate(&[], &table), Err(Error::EmptySubmission)));
        assert!(matches!(
            calculate(&CalculationRequest::default(), &table),
            Err(Error::EmptySubmission)
        ));
    }

    #[test]
    fn test_negative_length_propagates() {
        let table = builtin_table();
        let entries = vec![entry(Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", -10.0)];
        let response = aggregate(&entries, &table).unwrap().to_response();
        assert_eq!(response.total_weight, "-3.00");
        assert_eq!(response.total_price, "-0.45");
    }

    #[test]
    fn test_nan_length_propagates() {
        let table = builtin_table();
        let mut pipe = entry(Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", 1.0);
        pipe.length = Length::parse("ten");
        let response = aggregate(&[pipe], &table).unwrap().to_response();
        assert_eq!(response.total_weight, "NaN");
        assert_eq!(response.total_price, "NaN");
    }

    #[test]
    fn test_weight_is_sum_of_lines() {
        let table = builtin_table();
        let entries = vec![
            entry(Material::Ss, Thickness::Mm1, Shape::Square, "1-1/2x1-1/2-inch", 3.0),
            entry(Material::Ms, Thickness::Mm12, Shape::Round, "1/2-inch", 7.5),
            entry(Material::Ms, Thickness::Mm1, Shape::Square, "1-1/4x1-1/4-inch", 1.25),
        ];
        let agg = aggregate(&entries, &table).unwrap();
        let expected: f64 = 0.6 * 3.0 + 0.2 * 7.5 + 0.4 * 1.25;
        assert!((agg.total_weight - expected).abs() < 1e-9);
        let line_sum: f64 = agg.lines.iter().map(|l| l.weight).sum();
        assert!((agg.total_weight - line_sum).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_requests_identical() {
        let table = builtin_table();
        let request = CalculationRequest::new(vec![
            entry(Material::Ms, Thickness::Mm1, Shape::Square, "1x1-inch", 5.0),
            entry(Material::Ss, Thickness::Mm12, Shape::Round, "1-inch", 2.0),
        ]);
        let first = calculate(&request, &table).unwrap();
        let second = calculate(&request, &table).unwrap();
        assert_eq!(first, second);
    }
}
