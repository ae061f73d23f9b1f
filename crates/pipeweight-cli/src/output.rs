//! Output formatting module

use pipeweight_domain::model::{PipeSpec, SpecKey};
use pipeweight_domain::service::{to_fixed, Aggregate};
use pipeweight_types::{CalculationResponse, OutputFormat, PipeEntry, Result, Shape};
use serde_json::json;

/// Local result with per-entry breakdown
pub fn output_aggregate(
    output_format: OutputFormat,
    entries: &[PipeEntry],
    aggregate: &Aggregate,
    currency: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let unmatched: Vec<_> = aggregate
            .unmatched
            .iter()
            .filter_map(|&i| entries.get(i))
            .map(|e| json!({ "entry": e, "key": SpecKey::for_entry(e) }))
            .collect();
        let content = serde_json::to_string_pretty(&json!({
            "totalWeight": aggregate.formatted_weight(),
            "totalPrice": aggregate.formatted_price(),
            "lines": aggregate.lines,
            "unmatched": unmatched,
        }))?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nCalculation Result");
    println!("==================");
    println!(
        "{:>3}  {:<36} {:>10} {:>12} {:>10}",
        "#", "Pipe", "Length (m)", "Weight (kg)", "Price"
    );
    for line in &aggregate.lines {
        println!(
            "{:>3}  {:<36} {:>10} {:>12} {:>10}",
            line.index + 1,
            line.key.as_str(),
            to_fixed(line.length_m, 2),
            to_fixed(line.weight, 2),
            to_fixed(line.price, 2)
        );
    }

    if !aggregate.unmatched.is_empty() {
        println!("\nUnmatched entries (ignored):");
        for &i in &aggregate.unmatched {
            if let Some(entry) = entries.get(i) {
                println!("{:>3}  {}", i + 1, SpecKey::for_entry(entry));
            }
        }
    }

    println!();
    print_totals(
        &aggregate.formatted_weight(),
        &aggregate.formatted_price(),
        currency,
    );
    Ok(())
}

/// Result from the remote endpoint (totals only)
pub fn output_response(
    output_format: OutputFormat,
    response: &CalculationResponse,
    currency: &str,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("\nCalculation Result");
        println!("==================");
        print_totals(&response.total_weight, &response.total_price, currency);
    }
    Ok(())
}

fn print_totals(weight: &str, price: &str, currency: &str) {
    println!("Total Weight:    {} kg", weight);
    println!("Estimated Price: {} {}", currency, price);
}

pub fn output_specs(output_format: OutputFormat, specs: &[PipeSpec]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(specs)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<6} {:<7} {:<20} {:>10} {:>10}",
        "Mat", "Thick", "Shape", "Size", "kg/m", "Price/kg"
    );
    println!("{}", "-".repeat(62));
    for spec in specs {
        println!(
            "{:<4} {:<6} {:<7} {:<20} {:>10} {:>10}",
            spec.material.code(),
            spec.thickness.code(),
            spec.shape.code(),
            spec.pipe_type,
            spec.weight_per_unit_length,
            spec.price_per_mass
        );
    }
    println!("\n{} specs", specs.len());
    Ok(())
}

pub fn output_sizes(output_format: OutputFormat, shape: Shape, sizes: &[&str]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(sizes)?);
    } else {
        println!("Sizes for {}:", shape.label());
        for size in sizes {
            println!("  {}", size);
        }
    }
    Ok(())
}
