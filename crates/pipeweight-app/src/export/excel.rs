//! Excel export functionality

use pipeweight_domain::service::Aggregate;
use pipeweight_types::{Error, PipeEntry, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

fn xlsx_err(e: XlsxError) -> Error {
    Error::Export(e.to_string())
}

/// Export a calculation breakdown to an Excel file
pub fn export_to_excel(
    entries: &[PipeEntry],
    aggregate: &Aggregate,
    currency: &str,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, entries, aggregate, currency)?;

    let details_sheet = workbook.add_worksheet();
    write_details_sheet(details_sheet, entries, aggregate)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    tracing::info!(path = %output_path.display(), "exported Excel breakdown");

    Ok(())
}

/// NaN and infinities are not valid cell numbers
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    if value.is_finite() {
        sheet.write_number(row, col, value).map_err(xlsx_err)?;
    } else {
        sheet
            .write_string(row, col, value.to_string())
            .map_err(xlsx_err)?;
    }
    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    entries: &[PipeEntry],
    aggregate: &Aggregate,
    currency: &str,
) -> Result<()> {
    sheet.set_name("Summary").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Pipe Weight Report", &header_format)
        .map_err(xlsx_err)?;

    sheet.write_string(2, 0, "Generated:").map_err(xlsx_err)?;
    sheet
        .write_string(2, 1, chrono::Local::now().to_rfc3339())
        .map_err(xlsx_err)?;

    sheet.write_string(3, 0, "Entries:").map_err(xlsx_err)?;
    sheet
        .write_number(3, 1, entries.len() as f64)
        .map_err(xlsx_err)?;

    sheet.write_string(4, 0, "Unmatched:").map_err(xlsx_err)?;
    sheet
        .write_number(4, 1, aggregate.unmatched.len() as f64)
        .map_err(xlsx_err)?;

    sheet
        .write_string(5, 0, "Total Weight (kg):")
        .map_err(xlsx_err)?;
    sheet
        .write_string(5, 1, aggregate.formatted_weight())
        .map_err(xlsx_err)?;

    sheet
        .write_string(6, 0, format!("Estimated Price ({}):", currency))
        .map_err(xlsx_err)?;
    sheet
        .write_string(6, 1, aggregate.formatted_price())
        .map_err(xlsx_err)?;

    Ok(())
}

fn write_details_sheet(
    sheet: &mut Worksheet,
    entries: &[PipeEntry],
    aggregate: &Aggregate,
) -> Result<()> {
    sheet.set_name("Details").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let headers = [
        "#",
        "Material",
        "Thickness",
        "Shape",
        "Size",
        "Length (m)",
        "Weight (kg)",
        "Price",
        "Status",
    ];

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    for (idx, entry) in entries.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet
            .write_number(row, 0, (idx + 1) as f64)
            .map_err(xlsx_err)?;
        sheet.write_string(row, 1, &entry.material).map_err(xlsx_err)?;
        sheet.write_string(row, 2, &entry.thickness).map_err(xlsx_err)?;
        sheet.write_string(row, 3, &entry.shape).map_err(xlsx_err)?;
        sheet.write_string(row, 4, &entry.pipe_type).map_err(xlsx_err)?;
        write_value(sheet, row, 5, entry.length.meters())?;

        match aggregate.lines.iter().find(|line| line.index == idx) {
            Some(line) => {
                write_value(sheet, row, 6, line.weight)?;
                write_value(sheet, row, 7, line.price)?;
                sheet.write_string(row, 8, "OK").map_err(xlsx_err)?;
            }
            None => {
                sheet
                    .write_string(row, 8, "No matching spec")
                    .map_err(xlsx_err)?;
            }
        }
    }

    sheet.set_column_width(0, 5).map_err(xlsx_err)?;
    sheet.set_column_width(4, 20).map_err(xlsx_err)?;
    sheet.set_column_width(8, 18).map_err(xlsx_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeweight_domain::model::builtin_table;
    use pipeweight_domain::service::aggregate;
    use pipeweight_types::{Material, Shape, Thickness};

    #[test]
    fn test_export_with_unmatched_and_nan() {
        let entries = vec![
            PipeEntry::new(Material::Ss, Thickness::Mm1, Shape::Round, "1-inch", 10.0),
            PipeEntry::new(Material::Ss, Thickness::Mm1, Shape::Round, "20*20", 3.0),
            PipeEntry::new(Material::Ms, Thickness::Mm1, Shape::Square, "1x1-inch", f64::NAN),
        ];
        let agg = aggregate(&entries, &builtin_table()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breakdown.xlsx");
        export_to_excel(&entries, &agg, "Rs.", &path).unwrap();

        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0);
    }
}
