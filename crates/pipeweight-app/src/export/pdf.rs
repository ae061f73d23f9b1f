//! Single-page PDF with the current totals

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use pipeweight_types::{Error, Result};

pub const DEFAULT_PDF_NAME: &str = "pipe-selection.pdf";

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
// 10mm
const MARGIN_X: f32 = 28.35;
const FIRST_LINE_Y: f32 = PAGE_HEIGHT - 28.35 - 12.0;
const LINE_HEIGHT: f32 = 18.0;
const FONT_SIZE: f32 = 12.0;

fn pdf_err(e: lopdf::Error) -> Error {
    Error::Export(e.to_string())
}

/// Helvetica is WinAnsi encoded; anything outside Latin-1 becomes '?'
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn text_line(ops: &mut Vec<Operation>, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(b"F1".to_vec()), FONT_SIZE.into()],
    ));
    ops.push(Operation::new("Td", vec![MARGIN_X.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Render the two total lines as PDF bytes
pub fn render_totals_pdf(total_weight: &str, total_price: &str, currency: &str) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut operations = Vec::new();
    text_line(
        &mut operations,
        FIRST_LINE_Y,
        &format!("Total Weight: {} kg", total_weight),
    );
    text_line(
        &mut operations,
        FIRST_LINE_Y - LINE_HEIGHT,
        &format!("Estimated Price: {} {}", currency, total_price),
    );
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().map_err(pdf_err)?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let created = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("pipe-weight"),
        "CreationDate" => Object::string_literal(created),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::Export(e.to_string()))?;
    Ok(bytes)
}

/// Write the totals PDF to `path`
pub fn export_totals_pdf(
    path: &Path,
    total_weight: &str,
    total_price: &str,
    currency: &str,
) -> Result<()> {
    let bytes = render_totals_pdf(total_weight, total_price, currency)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "exported totals PDF");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_render_contains_totals() {
        let bytes = render_totals_pdf("3.00", "0.45", "Rs.").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, "Total Weight: 3.00 kg"));
        assert!(contains(&bytes, "Estimated Price: Rs. 0.45"));
        assert!(contains(&bytes, "/Helvetica"));
    }

    #[test]
    fn test_non_latin_currency_is_replaced() {
        assert_eq!(to_win_ansi("\u{20b9} 1"), b"? 1".to_vec());
        assert_eq!(to_win_ansi("\u{a3}"), vec![0xa3]);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_PDF_NAME);
        export_totals_pdf(&path, "0", "0", "Rs.").unwrap();
        let written = std::fs::read(&path).unwrap();
        assert!(contains(&written, "Total Weight: 0 kg"));
    }
}
