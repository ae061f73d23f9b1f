//! Export of calculation results

pub mod excel;
pub mod pdf;

pub use excel::export_to_excel;
pub use pdf::{export_totals_pdf, render_totals_pdf, DEFAULT_PDF_NAME};
