//! xlsxcolumn - Pure-Rust spreadsheet column extractor with plain-text and PDF export
//!
//! This crate decodes the first sheet of a spreadsheet, lets the caller pick one
//! column by its header name, extracts that column's non-empty values in row
//! order, and exports them as plain text (`extracted_data.txt`) or as a
//! paginated PDF document (`extracted_data.pdf`).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxcolumn::{ExportFormat, Session};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = Session::default();
//!
//!     // Validate the file name and decode the first sheet
//!     let ticket = session.begin_load("people.xlsx")?;
//!     session.complete_load(ticket, std::fs::read("people.xlsx"))?;
//!     println!("Columns: {:?}", session.headers());
//!
//!     // Pick a column and extract it
//!     if session.select_column("Age") {
//!         for row in session.extract()? {
//!             println!("{}", row);
//!         }
//!     }
//!
//!     // Export as PDF
//!     let artifact = session.export(ExportFormat::Pdf)?;
//!     std::fs::write(artifact.file_name, &artifact.bytes)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Stateless Use
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxcolumn::{DateFormat, ExportFormat, ExtractorBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_date_format(DateFormat::Iso8601)
//!         .build()?;
//!
//!     let workbook = extractor.decode_reader(File::open("people.xlsx")?)?;
//!     let headers = extractor.header_row(&workbook.first_sheet);
//!
//!     if let Some(column) = extractor.resolve(&headers, "Joined") {
//!         let dates = extractor.extract(&workbook.first_sheet, column);
//!         let mut output = File::create("joined.txt")?;
//!         extractor.export_to(&dates, ExportFormat::Text, &mut output)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Page Layout
//!
//! ```rust,no_run
//! use xlsxcolumn::{ExtractorBuilder, PageLayout, Session};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = PageLayout::from_json(r#"{ "margin": 20.0, "title": "Customer names" }"#)?;
//!     let extractor = ExtractorBuilder::new().with_page_layout(layout).build()?;
//!     let session = Session::new(extractor);
//!     # let _ = session;
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod column;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod session;
mod types;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm;

// 公開API
pub use api::{
    DateFormat, ExportFormat, PageLayout, EMPTY_COLUMN_PLACEHOLDER, PDF_FILE_NAME,
    TEXT_FILE_NAME,
};
pub use builder::{Extractor, ExtractorBuilder};
pub use error::{
    ErrorCategory, XlsxColumnError, MSG_EMPTY_SHEET, MSG_INVALID_FILE, MSG_MISSING_SELECTION,
    MSG_NOTHING_TO_EXPORT, MSG_PROCESSING_FAILED,
};
pub use output::{Artifact, Exporter, PdfEncoder, TextEncoder};
pub use session::{LoadOutcome, LoadTicket, Session};
pub use types::{CellValue, Selection, Sheet, Workbook};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::WasmSession;
