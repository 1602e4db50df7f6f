mod bars;
mod classify;
mod matricial;
mod pages;
mod run;

pub use run::{DocumentExtraction, collect_tool_versions, extract_document, resolve_pdf_paths, run};

pub use bars::parse_bars_document;
pub use classify::{PdfLayout, classify_first_page};
pub use matricial::MatricialScanner;
pub use pages::{extract_pages, pdftotext_version};
