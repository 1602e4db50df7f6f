use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub style: String,
    pub color_code: String,
    pub color_name: String,
    pub size: String,
    pub upc_code: String,
    pub style_color: String,
}

impl ExtractedRecord {
    pub fn new(
        style: impl Into<String>,
        color_code: impl Into<String>,
        color_name: impl Into<String>,
        size: impl Into<String>,
        upc_code: impl Into<String>,
    ) -> Self {
        let style = style.into();
        let color_code = color_code.into();
        let style_color = format!("{style} {color_code}");
        Self {
            style,
            color_code,
            color_name: color_name.into(),
            size: size.into(),
            upc_code: upc_code.into(),
            style_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub style_name: String,
    pub production_order: String,
    pub proto: String,
    pub destination: String,
    pub purchase_order: String,
    pub color_name: String,
    pub color_code: String,
    pub line_number: Option<String>,
    pub case_qty: Option<String>,
    pub units_per_size: Option<String>,
    pub size: Option<String>,
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    pub proto: String,
    pub production_order: String,
    pub destination: String,
    pub style_name: String,
    pub color_name: String,
    pub purchase_order: String,
    pub upc_code: String,
    pub style_color: String,
    pub size: Option<String>,
    pub color_code: String,
    pub line_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfEntry {
    pub filename: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub pdfs: Vec<PdfEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolVersions {
    pub rustc: String,
    pub cargo: String,
    pub pdftotext: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractCounts {
    pub pdf_count: usize,
    pub bars_documents: usize,
    pub matricial_documents: usize,
    pub unknown_documents: usize,
    pub bars_fallback_documents: usize,
    pub empty_documents: usize,
    pub records_extracted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub records_path: String,
    pub tool_versions: ToolVersions,
    pub counts: ExtractCounts,
    pub source_hashes: Vec<PdfEntry>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileCounts {
    pub pdf_count: usize,
    pub pdf_records: usize,
    pub workbook_rows: usize,
    pub name_join_matches: usize,
    pub code_join_matches: usize,
    pub duplicates_collapsed: usize,
    pub reconciled_rows: usize,
    pub style_sheets: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcilePaths {
    pub workbook_path: String,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub japan_upc: bool,
    pub size_labels: String,
    pub paths: ReconcilePaths,
    pub tool_versions: ToolVersions,
    pub counts: ReconcileCounts,
    pub source_hashes: Vec<PdfEntry>,
    pub warnings: Vec<String>,
}
