use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::commands::inventory;
use crate::error::PipelineError;
use crate::model::{ExtractCounts, ExtractRunManifest, ExtractedRecord, ToolVersions};
use crate::size;
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

use super::bars::parse_bars_document;
use super::classify::{PdfLayout, classify_first_page};
use super::matricial::MatricialScanner;
use super::pages::{command_version, extract_pages, pdftotext_version};

#[derive(Debug)]
pub struct DocumentExtraction {
    pub layout: PdfLayout,
    pub bars_fallback: bool,
    pub records: Vec<ExtractedRecord>,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let pdf_paths = resolve_pdf_paths(&args.pdf_paths, args.input_dir.as_deref())?;
    info!(run_id = %run_id, pdf_count = pdf_paths.len(), "starting extract");

    let scanner = MatricialScanner::new()?;
    let mut counts = ExtractCounts {
        pdf_count: pdf_paths.len(),
        ..ExtractCounts::default()
    };
    let mut warnings = Vec::new();
    let mut records = Vec::new();

    for pdf_path in &pdf_paths {
        let extraction = match extract_document(pdf_path, args.max_pages_per_doc, &scanner) {
            Ok(extraction) => extraction,
            Err(err) => {
                // An unreadable document contributes nothing; only the
                // pipeline-wide empty total is fatal.
                warn!(path = %pdf_path.display(), error = %err, "skipping unreadable document");
                warnings.push(format!("failed to read {}: {err:#}", pdf_path.display()));
                counts.unknown_documents += 1;
                counts.empty_documents += 1;
                continue;
            }
        };
        tally_document(&mut counts, &extraction);
        if extraction.records.is_empty() {
            let message = format!("no records extracted from {}", pdf_path.display());
            warn!(path = %pdf_path.display(), "document yielded no records");
            warnings.push(message);
        }
        records.extend(extraction.records);
    }

    if records.is_empty() {
        return Err(PipelineError::NoPdfRecords.into());
    }

    for record in &mut records {
        record.size = size::normalize(&record.size);
    }
    counts.records_extracted = records.len();

    write_json_pretty(&args.records_path, &records)?;
    info!(
        path = %args.records_path.display(),
        records = records.len(),
        "wrote extracted records"
    );

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        records_path: args.records_path.display().to_string(),
        tool_versions: collect_tool_versions()?,
        counts,
        source_hashes: inventory::entries_for(&pdf_paths)?,
        warnings,
    };

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        PathBuf::from(format!("extract_run_{}.json", utc_compact_string(started_ts)))
    });
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote extract run manifest");

    Ok(())
}

pub fn extract_document(
    pdf_path: &Path,
    max_pages_per_doc: Option<usize>,
    scanner: &MatricialScanner,
) -> Result<DocumentExtraction> {
    let pages = extract_pages(pdf_path, max_pages_per_doc)
        .with_context(|| format!("failed to extract text from {}", pdf_path.display()))?;

    let layout = pages
        .first()
        .map(|first_page| classify_first_page(first_page))
        .unwrap_or(PdfLayout::Unknown);

    let (records, bars_fallback) = match layout {
        PdfLayout::Bars => (parse_bars_document(&pages), false),
        PdfLayout::Matricial => (scanner.parse_document(&pages), false),
        PdfLayout::Unknown => {
            let matricial = scanner.parse_document(&pages);
            if matricial.is_empty() {
                (parse_bars_document(&pages), true)
            } else {
                (matricial, false)
            }
        }
    };

    info!(
        path = %pdf_path.display(),
        layout = layout.as_str(),
        records = records.len(),
        bars_fallback,
        "parsed document"
    );

    Ok(DocumentExtraction {
        layout,
        bars_fallback,
        records,
    })
}

pub fn resolve_pdf_paths(
    pdf_paths: &[PathBuf],
    input_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut paths = pdf_paths.to_vec();
    if let Some(dir) = input_dir {
        let mut discovered = inventory::discover_pdfs(dir)?;
        discovered.sort();
        paths.extend(discovered);
    }

    if paths.is_empty() {
        bail!("no PDFs given; pass --pdf or --input-dir");
    }

    Ok(paths)
}

pub fn collect_tool_versions() -> Result<ToolVersions> {
    Ok(ToolVersions {
        rustc: command_version("rustc", &["--version"])?,
        cargo: command_version("cargo", &["--version"])?,
        pdftotext: pdftotext_version()?,
    })
}

fn tally_document(counts: &mut ExtractCounts, extraction: &DocumentExtraction) {
    match extraction.layout {
        PdfLayout::Bars => counts.bars_documents += 1,
        PdfLayout::Matricial => counts.matricial_documents += 1,
        PdfLayout::Unknown => counts.unknown_documents += 1,
    }
    if extraction.bars_fallback {
        counts.bars_fallback_documents += 1;
    }
    if extraction.records.is_empty() {
        counts.empty_documents += 1;
    }
}
