use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::{ReconcileArgs, SizeLabelMode};
use crate::commands::extract::{
    MatricialScanner, collect_tool_versions, extract_document, resolve_pdf_paths,
};
use crate::commands::ingest::{load_table, map_columns};
use crate::commands::inventory;
use crate::error::PipelineError;
use crate::model::{ReconcileCounts, ReconcilePaths, ReconcileRunManifest};
use crate::size;
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

use super::join::{apply_japan_upc_prefix, apply_size_labels, reconcile};
use super::report::write_report;

pub fn run(args: ReconcileArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let pdf_paths = resolve_pdf_paths(&args.pdf_paths, args.input_dir.as_deref())?;
    info!(
        run_id = %run_id,
        pdf_count = pdf_paths.len(),
        workbook = %args.workbook.display(),
        "starting reconcile"
    );

    let scanner = MatricialScanner::new()?;
    let mut warnings = Vec::new();
    let mut records = Vec::new();

    for pdf_path in &pdf_paths {
        match extract_document(pdf_path, args.max_pages_per_doc, &scanner) {
            Ok(extraction) => {
                if extraction.records.is_empty() {
                    warn!(path = %pdf_path.display(), "document yielded no records");
                    warnings.push(format!("no records extracted from {}", pdf_path.display()));
                }
                records.extend(extraction.records);
            }
            Err(err) => {
                warn!(path = %pdf_path.display(), error = %err, "skipping unreadable document");
                warnings.push(format!("failed to read {}: {err:#}", pdf_path.display()));
            }
        }
    }

    if records.is_empty() {
        return Err(PipelineError::NoPdfRecords.into());
    }
    for record in &mut records {
        record.size = size::normalize(&record.size);
    }

    let table = load_table(&args.workbook)?;
    info!(
        sheet = %table.sheet,
        header_row = table.header_row,
        data_rows = table.rows.len(),
        "loaded workbook table"
    );
    let rows = map_columns(&table)?;

    let outcome = reconcile(&rows, &records);
    if outcome.rows.is_empty() {
        return Err(PipelineError::EmptyReconciliation.into());
    }
    info!(
        reconciled_rows = outcome.rows.len(),
        duplicates_collapsed = outcome.duplicates_collapsed,
        "reconciled workbook against PDF records"
    );

    let mut reconciled = outcome.rows;
    if args.japan_upc {
        apply_japan_upc_prefix(&mut reconciled);
    }
    apply_size_labels(&mut reconciled, args.size_labels);

    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| default_output_path(args.japan_upc, args.size_labels));
    let style_sheets = write_report(&output_path, &reconciled)?;
    info!(
        path = %output_path.display(),
        rows = reconciled.len(),
        sheets = style_sheets,
        "wrote reconciliation report"
    );

    let manifest = ReconcileRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        japan_upc: args.japan_upc,
        size_labels: args.size_labels.as_str().to_string(),
        paths: ReconcilePaths {
            workbook_path: args.workbook.display().to_string(),
            output_path: output_path.display().to_string(),
        },
        tool_versions: collect_tool_versions()?,
        counts: ReconcileCounts {
            pdf_count: pdf_paths.len(),
            pdf_records: records.len(),
            workbook_rows: rows.len(),
            name_join_matches: outcome.name_join_matches,
            code_join_matches: outcome.code_join_matches,
            duplicates_collapsed: outcome.duplicates_collapsed,
            reconciled_rows: reconciled.len(),
            style_sheets,
        },
        source_hashes: inventory::entries_for(&pdf_paths)?,
        warnings,
    };

    let manifest_path = args.manifest_path.unwrap_or_else(|| {
        PathBuf::from(format!("reconcile_run_{}.json", utc_compact_string(started_ts)))
    });
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote reconcile run manifest");

    Ok(())
}

fn default_output_path(japan_upc: bool, size_labels: SizeLabelMode) -> PathBuf {
    let mut name = String::from("Final_Report");
    if japan_upc {
        name.push_str("_JP");
    }
    match size_labels {
        SizeLabelMode::None => {}
        SizeLabelMode::Canada => name.push_str("_CA"),
        SizeLabelMode::Brazil => name.push_str("_BR"),
    }
    name.push_str(".xlsx");
    PathBuf::from(name)
}
