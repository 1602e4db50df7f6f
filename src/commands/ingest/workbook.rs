use std::path::Path;

use anyhow::{Context, Result};
use calamine::{DataType, Range, Reader, open_workbook_auto};
use tracing::{info, warn};

use crate::util::normalize_token;

const HEADER_TERMS: &[&str] = &[
    "STYLE",
    "ESTILOS",
    "OP",
    "RSV",
    "PROTO",
    "DESTINO",
    "PO",
    "PO NO",
    "PO#",
    "DESCRIPCION COLOR",
    "DESCRIPCION DE COLOR",
    "COLOR",
    "CARTA",
    "CODE",
    "COLR CODE",
    "COLOR CODE",
    "LN",
    "CASE QTY",
    "WIP LINE NUMBER",
];

const STYLE_TERMS: [&str; 2] = ["STYLE", "ESTILOS"];

const HEADER_SCAN_ROWS: usize = 40;
const FALLBACK_HEADER_ROW: usize = 1;

#[derive(Debug, Clone)]
pub struct RawTable {
    pub sheet: String,
    pub header_row: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn load_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook: {}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut best: Option<(usize, String, usize)> = None;

    for sheet in &sheet_names {
        let Ok(range) = workbook.worksheet_range(sheet) else {
            continue;
        };
        for (row_index, row) in range.rows().take(HEADER_SCAN_ROWS).enumerate() {
            let Some(hits) = score_header_row(row) else {
                continue;
            };
            let better = best
                .as_ref()
                .map(|(best_hits, _, _)| hits > *best_hits)
                .unwrap_or(true);
            if better {
                best = Some((hits, sheet.clone(), row_index));
            }
        }
    }

    let (sheet, header_row) = match best {
        Some((hits, sheet, header_row)) => {
            info!(sheet = %sheet, header_row, hits, "detected workbook header row");
            (sheet, header_row)
        }
        None => {
            let sheet = sheet_names
                .first()
                .cloned()
                .with_context(|| format!("workbook has no sheets: {}", path.display()))?;
            warn!(
                sheet = %sheet,
                header_row = FALLBACK_HEADER_ROW,
                "no header row recognized; using fallback position"
            );
            (sheet, FALLBACK_HEADER_ROW)
        }
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|error| anyhow::anyhow!("failed to read sheet {sheet}: {error}"))?;

    materialize(&sheet, header_row, &range)
        .with_context(|| format!("failed to build table from {}", path.display()))
}

fn score_header_row(row: &[calamine::Data]) -> Option<usize> {
    let tokens: Vec<String> = row
        .iter()
        .map(|cell| normalize_token(&cell.as_string().unwrap_or_default()))
        .collect();

    let mut matched: Vec<&str> = Vec::new();
    for token in &tokens {
        if token.is_empty() {
            continue;
        }
        if let Some(term) = HEADER_TERMS.iter().find(|term| *term == token) {
            if !matched.contains(term) {
                matched.push(term);
            }
        }
    }

    let has_style = matched
        .iter()
        .any(|term| STYLE_TERMS.contains(term));
    has_style.then_some(matched.len())
}

fn materialize(sheet: &str, header_row: usize, range: &Range<calamine::Data>) -> Result<RawTable> {
    let mut rows_iter = range.rows().skip(header_row);

    let columns: Vec<String> = rows_iter
        .next()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| {
            let mut cells: Vec<String> = row
                .iter()
                .map(|cell| cell.as_string().unwrap_or_default().trim().to_string())
                .collect();
            cells.resize(columns.len(), String::new());
            cells
        })
        .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
        .collect();

    Ok(RawTable {
        sheet: sheet.to_string(),
        header_row,
        columns,
        rows,
    })
}
