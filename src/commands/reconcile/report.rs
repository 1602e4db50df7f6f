use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::model::ReconciledRecord;

const REPORT_HEADERS: [&str; 11] = [
    "PROTO COFACO",
    "PEDIDO PRODUCCION COFACO",
    "DESTINO",
    "NOMBRE ESTILO",
    "NOMBRE COLOR",
    "PO#",
    "UPC CODE",
    "STYLE COLOR",
    "SIZE",
    "COLOR",
    "LN",
];

const HEADER_ROW: u32 = 13;
const MAX_SHEET_NAME: usize = 31;
const FALLBACK_SHEET_NAME: &str = "REPORTE";

pub fn write_report(path: &Path, rows: &[ReconciledRecord]) -> Result<usize> {
    let mut workbook = Workbook::new();

    let groups = group_by_style(rows);
    let sheet_count = groups.len();

    for (style, style_rows) in groups {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name_for(&style))
            .with_context(|| format!("invalid sheet name for style {style:?}"))?;
        write_sheet(worksheet, &style_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save report: {}", path.display()))?;

    Ok(sheet_count)
}

fn group_by_style<'a>(rows: &'a [ReconciledRecord]) -> Vec<(String, Vec<&'a ReconciledRecord>)> {
    let mut groups: Vec<(String, Vec<&'a ReconciledRecord>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(style, _)| *style == row.style_name) {
            Some((_, group)) => group.push(row),
            None => groups.push((row.style_name.clone(), vec![row])),
        }
    }
    groups
}

fn sheet_name_for(style: &str) -> String {
    let trimmed = style.trim();
    if trimmed.is_empty() {
        return FALLBACK_SHEET_NAME.to_string();
    }
    trimmed.chars().take(MAX_SHEET_NAME).collect()
}

fn write_sheet(worksheet: &mut Worksheet, rows: &[&ReconciledRecord]) -> Result<()> {
    let header_format = Format::new().set_bold().set_text_wrap();

    for (column, header) in REPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(HEADER_ROW, column as u16, *header, &header_format)
            .context("failed to write header cell")?;
    }

    let mut widths: Vec<usize> = REPORT_HEADERS.iter().map(|header| header.len()).collect();

    for (index, row) in rows.iter().enumerate() {
        let worksheet_row = HEADER_ROW + 1 + index as u32;
        for (column, value) in row_cells(row).into_iter().enumerate() {
            if value.len() > widths[column] {
                widths[column] = value.len();
            }
            // Everything is text: UPCs must keep leading zeros.
            worksheet
                .write_string(worksheet_row, column as u16, value)
                .context("failed to write data cell")?;
        }
    }

    for (column, width) in widths.iter().enumerate() {
        let clamped = ((*width + 2) as f64).min(60.0);
        worksheet
            .set_column_width(column as u16, clamped)
            .context("failed to set column width")?;
    }

    let last_row = HEADER_ROW + rows.len() as u32;
    worksheet
        .autofilter(HEADER_ROW, 0, last_row, (REPORT_HEADERS.len() - 1) as u16)
        .context("failed to set autofilter")?;
    worksheet
        .set_freeze_panes(HEADER_ROW + 1, 0)
        .context("failed to freeze panes")?;

    Ok(())
}

fn row_cells(row: &ReconciledRecord) -> [String; 11] {
    [
        row.proto.clone(),
        row.production_order.clone(),
        row.destination.clone(),
        row.style_name.clone(),
        row.color_name.clone(),
        row.purchase_order.clone(),
        row.upc_code.clone(),
        row.style_color.clone(),
        row.size.clone().unwrap_or_default(),
        row.color_code.clone(),
        row.line_number.clone().unwrap_or_default(),
    ]
}
