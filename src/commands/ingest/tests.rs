use rust_xlsxwriter::Workbook;

use crate::error::PipelineError;

use super::columns::{CanonicalField, map_columns, resolve_columns};
use super::workbook::{RawTable, load_table};

fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        sheet: "Sheet1".to_string(),
        header_row: 0,
        columns: columns.iter().map(ToString::to_string).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    }
}

const BASE_COLUMNS: [&str; 7] = [
    "ESTILOS",
    "OP",
    "PROTO",
    "DESTINO",
    "PO",
    "DESCRIPCION COLOR",
    "COLOR",
];

#[test]
fn resolve_columns_accepts_rsv_when_op_is_absent() {
    let columns: Vec<String> = ["ESTILOS", "RSV", "PROTO"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let resolved = resolve_columns(&columns);
    assert_eq!(resolved.get(&CanonicalField::ProductionOrder), Some(&1));
}

#[test]
fn resolve_columns_lets_color_serve_as_code_only_when_unclaimed() {
    let both: Vec<String> = ["DESCRIPCION COLOR", "COLOR"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let resolved = resolve_columns(&both);
    assert_eq!(resolved.get(&CanonicalField::ColorName), Some(&0));
    assert_eq!(resolved.get(&CanonicalField::ColorCode), Some(&1));

    let only_color: Vec<String> = vec!["COLOR".to_string()];
    let resolved = resolve_columns(&only_color);
    assert_eq!(resolved.get(&CanonicalField::ColorName), Some(&0));
    assert_eq!(resolved.get(&CanonicalField::ColorCode), None);
}

#[test]
fn map_columns_reports_every_missing_required_column() {
    let table = table(&["ESTILOS", "PROTO"], &[]);
    let error = map_columns(&table).unwrap_err();
    match error.downcast_ref::<PipelineError>() {
        Some(PipelineError::MissingColumns(missing)) => {
            assert!(missing.contains(&"PEDIDO PRODUCCION".to_string()));
            assert!(missing.contains(&"DESTINO".to_string()));
            assert!(missing.contains(&"NOMBRE COLOR".to_string()));
            assert!(!missing.contains(&"PROTO".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn map_columns_unpivots_sizes_and_drops_zero_and_blank_quantities() {
    let columns: Vec<&str> = BASE_COLUMNS.iter().copied().chain(["S", "M", "L"]).collect();
    let table = table(
        &columns,
        &[&["Tee", "OP1", "P1", "usa", "PO9", "red", "410", "0", "12", ""]],
    );

    let rows = map_columns(&table).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.style_name, "TEE");
    assert_eq!(row.destination, "USA");
    assert_eq!(row.color_name, "RED");
    assert_eq!(row.color_code, "410");
    assert_eq!(row.size.as_deref(), Some("M"));
    assert_eq!(row.quantity.as_deref(), Some("12"));
}

#[test]
fn map_columns_keeps_non_numeric_quantities() {
    let columns: Vec<&str> = BASE_COLUMNS.iter().copied().chain(["S"]).collect();
    let table = table(
        &columns,
        &[&["Tee", "OP1", "P1", "USA", "PO9", "RED", "410", "TBD"]],
    );

    let rows = map_columns(&table).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity.as_deref(), Some("TBD"));
}

#[test]
fn map_columns_forward_fills_only_within_one_style_run() {
    let columns: Vec<&str> = BASE_COLUMNS.iter().copied().chain(["CASE QTY"]).collect();
    let table = table(
        &columns,
        &[
            &["TEE", "OP1", "P1", "USA", "PO9", "RED", "410", "24"],
            &["TEE", "OP1", "P1", "USA", "PO9", "BLUE", "705", ""],
            &["POLO", "OP2", "P2", "USA", "PO9", "GREEN", "300", ""],
        ],
    );

    let rows = map_columns(&table).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].case_qty.as_deref(), Some("24"));
    assert_eq!(rows[1].case_qty.as_deref(), Some("24"));
    assert_eq!(rows[2].case_qty.as_deref(), Some(""));
}

#[test]
fn map_columns_collapses_identical_rows_without_size_columns() {
    let table = table(
        &BASE_COLUMNS,
        &[
            &["TEE", "OP1", "P1", "USA", "PO9", "RED", "410"],
            &["TEE", "OP1", "P1", "USA", "PO9", "RED", "410"],
        ],
    );

    let rows = map_columns(&table).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].size.is_none());
}

#[test]
fn load_table_finds_the_header_row_below_decorative_banners() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "PACKING LIST").unwrap();
    let headers: Vec<&str> = BASE_COLUMNS.iter().copied().chain(["S", "M", "L"]).collect();
    for (column, header) in headers.iter().enumerate() {
        worksheet.write_string(3, column as u16, *header).unwrap();
    }
    for (column, value) in ["TEE", "OP1", "P1", "USA", "PO9", "RED", "410"]
        .iter()
        .enumerate()
    {
        worksheet.write_string(4, column as u16, *value).unwrap();
    }
    worksheet.write_number(4, 8, 12).unwrap();
    workbook.save(&path).unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.header_row, 3);
    assert_eq!(table.columns.len(), headers.len());
    assert_eq!(table.columns[0], "ESTILOS");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][8], "12");

    let rows = map_columns(&table).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].size.as_deref(), Some("M"));
    assert_eq!(rows[0].quantity.as_deref(), Some("12"));
}

#[test]
fn load_table_falls_back_to_the_second_row_when_nothing_scores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opaque.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "QUARTERLY NOTES").unwrap();
    worksheet.write_string(1, 0, "ITEM").unwrap();
    worksheet.write_string(1, 1, "VALUE").unwrap();
    worksheet.write_string(2, 0, "A").unwrap();
    worksheet.write_string(2, 1, "B").unwrap();
    workbook.save(&path).unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.header_row, 1);
    assert_eq!(table.columns, vec!["ITEM".to_string(), "VALUE".to_string()]);
    assert_eq!(table.rows.len(), 1);
}
