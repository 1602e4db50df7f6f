use super::*;

use crate::cli::SizeLabelMode;
use crate::model::{ExtractedRecord, NormalizedRow};

fn record(style: &str, code: &str, name: &str, size: &str, upc: &str) -> ExtractedRecord {
    ExtractedRecord::new(style, code, name, size, upc)
}

fn row(style: &str, name: &str, code: &str, size: Option<&str>) -> NormalizedRow {
    NormalizedRow {
        style_name: style.to_string(),
        production_order: "OP1".to_string(),
        proto: "P1".to_string(),
        destination: "USA".to_string(),
        purchase_order: "PO9".to_string(),
        color_name: name.to_string(),
        color_code: code.to_string(),
        line_number: None,
        case_qty: None,
        units_per_size: None,
        size: size.map(ToString::to_string),
        quantity: size.map(|_| "12".to_string()),
    }
}

#[test]
fn matching_on_both_keys_yields_one_row() {
    let records = vec![record("TEE", "410", "RED", "M", "012345678905")];
    let rows = vec![row("TEE", "RED", "410", Some("M"))];

    let outcome = reconcile(&rows, &records);
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.name_join_matches, 1);
    assert_eq!(outcome.code_join_matches, 1);
    assert_eq!(outcome.duplicates_collapsed, 1);

    let reconciled = &outcome.rows[0];
    assert_eq!(reconciled.upc_code, "012345678905");
    assert_eq!(reconciled.style_color, "TEE 410");
    assert_eq!(reconciled.size.as_deref(), Some("M"));
}

#[test]
fn either_key_alone_is_enough_to_match() {
    let records = vec![record("TEE", "410", "RED", "M", "012345678905")];

    let by_name = vec![row("TEE", "RED", "999", Some("M"))];
    assert_eq!(reconcile(&by_name, &records).rows.len(), 1);

    let by_code = vec![row("TEE", "SCARLET", "410", Some("M"))];
    assert_eq!(reconcile(&by_code, &records).rows.len(), 1);

    let neither = vec![row("TEE", "SCARLET", "999", Some("M"))];
    assert!(reconcile(&neither, &records).rows.is_empty());
}

#[test]
fn size_predicate_drops_out_when_the_workbook_has_no_sizes() {
    let records = vec![
        record("TEE", "410", "RED", "S", "012345678901"),
        record("TEE", "410", "RED", "M", "012345678902"),
    ];
    let rows = vec![row("TEE", "RED", "410", None)];

    let outcome = reconcile(&rows, &records);
    assert_eq!(outcome.rows.len(), 2);

    let sizes: Vec<&str> = outcome
        .rows
        .iter()
        .filter_map(|r| r.size.as_deref())
        .collect();
    assert_eq!(sizes, ["S", "M"]);
}

#[test]
fn reconciling_the_same_inputs_twice_is_identical() {
    let records = vec![
        record("TEE", "410", "RED", "S", "012345678901"),
        record("TEE", "410", "RED", "M", "012345678902"),
        record("POLO", "705", "BLUE", "L", "012345678903"),
    ];
    let rows = vec![
        row("TEE", "RED", "410", Some("S")),
        row("TEE", "RED", "410", Some("M")),
        row("POLO", "BLUE", "705", Some("L")),
    ];

    let first = reconcile(&rows, &records);
    let second = reconcile(&rows, &records);
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.duplicates_collapsed, second.duplicates_collapsed);
}

#[test]
fn mismatched_sizes_do_not_join() {
    let records = vec![record("TEE", "410", "RED", "M", "012345678905")];
    let rows = vec![row("TEE", "RED", "410", Some("L"))];

    assert!(reconcile(&rows, &records).rows.is_empty());
}

#[test]
fn output_is_ordered_by_canonical_size_rank() {
    let records = vec![
        record("TEE", "410", "RED", "L", "012345678903"),
        record("TEE", "410", "RED", "XS", "012345678901"),
        record("TEE", "410", "RED", "M", "012345678902"),
    ];
    let rows = vec![
        row("TEE", "RED", "410", Some("L")),
        row("TEE", "RED", "410", Some("XS")),
        row("TEE", "RED", "410", Some("M")),
    ];

    let outcome = reconcile(&rows, &records);
    let sizes: Vec<&str> = outcome
        .rows
        .iter()
        .filter_map(|r| r.size.as_deref())
        .collect();
    assert_eq!(sizes, ["XS", "M", "L"]);
}

#[test]
fn japan_prefix_is_applied_once() {
    let records = vec![record("TEE", "410", "RED", "M", "12345678905")];
    let rows = vec![row("TEE", "RED", "410", Some("M"))];

    let mut reconciled = reconcile(&rows, &records).rows;
    apply_japan_upc_prefix(&mut reconciled);
    assert_eq!(reconciled[0].upc_code, "012345678905");

    apply_japan_upc_prefix(&mut reconciled);
    assert_eq!(reconciled[0].upc_code, "012345678905");
}

#[test]
fn regional_labels_replace_sizes_after_matching() {
    let records = vec![
        record("TEE", "410", "RED", "S", "012345678901"),
        record("TEE", "410", "RED", "XL", "012345678902"),
    ];
    let rows = vec![
        row("TEE", "RED", "410", Some("S")),
        row("TEE", "RED", "410", Some("XL")),
    ];

    let mut reconciled = reconcile(&rows, &records).rows;
    apply_size_labels(&mut reconciled, SizeLabelMode::Canada);
    let sizes: Vec<&str> = reconciled.iter().filter_map(|r| r.size.as_deref()).collect();
    assert_eq!(sizes, ["S/P", "XL/TG"]);

    let mut reconciled = reconcile(&rows, &records).rows;
    apply_size_labels(&mut reconciled, SizeLabelMode::Brazil);
    let sizes: Vec<&str> = reconciled.iter().filter_map(|r| r.size.as_deref()).collect();
    assert_eq!(sizes, ["S/P", "XL/GG"]);
}
