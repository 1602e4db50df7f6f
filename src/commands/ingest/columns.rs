use std::collections::HashMap;

use anyhow::Result;

use crate::error::PipelineError;
use crate::model::NormalizedRow;
use crate::size;
use crate::util::normalize_token;

use super::workbook::RawTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    StyleName,
    ProductionOrder,
    Proto,
    Destination,
    PurchaseOrder,
    ColorName,
    ColorCode,
    LineNumber,
    CaseQty,
    UnitsPerSize,
}

impl CanonicalField {
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::StyleName => "NOMBRE ESTILO",
            CanonicalField::ProductionOrder => "PEDIDO PRODUCCION",
            CanonicalField::Proto => "PROTO",
            CanonicalField::Destination => "DESTINO",
            CanonicalField::PurchaseOrder => "PO#",
            CanonicalField::ColorName => "NOMBRE COLOR",
            CanonicalField::ColorCode => "COLOR",
            CanonicalField::LineNumber => "LN",
            CanonicalField::CaseQty => "CASE QTY",
            CanonicalField::UnitsPerSize => "UNITS/TALLA (PEDIDO)",
        }
    }
}

const REQUIRED_FIELDS: [CanonicalField; 6] = [
    CanonicalField::StyleName,
    CanonicalField::ProductionOrder,
    CanonicalField::Proto,
    CanonicalField::Destination,
    CanonicalField::PurchaseOrder,
    CanonicalField::ColorName,
];

const FORWARD_FILL_FIELDS: [CanonicalField; 2] =
    [CanonicalField::CaseQty, CanonicalField::LineNumber];

pub fn map_columns(table: &RawTable) -> Result<Vec<NormalizedRow>> {
    let resolved = resolve_columns(&table.columns);

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !resolved.contains_key(*field))
        .map(|field| field.label().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing).into());
    }

    let size_columns = detect_size_columns(&table.columns, &resolved);

    let mut cells: Vec<Vec<String>> = table.rows.clone();
    forward_fill_by_style(&mut cells, &resolved);

    let mut rows = Vec::new();
    for record in &cells {
        let base = base_row(record, &resolved);
        if base.style_name.is_empty() && base.color_name.is_empty() {
            continue;
        }

        if size_columns.is_empty() {
            rows.push(base);
            continue;
        }

        for (column_index, canonical_size) in &size_columns {
            let quantity = record.get(*column_index).map(String::as_str).unwrap_or("");
            if !keep_quantity(quantity) {
                continue;
            }
            let mut row = base.clone();
            row.size = Some(size::normalize(canonical_size));
            row.quantity = Some(quantity.trim().to_string());
            rows.push(row);
        }
    }

    if size_columns.is_empty() {
        dedupe_identity_rows(&mut rows);
    } else {
        rows.sort_by(|a, b| {
            let rank_a = a.size.as_deref().map(size::sort_rank).unwrap_or(usize::MAX);
            let rank_b = b.size.as_deref().map(size::sort_rank).unwrap_or(usize::MAX);
            (&a.style_name, &a.destination, &a.color_name, rank_a).cmp(&(
                &b.style_name,
                &b.destination,
                &b.color_name,
                rank_b,
            ))
        });
    }

    Ok(rows)
}

pub fn resolve_columns(columns: &[String]) -> HashMap<CanonicalField, usize> {
    let normalized: Vec<String> = columns.iter().map(|name| normalize_token(name)).collect();

    let pick = |candidates: &[&str]| -> Option<usize> {
        candidates
            .iter()
            .find_map(|candidate| normalized.iter().position(|token| token == candidate))
    };

    let mut resolved = HashMap::new();
    let mut insert = |field: CanonicalField, index: Option<usize>| {
        if let Some(index) = index {
            resolved.insert(field, index);
        }
    };

    insert(CanonicalField::StyleName, pick(&["ESTILOS", "STYLE"]));
    insert(
        CanonicalField::ProductionOrder,
        pick(&["OP"]).or_else(|| pick(&["RSV"])),
    );
    insert(CanonicalField::Proto, pick(&["PROTO"]));
    insert(CanonicalField::Destination, pick(&["DESTINO"]));
    insert(
        CanonicalField::PurchaseOrder,
        pick(&["PO", "PO NO", "PO#"]),
    );
    insert(
        CanonicalField::LineNumber,
        pick(&["LN", "WIP LINE NUMBER"]),
    );
    insert(CanonicalField::CaseQty, pick(&["CASE QTY", "CASEQTY"]));
    insert(
        CanonicalField::UnitsPerSize,
        pick(&["TOTAL", "UNITS TALLA PEDIDO"]),
    );

    let color_name = pick(&["DESCRIPCION COLOR", "DESCRIPCION DE COLOR"])
        .or_else(|| pick(&["COLOR", "CARTA"]));
    insert(CanonicalField::ColorName, color_name);

    // COLOR serves as the code column only when the color name did
    // not already claim it.
    let color_code = pick(&["COLR CODE", "COLOR CODE"])
        .or_else(|| pick(&["CODE"]))
        .or_else(|| pick(&["COLOR"]).filter(|index| Some(*index) != color_name));
    insert(CanonicalField::ColorCode, color_code);

    resolved
}

fn detect_size_columns(
    columns: &[String],
    resolved: &HashMap<CanonicalField, usize>,
) -> Vec<(usize, String)> {
    columns
        .iter()
        .enumerate()
        .filter(|(index, _)| !resolved.values().any(|used| used == index))
        .filter(|(_, name)| size::is_size_token(name))
        .map(|(index, name)| (index, name.trim().to_uppercase()))
        .collect()
}

fn keep_quantity(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    match trimmed.parse::<f64>() {
        Ok(quantity) => quantity > 0.0,
        Err(_) => true,
    }
}

fn forward_fill_by_style(cells: &mut [Vec<String>], resolved: &HashMap<CanonicalField, usize>) {
    let Some(&style_index) = resolved.get(&CanonicalField::StyleName) else {
        return;
    };

    for field in FORWARD_FILL_FIELDS {
        let Some(&fill_index) = resolved.get(&field) else {
            continue;
        };

        let mut carry = String::new();
        let mut carry_style = String::new();
        for record in cells.iter_mut() {
            let style = record.get(style_index).cloned().unwrap_or_default();
            if style != carry_style {
                carry_style = style;
                carry.clear();
            }

            match record.get_mut(fill_index) {
                Some(cell) if cell.is_empty() => *cell = carry.clone(),
                Some(cell) => carry = cell.clone(),
                None => {}
            }
        }
    }
}

fn base_row(record: &[String], resolved: &HashMap<CanonicalField, usize>) -> NormalizedRow {
    let get = |field: CanonicalField| -> String {
        resolved
            .get(&field)
            .and_then(|index| record.get(*index))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };
    let get_upper = |field: CanonicalField| get(field).to_uppercase();
    let get_optional = |field: CanonicalField| {
        resolved
            .get(&field)
            .map(|index| record.get(*index).map(|v| v.trim().to_string()).unwrap_or_default())
    };

    NormalizedRow {
        style_name: get_upper(CanonicalField::StyleName),
        production_order: get(CanonicalField::ProductionOrder),
        proto: get(CanonicalField::Proto),
        destination: get_upper(CanonicalField::Destination),
        purchase_order: get(CanonicalField::PurchaseOrder),
        color_name: get_upper(CanonicalField::ColorName),
        color_code: get_upper(CanonicalField::ColorCode),
        line_number: get_optional(CanonicalField::LineNumber),
        case_qty: get_optional(CanonicalField::CaseQty),
        units_per_size: get_optional(CanonicalField::UnitsPerSize),
        size: None,
        quantity: None,
    }
}

fn dedupe_identity_rows(rows: &mut Vec<NormalizedRow>) {
    let mut seen = std::collections::HashSet::new();
    rows.retain(|row| {
        seen.insert((
            row.style_name.clone(),
            row.production_order.clone(),
            row.proto.clone(),
            row.destination.clone(),
            row.purchase_order.clone(),
            row.color_name.clone(),
            row.color_code.clone(),
            row.line_number.clone(),
        ))
    });
}
