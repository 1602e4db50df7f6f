use std::collections::{HashMap, HashSet};

use crate::cli::SizeLabelMode;
use crate::model::{ExtractedRecord, NormalizedRow, ReconciledRecord};
use crate::size;

#[derive(Debug, Default)]
pub struct JoinOutcome {
    pub rows: Vec<ReconciledRecord>,
    pub name_join_matches: usize,
    pub code_join_matches: usize,
    pub duplicates_collapsed: usize,
}

type JoinKey = (String, String, Option<String>);

pub fn reconcile(rows: &[NormalizedRow], records: &[ExtractedRecord]) -> JoinOutcome {
    let workbook_has_sizes = rows.iter().any(|row| row.size.is_some());

    let mut by_name: HashMap<JoinKey, Vec<&ExtractedRecord>> = HashMap::new();
    let mut by_code: HashMap<JoinKey, Vec<&ExtractedRecord>> = HashMap::new();
    for record in records {
        let size_key = workbook_has_sizes.then(|| record.size.clone());
        by_name
            .entry((record.style.clone(), record.color_name.clone(), size_key.clone()))
            .or_default()
            .push(record);
        by_code
            .entry((record.style.clone(), record.color_code.clone(), size_key))
            .or_default()
            .push(record);
    }

    let mut outcome = JoinOutcome::default();
    let mut seen: HashSet<(String, String, String, String, String, String, Option<String>)> =
        HashSet::new();

    for row in rows {
        let size_key = workbook_has_sizes.then(|| row.size.clone().unwrap_or_default());

        let name_key = (row.style_name.clone(), row.color_name.clone(), size_key.clone());
        let code_key = (row.style_name.clone(), row.color_code.clone(), size_key);

        let name_matches = by_name.get(&name_key).map(Vec::as_slice).unwrap_or(&[]);
        let code_matches = by_code.get(&code_key).map(Vec::as_slice).unwrap_or(&[]);
        outcome.name_join_matches += name_matches.len();
        outcome.code_join_matches += code_matches.len();

        for record in name_matches.iter().chain(code_matches.iter()) {
            // Without workbook sizes the matched record still carries
            // one; it flows into the output, the dedup key, and the
            // final sort.
            let size = if workbook_has_sizes {
                row.size.clone()
            } else {
                Some(record.size.clone())
            };
            let dedup_key = (
                row.style_name.clone(),
                row.color_name.clone(),
                row.color_code.clone(),
                row.destination.clone(),
                row.purchase_order.clone(),
                record.upc_code.clone(),
                size.clone(),
            );
            if !seen.insert(dedup_key) {
                outcome.duplicates_collapsed += 1;
                continue;
            }

            outcome.rows.push(ReconciledRecord {
                proto: row.proto.clone(),
                production_order: row.production_order.clone(),
                destination: row.destination.clone(),
                style_name: row.style_name.clone(),
                color_name: row.color_name.clone(),
                purchase_order: row.purchase_order.clone(),
                upc_code: record.upc_code.clone(),
                style_color: record.style_color.clone(),
                size,
                color_code: row.color_code.clone(),
                line_number: row.line_number.clone(),
            });
        }
    }

    sort_reconciled(&mut outcome.rows);
    outcome
}

fn sort_reconciled(rows: &mut [ReconciledRecord]) {
    rows.sort_by(|a, b| {
        let rank_a = a.size.as_deref().map(size::sort_rank).unwrap_or(usize::MAX);
        let rank_b = b.size.as_deref().map(size::sort_rank).unwrap_or(usize::MAX);
        (
            &a.production_order,
            &a.destination,
            &a.purchase_order,
            &a.color_name,
            rank_a,
        )
            .cmp(&(
                &b.production_order,
                &b.destination,
                &b.purchase_order,
                &b.color_name,
                rank_b,
            ))
    });
}

pub fn apply_japan_upc_prefix(rows: &mut [ReconciledRecord]) {
    for row in rows {
        if !row.upc_code.starts_with('0') {
            row.upc_code.insert(0, '0');
        }
    }
}

pub fn apply_size_labels(rows: &mut [ReconciledRecord], mode: SizeLabelMode) {
    let relabel: fn(&str) -> String = match mode {
        SizeLabelMode::None => return,
        SizeLabelMode::Canada => size::canada_label,
        SizeLabelMode::Brazil => size::brazil_label,
    };

    for row in rows {
        if let Some(current) = row.size.take() {
            row.size = Some(relabel(&current));
        }
    }
}
