use anyhow::Result;
use tracing::info;

use crate::cli::IngestArgs;
use crate::util::write_json_pretty;

use super::columns::map_columns;
use super::workbook::load_table;

pub fn run(args: IngestArgs) -> Result<()> {
    info!(workbook = %args.workbook.display(), "starting ingest");

    let table = load_table(&args.workbook)?;
    info!(
        sheet = %table.sheet,
        header_row = table.header_row,
        columns = table.columns.len(),
        data_rows = table.rows.len(),
        "loaded workbook table"
    );

    let rows = map_columns(&table)?;

    write_json_pretty(&args.rows_path, &rows)?;
    info!(
        path = %args.rows_path.display(),
        rows = rows.len(),
        "wrote normalized workbook rows"
    );

    Ok(())
}
