use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no records were extracted from any PDF")]
    NoPdfRecords,

    #[error("required workbook columns could not be resolved: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("reconciliation produced no rows; PDFs and workbook do not intersect")]
    EmptyReconciliation,
}
