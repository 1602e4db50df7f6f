mod join;
mod report;
mod run;
#[cfg(test)]
mod tests;

pub use run::run;

pub use join::{JoinOutcome, apply_japan_upc_prefix, apply_size_labels, reconcile};
pub use report::write_report;
