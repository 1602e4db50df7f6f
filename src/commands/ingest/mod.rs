mod columns;
mod run;
#[cfg(test)]
mod tests;
mod workbook;

pub use run::run;

pub use columns::map_columns;
pub use workbook::{RawTable, load_table};
