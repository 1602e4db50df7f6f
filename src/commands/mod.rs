pub mod extract;
pub mod ingest;
pub mod inventory;
pub mod reconcile;
