use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "upcmatch",
    version,
    about = "Garment UPC extraction and reconciliation tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Extract(ExtractArgs),
    Ingest(IngestArgs),
    Reconcile(ReconcileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long = "pdf")]
    pub pdf_paths: Vec<PathBuf>,

    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long, default_value = "upc_records.json")]
    pub records_path: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long)]
    pub workbook: PathBuf,

    #[arg(long, default_value = "workbook_rows.json")]
    pub rows_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReconcileArgs {
    #[arg(long = "pdf")]
    pub pdf_paths: Vec<PathBuf>,

    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub workbook: PathBuf,

    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub japan_upc: bool,

    #[arg(long, value_enum, default_value_t = SizeLabelMode::None)]
    pub size_labels: SizeLabelMode,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SizeLabelMode {
    None,
    Canada,
    Brazil,
}

impl SizeLabelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Canada => "canada",
            Self::Brazil => "brazil",
        }
    }
}
