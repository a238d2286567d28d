use crate::core::types::DocumentFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Pipeline document to scan (`-` reads stdin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (default: detected from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,

    /// Print qualified paths such as pipeline.stages[0].stage.spec.timeout
    #[arg(long, help_heading = "Output Options")]
    pub qualified: bool,

    /// Emit one entry per line or a JSON array
    #[arg(long, default_value = "text", value_name = "OUTPUT", help_heading = "Output Options")]
    pub output: ScanOutput,

    /// Value that marks a runtime input (default: <+input>)
    #[arg(long, value_name = "TEXT")]
    pub sentinel: Option<String>,

    /// Path to config file (default: ./pipeline-fixtures.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TemplateStepArgs {
    /// Pipeline document whose first step should be wrapped (`-` reads stdin)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Input format (default: detected from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,

    /// Format of the rewritten document (default: output.format from config, then yaml)
    #[arg(long, value_name = "FORMAT", help_heading = "Output Options")]
    pub emit: Option<DocumentFormat>,

    /// Write the rewritten document here instead of stdout
    #[arg(long, value_name = "FILE", help_heading = "Output Options")]
    pub output: Option<PathBuf>,

    /// Path to config file (default: ./pipeline-fixtures.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum ScanOutput {
    /// One field per line
    Text,
    /// JSON array suitable for downstream tooling
    Json,
}
