use clap::Parser;
use sales_cli::OutputFormat;
use std::path::PathBuf;

/// Sales Console - terminal client for the sales backend
#[derive(Parser, Debug)]
#[command(name = "sales")]
#[command(version)]
#[command(about = "Interactive administrative console for the sales backend", long_about = None)]
pub struct Cli {
    /// API base URL (e.g. http://localhost:8080/api)
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Bearer token (skips the stored session)
    #[arg(long = "token")]
    pub token: Option<String>,

    /// Execute one command and exit (semicolon-separated for several)
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Output format
    #[arg(long = "format", default_value = "table")]
    pub format: OutputFormat,

    /// Enable JSON output (shorthand for --format=json)
    #[arg(long = "json", conflicts_with = "format")]
    pub json: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Disable spinners/animations
    #[arg(long = "no-spinner")]
    pub no_spinner: bool,

    /// Configuration file path
    #[arg(long = "config", default_value = "~/.config/sales-console/config.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Rows per table page
    #[arg(long = "page-size", value_name = "ROWS")]
    pub page_size: Option<u32>,
}
