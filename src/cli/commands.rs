use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Contract;

#[derive(Parser)]
#[command(name = "phishguard", version, about = "Check URLs and QR code images against a phishing-detection service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a URL
    Url(UrlArgs),
    /// Decode and classify the QR code in an image
    Qr(QrArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct UrlArgs {
    /// URL to check
    pub url: String,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Args, Clone)]
pub struct QrArgs {
    /// Image containing a QR code
    pub image: PathBuf,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Args, Clone, Default)]
pub struct ServiceArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the analysis service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Endpoint layout: flask (/predict-url, /analyze-qr) or api (/api/predict, /api/scan_qr)
    #[arg(long)]
    pub contract: Option<Contract>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Also write the result panel as an HTML page
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Print the outcome as JSON instead of styled text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: PathBuf,
}
