//! Command-line interface definition

use std::path::PathBuf;

use adops_domain::ReportFormat;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Bulk geo targeting, conversion pixel and report tooling")]
pub struct Cli {
    /// Path to a config file (TOML or JSON); searched for when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform username
    #[arg(short, long, env = "ADOPS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Platform password
    #[arg(short, long, env = "ADOPS_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Log filter override (e.g. "debug", "adops_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replace the city whitelist on every selected line item's profile
    Geo(GeoArgs),

    /// Activate a conversion pixel on every selected line item
    Pixel(PixelArgs),

    /// Generate, wait for and download a site/domain performance report
    Report(ReportArgs),
}

/// Which line items a batch command applies to
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct LineItemSelector {
    /// Comma-separated line item ids (e.g. "111,222")
    #[arg(long)]
    pub line_items: Option<String>,

    /// Insertion order whose line items are all targeted
    #[arg(long)]
    pub insertion_order: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct GeoArgs {
    /// Country whose active cities become the target list
    #[arg(long)]
    pub country: String,

    /// Comma-separated city names to check against the country's cities
    #[arg(long)]
    pub cities: Option<String>,

    #[command(flatten)]
    pub target: LineItemSelector,
}

#[derive(Debug, Clone, Args)]
pub struct PixelArgs {
    /// Advertiser owning the line items
    #[arg(long)]
    pub advertiser: String,

    /// Conversion pixel to activate
    #[arg(long)]
    pub pixel: String,

    #[command(flatten)]
    pub target: LineItemSelector,
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Advertiser to report on
    #[arg(long)]
    pub advertiser: String,

    /// First day of a custom window (YYYY-MM-DD)
    #[arg(long, requires = "end", conflicts_with = "interval")]
    pub start: Option<NaiveDate>,

    /// Last day of a custom window (YYYY-MM-DD)
    #[arg(long, requires = "start", conflicts_with = "interval")]
    pub end: Option<NaiveDate>,

    /// Named relative interval (e.g. "last_7_days")
    #[arg(long, required_unless_present = "start")]
    pub interval: Option<String>,

    /// Output format; defaults to the configured one
    #[arg(long)]
    pub format: Option<ReportFormat>,

    /// Directory the report is written to; defaults to the configured one
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
