use std::path::PathBuf;

use clap::Parser;

use crate::StorageClass;

/// S3 Lifecycle Policy Calculator
///
/// Estimates whether transitioning objects to a cheaper storage class with a
/// lifecycle policy costs less than keeping them where they are.
#[derive(Parser, Debug)]
#[command(name = "lifecycle-calc", author, version, about, styles=get_styles())]
pub struct Cli {
    /// Storage class objects are stored in initially
    #[arg(long, visible_alias = "ssc", value_parser = StorageClass::parse_starting)]
    pub starting_storage_class: StorageClass,

    /// Storage class objects will reside in after the lifecycle policy applies
    #[arg(long, visible_alias = "tsc", value_parser = StorageClass::parse_target)]
    pub target_storage_class: StorageClass,

    /// Total number of GB stored
    #[arg(long, visible_alias = "tsg", value_name = "GB")]
    pub total_storage_gb: f64,

    /// Number of objects that will be stored
    #[arg(long, visible_alias = "nobj", value_name = "COUNT")]
    pub number_objs: u64,

    /// GB retrieved from the target storage class each month (default: 0)
    #[arg(long, visible_alias = "drg", value_name = "GB")]
    pub data_retrieved_gb: Option<f64>,

    /// Number of days objects will be stored in the initial storage class
    #[arg(long, visible_alias = "iscd", value_name = "DAYS")]
    pub initial_storage_class_days: u32,

    /// Number of days objects will exist before they are expired
    #[arg(long, visible_alias = "td", value_name = "DAYS")]
    pub total_days: u32,

    /// Pricing table to use instead of the builtin S3 prices (YAML or JSON)
    #[arg(long, value_name = "PATH")]
    pub pricing: Option<PathBuf>,

    /// Output format: text (default), json or table
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress log output to stderr (logs still written to file)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the calculator results
#[derive(Debug, Clone, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Print a plain-text summary
    Text,
    /// Output results as JSON
    Json,
    /// Display the cost breakdown in an interactive table (TUI)
    Table,
}

/// Set color and variants for help description
///
/// Thanks to [Praveen Perera](https://stackoverflow.com/a/76916424)
fn get_styles() -> clap::builder::Styles {
    let heading = anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)));
    let failure = anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red)));

    clap::builder::Styles::styled()
        .usage(heading)
        .header(heading)
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(failure)
        .error(failure)
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}
