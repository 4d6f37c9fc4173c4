//! S3 Lifecycle Policy Calculator Library
//!
//! This library estimates storage, transition and retrieval costs for objects
//! held in S3 storage classes and compares keeping them in one class against
//! transitioning them with a lifecycle policy.

pub mod lib {
    pub mod calculator;
    pub mod cli;
    pub mod config;
    pub mod duration;
    pub mod error;
    pub mod logger;
    pub mod output;
    pub mod pricing;
    pub mod storage_class;
    pub mod tui;
}

// Re-export commonly used types at the root level for convenience
pub use lib::calculator::{
    Calculator, CostBreakdown, Durations, PolicyComparison, Recommendation, Scenario,
};
pub use lib::cli::{Cli, OutputFormat};
pub use lib::config::{Config, PricingSource};
pub use lib::duration::{DAYS_PER_MONTH, MonthBreakdown, month_breakdown, months_from_days};
pub use lib::error::{CalculatorError, ConfigError, Result};
pub use lib::logger::init_logger;
pub use lib::output::{CalculatorOutput, OutputMetadata};
pub use lib::pricing::{PricingTable, Tier, TransitionPricing};
pub use lib::storage_class::StorageClass;
pub use lib::tui::display_cost_table;
