use std::fmt;
use std::path::PathBuf;

use log::{debug, warn};

use crate::lib::calculator::Scenario;
use crate::lib::cli::{Cli, OutputFormat};
use crate::lib::pricing::PricingTable;
use crate::Result;

/// Where the pricing table came from
#[derive(Clone, Debug, PartialEq)]
pub enum PricingSource {
    /// Table compiled into the binary
    Builtin,
    /// Table loaded from a file
    File(PathBuf),
}

impl fmt::Display for PricingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingSource::Builtin => write!(f, "builtin"),
            PricingSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub starting_tier: String,
    pub target_tier: String,
    pub scenario: Scenario,
    pub pricing: PricingTable,
    pub pricing_source: PricingSource,
    pub output: OutputFormat,
}

impl Config {
    pub fn new(
        starting_tier: String,
        target_tier: String,
        scenario: Scenario,
        pricing: PricingTable,
        pricing_source: PricingSource,
        output: OutputFormat,
    ) -> Self {
        Self {
            starting_tier,
            target_tier,
            scenario,
            pricing,
            pricing_source,
            output,
        }
    }

    /// Resolve the pricing table and scenario from parsed arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (pricing, pricing_source) = match &cli.pricing {
            Some(path) => (
                PricingTable::from_file(path)?,
                PricingSource::File(path.clone()),
            ),
            None => {
                debug!("Using builtin pricing table");
                (PricingTable::default(), PricingSource::Builtin)
            }
        };

        if cli.starting_storage_class == cli.target_storage_class {
            warn!(
                "Starting and target storage class are both '{}'; the policy only adds transition and retrieval costs",
                cli.starting_storage_class
            );
        }

        let scenario = Scenario {
            total_gb: cli.total_storage_gb,
            object_count: cli.number_objs,
            retrieved_gb: cli.data_retrieved_gb.unwrap_or(0.0),
            initial_days: cli.initial_storage_class_days,
            total_days: cli.total_days,
        };
        scenario.validate()?;

        Ok(Self::new(
            cli.starting_storage_class.to_string(),
            cli.target_storage_class.to_string(),
            scenario,
            pricing,
            pricing_source,
            cli.output.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib::calculator::{Calculator, Recommendation};
    use crate::{CalculatorError, ConfigError};
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lifecycle-calc").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_from_cli_defaults_to_builtin_pricing() {
        let cli = parse(&[
            "--ssc", "standard", "--tsc", "glacier", "--tsg", "1000", "--nobj", "1000000",
            "--iscd", "30", "--td", "90",
        ]);
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.pricing_source, PricingSource::Builtin);
        assert_eq!(config.starting_tier, "standard");
        assert_eq!(config.target_tier, "glacier");
        assert_eq!(config.scenario.retrieved_gb, 0.0);
        assert_eq!(config.scenario.target_days(), 60);
    }

    #[test]
    fn test_from_cli_rejects_backwards_durations() {
        let cli = parse(&[
            "--ssc", "standard", "--tsc", "glacier", "--tsg", "1", "--nobj", "1", "--iscd",
            "100", "--td", "30",
        ]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CalculatorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_cli_accepts_same_class() {
        let cli = parse(&[
            "--ssc", "standard_ia", "--tsc", "standard_ia", "--tsg", "1", "--nobj", "1000",
            "--iscd", "1", "--td", "30",
        ]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.starting_tier, config.target_tier);

        let result = Calculator::new(config.pricing)
            .compare_policy(&config.starting_tier, &config.target_tier, &config.scenario)
            .unwrap();
        assert!(result.with_policy > result.baseline);
        assert_eq!(result.cheaper, Recommendation::Baseline);
    }

    #[test]
    fn test_from_cli_reports_missing_pricing_file() {
        let cli = parse(&[
            "--ssc", "standard", "--tsc", "glacier", "--tsg", "1", "--nobj", "1", "--iscd", "1",
            "--td", "30", "--pricing", "/nonexistent/pricing.yaml",
        ]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CalculatorError::Config(ConfigError::FileError(_)))
        ));
    }
}
