use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::lib::error::{CalculatorError, ConfigError, Result};

/// Pricing for a single storage tier
///
/// Tiers without transition or retrieval pricing are primary tiers: objects
/// can live in them but cannot be transitioned into or retrieved from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tier {
    /// Storage price per GB-month
    pub price_per_gb: f64,

    /// Price per transition batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_price_per_batch: Option<f64>,

    /// Objects per billable transition batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u64>,

    /// Retrieval price per GB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_price_per_gb: Option<f64>,

    /// Archival tiers bill per-object metadata on top of the stored bytes
    #[serde(default)]
    pub archival: bool,

    /// Minimum number of days an object is billed for once stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_storage_days: Option<u32>,
}

/// Transition pricing of a tier that can be transitioned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPricing {
    pub price_per_batch: f64,
    pub batch_size: u64,
}

impl Tier {
    /// A primary tier with storage pricing only
    pub fn primary(price_per_gb: f64) -> Self {
        Self {
            price_per_gb,
            transition_price_per_batch: None,
            batch_size: None,
            retrieval_price_per_gb: None,
            archival: false,
            minimum_storage_days: None,
        }
    }

    /// A tier objects can be transitioned into and retrieved from
    pub fn transitional(
        price_per_gb: f64,
        transition_price_per_batch: f64,
        batch_size: u64,
        retrieval_price_per_gb: f64,
    ) -> Self {
        Self {
            price_per_gb,
            transition_price_per_batch: Some(transition_price_per_batch),
            batch_size: Some(batch_size),
            retrieval_price_per_gb: Some(retrieval_price_per_gb),
            archival: false,
            minimum_storage_days: None,
        }
    }

    /// Mark the tier as archival with a minimum billed duration
    pub fn with_archival(mut self, minimum_storage_days: Option<u32>) -> Self {
        self.archival = true;
        self.minimum_storage_days = minimum_storage_days;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.transition_price_per_batch.is_none()
            && self.batch_size.is_none()
            && self.retrieval_price_per_gb.is_none()
    }

    /// Transition pricing, or `UnknownTier` if this tier cannot be a transition target
    pub fn transition_pricing(&self, name: &str) -> Result<TransitionPricing> {
        match (self.transition_price_per_batch, self.batch_size) {
            (Some(price_per_batch), Some(batch_size)) => Ok(TransitionPricing {
                price_per_batch,
                batch_size,
            }),
            _ => Err(CalculatorError::UnknownTier(format!(
                "'{}' has no transition pricing and cannot be a transition target",
                name
            ))),
        }
    }

    /// Retrieval price, or `UnknownTier` if data cannot be retrieved from this tier
    pub fn retrieval_price(&self, name: &str) -> Result<f64> {
        self.retrieval_price_per_gb.ok_or_else(|| {
            CalculatorError::UnknownTier(format!(
                "'{}' has no retrieval pricing and cannot be a retrieval source",
                name
            ))
        })
    }
}

/// Immutable mapping from tier name to pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingTable {
    /// Tier whose price bills the metadata archival tiers keep outside the archive
    pub reference_tier: String,
    pub tiers: BTreeMap<String, Tier>,
}

impl Default for PricingTable {
    /// S3 list prices (us-east-1, USD)
    fn default() -> Self {
        let tiers = BTreeMap::from([
            ("standard".to_string(), Tier::primary(0.023)),
            (
                "standard_ia".to_string(),
                Tier::transitional(0.0125, 0.01, 1000, 0.01),
            ),
            (
                "standard_ia_one_zone".to_string(),
                Tier::transitional(0.01, 0.01, 1000, 0.01),
            ),
            (
                "glacier".to_string(),
                Tier::transitional(0.004, 0.05, 1000, 0.01).with_archival(Some(90)),
            ),
            (
                "glacier_deep_archive".to_string(),
                Tier::transitional(0.00099, 0.05, 1000, 0.02),
            ),
        ]);

        Self {
            reference_tier: "standard".to_string(),
            tiers,
        }
    }
}

impl PricingTable {
    /// Build a table from parts, validating it
    pub fn new(reference_tier: impl Into<String>, tiers: BTreeMap<String, Tier>) -> Result<Self> {
        let table = Self {
            reference_tier: reference_tier.into(),
            tiers,
        };
        table.validate()?;
        Ok(table)
    }

    /// Load a pricing table from a YAML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading pricing table from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let table = Self::from_yaml_str(&content)?;
        info!(
            "Loaded {} tiers from {}",
            table.tiers.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse a pricing table document; JSON is accepted as a subset of YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let table: PricingTable = serde_yaml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Look up a tier by name
    pub fn tier(&self, name: &str) -> Result<&Tier> {
        self.tiers.get(name).ok_or_else(|| {
            CalculatorError::UnknownTier(format!(
                "'{}' is not in the pricing table (known tiers: {})",
                name,
                self.tier_names().join(", ")
            ))
        })
    }

    /// The tier billing archival metadata
    pub fn reference(&self) -> Result<&Tier> {
        self.tier(&self.reference_tier)
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.keys().map(|k| k.as_str()).collect()
    }

    /// Reject tables that would produce meaningless costs
    pub fn validate(&self) -> Result<()> {
        if !self.tiers.contains_key(&self.reference_tier) {
            return Err(ConfigError::InvalidValue(format!(
                "reference tier '{}' is not defined in the pricing table",
                self.reference_tier
            ))
            .into());
        }

        for (name, tier) in &self.tiers {
            check_price(name, "price_per_gb", Some(tier.price_per_gb))?;
            check_price(
                name,
                "transition_price_per_batch",
                tier.transition_price_per_batch,
            )?;
            check_price(name, "retrieval_price_per_gb", tier.retrieval_price_per_gb)?;

            if tier.batch_size == Some(0) {
                return Err(ConfigError::InvalidValue(format!(
                    "tier '{}' has a batch_size of 0",
                    name
                ))
                .into());
            }

            if tier.transition_price_per_batch.is_some() != tier.batch_size.is_some() {
                return Err(ConfigError::InvalidValue(format!(
                    "tier '{}' must set both transition_price_per_batch and batch_size, or neither",
                    name
                ))
                .into());
            }
        }

        Ok(())
    }
}

fn check_price(tier: &str, field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ConfigError::InvalidValue(format!(
            "tier '{}' has an invalid {}: {}",
            tier, field, v
        ))
        .into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = PricingTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.reference_tier, "standard");
        assert_eq!(table.tiers.len(), 5);
    }

    #[test]
    fn test_only_glacier_is_archival_by_default() {
        let table = PricingTable::default();
        let archival: Vec<&str> = table
            .tiers
            .iter()
            .filter(|(_, t)| t.archival)
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(archival, vec!["glacier"]);
        assert_eq!(table.tiers["glacier"].minimum_storage_days, Some(90));
    }

    #[test]
    fn test_standard_is_primary() {
        let table = PricingTable::default();
        let standard = table.tier("standard").unwrap();
        assert!(standard.is_primary());
        assert!(matches!(
            standard.transition_pricing("standard"),
            Err(CalculatorError::UnknownTier(_))
        ));
        assert!(matches!(
            standard.retrieval_price("standard"),
            Err(CalculatorError::UnknownTier(_))
        ));
    }

    #[test]
    fn test_unknown_tier_lookup() {
        let table = PricingTable::default();
        let err = table.tier("nonexistent").unwrap_err();
        assert!(matches!(err, CalculatorError::UnknownTier(ref msg) if msg.contains("nonexistent")));
    }

    #[test]
    fn test_parse_yaml_with_optional_fields() {
        let yaml = r#"
reference_tier: hot
tiers:
  hot:
    price_per_gb: 0.02
  cold:
    price_per_gb: 0.001
    transition_price_per_batch: 0.05
    batch_size: 1000
    retrieval_price_per_gb: 0.03
    archival: true
    minimum_storage_days: 180
"#;
        let table = PricingTable::from_yaml_str(yaml).unwrap();
        let cold = table.tier("cold").unwrap();
        assert!(cold.archival);
        assert_eq!(cold.minimum_storage_days, Some(180));
        assert!(table.tier("hot").unwrap().is_primary());
    }

    #[test]
    fn test_parse_json_document() {
        let json = r#"{"reference_tier": "hot", "tiers": {"hot": {"price_per_gb": 0.02}}}"#;
        let table = PricingTable::from_yaml_str(json).unwrap();
        assert_eq!(table.tier("hot").unwrap().price_per_gb, 0.02);
    }

    #[test]
    fn test_rejects_missing_reference_tier() {
        let json = r#"{"reference_tier": "standard", "tiers": {"hot": {"price_per_gb": 0.02}}}"#;
        assert!(matches!(
            PricingTable::from_yaml_str(json),
            Err(CalculatorError::Config(ConfigError::InvalidValue(_)))
        ));
    }

    #[test]
    fn test_rejects_negative_price() {
        let tiers = BTreeMap::from([("hot".to_string(), Tier::primary(-1.0))]);
        assert!(PricingTable::new("hot", tiers).is_err());
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let tiers = BTreeMap::from([
            ("hot".to_string(), Tier::primary(0.02)),
            ("cold".to_string(), Tier::transitional(0.004, 0.05, 0, 0.01)),
        ]);
        assert!(PricingTable::new("hot", tiers).is_err());
    }

    #[test]
    fn test_rejects_half_specified_transition_pricing() {
        let mut cold = Tier::primary(0.004);
        cold.transition_price_per_batch = Some(0.05);
        let tiers = BTreeMap::from([
            ("hot".to_string(), Tier::primary(0.02)),
            ("cold".to_string(), cold),
        ]);
        assert!(PricingTable::new("hot", tiers).is_err());
    }

    #[test]
    fn test_rejects_unknown_tier_field() {
        let yaml = r#"
reference_tier: standard
tiers:
  standard:
    price_per_gb: 0.023
  glacier:
    price_per_gb: 0.004
    transition_price_per_batch: 0.05
    batch_size: 1000
    retrieval_price_per_gb: 0.01
    archivel: true
    minimum_storage_day: 90
"#;
        let err = PricingTable::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, CalculatorError::Parse(ref msg) if msg.contains("archivel")));
    }

    #[test]
    fn test_rejects_legacy_price_keys() {
        let yaml = r#"
reference_tier: standard
tiers:
  standard:
    price_per_gb: 0.023
  glacier:
    price_per_gb: 0.004
    transition_cost: 0.05
    items_per_transition_chunk: 1000
    data_retrieval_cost_per_gb: 0.01
"#;
        assert!(matches!(
            PricingTable::from_yaml_str(yaml),
            Err(CalculatorError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_table_field() {
        let json = r#"{"reference_tier": "hot", "currency": "USD", "tiers": {"hot": {"price_per_gb": 0.02}}}"#;
        assert!(matches!(
            PricingTable::from_yaml_str(json),
            Err(CalculatorError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        assert!(matches!(
            PricingTable::from_yaml_str("tiers: [unclosed"),
            Err(CalculatorError::Parse(_))
        ));
    }
}
