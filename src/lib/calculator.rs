use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::lib::duration::{DAYS_PER_MONTH, months_from_days};
use crate::lib::error::{CalculatorError, Result};
use crate::lib::pricing::{PricingTable, Tier};

/// Metadata an archival tier keeps per object in the reference tier (8KB, in GB)
pub const REFERENCE_METADATA_GB_PER_OBJECT: f64 = 0.000008;

/// Metadata an archival tier keeps per object in the archive itself (32KB, in GB)
pub const ARCHIVE_METADATA_GB_PER_OBJECT: f64 = 0.000032;

/// Size, population and lifetime of the objects being priced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Total GB stored
    pub total_gb: f64,
    /// Number of objects stored
    pub object_count: u64,
    /// GB retrieved from the target tier each month
    #[serde(default)]
    pub retrieved_gb: f64,
    /// Days objects spend in the initial tier before transitioning
    pub initial_days: u32,
    /// Days objects exist before they expire
    pub total_days: u32,
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        if !self.total_gb.is_finite() || self.total_gb < 0.0 {
            return Err(CalculatorError::InvalidInput(format!(
                "total storage must be a non-negative number of GB, got {}",
                self.total_gb
            )));
        }
        if !self.retrieved_gb.is_finite() || self.retrieved_gb < 0.0 {
            return Err(CalculatorError::InvalidInput(format!(
                "retrieved data must be a non-negative number of GB, got {}",
                self.retrieved_gb
            )));
        }
        if self.initial_days > self.total_days {
            return Err(CalculatorError::InvalidInput(format!(
                "initial storage class days ({}) exceed total days ({})",
                self.initial_days, self.total_days
            )));
        }
        Ok(())
    }

    /// Days spent in the target tier after transitioning
    pub fn target_days(&self) -> u32 {
        self.total_days.saturating_sub(self.initial_days)
    }
}

/// Which scenario costs less
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Keep objects in their current tier
    Baseline,
    /// Adopt the lifecycle policy
    WithPolicy,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Baseline => "baseline",
            Recommendation::WithPolicy => "with_policy",
        }
    }

    /// Human-readable verdict
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Baseline => {
                "Retaining data in current storage class will be more effective"
            }
            Recommendation::WithPolicy => {
                "Implementing this lifecycle policy will be more cost effective"
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Components of the lifecycle policy cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub initial_storage: f64,
    pub target_storage: f64,
    pub transition: f64,
    pub retrieval: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.initial_storage + self.target_storage + self.transition + self.retrieval
    }
}

/// Durations used for the comparison, in months
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Durations {
    pub initial_months: f64,
    pub target_months: f64,
    pub total_months: f64,
}

/// Outcome of comparing "no migration" against "migrate"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyComparison {
    pub starting_tier: String,
    pub target_tier: String,
    /// Cost of keeping every object in the starting tier for its whole life
    pub baseline: f64,
    /// Cost with the lifecycle policy in place
    pub with_policy: f64,
    pub cheaper: Recommendation,
    pub breakdown: CostBreakdown,
    pub durations: Durations,
}

impl PolicyComparison {
    /// Positive when the policy saves money
    pub fn savings(&self) -> f64 {
        self.baseline - self.with_policy
    }
}

/// Storage cost model over a pricing table
pub struct Calculator {
    pricing: PricingTable,
}

impl Calculator {
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }

    /// Cost of storing `total_gb` across `object_count` objects in a tier for `months`
    ///
    /// Archival tiers add per-object metadata: 8KB billed at the reference
    /// tier's price and 32KB billed at the archival tier's price. A tier with
    /// a minimum storage duration bills at least that many days once objects
    /// are stored in it at all.
    pub fn storage_cost(
        &self,
        months: f64,
        tier_name: &str,
        total_gb: f64,
        object_count: u64,
    ) -> Result<f64> {
        let tier = self.pricing.tier(tier_name)?;
        let base_cost = total_gb * tier.price_per_gb;
        let metadata_cost = self.metadata_cost(tier, object_count)?;
        let billed_months = billed_months(tier, months);

        if billed_months != months {
            debug!(
                "{} bills a minimum of {:?} days, raising {:.4} months to {:.4}",
                tier_name, tier.minimum_storage_days, months, billed_months
            );
        }

        let cost = (base_cost + metadata_cost) * billed_months;
        debug!(
            "Storage in {}: base {:.6}/month, metadata {:.6}/month, {:.4} months = {:.6}",
            tier_name, base_cost, metadata_cost, billed_months, cost
        );
        Ok(cost)
    }

    /// Monthly cost of the metadata an archival tier keeps per object
    fn metadata_cost(&self, tier: &Tier, object_count: u64) -> Result<f64> {
        if !tier.archival {
            return Ok(0.0);
        }

        let objects = object_count as f64;
        let reference = self.pricing.reference()?;
        let reference_metadata = objects * REFERENCE_METADATA_GB_PER_OBJECT * reference.price_per_gb;
        let archive_metadata = objects * ARCHIVE_METADATA_GB_PER_OBJECT * tier.price_per_gb;

        Ok(reference_metadata + archive_metadata)
    }

    /// One-time cost of transitioning `object_count` objects into a tier
    ///
    /// Partial batches are billed proportionally.
    pub fn transition_cost(&self, object_count: u64, tier_name: &str) -> Result<f64> {
        let pricing = self.pricing.tier(tier_name)?.transition_pricing(tier_name)?;
        let batches = object_count as f64 / pricing.batch_size as f64;
        let cost = batches * pricing.price_per_batch;

        debug!(
            "Transition into {}: {:.3} batches of {} = {:.6}",
            tier_name, batches, pricing.batch_size, cost
        );
        Ok(cost)
    }

    /// Cost of retrieving `retrieved_gb_per_month` from a tier every month for `months`
    pub fn retrieval_cost(
        &self,
        months: f64,
        tier_name: &str,
        retrieved_gb_per_month: f64,
    ) -> Result<f64> {
        let price = self.pricing.tier(tier_name)?.retrieval_price(tier_name)?;
        let cost = retrieved_gb_per_month * price * months;

        debug!(
            "Retrieval from {}: {} GB/month over {:.4} months = {:.6}",
            tier_name, retrieved_gb_per_month, months, cost
        );
        Ok(cost)
    }

    /// Compare keeping objects in `starting_tier` against moving them to `target_tier`
    ///
    /// The policy is only recommended when it is strictly cheaper.
    pub fn compare_policy(
        &self,
        starting_tier: &str,
        target_tier: &str,
        scenario: &Scenario,
    ) -> Result<PolicyComparison> {
        scenario.validate()?;
        self.pricing.tier(starting_tier)?;
        self.pricing.tier(target_tier)?;

        info!(
            "Comparing {} against a lifecycle policy into {} over {} days",
            starting_tier, target_tier, scenario.total_days
        );

        let durations = Durations {
            initial_months: months_from_days(f64::from(scenario.initial_days)),
            target_months: months_from_days(f64::from(scenario.target_days())),
            total_months: months_from_days(f64::from(scenario.total_days)),
        };

        let baseline = self.storage_cost(
            durations.total_months,
            starting_tier,
            scenario.total_gb,
            scenario.object_count,
        )?;

        let breakdown = CostBreakdown {
            initial_storage: self.storage_cost(
                durations.initial_months,
                starting_tier,
                scenario.total_gb,
                scenario.object_count,
            )?,
            target_storage: self.storage_cost(
                durations.target_months,
                target_tier,
                scenario.total_gb,
                scenario.object_count,
            )?,
            transition: self.transition_cost(scenario.object_count, target_tier)?,
            retrieval: self.retrieval_cost(
                durations.target_months,
                target_tier,
                scenario.retrieved_gb,
            )?,
        };
        let with_policy = breakdown.total();

        let cheaper = if baseline > with_policy {
            Recommendation::WithPolicy
        } else {
            Recommendation::Baseline
        };

        info!(
            "Baseline {:.6}, with policy {:.6}: {}",
            baseline, with_policy, cheaper
        );

        Ok(PolicyComparison {
            starting_tier: starting_tier.to_string(),
            target_tier: target_tier.to_string(),
            baseline,
            with_policy,
            cheaper,
            breakdown,
            durations,
        })
    }
}

/// Months actually billed once a tier's minimum storage duration is applied
fn billed_months(tier: &Tier, months: f64) -> f64 {
    match tier.minimum_storage_days {
        Some(minimum) if months > 0.0 && months * DAYS_PER_MONTH < f64::from(minimum) => {
            months_from_days(f64::from(minimum))
        }
        _ => months,
    }
}
