use std::io::Write;

use serde::Serialize;

use crate::lib::calculator::{PolicyComparison, Scenario};
use crate::lib::config::PricingSource;
use crate::lib::duration::{MonthBreakdown, month_breakdown};
use crate::Result;

/// Top-level output structure containing metadata and the comparison
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorOutput {
    pub metadata: OutputMetadata,
    pub comparison: PolicyComparison,
}

/// Metadata about how the comparison was produced
#[derive(Debug, Clone, Serialize)]
pub struct OutputMetadata {
    pub timestamp: String,
    pub pricing_source: String,
    pub scenario: Scenario,
    pub initial_period: MonthBreakdown,
    pub target_period: MonthBreakdown,
}

impl CalculatorOutput {
    /// Create a new CalculatorOutput
    pub fn new(
        scenario: Scenario,
        pricing_source: &PricingSource,
        comparison: PolicyComparison,
    ) -> Self {
        Self {
            metadata: OutputMetadata {
                timestamp: chrono::Utc::now().to_rfc3339(),
                pricing_source: pricing_source.to_string(),
                initial_period: month_breakdown(f64::from(scenario.initial_days)),
                target_period: month_breakdown(f64::from(scenario.target_days())),
                scenario,
            },
            comparison,
        }
    }

    /// Write the plain-text summary
    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        let c = &self.comparison;
        let initial = &self.metadata.initial_period;
        let target = &self.metadata.target_period;

        writeln!(
            out,
            "Months in {}: {} whole + {:.4} partial",
            c.starting_tier, initial.whole_months, initial.fractional_month
        )?;
        writeln!(
            out,
            "Months in {}: {} whole + {:.4} partial",
            c.target_tier, target.whole_months, target.fractional_month
        )?;
        writeln!(out)?;
        writeln!(out, "  Initial storage:  {:>14.6}", c.breakdown.initial_storage)?;
        writeln!(out, "  Target storage:   {:>14.6}", c.breakdown.target_storage)?;
        writeln!(out, "  Transition:       {:>14.6}", c.breakdown.transition)?;
        writeln!(out, "  Retrieval:        {:>14.6}", c.breakdown.retrieval)?;
        writeln!(out)?;
        writeln!(
            out,
            "Cost with lifecycle policy in multiple storage classes: {:.6}",
            c.with_policy
        )?;
        writeln!(out, "Cost in current storage class: {:.6}", c.baseline)?;
        writeln!(out)?;
        writeln!(out, "{}", c.cheaper.message())?;
        Ok(())
    }

    /// Write the comparison as pretty-printed JSON
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}
