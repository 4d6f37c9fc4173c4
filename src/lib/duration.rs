use serde::Serialize;

/// Average number of days in a month over a 365 day year
pub const DAYS_PER_MONTH: f64 = 365.0 / 12.0;

/// Convert a number of days into (possibly fractional) billing months
///
/// Negative input is not rejected here and yields a negative result; callers
/// validate their durations before converting them.
pub fn months_from_days(days: f64) -> f64 {
    days / DAYS_PER_MONTH
}

/// A duration split into whole months and the fraction of the month left over
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthBreakdown {
    pub whole_months: u32,
    pub fractional_month: f64,
}

impl MonthBreakdown {
    pub fn total(&self) -> f64 {
        f64::from(self.whole_months) + self.fractional_month
    }
}

/// Split `days` into whole months plus a remainder
///
/// A duration of exactly N months reports N - 1 whole months and a full
/// fractional month, so the fraction is always in `(0, 1]` for positive input.
pub fn month_breakdown(days: f64) -> MonthBreakdown {
    if days <= DAYS_PER_MONTH {
        return MonthBreakdown {
            whole_months: 0,
            fractional_month: months_from_days(days),
        };
    }

    let mut whole = (days / DAYS_PER_MONTH).floor();
    let mut remainder = days - whole * DAYS_PER_MONTH;
    if remainder <= 0.0 {
        whole -= 1.0;
        remainder += DAYS_PER_MONTH;
    }

    MonthBreakdown {
        whole_months: whole as u32,
        fractional_month: months_from_days(remainder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_per_month_constant() {
        assert_eq!(DAYS_PER_MONTH, 30.416666666666668);
    }

    #[test]
    fn test_zero_days_is_zero_months() {
        assert_eq!(months_from_days(0.0), 0.0);
    }

    #[test]
    fn test_months_from_days_is_direct_division() {
        for days in [1.0, 14.0, 30.0, 90.0, 365.0, 3650.0] {
            assert!((months_from_days(days) - days / 30.416666666666668).abs() < f64::EPSILON);
        }
        assert!((months_from_days(365.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_days_pass_through() {
        assert!(months_from_days(-30.0) < 0.0);
    }

    #[test]
    fn test_breakdown_under_one_month() {
        let breakdown = month_breakdown(14.0);
        assert_eq!(breakdown.whole_months, 0);
        assert!((breakdown.fractional_month - 14.0 / DAYS_PER_MONTH).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_over_several_months() {
        let breakdown = month_breakdown(100.0);
        assert_eq!(breakdown.whole_months, 3);
        let expected = (100.0 - 3.0 * DAYS_PER_MONTH) / DAYS_PER_MONTH;
        assert!((breakdown.fractional_month - expected).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_on_exact_month_boundary() {
        let breakdown = month_breakdown(365.0);
        assert_eq!(breakdown.whole_months, 11);
        assert!((breakdown.fractional_month - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_total_matches_division() {
        for days in [0.0, 1.0, 30.0, 31.0, 90.0, 364.5, 1000.0] {
            let breakdown = month_breakdown(days);
            assert!((breakdown.total() - months_from_days(days)).abs() < 1e-9);
        }
    }
}
