/// Revenue and platform-fee arithmetic
///
/// All money is integer KRW. The platform keeps a flat 20% of gross; the
/// instructor receives the rest. The arithmetic lives here and only here so
/// dashboards, admin stats and payout views cannot drift apart.
///
/// # Example
///
/// ```
/// use lvup_shared::revenue::{platform_fee, net_revenue};
///
/// assert_eq!(platform_fee(50_000), 10_000);
/// assert_eq!(net_revenue(50_000), 40_000);
/// ```

use serde::Serialize;

/// Platform fee as a percentage of gross
pub const PLATFORM_FEE_PERCENT: i64 = 20;

/// Fee on a gross amount: `amount * 20 / 100`
///
/// Integer division truncates toward zero, so the fee on amounts that are
/// not a multiple of 5 rounds down in the instructor's favor.
pub fn platform_fee(amount: i64) -> i64 {
    amount * PLATFORM_FEE_PERCENT / 100
}

/// Instructor's share of a gross amount
pub fn net_revenue(amount: i64) -> i64 {
    amount - platform_fee(amount)
}

/// Gross/fee/net totals over a set of amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RevenueSummary {
    /// Number of paid orders (or priced enrollments) included
    pub order_count: i64,

    /// Sum of gross amounts
    pub gross: i64,

    /// Platform's cut of the gross
    pub fee: i64,

    /// Instructor's share
    pub net: i64,
}

impl RevenueSummary {
    /// Sums a list of paid-order amounts
    ///
    /// The fee is computed on the summed gross, not per order, matching how
    /// payouts are settled.
    pub fn from_amounts(amounts: &[i64]) -> Self {
        let gross: i64 = amounts.iter().sum();
        let fee = platform_fee(gross);

        Self {
            order_count: amounts.len() as i64,
            gross,
            fee,
            net: gross - fee,
        }
    }

    /// Estimates revenue from course price × enrollment count pairs
    ///
    /// Used where order rows are not available (e.g. legacy courses sold
    /// before orders were recorded).
    pub fn from_course_sales(sales: &[(i64, i64)]) -> Self {
        let gross: i64 = sales
            .iter()
            .map(|(price, enrollments)| price * enrollments)
            .sum();
        let count: i64 = sales.iter().map(|(_, enrollments)| enrollments).sum();
        let fee = platform_fee(gross);

        Self {
            order_count: count,
            gross,
            fee,
            net: gross - fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_and_net() {
        assert_eq!(platform_fee(50_000), 10_000);
        assert_eq!(net_revenue(50_000), 40_000);

        assert_eq!(platform_fee(0), 0);
        assert_eq!(net_revenue(0), 0);
    }

    #[test]
    fn test_fee_truncates() {
        // 20% of 99 is 19.8; integer division keeps 19 for the platform
        assert_eq!(platform_fee(99), 19);
        assert_eq!(net_revenue(99), 80);
    }

    #[test]
    fn test_summary_from_amounts() {
        let summary = RevenueSummary::from_amounts(&[50_000, 30_000, 20_000]);

        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.gross, 100_000);
        assert_eq!(summary.fee, 20_000);
        assert_eq!(summary.net, 80_000);
    }

    #[test]
    fn test_summary_empty() {
        let summary = RevenueSummary::from_amounts(&[]);
        assert_eq!(summary, RevenueSummary::default());
    }

    #[test]
    fn test_summary_from_course_sales() {
        // Two courses: 50k × 10 students, 30k × 4 students
        let summary = RevenueSummary::from_course_sales(&[(50_000, 10), (30_000, 4)]);

        assert_eq!(summary.order_count, 14);
        assert_eq!(summary.gross, 620_000);
        assert_eq!(summary.fee, 124_000);
        assert_eq!(summary.net, 496_000);
    }

    #[test]
    fn test_gross_always_splits_exactly() {
        for gross in [1, 7, 99, 12_345, 50_000, 1_000_000] {
            assert_eq!(platform_fee(gross) + net_revenue(gross), gross);
        }
    }
}
