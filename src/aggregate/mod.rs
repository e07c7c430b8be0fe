//! Derived figures for the dashboard: the per-category breakdown of the
//! cached expense list and how much of the monthly limit has been used.
//!
//! Everything here is a pure function of its input.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::ExpenseRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) total: Decimal,
}

/// Sum amounts per category. Records without a category count as "Other".
/// Totals saturate at the bounds of `Decimal` instead of overflowing.
///
/// Output follows first-seen category order; callers must not rely on it.
pub(crate) fn group_by_category(records: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for record in records {
        let label = record.category_label();
        match totals.iter_mut().find(|t| t.category == label) {
            Some(entry) => entry.total = entry.total.saturating_add(record.amount),
            None => totals.push(CategoryTotal {
                category: label.to_string(),
                total: record.amount,
            }),
        }
    }
    totals
}

/// How much of the monthly limit is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetUsage {
    /// Rounded and clamped to `0..=100`.
    pub(crate) percentage: u8,
    /// Strictly over the limit; independent of the clamp on `percentage`.
    pub(crate) over_limit: bool,
    /// No limit is set, so nothing should be shown.
    pub(crate) suppressed: bool,
}

impl BudgetUsage {
    pub(crate) const SUPPRESSED: Self = Self {
        percentage: 0,
        over_limit: false,
        suppressed: true,
    };
}

pub(crate) fn compute_usage(total_spent: Decimal, limit: Decimal) -> BudgetUsage {
    if limit <= Decimal::ZERO {
        return BudgetUsage::SUPPRESSED;
    }

    BudgetUsage {
        percentage: percent_of(total_spent, limit),
        over_limit: total_spent > limit,
        suppressed: false,
    }
}

/// Share of the breakdown total held by each entry, index-aligned with
/// `totals`. All zeros when there is nothing to share.
pub(crate) fn category_shares(totals: &[CategoryTotal]) -> Vec<u8> {
    let sum = totals
        .iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.total));
    if sum <= Decimal::ZERO {
        return vec![0; totals.len()];
    }
    totals.iter().map(|t| percent_of(t.total, sum)).collect()
}

/// `part / whole * 100`, clamped to `0..=100` and rounded half away from zero.
/// `whole` must be positive.
fn percent_of(part: Decimal, whole: Decimal) -> u8 {
    let raw = part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        // Only overflows for enormous ratios; the sign decides which bound.
        .unwrap_or(if part > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        });

    raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
}
