use rust_decimal::Decimal;

/// Spending total and monthly limit as reported by the backend.
///
/// `limit == 0` means no limit has been set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BudgetSummary {
    pub total_spent: Decimal,
    pub limit: Decimal,
}

impl BudgetSummary {
    pub fn has_limit(&self) -> bool {
        self.limit > Decimal::ZERO
    }
}
