mod budget;
mod category;
mod expense;
mod profile;

pub use budget::BudgetSummary;
pub use category::Category;
pub use expense::{ExpenseDraft, ExpenseRecord, FALLBACK_CATEGORY};
pub use profile::Profile;

#[cfg(test)]
mod tests;
