use rust_decimal::Decimal;

use super::Category;

/// Label used when a record arrives without a category.
pub const FALLBACK_CATEGORY: &str = "Other";

/// An expense as held by the client. The backend owns the record; this is the
/// locally cached copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Server-assigned identifier, normalized from either `_id` or `id`.
    pub id: Option<String>,
    pub title: String,
    pub amount: Decimal,
    /// Free text as returned by the server; may be empty.
    pub category: String,
}

impl ExpenseRecord {
    /// The category used for grouping and display.
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            FALLBACK_CATEGORY
        } else {
            &self.category
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
}

/// A validated expense waiting to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
}
