//! The remote expense store: the Finora backend and the boundary that
//! normalizes what it sends.

mod client;
mod error;
pub(crate) mod validate;
pub(crate) mod wire;

pub(crate) use client::HttpStore;
pub(crate) use error::ApiError;
pub(crate) use validate::{Credentials, Registration};

use rust_decimal::Decimal;

use crate::models::{BudgetSummary, ExpenseDraft, ExpenseRecord, Profile};
use crate::session::Session;

/// Operations the client needs from the backend.
///
/// Implementations must normalize responses: lists always come back as plain
/// sequences and records carry the canonical `id`.
pub(crate) trait ExpenseStore {
    fn login(&self, credentials: &Credentials) -> Result<Session, ApiError>;
    fn register(&self, registration: &Registration) -> Result<(), ApiError>;
    fn profile(&self, session: &Session) -> Result<Profile, ApiError>;
    fn list_expenses(&self, session: &Session) -> Result<Vec<ExpenseRecord>, ApiError>;
    fn create_expense(
        &self,
        session: &Session,
        draft: &ExpenseDraft,
    ) -> Result<ExpenseRecord, ApiError>;
    fn delete_expense(&self, session: &Session, id: &str) -> Result<(), ApiError>;
    fn summary(&self, session: &Session) -> Result<BudgetSummary, ApiError>;
    fn set_limit(&self, session: &Session, limit: Decimal) -> Result<(), ApiError>;
}
