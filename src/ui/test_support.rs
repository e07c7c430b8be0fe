#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};

use rust_decimal::Decimal;
use tempfile::TempDir;

use super::app::App;
use super::form;
use crate::api::{ApiError, Credentials, ExpenseStore, Registration};
use crate::models::{BudgetSummary, Category, ExpenseDraft, ExpenseRecord, Profile};
use crate::run::Services;
use crate::session::{Session, SessionStore};

// ── Fake backend ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub(crate) enum Failure {
    Remote(Option<&'static str>),
    Unauthorized,
    Transport,
}

impl Failure {
    fn to_error(self) -> ApiError {
        match self {
            Self::Remote(message) => ApiError::Remote {
                status: 400,
                message: message.map(String::from),
            },
            Self::Unauthorized => ApiError::Unauthorized { message: None },
            Self::Transport => ApiError::Transport("connection refused".into()),
        }
    }
}

/// In-memory store that records every call and fails on demand.
#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) expenses: RefCell<Vec<ExpenseRecord>>,
    pub(crate) limit: Cell<Decimal>,
    next_id: Cell<u32>,
    calls: RefCell<Vec<&'static str>>,
    failure: Cell<Option<Failure>>,
}

impl FakeStore {
    fn check(&self, call: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failure.get() {
            Some(f) => Err(f.to_error()),
            None => Ok(()),
        }
    }

    pub(crate) fn seed(&self, id: &str, title: &str, amount: Decimal, category: &str) {
        self.expenses.borrow_mut().push(ExpenseRecord {
            id: Some(id.into()),
            title: title.into(),
            amount,
            category: category.into(),
        });
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub(crate) fn fail_with(&self, failure: Failure) {
        self.failure.set(Some(failure));
    }
}

impl ExpenseStore for FakeStore {
    fn login(&self, _credentials: &Credentials) -> Result<Session, ApiError> {
        self.check("login")?;
        Ok(Session::new("fake-token"))
    }

    fn register(&self, _registration: &Registration) -> Result<(), ApiError> {
        self.check("register")
    }

    fn profile(&self, _session: &Session) -> Result<Profile, ApiError> {
        self.check("profile")?;
        Ok(Profile {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            monthly_limit: self.limit.get(),
        })
    }

    fn list_expenses(&self, _session: &Session) -> Result<Vec<ExpenseRecord>, ApiError> {
        self.check("list_expenses")?;
        Ok(self.expenses.borrow().clone())
    }

    fn create_expense(
        &self,
        _session: &Session,
        draft: &ExpenseDraft,
    ) -> Result<ExpenseRecord, ApiError> {
        self.check("create_expense")?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let record = ExpenseRecord {
            id: Some(format!("new-{id}")),
            title: draft.title.clone(),
            amount: draft.amount,
            category: draft.category.as_str().into(),
        };
        self.expenses.borrow_mut().insert(0, record.clone());
        Ok(record)
    }

    fn delete_expense(&self, _session: &Session, id: &str) -> Result<(), ApiError> {
        self.check("delete_expense")?;
        self.expenses.borrow_mut().retain(|e| !e.has_id(id));
        Ok(())
    }

    fn summary(&self, _session: &Session) -> Result<BudgetSummary, ApiError> {
        self.check("summary")?;
        Ok(BudgetSummary {
            total_spent: self.expenses.borrow().iter().map(|e| e.amount).sum(),
            limit: self.limit.get(),
        })
    }

    fn set_limit(&self, _session: &Session, limit: Decimal) -> Result<(), ApiError> {
        self.check("set_limit")?;
        self.limit.set(limit);
        Ok(())
    }
}

pub(crate) struct Harness {
    pub(crate) store: FakeStore,
    pub(crate) sessions: SessionStore,
    _dir: TempDir,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        Self {
            store: FakeStore::default(),
            sessions: SessionStore::in_dir(dir.path()),
            _dir: dir,
        }
    }

    pub(crate) fn services(&self) -> Services<'_> {
        Services {
            store: &self.store,
            sessions: &self.sessions,
        }
    }

    pub(crate) fn logged_in_app(&self) -> App {
        let session = Session::new("stored-token");
        self.sessions.save(&session).unwrap();
        App::new(Some(session))
    }
}

pub(crate) fn fill_expense(app: &mut App, title: &str, amount: &str, category: Category) {
    app.expense_form.set(form::EXPENSE_TITLE, title);
    app.expense_form.set(form::EXPENSE_AMOUNT, amount);
    app.expense_form.set(form::EXPENSE_CATEGORY, category.as_str());
}
