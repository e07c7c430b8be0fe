use rust_decimal::Decimal;

use super::form::{self, Form, FormKind};
use super::util::ListCursor;
use crate::aggregate::{compute_usage, group_by_category, BudgetUsage, CategoryTotal};
use crate::api::{validate, ApiError, Credentials, Registration};
use crate::models::{BudgetSummary, ExpenseDraft, ExpenseRecord, Profile};
use crate::run::Services;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Home,
    Login,
    Register,
    Dashboard,
    Profile,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Home,
            Self::Login,
            Self::Register,
            Self::Dashboard,
            Self::Profile,
        ]
    }

    pub(crate) fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard | Self::Profile)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Login => write!(f, "Login"),
            Self::Register => write!(f, "Register"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Profile => write!(f, "Profile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: String, title: String },
}

const SESSION_EXPIRED: &str = "Session expired, please log in again";

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Modal message; any key dismisses it.
    pub(crate) alert: Option<String>,
    pub(crate) session: Option<Session>,

    // Home
    pub(crate) home_index: usize,

    // Forms
    pub(crate) login_form: Form,
    pub(crate) register_form: Form,
    pub(crate) expense_form: Form,
    pub(crate) limit_form: Form,
    pub(crate) active_form: FormKind,

    // Dashboard
    pub(crate) expenses: Vec<ExpenseRecord>,
    pub(crate) expense_cursor: ListCursor,
    pub(crate) breakdown: Vec<CategoryTotal>,
    pub(crate) summary: BudgetSummary,
    pub(crate) usage: BudgetUsage,

    // Profile
    pub(crate) profile: Option<Profile>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(session: Option<Session>) -> Self {
        Self {
            running: true,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            alert: None,
            session,

            home_index: 0,

            login_form: Form::login(),
            register_form: Form::register(),
            expense_form: Form::expense(),
            limit_form: Form::limit(),
            active_form: FormKind::Login,

            expenses: Vec::new(),
            expense_cursor: ListCursor::default(),
            breakdown: Vec::new(),
            summary: BudgetSummary::default(),
            usage: BudgetUsage::SUPPRESSED,

            profile: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Open the first screen: the dashboard when a stored session exists,
    /// otherwise home.
    pub(crate) fn start(&mut self, services: &Services) {
        if self.session.is_some() {
            self.navigate(Screen::Dashboard, services);
        }
    }

    pub(crate) fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// The only place the session changes. Persists or clears the stored
    /// token; clearing also drops every piece of cached account data.
    pub(crate) fn set_session(&mut self, session: Option<Session>, services: &Services) {
        let persisted = match &session {
            Some(s) => services.sessions.save(s),
            None => services.sessions.clear(),
        };
        if let Err(e) = persisted {
            tracing::warn!("session not persisted: {e:#}");
        }
        if session.is_none() {
            self.expenses.clear();
            self.expense_cursor.top();
            self.breakdown.clear();
            self.summary = BudgetSummary::default();
            self.usage = BudgetUsage::SUPPRESSED;
            self.profile = None;
            self.pending_action = None;
        }
        self.session = session;
    }

    // ── Navigation ────────────────────────────────────────────

    pub(crate) fn navigate(&mut self, screen: Screen, services: &Services) {
        if screen.requires_session() && !self.is_logged_in() {
            self.screen = Screen::Login;
            self.active_form = FormKind::Login;
            self.set_status("Please log in first");
            return;
        }
        self.screen = screen;
        match screen {
            Screen::Home => self.home_index = 0,
            Screen::Login => self.active_form = FormKind::Login,
            Screen::Register => self.active_form = FormKind::Register,
            Screen::Dashboard => self.refresh_dashboard(services),
            Screen::Profile => self.load_profile(services),
        }
    }

    /// Entries offered on the home screen.
    pub(crate) fn home_entries(&self) -> &'static [Screen] {
        if self.is_logged_in() {
            &[Screen::Dashboard, Screen::Profile]
        } else {
            &[Screen::Login, Screen::Register]
        }
    }

    // ── Loading ───────────────────────────────────────────────

    /// Reload the expense list and the summary. Failures leave an empty
    /// state and are only logged.
    pub(crate) fn refresh_dashboard(&mut self, services: &Services) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match services.store.list_expenses(&session) {
            Ok(records) => {
                tracing::debug!(count = records.len(), "expenses loaded");
                self.expenses = records;
            }
            Err(e) => {
                // Nothing trustworthy to show; the summary is not fetched either.
                self.expenses.clear();
                self.expense_cursor.top();
                self.breakdown.clear();
                self.summary = BudgetSummary::default();
                self.usage = BudgetUsage::SUPPRESSED;
                self.load_failed(e, "expenses", services);
                return;
            }
        }
        self.clamp_selection();
        self.rebuild_breakdown();
        self.refresh_summary(services);
    }

    pub(crate) fn refresh_summary(&mut self, services: &Services) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match services.store.summary(&session) {
            Ok(summary) => self.summary = summary,
            Err(e) => {
                self.summary = BudgetSummary::default();
                self.load_failed(e, "summary", services);
            }
        }
        self.usage = compute_usage(self.summary.total_spent, self.summary.limit);
    }

    pub(crate) fn rebuild_breakdown(&mut self) {
        self.breakdown = group_by_category(&self.expenses);
    }

    pub(crate) fn load_profile(&mut self, services: &Services) {
        let Some(session) = self.session.clone() else {
            return;
        };
        match services.store.profile(&session) {
            Ok(profile) => self.profile = Some(profile),
            Err(e) => {
                self.profile = None;
                self.load_failed(e, "profile", services);
            }
        }
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn submit_login(&mut self, services: &Services) {
        let credentials = match Credentials::new(
            self.login_form.value(form::LOGIN_EMAIL),
            self.login_form.value(form::LOGIN_PASSWORD),
        ) {
            Ok(c) => c,
            Err(e) => return self.alert(e.to_string()),
        };
        match services.store.login(&credentials) {
            Ok(session) => {
                tracing::info!("logged in");
                self.set_session(Some(session), services);
                self.login_form.reset();
                self.input_mode = InputMode::Normal;
                self.navigate(Screen::Dashboard, services);
            }
            Err(e) => {
                self.login_form.clear_secrets();
                self.fail(e, "Login failed", services);
            }
        }
    }

    pub(crate) fn submit_register(&mut self, services: &Services) {
        let registration = match Registration::new(
            self.register_form.value(form::REGISTER_NAME),
            self.register_form.value(form::REGISTER_EMAIL),
            self.register_form.value(form::REGISTER_PASSWORD),
        ) {
            Ok(r) => r,
            Err(e) => return self.alert(e.to_string()),
        };
        match services.store.register(&registration) {
            Ok(()) => {
                tracing::info!("account registered");
                self.register_form.reset();
                self.input_mode = InputMode::Normal;
                self.screen = Screen::Home;
                self.home_index = 0;
                self.alert("Account created successfully!");
            }
            Err(e) => {
                self.register_form.clear_secrets();
                self.fail(e, "Registration failed", services);
            }
        }
    }

    /// Validate the expense form and add it.
    pub(crate) fn submit_expense(&mut self, services: &Services) {
        let draft = match validate::expense_draft(
            self.expense_form.value(form::EXPENSE_TITLE),
            self.expense_form.value(form::EXPENSE_AMOUNT),
            self.expense_form.category(form::EXPENSE_CATEGORY),
        ) {
            Ok(d) => d,
            Err(e) => return self.alert(e.to_string()),
        };
        if self.add_expense(&draft, services) {
            self.expense_form.reset();
            self.input_mode = InputMode::Normal;
        }
    }

    /// Create an expense remotely, put it at the top of the list and refresh
    /// the derived views. Returns whether the store accepted it.
    pub(crate) fn add_expense(&mut self, draft: &ExpenseDraft, services: &Services) -> bool {
        let Some(session) = self.require_session(services) else {
            return false;
        };
        match services.store.create_expense(&session, draft) {
            Ok(record) => {
                tracing::info!(title = %record.title, amount = %record.amount, "expense added");
                self.set_status(format!("Added: {}", record.title));
                self.expenses.insert(0, record);
                self.expense_cursor.top();
                self.rebuild_breakdown();
                self.refresh_summary(services);
                true
            }
            Err(e) => {
                self.fail(e, "Add expense failed", services);
                false
            }
        }
    }

    /// Ask for confirmation before deleting the selected expense.
    pub(crate) fn request_delete(&mut self) {
        let Some(expense) = self.expenses.get(self.expense_cursor.index) else {
            self.set_status("No expense selected");
            return;
        };
        let Some(id) = expense.id.clone() else {
            self.set_status("This expense has no id and cannot be deleted");
            return;
        };
        let title = expense.title.clone();
        self.confirm_message = format!("Delete '{title}'?");
        self.pending_action = Some(PendingAction::DeleteExpense { id, title });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, services: &Services) {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteExpense { id, title } => {
                    if self.delete_expense(&id, services) {
                        self.set_status(format!("Deleted: {title}"));
                    }
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    pub(crate) fn delete_expense(&mut self, id: &str, services: &Services) -> bool {
        let Some(session) = self.require_session(services) else {
            return false;
        };
        match services.store.delete_expense(&session, id) {
            Ok(()) => {
                tracing::info!(id, "expense deleted");
                self.expenses.retain(|e| !e.has_id(id));
                self.clamp_selection();
                self.rebuild_breakdown();
                self.refresh_summary(services);
                true
            }
            Err(e) => {
                self.fail(e, "Delete failed", services);
                false
            }
        }
    }

    pub(crate) fn submit_limit(&mut self, services: &Services) {
        let limit = match validate::limit(self.limit_form.value(form::LIMIT_AMOUNT)) {
            Ok(l) => l,
            Err(e) => return self.alert(e.to_string()),
        };
        if self.set_limit(limit, services) {
            self.limit_form.reset();
            self.input_mode = InputMode::Normal;
        }
    }

    pub(crate) fn set_limit(&mut self, limit: Decimal, services: &Services) -> bool {
        let Some(session) = self.require_session(services) else {
            return false;
        };
        match services.store.set_limit(&session, limit) {
            Ok(()) => {
                tracing::info!(%limit, "monthly limit updated");
                self.set_status("Monthly limit updated");
                self.refresh_summary(services);
                true
            }
            Err(e) => {
                self.fail(e, "Limit update failed", services);
                false
            }
        }
    }

    pub(crate) fn logout(&mut self, services: &Services) {
        self.set_session(None, services);
        tracing::info!("logged out");
        self.input_mode = InputMode::Normal;
        self.screen = Screen::Login;
        self.active_form = FormKind::Login;
        self.set_status("Logged out");
    }

    // ── Forms ─────────────────────────────────────────────────

    pub(crate) fn begin_editing(&mut self, kind: FormKind) {
        self.active_form = kind;
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn active_form(&self) -> &Form {
        match self.active_form {
            FormKind::Login => &self.login_form,
            FormKind::Register => &self.register_form,
            FormKind::Expense => &self.expense_form,
            FormKind::Limit => &self.limit_form,
        }
    }

    pub(crate) fn active_form_mut(&mut self) -> &mut Form {
        match self.active_form {
            FormKind::Login => &mut self.login_form,
            FormKind::Register => &mut self.register_form,
            FormKind::Expense => &mut self.expense_form,
            FormKind::Limit => &mut self.limit_form,
        }
    }

    pub(crate) fn submit_active_form(&mut self, services: &Services) {
        match self.active_form {
            FormKind::Login => self.submit_login(services),
            FormKind::Register => self.submit_register(services),
            FormKind::Expense => self.submit_expense(services),
            FormKind::Limit => self.submit_limit(services),
        }
    }

    // ── Feedback ──────────────────────────────────────────────

    pub(crate) fn alert(&mut self, msg: impl Into<String>) {
        self.alert = Some(msg.into());
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Surface a failed user action. A rejected session is dropped and the
    /// user is sent back to login.
    fn fail(&mut self, err: ApiError, fallback: &str, services: &Services) {
        tracing::warn!("{fallback}: {err}");
        if err.is_unauthorized() && self.is_logged_in() {
            self.expire_session(services);
        }
        self.alert(err.user_message(fallback));
    }

    /// Log a failed background load. Returns true when the session was
    /// rejected and has been dropped.
    fn load_failed(&mut self, err: ApiError, what: &str, services: &Services) {
        tracing::warn!("failed to load {what}: {err}");
        if err.is_unauthorized() {
            self.expire_session(services);
            self.alert(SESSION_EXPIRED);
        }
    }

    fn expire_session(&mut self, services: &Services) {
        self.set_session(None, services);
        self.input_mode = InputMode::Normal;
        self.screen = Screen::Login;
        self.active_form = FormKind::Login;
    }

    fn require_session(&mut self, services: &Services) -> Option<Session> {
        let session = self.session.clone();
        if session.is_none() {
            self.navigate(Screen::Login, services);
            self.set_status("Please log in first");
        }
        session
    }

    fn clamp_selection(&mut self) {
        self.expense_cursor.clamp(self.expenses.len());
    }
}
