#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::app::{App, InputMode, Screen};
use super::commands::*;
use super::form::FormKind;
use super::test_support::Harness;

fn run(input: &str, app: &mut App, h: &Harness) {
    handle_command(input, app, &h.services()).unwrap();
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn test_quit() {
    let h = Harness::new();
    let mut app = App::new(None);
    run("q", &mut app, &h);
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests() {
    let h = Harness::new();
    let mut app = App::new(None);
    run("dashbord", &mut app, &h);
    assert_eq!(
        app.status_message,
        "Unknown command: :dashbord. Did you mean :dashboard?"
    );
}

#[test]
fn test_blank_input_is_ignored() {
    let h = Harness::new();
    let mut app = App::new(None);
    run("   ", &mut app, &h);
    assert!(app.status_message.is_empty());
    assert!(app.running);
}

#[test]
fn test_every_command_has_description() {
    for (name, cmd) in COMMANDS.iter() {
        assert!(!cmd.description.is_empty(), "{name}");
    }
}

// ── Navigation ────────────────────────────────────────────────

#[test]
fn test_dashboard_without_session_lands_on_login() {
    let h = Harness::new();
    let mut app = App::new(None);
    run("dashboard", &mut app, &h);
    assert_eq!(app.screen, Screen::Login);
}

#[test]
fn test_login_opens_form() {
    let h = Harness::new();
    let mut app = App::new(None);
    run("login", &mut app, &h);
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.active_form, FormKind::Login);
}

// ── Expenses ──────────────────────────────────────────────────

#[test]
fn test_add_with_arguments() {
    let h = Harness::new();
    h.store.limit.set(dec!(10));
    let mut app = h.logged_in_app();
    run("add Coffee 3 food", &mut app, &h);

    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(app.expenses.len(), 1);
    assert_eq!(app.expenses[0].category, "Food");
    assert_eq!(app.usage.percentage, 30);
}

#[test]
fn test_add_without_arguments_opens_form() {
    let h = Harness::new();
    let mut app = h.logged_in_app();
    run("add", &mut app, &h);
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.active_form, FormKind::Expense);
}

#[test]
fn test_add_bad_arguments_alerts() {
    let h = Harness::new();
    let mut app = h.logged_in_app();
    run("add Coffee lots", &mut app, &h);
    assert_eq!(app.alert.as_deref(), Some("Invalid amount: lots"));
    assert!(!h.store.calls().contains(&"create_expense"));
}

#[test]
fn test_add_when_logged_out_does_nothing() {
    let h = Harness::new();
    let mut app = App::new(None);
    run("add Coffee 3", &mut app, &h);
    assert_eq!(app.screen, Screen::Login);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(h.store.calls().is_empty());
}

#[test]
fn test_limit_with_argument() {
    let h = Harness::new();
    let mut app = h.logged_in_app();
    run("limit 5000", &mut app, &h);
    assert_eq!(h.store.limit.get(), dec!(5000));
    assert_eq!(app.summary.limit, dec!(5000));
}

#[test]
fn test_delete_asks_for_confirmation() {
    let h = Harness::new();
    h.store.seed("a1", "Coffee", dec!(3), "Food");
    let mut app = h.logged_in_app();
    run("dashboard", &mut app, &h);
    run("delete", &mut app, &h);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(!h.store.calls().contains(&"delete_expense"));
}

#[test]
fn test_delete_outside_dashboard() {
    let h = Harness::new();
    let mut app = h.logged_in_app();
    run("delete", &mut app, &h);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_logout_command() {
    let h = Harness::new();
    let mut app = h.logged_in_app();
    run("logout", &mut app, &h);
    assert!(app.session.is_none());
    assert_eq!(h.sessions.load().unwrap(), None);
}

#[test]
fn test_export_to_file() {
    let h = Harness::new();
    h.store.seed("a1", "Coffee", dec!(3), "Food");
    let mut app = h.logged_in_app();
    run("dashboard", &mut app, &h);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    run(&format!("export {}", path.display()), &mut app, &h);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("a1,Coffee,3.00,Food"));
    assert!(app.status_message.starts_with("Exported 1 expenses"));
}

#[test]
fn test_export_nothing() {
    let h = Harness::new();
    let mut app = h.logged_in_app();
    run("export", &mut app, &h);
    assert_eq!(app.status_message, "No expenses to export");
}
