use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::form::FormKind;
use crate::api::validate;
use crate::export::{self, CsvExporter};
use crate::run::Services;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Services) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Finora", cmd_quit, r);
    register_command!("quit", "Quit Finora", cmd_quit, r);
    register_command!("home", "Go to Home", cmd_home, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("p", "Go to Profile", cmd_profile, r);
    register_command!("profile", "Go to Profile", cmd_profile, r);
    register_command!("login", "Log in", cmd_login, r);
    register_command!("register", "Create an account", cmd_register, r);
    register_command!("logout", "Log out", cmd_logout, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add Coffee 3.50 food)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a Coffee 3.50)", cmd_add, r);
    register_command!(
        "limit",
        "Set monthly limit (e.g. :limit 5000)",
        cmd_limit,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("refresh", "Reload expenses and summary", cmd_refresh, r);
    register_command!("r", "Reload expenses and summary", cmd_refresh, r);
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/finora.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, services)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _services: &Services) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_home(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    app.navigate(Screen::Home, services);
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    app.navigate(Screen::Dashboard, services);
    Ok(())
}

fn cmd_profile(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    app.navigate(Screen::Profile, services);
    Ok(())
}

fn cmd_login(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    app.navigate(Screen::Login, services);
    app.begin_editing(FormKind::Login);
    Ok(())
}

fn cmd_register(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    app.navigate(Screen::Register, services);
    app.begin_editing(FormKind::Register);
    Ok(())
}

fn cmd_logout(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    if app.is_logged_in() {
        app.logout(services);
    } else {
        app.set_status("Not logged in");
    }
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _services: &Services) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add` alone opens the form; with arguments the expense is added directly.
fn cmd_add(args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    if !ensure_dashboard(app, services) {
        return Ok(());
    }
    if args.is_empty() {
        app.begin_editing(FormKind::Expense);
        return Ok(());
    }
    match validate::expense_from_args(args) {
        Ok(draft) => {
            app.add_expense(&draft, services);
        }
        Err(e) => app.alert(e.to_string()),
    }
    Ok(())
}

fn cmd_limit(args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    if !ensure_dashboard(app, services) {
        return Ok(());
    }
    if args.is_empty() {
        app.begin_editing(FormKind::Limit);
        return Ok(());
    }
    match validate::limit(args) {
        Ok(limit) => {
            app.set_limit(limit, services);
        }
        Err(e) => app.alert(e.to_string()),
    }
    Ok(())
}

/// Switch to the dashboard unless already there. False when the user is
/// not logged in (and has been sent to login instead).
fn ensure_dashboard(app: &mut App, services: &Services) -> bool {
    if app.screen != Screen::Dashboard {
        app.navigate(Screen::Dashboard, services);
    }
    app.is_logged_in() && app.screen == Screen::Dashboard
}

fn cmd_delete(_args: &str, app: &mut App, _services: &Services) -> anyhow::Result<()> {
    if app.screen != Screen::Dashboard || app.expenses.is_empty() {
        app.set_status("Navigate to Dashboard and select an expense first");
        return Ok(());
    }
    app.request_delete();
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, services: &Services) -> anyhow::Result<()> {
    if !app.is_logged_in() {
        app.set_status("Not logged in");
        return Ok(());
    }
    match app.screen {
        Screen::Profile => app.load_profile(services),
        _ => app.refresh_dashboard(services),
    }
    if app.is_logged_in() {
        app.set_status("Refreshed");
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _services: &Services) -> anyhow::Result<()> {
    if app.expenses.is_empty() {
        app.set_status("No expenses to export");
        return Ok(());
    }

    let path = if args.is_empty() {
        export::default_path()
    } else {
        crate::run::shellexpand(args)
    };

    match CsvExporter::write_file(std::path::Path::new(&path), &app.expenses) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {path}")),
        Err(e) => {
            tracing::warn!("export failed: {e:#}");
            app.alert(format!("Export failed: {e}"));
        }
    }
    Ok(())
}
