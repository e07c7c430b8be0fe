use anyhow::{Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use super::Services;
use crate::aggregate::{category_shares, compute_usage, group_by_category};
use crate::api::{validate, ApiError, Credentials, Registration};
use crate::export::{self, CsvExporter};
use crate::session::Session;
use crate::ui::util::format_amount;

pub(crate) const PASSWORD_ENV: &str = "FINORA_PASSWORD";

pub(crate) fn as_cli(args: &[String], services: &Services) -> Result<()> {
    match args[1].as_str() {
        "login" if args.len() < 3 => anyhow::bail!("Usage: finora login <email>"),
        "register" if args.len() < 4 => anyhow::bail!("Usage: finora register <name> <email>"),
        "login" => cli_login(&args[2..], services, &read_password()?),
        "register" => cli_register(&args[2..], services, &read_password()?),
        "logout" => cli_logout(services),
        "expenses" | "ls" => cli_expenses(services),
        "add" => cli_add(&args[2..], services),
        "delete" | "rm" => cli_delete(&args[2..], services),
        "summary" | "s" => cli_summary(services),
        "limit" => cli_limit(&args[2..], services),
        "profile" => cli_profile(services),
        "export" => cli_export(&args[2..], services),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finora {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Finora - expense tracker client");
    println!();
    println!("Usage: finora [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  login <email>                 Log in (password from stdin or {PASSWORD_ENV})");
    println!("  register <name> <email>       Create an account");
    println!("  logout                        Forget the stored session");
    println!("  expenses, ls                  List expenses");
    println!("  add <title> <amount> [cat]    Add an expense (Food, Travel, Shopping, Bills, Other)");
    println!("  delete, rm <id>               Delete an expense");
    println!("  summary, s                    Total spent, limit and category breakdown");
    println!("  limit <amount>                Set the monthly limit (0 clears it)");
    println!("  profile                       Show account details");
    println!("  export [path]                 Export expenses to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Password from the environment, otherwise one line of stdin.
fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush().ok();
    }
    read_line(stdin.lock())
}

fn read_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Turn a store failure into the message the user sees. A rejected session
/// is forgotten.
fn remote_err(err: ApiError, fallback: &str, services: &Services) -> anyhow::Error {
    tracing::warn!("{fallback}: {err}");
    if err.is_unauthorized() {
        if let Err(e) = services.sessions.clear() {
            tracing::warn!("session not cleared: {e:#}");
        }
        return anyhow::anyhow!(
            "{} (session cleared, run `finora login <email>`)",
            err.user_message(fallback)
        );
    }
    anyhow::anyhow!(err.user_message(fallback))
}

fn require_session(services: &Services) -> Result<Session> {
    services
        .sessions
        .load()?
        .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `finora login <email>` first"))
}

fn cli_login(args: &[String], services: &Services, password: &str) -> Result<()> {
    let email = args.first().map(String::as_str).unwrap_or("");
    let credentials = Credentials::new(email, password)?;
    let session = services
        .store
        .login(&credentials)
        .map_err(|e| remote_err(e, "Login failed", services))?;
    services.sessions.save(&session)?;
    tracing::info!(path = %services.sessions.path().display(), "logged in from cli");
    println!("Logged in as {}", credentials.email);
    Ok(())
}

fn cli_register(args: &[String], services: &Services, password: &str) -> Result<()> {
    // Everything before the email is the name.
    let Some((email, name)) = args.split_last().filter(|(_, name)| !name.is_empty()) else {
        anyhow::bail!("Usage: finora register <name> <email>");
    };
    let registration = Registration::new(&name.join(" "), email, password)?;
    services
        .store
        .register(&registration)
        .map_err(|e| remote_err(e, "Registration failed", services))?;
    println!("Account created successfully!");
    Ok(())
}

fn cli_logout(services: &Services) -> Result<()> {
    services.sessions.clear()?;
    println!("Logged out");
    Ok(())
}

fn cli_expenses(services: &Services) -> Result<()> {
    let session = require_session(services)?;
    let expenses = services
        .store
        .list_expenses(&session)
        .map_err(|e| remote_err(e, "Could not load expenses", services))?;

    if expenses.is_empty() {
        println!("No expenses");
        return Ok(());
    }

    println!("{:<28} {:<10} {:>14}  ID", "Title", "Category", "Amount");
    println!("{}", "─".repeat(70));
    for e in &expenses {
        println!(
            "{:<28} {:<10} {:>14}  {}",
            e.title,
            e.category_label(),
            format_amount(e.amount),
            e.id.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn cli_add(args: &[String], services: &Services) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: finora add <title> <amount> [category]");
    }
    let session = require_session(services)?;
    let draft = validate::expense_from_args(&args.join(" "))?;
    let record = services
        .store
        .create_expense(&session, &draft)
        .map_err(|e| remote_err(e, "Add expense failed", services))?;
    println!(
        "Added {} ({}, {})",
        record.title,
        record.category_label(),
        format_amount(record.amount)
    );
    print_usage_line(services, &session);
    Ok(())
}

fn cli_delete(args: &[String], services: &Services) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: finora delete <id>");
    };
    let session = require_session(services)?;
    services
        .store
        .delete_expense(&session, id)
        .map_err(|e| remote_err(e, "Delete failed", services))?;
    println!("Deleted {id}");
    print_usage_line(services, &session);
    Ok(())
}

fn cli_limit(args: &[String], services: &Services) -> Result<()> {
    let session = require_session(services)?;
    let limit = validate::limit(&args.join(" "))?;
    services
        .store
        .set_limit(&session, limit)
        .map_err(|e| remote_err(e, "Limit update failed", services))?;
    println!("Monthly limit set to {}", format_amount(limit));
    print_usage_line(services, &session);
    Ok(())
}

fn cli_summary(services: &Services) -> Result<()> {
    let session = require_session(services)?;
    let summary = services
        .store
        .summary(&session)
        .map_err(|e| remote_err(e, "Could not load summary", services))?;
    let usage = compute_usage(summary.total_spent, summary.limit);

    println!("Finora summary");
    println!("{}", "─".repeat(40));
    println!("  Total spent:   {}", format_amount(summary.total_spent));
    if summary.has_limit() {
        println!("  Monthly limit: {}", format_amount(summary.limit));
        println!("  Used:          {}%", usage.percentage);
        if usage.over_limit {
            println!();
            println!("  Oops! You crossed your spending limit.");
        }
    } else {
        println!("  Monthly limit: not set");
    }

    // The breakdown is best effort; the totals above are already printed.
    match services.store.list_expenses(&session) {
        Ok(expenses) => {
            let breakdown = group_by_category(&expenses);
            if !breakdown.is_empty() {
                println!();
                println!("Spending by Category:");
                let shares = category_shares(&breakdown);
                for (entry, share) in breakdown.iter().zip(shares) {
                    println!(
                        "  {:<12} {:>14}  {share:>3}%",
                        entry.category,
                        format_amount(entry.total)
                    );
                }
            }
        }
        Err(e) => tracing::warn!("breakdown unavailable: {e}"),
    }
    Ok(())
}

fn cli_profile(services: &Services) -> Result<()> {
    let session = require_session(services)?;
    let profile = services
        .store
        .profile(&session)
        .map_err(|e| remote_err(e, "Could not load profile", services))?;
    println!("  Name:          {}", profile.name);
    println!("  Email:         {}", profile.email);
    println!("  Monthly limit: {}", format_amount(profile.monthly_limit));
    Ok(())
}

fn cli_export(args: &[String], services: &Services) -> Result<()> {
    let session = require_session(services)?;
    let expenses = services
        .store
        .list_expenses(&session)
        .map_err(|e| remote_err(e, "Could not load expenses", services))?;

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(export::default_path);

    let count = CsvExporter::write_file(Path::new(&output_path), &expenses)?;
    if count == 0 {
        println!("No expenses to export (wrote header to {output_path})");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

/// One line of budget usage after a change. Silent when there is no limit or
/// the summary can't be fetched.
fn print_usage_line(services: &Services, session: &Session) {
    match services.store.summary(session) {
        Ok(summary) => {
            let usage = compute_usage(summary.total_spent, summary.limit);
            if !usage.suppressed {
                let flag = if usage.over_limit { " (over limit!)" } else { "" };
                println!(
                    "{} of {} used ({}%){flag}",
                    format_amount(summary.total_spent),
                    format_amount(summary.limit),
                    usage.percentage
                );
            }
        }
        Err(e) => tracing::warn!("summary refresh failed: {e}"),
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
