use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{panel, render_form};
use crate::aggregate::category_shares;
use crate::ui::app::{App, InputMode};
use crate::ui::form::FormKind;
use crate::ui::theme;
use crate::ui::util::{format_amount, month_label, truncate};

const OVER_LIMIT_WARNING: &str = "Oops! You crossed your spending limit.";

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Limit form
            Constraint::Length(7), // Summary + usage
            Constraint::Min(8),    // Breakdown
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Expense form
            Constraint::Min(5),    // Expense list
        ])
        .split(columns[1]);

    let editing = |kind| app.input_mode == InputMode::Editing && app.active_form == kind;

    render_form(
        f,
        left[0],
        &app.limit_form,
        "Monthly Limit",
        editing(FormKind::Limit),
        if editing(FormKind::Limit) {
            "Enter save | Esc stop"
        } else {
            "l edit"
        },
    );
    render_summary(f, left[1], app);
    render_breakdown(f, left[2], app);

    render_form(
        f,
        right[0],
        &app.expense_form,
        "Add Expense",
        editing(FormKind::Expense),
        if editing(FormKind::Expense) {
            "Enter add | Tab next | ←/→ category | Esc stop"
        } else {
            "a add | D delete | r refresh | o logout"
        },
    );
    render_expense_list(f, right[1], app);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let block = panel("Summary", false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Total
            Constraint::Length(1), // Limit
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Warning
            Constraint::Min(0),
        ])
        .split(inner);

    let limit_text = if app.summary.has_limit() {
        format_amount(app.summary.limit)
    } else {
        "not set".to_string()
    };

    f.render_widget(
        Paragraph::new(labelled("Total spent", format_amount(app.summary.total_spent))),
        rows[0],
    );
    f.render_widget(Paragraph::new(labelled("Monthly limit", limit_text)), rows[1]);

    let usage = app.usage;
    if usage.suppressed {
        f.render_widget(
            Paragraph::new(Span::styled(
                " Set a monthly limit to track usage",
                theme::dim_style(),
            )),
            rows[2],
        );
        return;
    }

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme::usage_color(usage.percentage, usage.over_limit))
                .bg(theme::SURFACE),
        )
        .percent(u16::from(usage.percentage))
        .label(format!("{}% used", usage.percentage));
    f.render_widget(gauge, rows[2]);

    if usage.over_limit {
        f.render_widget(
            Paragraph::new(Span::styled(OVER_LIMIT_WARNING, theme::warning_style())).centered(),
            rows[3],
        );
    }
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<14}"), theme::dim_style()),
        Span::styled(
            value,
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "Spending by Category · {}",
        month_label(chrono::Local::now().date_naive())
    );

    if app.breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
            Line::from(Span::styled("Press a to add one", theme::dim_style())),
        ])
        .centered()
        .block(panel(&title, false));
        f.render_widget(msg, area);
        return;
    }

    let block = panel(&title, false);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let legend_height = app.breakdown.len().min(5) as u16;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(legend_height)])
        .split(inner);

    let bars: Vec<Bar> = app
        .breakdown
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::default()
                .value(bar_height(entry.total))
                .text_value(format_amount(entry.total))
                .label(Line::from(truncate(&entry.category, 10)))
                .style(Style::default().fg(theme::pastel(i)))
                .value_style(
                    Style::default()
                        .fg(theme::BASE)
                        .bg(theme::pastel(i))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1);
    f.render_widget(chart, parts[0]);

    let shares = category_shares(&app.breakdown);
    let legend: Vec<Line> = app
        .breakdown
        .iter()
        .zip(shares)
        .enumerate()
        .map(|(i, (entry, share))| {
            Line::from(vec![
                Span::styled(" ■ ", Style::default().fg(theme::pastel(i))),
                Span::styled(
                    format!("{:<12}", truncate(&entry.category, 12)),
                    theme::normal_style(),
                ),
                Span::styled(format!("{share:>3}%"), theme::dim_style()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(legend), parts[1]);
}

/// Bar heights in hundredths so small amounts still show.
fn bar_height(total: Decimal) -> u64 {
    total
        .max(Decimal::ZERO)
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::MAX)
        .round()
        .to_u64()
        .unwrap_or(u64::MAX)
}

fn render_expense_list(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Expenses ({})", app.expenses.len());

    if app.expenses.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Nothing recorded yet", theme::dim_style())),
            Line::from(Span::styled(
                "Press a or use :add <title> <amount> [category]",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(&title, false));
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Title", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_cursor.scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_cursor.index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&expense.title, 40)),
                Cell::from(expense.category_label().to_string()),
                Cell::from(Span::styled(
                    format_amount(expense.amount),
                    theme::amount_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title, false));
    f.render_widget(table, area);
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
