use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::screens;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_tab_bar(f, tabs, app);
    render_screen(f, body, app);
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
    if let Some(msg) = &app.alert {
        render_alert(f, f.area(), msg);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let [brand_area, tabs_area] =
        Layout::horizontal([Constraint::Length(10), Constraint::Min(0)]).areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(" ♥ finora ", theme::header_style())),
        brand_area,
    );

    let tab_style = |screen: Screen| {
        if screen == app.screen {
            Style::new().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else if screen.requires_session() && !app.is_logged_in() {
            Style::new()
                .fg(theme::BORDER)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            theme::dim_style()
        }
    };
    let titles = Screen::all()
        .iter()
        .zip(1..)
        .map(|(&screen, key)| Line::styled(format!("{key}:{screen}"), tab_style(screen)));

    let tabs = Tabs::new(titles)
        .divider(Span::styled("·", Style::new().fg(theme::BORDER)))
        .style(Style::new().bg(theme::BASE));
    f.render_widget(tabs, tabs_area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Home => screens::home::render(f, area, app),
        Screen::Login => screens::auth::render_login(f, area, app),
        Screen::Register => screens::auth::render_register(f, area, app),
        Screen::Dashboard => screens::dashboard::render(f, area, app),
        Screen::Profile => screens::profile::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::MINT,
        InputMode::Confirm => theme::ROSE,
    };
    let mode = Span::styled(
        format!(" {} ", app.input_mode),
        Style::new()
            .fg(theme::BASE)
            .bg(mode_bg)
            .add_modifier(Modifier::BOLD),
    );
    let account = if app.is_logged_in() { "signed in" } else { "signed out" };

    let keys = match app.screen {
        Screen::Home => "j/k move · Enter open · ? help ",
        Screen::Login | Screen::Register => "i edit · Tab field · ? help ",
        Screen::Dashboard => "a add · l limit · D delete · r refresh · ? help ",
        Screen::Profile => "o logout · r refresh · ? help ",
    };

    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(keys.chars().count() as u16)])
            .areas(area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            mode,
            Span::raw(format!(" {} · {account}", app.screen)),
        ]))
        .style(theme::status_bar_style()),
        left,
    );
    f.render_widget(
        Paragraph::new(keys).style(theme::status_bar_style()),
        right,
    );
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => (
            Line::from(Span::styled(
                " Enter submit | Tab/Shift-Tab field | Esc stop editing",
                theme::dim_style(),
            )),
            None,
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::GOLD)),
                Span::styled(" [y/N] ", Style::default().fg(theme::ROSE)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::BAR_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_alert(f: &mut Frame, area: Rect, msg: &str) {
    let width = 52.min(area.width.saturating_sub(4));
    let text_rows = (msg.chars().count() as u16 / width.saturating_sub(4).max(1)) + 1;
    let height = (text_rows + 4).min(area.height);
    let popup = screens::centered(area, width, height);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(msg.to_string(), theme::normal_style())),
        Line::from(""),
        Line::from(Span::styled("Press any key", theme::dim_style())),
    ])
    .centered()
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(" Finora ", theme::title_style()))
            .style(Style::default().bg(theme::BASE)),
    );

    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::GOLD)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let keys = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " Finora Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Navigation"),
        keys("  j/k or Up/Down   Move cursor           1-5        Switch screens"),
        keys("  Tab/Shift-Tab    Cycle screens         g/G        Top/Bottom"),
        keys("  Enter (Home)     Open entry            Ctrl-d/u   Page Down/Up"),
        keys("  Ctrl-q/Ctrl-c    Quit"),
        Line::from(""),
        heading(" Forms"),
        keys("  i / Enter        Start editing         Esc        Stop editing"),
        keys("  Tab/Down         Next field            Shift-Tab  Previous field"),
        keys("  Left/Right       Change category       Enter      Submit"),
        Line::from(""),
        heading(" Dashboard"),
        keys("  a                Add expense           l          Set monthly limit"),
        keys("  D / x            Delete expense        r          Refresh"),
        keys("  o                Log out               :          Command mode"),
        Line::from(""),
        heading(" Commands"),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = commands::COMMANDS
        .iter()
        .filter(|(name, _)| name.len() > 2)
        .filter(|(_, cmd)| seen.insert(cmd.description))
        .map(|(name, cmd)| (*name, cmd.description))
        .collect();
    cmd_lines.sort_by_key(|(name, _)| *name);
    help_text.extend(cmd_lines.iter().map(|(name, desc)| {
        Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        ))
    }));

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let popup_area = screens::centered(area, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::BASE)),
    );
    f.render_widget(help, popup_area);
}
