use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use super::Services;
use crate::session::Session;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::form::FormKind;

pub(crate) fn as_tui(services: &Services, session: Option<Session>) -> Result<()> {
    let mut app = App::new(session);
    app.start(services);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, services);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("terminal loop failed: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    services: &Services,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab, status and command bars, the dashboard forms, list border and header.
            let list_height = f.area().height.saturating_sub(3 + 7 + 3) as usize;
            app.visible_rows = list_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if is_quit(&key) {
                app.running = false;
                continue;
            }
            if app.alert.is_some() {
                app.alert = None;
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, services)?,
                InputMode::Command => handle_command_input(key, app, services)?,
                InputMode::Editing => handle_editing_input(key, app, services),
                InputMode::Confirm => handle_confirm_input(key, app, services),
            }
        }
    }
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, services: &Services) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(screen) = Screen::all().get(idx) {
                app.navigate(*screen, services);
            }
        }
        KeyCode::Tab => cycle_screen(app, services, 1),
        KeyCode::BackTab => cycle_screen(app, services, -1),
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => match app.screen {
            Screen::Home => handle_home_key(key, app, services),
            Screen::Login => handle_auth_key(key, app, FormKind::Login),
            Screen::Register => handle_auth_key(key, app, FormKind::Register),
            Screen::Dashboard => handle_dashboard_key(key, app, services)?,
            Screen::Profile => handle_profile_key(key, app, services)?,
        },
    }
    Ok(())
}

fn handle_home_key(key: KeyEvent, app: &mut App, services: &Services) {
    if key.code == KeyCode::Enter {
        if let Some(screen) = app.home_entries().get(app.home_index).copied() {
            app.navigate(screen, services);
            if let Some(kind) = form_for(screen) {
                app.begin_editing(kind);
            }
        }
    }
}

fn handle_auth_key(key: KeyEvent, app: &mut App, kind: FormKind) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Char('i')) {
        app.begin_editing(kind);
    }
}

fn handle_dashboard_key(key: KeyEvent, app: &mut App, services: &Services) -> Result<()> {
    match key.code {
        KeyCode::Char('a') => app.begin_editing(FormKind::Expense),
        KeyCode::Char('l') => app.begin_editing(FormKind::Limit),
        KeyCode::Char('D') | KeyCode::Char('x') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => commands::handle_command("refresh", app, services)?,
        KeyCode::Char('o') => app.logout(services),
        _ => {}
    }
    Ok(())
}

fn handle_profile_key(key: KeyEvent, app: &mut App, services: &Services) -> Result<()> {
    match key.code {
        KeyCode::Char('r') => commands::handle_command("refresh", app, services)?,
        KeyCode::Char('o') => app.logout(services),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, services: &Services) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, services)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, services: &Services) {
    match key.code {
        KeyCode::Enter => app.submit_active_form(services),
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Tab | KeyCode::Down => app.active_form_mut().next_field(),
        KeyCode::BackTab | KeyCode::Up => app.active_form_mut().prev_field(),
        KeyCode::Left => app.active_form_mut().adjust(-1),
        KeyCode::Right => app.active_form_mut().adjust(1),
        KeyCode::Backspace => app.active_form_mut().backspace(),
        KeyCode::Char(c) => app.active_form_mut().push(c),
        _ => {}
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, services: &Services) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(services),
        // Any other key = cancel
        _ => app.cancel_pending(),
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn form_for(screen: Screen) -> Option<FormKind> {
    match screen {
        Screen::Login => Some(FormKind::Login),
        Screen::Register => Some(FormKind::Register),
        _ => None,
    }
}

fn cycle_screen(app: &mut App, services: &Services, delta: isize) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0) as isize;
    let next = (idx + delta).rem_euclid(screens.len() as isize) as usize;
    app.navigate(screens[next], services);
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Home => {
            if app.home_index + 1 < app.home_entries().len() {
                app.home_index += 1;
            }
        }
        Screen::Dashboard => app.expense_cursor.down(app.expenses.len(), app.visible_rows),
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Home => app.home_index = app.home_index.saturating_sub(1),
        Screen::Dashboard => app.expense_cursor.up(),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Home => app.home_index = 0,
        Screen::Dashboard => app.expense_cursor.top(),
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Home => app.home_index = app.home_entries().len().saturating_sub(1),
        Screen::Dashboard => app.expense_cursor.bottom(app.expenses.len(), app.visible_rows),
        _ => {}
    }
}
