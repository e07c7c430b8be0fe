use ratatui::{layout::Rect, Frame};

use super::{centered, render_form};
use crate::ui::app::{App, InputMode};
use crate::ui::form::FormKind;

pub(crate) fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing && app.active_form == FormKind::Login;
    let hint = if editing {
        "Enter log in | Tab next field | Esc stop"
    } else {
        "i edit | 3 create account"
    };
    let card = centered(area, 56, app.login_form.fields.len() as u16 + 4);
    render_form(f, card, &app.login_form, "Login", editing, hint);
}

pub(crate) fn render_register(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing && app.active_form == FormKind::Register;
    let hint = if editing {
        "Enter register | Tab next field | Esc stop"
    } else {
        "i edit | 2 back to login"
    };
    let card = centered(area, 56, app.register_form.fields.len() as u16 + 4);
    render_form(f, card, &app.register_form, "Create Account", editing, hint);
}
