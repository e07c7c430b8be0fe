pub(crate) mod auth;
pub(crate) mod dashboard;
pub(crate) mod home;
pub(crate) mod profile;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::form::Form;
use crate::ui::theme;

/// Bordered panel with the dimmed bold title every screen uses.
pub(crate) fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { theme::ACCENT } else { theme::BORDER };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

/// Draw a form as `label: value` rows. The focused field is highlighted and
/// gets the cursor while `editing`.
pub(crate) fn render_form(
    f: &mut Frame,
    area: Rect,
    form: &Form,
    title: &str,
    editing: bool,
    hint: &str,
) {
    let label_width = form
        .fields
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::with_capacity(form.fields.len() + 2);
    for (i, field) in form.fields.iter().enumerate() {
        let focused = editing && i == form.focus;
        let value_style = if focused {
            theme::selected_style()
        } else {
            theme::normal_style()
        };
        let marker = if focused { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme::ACCENT)),
            Span::styled(
                format!("{:<label_width$} ", field.label),
                theme::dim_style(),
            ),
            Span::styled(format!(" {} ", field.display()), value_style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint.to_string(), theme::dim_style())));

    let block = panel(title, editing);
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if editing {
        if let Some(field) = form.fields.get(form.focus) {
            let x = inner.x + 2 + label_width as u16 + 2 + field.display().chars().count() as u16;
            let y = inner.y + form.focus as u16;
            if x < inner.right() && y < inner.bottom() {
                f.set_cursor_position((x, y));
            }
        }
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

