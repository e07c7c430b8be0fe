use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{centered, panel};
use crate::ui::app::{App, Screen};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Finora",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("expense tracker", theme::dim_style())),
        Line::from(""),
    ];

    for (i, screen) in app.home_entries().iter().enumerate() {
        let label = match screen {
            Screen::Register => "Create Account".to_string(),
            other => other.to_string(),
        };
        let style = if i == app.home_index {
            theme::selected_style().add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        };
        lines.push(Line::from(Span::styled(format!("  {label:^18}  "), style)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "simple • safe • sweet",
        theme::dim_style(),
    )));

    let height = lines.len() as u16 + 2;
    let card = centered(area, 36, height);
    f.render_widget(Paragraph::new(lines).centered().block(panel("Home", false)), card);
}
