use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{centered, panel};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let card = centered(area, 48, 9);

    let Some(profile) = &app.profile else {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("Profile unavailable", theme::dim_style())),
            Line::from(Span::styled("Press r to retry", theme::dim_style())),
        ])
        .centered()
        .block(panel("Profile", false));
        f.render_widget(msg, card);
        return;
    };

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(
                format!(" {label:<15}"),
                Style::default()
                    .fg(theme::MUTED)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, theme::normal_style()),
        ])
    };

    let lines = vec![
        Line::from(""),
        row("Name:", profile.name.clone()),
        row("Email:", profile.email.clone()),
        row("Monthly Limit:", format_amount(profile.monthly_limit)),
        Line::from(""),
        Line::from(Span::styled(" o logout | r refresh", theme::dim_style())),
    ];

    f.render_widget(Paragraph::new(lines).block(panel("Profile", false)), card);
}
