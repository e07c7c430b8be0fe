use ratatui::style::{Color, Modifier, Style};

// Soft pink palette to match the web client.
pub(crate) const BASE: Color = Color::Rgb(35, 33, 54);
pub(crate) const ACCENT: Color = Color::Rgb(245, 194, 231);
pub(crate) const MINT: Color = Color::Rgb(156, 207, 216);
pub(crate) const ROSE: Color = Color::Rgb(235, 111, 146);
pub(crate) const GOLD: Color = Color::Rgb(246, 193, 119);
pub(crate) const SURFACE: Color = Color::Rgb(42, 39, 63);
pub(crate) const TEXT: Color = Color::Rgb(224, 222, 244);
pub(crate) const MUTED: Color = Color::Rgb(144, 140, 170);
pub(crate) const BORDER: Color = Color::Rgb(68, 65, 90);
pub(crate) const BAR_BG: Color = Color::Rgb(25, 23, 36);

/// Breakdown colours, cycled by category position.
pub(crate) const PASTEL: [Color; 5] = [
    Color::Rgb(0xf7, 0xb2, 0xbd),
    Color::Rgb(0xfc, 0xd5, 0xa5),
    Color::Rgb(0xb8, 0xe0, 0xd2),
    Color::Rgb(0xcd, 0xb4, 0xdb),
    Color::Rgb(0xa2, 0xd2, 0xff),
];

pub(crate) fn pastel(index: usize) -> Color {
    PASTEL[index % PASTEL.len()]
}

pub(crate) fn header_style() -> Style {
    Style::new().fg(ACCENT).bg(BASE).add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::new().fg(BASE).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::new().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::new().fg(MUTED)
}

pub(crate) fn title_style() -> Style {
    Style::new().fg(MUTED).add_modifier(Modifier::BOLD)
}

pub(crate) fn amount_style() -> Style {
    Style::new().fg(ROSE)
}

pub(crate) fn warning_style() -> Style {
    amount_style().add_modifier(Modifier::BOLD)
}

pub(crate) fn alt_row_style() -> Style {
    normal_style().bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    normal_style().bg(BAR_BG)
}

pub(crate) fn status_bar_style() -> Style {
    dim_style().bg(SURFACE)
}

/// Usage gauge colour: calm below 80%, amber up to the limit, red past it.
pub(crate) fn usage_color(percentage: u8, over_limit: bool) -> Color {
    match (over_limit, percentage) {
        (true, _) => ROSE,
        (false, 80..) => GOLD,
        _ => MINT,
    }
}
