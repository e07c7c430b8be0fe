use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(crate) const CURRENCY: &str = "₹";

/// Rupee amount with two decimals and Indian digit grouping:
/// `1234567.89` → `"₹12,34,567.89"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (whole, paise) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{CURRENCY}{}.{paise}", group_lakh(whole))
}

/// Last three digits, then pairs: 1234567 → 12,34,567.
fn group_lakh(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    let lead = head.len() % 2;
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (i + 2 - lead) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// At most `max` characters, the last one an ellipsis when cut.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    match max {
        0 => String::new(),
        _ => s.chars().take(max - 1).chain(std::iter::once('…')).collect(),
    }
}

/// Heading for the breakdown chart, e.g. "March 2025".
pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Selection plus the first visible row of a scrolling list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

impl ListCursor {
    pub(crate) fn down(&mut self, len: usize, page: usize) {
        if self.index + 1 >= len {
            return;
        }
        self.index += 1;
        let page = page.max(1);
        if self.index >= self.scroll + page {
            self.scroll = self.index + 1 - page;
        }
    }

    pub(crate) fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.scroll = self.scroll.min(self.index);
    }

    pub(crate) fn top(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn bottom(&mut self, len: usize, page: usize) {
        if len == 0 {
            return;
        }
        self.index = len - 1;
        self.scroll = len.saturating_sub(page.max(1));
    }

    /// Keep the selection inside a list that may have shrunk.
    pub(crate) fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
        self.scroll = self.scroll.min(self.index);
    }
}
