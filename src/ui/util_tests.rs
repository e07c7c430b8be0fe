#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Groceries and more", 10), "Groceries…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("चाय और नाश्ता", 4), "चाय…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "₹1,234.56");
    assert_eq!(format_amount(dec!(999)), "₹999.00");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "₹0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-₹42.50");
}

#[test]
fn test_format_amount_lakh_grouping() {
    assert_eq!(format_amount(dec!(100000)), "₹1,00,000.00");
    assert_eq!(format_amount(dec!(1234567.89)), "₹12,34,567.89");
    assert_eq!(format_amount(dec!(123456789)), "₹12,34,56,789.00");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(3)), "₹3.00");
    assert_eq!(format_amount(dec!(1.5)), "₹1.50");
}

// ── month_label ───────────────────────────────────────────────

#[test]
fn test_month_label() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
    assert_eq!(month_label(date), "March 2025");
}

// ── ListCursor ────────────────────────────────────────────────

#[test]
fn test_cursor_down_follows_selection() {
    let mut cursor = ListCursor::default();
    for _ in 0..5 {
        cursor.down(10, 3);
    }
    assert_eq!(cursor, ListCursor { index: 5, scroll: 3 });
}

#[test]
fn test_cursor_down_stops_at_end() {
    let mut cursor = ListCursor { index: 2, scroll: 0 };
    cursor.down(3, 10);
    assert_eq!(cursor.index, 2);
}

#[test]
fn test_cursor_up_pulls_window() {
    let mut cursor = ListCursor { index: 3, scroll: 3 };
    cursor.up();
    assert_eq!(cursor, ListCursor { index: 2, scroll: 2 });
    cursor.top();
    cursor.up();
    assert_eq!(cursor, ListCursor::default());
}

#[test]
fn test_cursor_bottom() {
    let mut cursor = ListCursor::default();
    cursor.bottom(10, 4);
    assert_eq!(cursor, ListCursor { index: 9, scroll: 6 });
    cursor.bottom(0, 4);
    assert_eq!(cursor, ListCursor { index: 9, scroll: 6 });
}

#[test]
fn test_cursor_clamp_after_shrink() {
    let mut cursor = ListCursor { index: 9, scroll: 6 };
    cursor.clamp(4);
    assert_eq!(cursor, ListCursor { index: 3, scroll: 3 });
    cursor.clamp(0);
    assert_eq!(cursor, ListCursor::default());
}
