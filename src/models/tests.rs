#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── ExpenseRecord ─────────────────────────────────────────────

fn make_expense(id: Option<&str>, category: &str) -> ExpenseRecord {
    ExpenseRecord {
        id: id.map(String::from),
        title: "Lunch".into(),
        amount: dec!(12.50),
        category: category.into(),
    }
}

#[test]
fn test_category_label_uses_record_category() {
    assert_eq!(make_expense(None, "Travel").category_label(), "Travel");
}

#[test]
fn test_category_label_falls_back_to_other() {
    assert_eq!(make_expense(None, "").category_label(), FALLBACK_CATEGORY);
    assert_eq!(FALLBACK_CATEGORY, "Other");
}

#[test]
fn test_category_label_keeps_free_text() {
    assert_eq!(make_expense(None, "Pets").category_label(), "Pets");
}

#[test]
fn test_has_id() {
    let rec = make_expense(Some("abc123"), "Food");
    assert!(rec.has_id("abc123"));
    assert!(!rec.has_id("abc"));
    assert!(!make_expense(None, "Food").has_id(""));
}

// ── BudgetSummary ─────────────────────────────────────────────

#[test]
fn test_summary_default_has_no_limit() {
    let summary = BudgetSummary::default();
    assert_eq!(summary.total_spent, Decimal::ZERO);
    assert!(!summary.has_limit());
}

#[test]
fn test_summary_with_limit() {
    let summary = BudgetSummary {
        total_spent: dec!(40),
        limit: dec!(100),
    };
    assert!(summary.has_limit());
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_parse() {
    assert_eq!(Category::parse("food"), Category::Food);
    assert_eq!(Category::parse("FOOD"), Category::Food);
    assert_eq!(Category::parse(" Travel "), Category::Travel);
    assert_eq!(Category::parse("shopping"), Category::Shopping);
    assert_eq!(Category::parse("bill"), Category::Bills);
    assert_eq!(Category::parse("Bills"), Category::Bills);
    assert_eq!(Category::parse("groceries"), Category::Other);
    assert_eq!(Category::parse(""), Category::Other);
}

#[test]
fn test_category_default_is_food() {
    assert_eq!(Category::default(), Category::Food);
}

#[test]
fn test_category_display_matches_as_str() {
    for c in Category::all() {
        assert_eq!(format!("{c}"), c.as_str());
        assert_eq!(Category::parse(c.as_str()), *c);
    }
}

#[test]
fn test_category_all_order() {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    assert_eq!(names, ["Food", "Travel", "Shopping", "Bills", "Other"]);
}

#[test]
fn test_category_cycle_wraps() {
    assert_eq!(Category::Food.cycle(1), Category::Travel);
    assert_eq!(Category::Other.cycle(1), Category::Food);
    assert_eq!(Category::Food.cycle(-1), Category::Other);
    assert_eq!(Category::Bills.cycle(-2), Category::Travel);
}

#[test]
fn test_category_from_name() {
    assert_eq!(Category::from_name("Other"), Some(Category::Other));
    assert_eq!(Category::from_name("travel"), Some(Category::Travel));
    assert_eq!(Category::from_name("Pets"), None);
}
