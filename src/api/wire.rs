//! Conversion between backend JSON and the client's models.
//!
//! The backend is loose about shapes: lists may be bare or wrapped, ids come
//! as `_id` or `id`, and numbers sometimes arrive as strings. Everything is
//! normalized here so the rest of the crate only sees canonical models.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::models::{BudgetSummary, ExpenseRecord, Profile};

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateExpenseBody<'a> {
    pub(crate) title: &'a str,
    pub(crate) amount: f64,
    pub(crate) category: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LimitBody {
    pub(crate) limit: f64,
}

/// Accepts a bare array or `{ "expenses": [...] }`. Any other shape yields an
/// empty list, as do entries that are not objects.
pub(crate) fn expenses_from_value(value: &Value) -> Vec<ExpenseRecord> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("expenses") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items.iter().filter_map(expense_from_value).collect()
}

pub(crate) fn expense_from_value(value: &Value) -> Option<ExpenseRecord> {
    let obj = value.as_object()?;
    Some(ExpenseRecord {
        id: record_id(obj),
        title: text(obj.get("title")),
        amount: coerce_decimal(obj.get("amount")),
        category: text(obj.get("category")),
    })
}

pub(crate) fn summary_from_value(value: &Value) -> BudgetSummary {
    BudgetSummary {
        total_spent: coerce_decimal(value.get("total")),
        limit: coerce_decimal(value.get("limit")),
    }
}

pub(crate) fn profile_from_value(value: &Value) -> Profile {
    Profile {
        name: text(value.get("name")),
        email: text(value.get("email")),
        monthly_limit: coerce_decimal(value.get("monthly_limit")),
    }
}

pub(crate) fn token_from_value(value: &Value) -> Option<String> {
    value
        .get("token")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// The `message` field of an error body, if the body is JSON and has one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

/// Numbers and numeric strings become decimals; anything else is zero.
pub(crate) fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => Decimal::ZERO,
    }
}

/// Values too large for `Decimal` clamp to its bounds rather than reading
/// as zero.
fn parse_decimal(s: &str) -> Decimal {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .unwrap_or_else(|_| match s.parse::<f64>() {
            Ok(f) if f.is_finite() && f >= 1.0 => Decimal::MAX,
            Ok(f) if f.is_finite() && f <= -1.0 => Decimal::MIN,
            _ => Decimal::ZERO,
        })
}

/// `_id` wins over `id`; numeric ids are stringified.
fn record_id(obj: &Map<String, Value>) -> Option<String> {
    ["_id", "id"].iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
