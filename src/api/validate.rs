//! Input checks that run before any request is made.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use super::ApiError;
use crate::models::{Category, ExpenseDraft};

static EMAIL_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@ \t\r\n]+@[^@ \t\r\n]+\.[^@ \t\r\n]+$").ok());

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl Credentials {
    pub(crate) fn new(email: &str, password: &str) -> Result<Self, ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Please enter email and password"));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Registration {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl Registration {
    pub(crate) fn new(name: &str, email: &str, password: &str) -> Result<Self, ApiError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::validation(
                "Please enter name, email and password",
            ));
        }
        if !looks_like_email(email) {
            return Err(ApiError::validation("Please enter a valid email"));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

pub(crate) fn looks_like_email(s: &str) -> bool {
    EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(s))
}

/// Build a draft from raw form input. The title is trimmed.
pub(crate) fn expense_draft(
    title: &str,
    amount: &str,
    category: Category,
) -> Result<ExpenseDraft, ApiError> {
    let title = title.trim();
    let amount = amount.trim();
    if title.is_empty() || amount.is_empty() {
        return Err(ApiError::validation("Please enter title & amount"));
    }
    let amount = parse_amount(amount)
        .ok_or_else(|| ApiError::validation(format!("Invalid amount: {amount}")))?;
    if amount < Decimal::ZERO {
        return Err(ApiError::validation("Amount cannot be negative"));
    }
    Ok(ExpenseDraft {
        title: title.to_string(),
        amount,
        category,
    })
}

/// Parse `<title words...> <amount> [category]` as typed on a command line.
/// A trailing word is taken as the category only when it names one.
pub(crate) fn expense_from_args(args: &str) -> Result<ExpenseDraft, ApiError> {
    let mut words: Vec<&str> = args.split_whitespace().collect();
    let category = match words.last().and_then(|w| Category::from_name(w)) {
        Some(c) if words.len() >= 3 => {
            words.pop();
            c
        }
        _ => Category::default(),
    };
    let amount = words.pop().unwrap_or("");
    expense_draft(&words.join(" "), amount, category)
}

/// A new monthly limit; `0` clears it.
pub(crate) fn limit(input: &str) -> Result<Decimal, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::validation("Please enter your monthly limit"));
    }
    match parse_amount(input) {
        Some(v) if v >= Decimal::ZERO => Ok(v),
        _ => Err(ApiError::validation(format!("Invalid limit: {input}"))),
    }
}

/// Accepts plain decimals with an optional leading currency sign and
/// thousands separators, e.g. `₹1,200.50`.
fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim_start_matches(['₹', '$'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).ok()
}
