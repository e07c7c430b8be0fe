use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode, Url};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Duration;

use super::validate::{Credentials, Registration};
use super::wire;
use super::{ApiError, ExpenseStore};
use crate::models::{BudgetSummary, ExpenseDraft, ExpenseRecord, Profile};
use crate::session::Session;

/// `ExpenseStore` backed by the Finora REST API.
pub(crate) struct HttpStore {
    client: Client,
    base: Url,
}

impl HttpStore {
    /// `api_url` is the server root; requests go to `{api_url}/api/...`.
    pub(crate) fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let base = api_base(api_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url, session: Option<&Session>) -> RequestBuilder {
        tracing::debug!(%method, %url, authenticated = session.is_some(), "api request");
        let req = self.client.request(method, url);
        match session {
            Some(s) => req.bearer_auth(&s.token),
            None => req,
        }
    }

    /// Send and return the raw body of a successful response.
    fn execute(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let resp = req.send().map_err(|e| {
            tracing::warn!(error = %e, "api request failed");
            ApiError::Transport(e.to_string())
        })?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = wire::error_message(&body);
        tracing::warn!(status = status.as_u16(), message = ?message, "api error response");
        Err(if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Remote {
                status: status.as_u16(),
                message,
            }
        })
    }

    fn execute_json(&self, req: RequestBuilder) -> Result<Value, ApiError> {
        let body = self.execute(req)?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl ExpenseStore for HttpStore {
    fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let body = wire::LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let url = self.endpoint(&["auth", "login"]);
        let value = self.execute_json(self.request(Method::POST, url, None).json(&body))?;
        wire::token_from_value(&value)
            .map(Session::new)
            .ok_or_else(|| ApiError::Decode("login response has no token".into()))
    }

    fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let body = wire::RegisterBody {
            name: &registration.name,
            email: &registration.email,
            password: &registration.password,
        };
        let url = self.endpoint(&["auth", "register"]);
        self.execute(self.request(Method::POST, url, None).json(&body))?;
        Ok(())
    }

    fn profile(&self, session: &Session) -> Result<Profile, ApiError> {
        let url = self.endpoint(&["auth", "profile"]);
        let value = self.execute_json(self.request(Method::GET, url, Some(session)))?;
        Ok(wire::profile_from_value(&value))
    }

    fn list_expenses(&self, session: &Session) -> Result<Vec<ExpenseRecord>, ApiError> {
        let url = self.endpoint(&["expenses"]);
        let value = self.execute_json(self.request(Method::GET, url, Some(session)))?;
        Ok(wire::expenses_from_value(&value))
    }

    fn create_expense(
        &self,
        session: &Session,
        draft: &ExpenseDraft,
    ) -> Result<ExpenseRecord, ApiError> {
        let body = wire::CreateExpenseBody {
            title: &draft.title,
            amount: to_json_number(draft.amount),
            category: draft.category.as_str(),
        };
        let url = self.endpoint(&["expenses"]);
        let value = self.execute_json(self.request(Method::POST, url, Some(session)).json(&body))?;
        wire::expense_from_value(&value)
            .ok_or_else(|| ApiError::Decode("created expense is not an object".into()))
    }

    fn delete_expense(&self, session: &Session, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["expenses", id]);
        self.execute(self.request(Method::DELETE, url, Some(session)))?;
        Ok(())
    }

    fn summary(&self, session: &Session) -> Result<BudgetSummary, ApiError> {
        let mut url = self.endpoint(&["expenses", "summary"]);
        // Defeat intermediary caches; the total must be fresh after a mutation.
        url.query_pairs_mut()
            .append_pair("_", &chrono::Utc::now().timestamp_millis().to_string());
        let value = self.execute_json(self.request(Method::GET, url, Some(session)))?;
        Ok(wire::summary_from_value(&value))
    }

    fn set_limit(&self, session: &Session, limit: Decimal) -> Result<(), ApiError> {
        let body = wire::LimitBody {
            limit: to_json_number(limit),
        };
        let url = self.endpoint(&["auth", "limit"]);
        self.execute(self.request(Method::POST, url, Some(session)).json(&body))?;
        Ok(())
    }
}

pub(crate) fn api_base(api_url: &str) -> Result<Url> {
    let root = api_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{root}/api"))
        .with_context(|| format!("Invalid API URL: {api_url}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Invalid API URL: {api_url}");
    }
    Ok(url)
}

fn to_json_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
