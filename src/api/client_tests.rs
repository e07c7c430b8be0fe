#![allow(clippy::unwrap_used)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

/// What the server saw for one request.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Accept a single connection, record the request and answer with `status`
/// and `body`.
fn serve_once(status: &'static str, body: &'static str) -> (HttpStore, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        let len = headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
            .map_or(0, |(_, v)| v.parse::<usize>().unwrap());
        let mut raw = vec![0; len];
        reader.read_exact(&mut raw).unwrap();

        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(raw).unwrap(),
        }
    });

    let store = HttpStore::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
    (store, handle)
}

fn session() -> Session {
    Session::new("tok-1")
}

// ── Authentication header ─────────────────────────────────────

#[test]
fn test_list_sends_bearer_token() {
    let (store, server) = serve_once("200 OK", r#"[{"_id":"a1","title":"Tea","amount":20,"category":"Food"}]"#);
    let expenses = store.list_expenses(&session()).unwrap();
    let seen = server.join().unwrap();

    assert!(seen.request_line.starts_with("GET /api/expenses "));
    assert_eq!(seen.header("authorization"), Some("Bearer tok-1"));
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id.as_deref(), Some("a1"));
}

#[test]
fn test_login_is_unauthenticated() {
    let (store, server) = serve_once("200 OK", r#"{"token":"fresh"}"#);
    let credentials = Credentials::new("asha@example.com", "secret").unwrap();
    let session = store.login(&credentials).unwrap();
    let seen = server.join().unwrap();

    assert_eq!(session, Session::new("fresh"));
    assert!(seen.request_line.starts_with("POST /api/auth/login "));
    assert_eq!(seen.header("authorization"), None);
    let body = seen.json();
    assert_eq!(body["email"], "asha@example.com");
    assert_eq!(body["password"], "secret");
}

#[test]
fn test_register_is_unauthenticated() {
    let (store, server) = serve_once("201 Created", r#"{"message":"ok"}"#);
    let registration = Registration::new("Asha", "asha@example.com", "secret").unwrap();
    store.register(&registration).unwrap();
    let seen = server.join().unwrap();

    assert!(seen.request_line.starts_with("POST /api/auth/register "));
    assert_eq!(seen.header("authorization"), None);
    assert_eq!(seen.json()["name"], "Asha");
}

// ── Request bodies ────────────────────────────────────────────

#[test]
fn test_create_expense_body() {
    let (store, server) = serve_once(
        "201 Created",
        r#"{"_id":"n1","title":"Coffee","amount":3.5,"category":"Food"}"#,
    );
    let draft = ExpenseDraft {
        title: "Coffee".into(),
        amount: dec!(3.5),
        category: Category::Food,
    };
    let record = store.create_expense(&session(), &draft).unwrap();
    let seen = server.join().unwrap();

    assert!(seen.request_line.starts_with("POST /api/expenses "));
    assert_eq!(seen.header("authorization"), Some("Bearer tok-1"));
    let body = seen.json();
    assert_eq!(body["title"], "Coffee");
    assert_eq!(body["amount"].as_f64(), Some(3.5));
    assert_eq!(body["category"], "Food");
    assert_eq!(record.id.as_deref(), Some("n1"));
    assert_eq!(record.amount, dec!(3.5));
}

#[test]
fn test_set_limit_body_and_empty_response() {
    let (store, server) = serve_once("200 OK", "");
    store.set_limit(&session(), dec!(2500)).unwrap();
    let seen = server.join().unwrap();

    assert!(seen.request_line.starts_with("POST /api/auth/limit "));
    assert_eq!(seen.header("authorization"), Some("Bearer tok-1"));
    assert_eq!(seen.json()["limit"].as_f64(), Some(2500.0));
}

#[test]
fn test_delete_path_and_empty_response() {
    let (store, server) = serve_once("204 No Content", "");
    store.delete_expense(&session(), "a1").unwrap();
    let seen = server.join().unwrap();

    assert!(seen.request_line.starts_with("DELETE /api/expenses/a1 "));
    assert_eq!(seen.header("authorization"), Some("Bearer tok-1"));
}

#[test]
fn test_summary_carries_cache_buster() {
    let (store, server) = serve_once("200 OK", r#"{"total":"120.50","limit":1000}"#);
    let summary = store.summary(&session()).unwrap();
    let seen = server.join().unwrap();

    assert!(seen.request_line.starts_with("GET /api/expenses/summary?_="));
    assert_eq!(summary.total_spent, dec!(120.50));
    assert_eq!(summary.limit, dec!(1000));
}

// ── Error mapping ─────────────────────────────────────────────

#[test]
fn test_401_is_unauthorized() {
    let (store, server) = serve_once("401 Unauthorized", r#"{"message":"Token expired"}"#);
    let err = store.list_expenses(&session()).unwrap_err();
    server.join().unwrap();

    assert!(err.is_unauthorized());
    assert_eq!(err.user_message("Could not load"), "Token expired");
}

#[test]
fn test_other_errors_are_remote() {
    let (store, server) = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#);
    let err = store.delete_expense(&session(), "a1").unwrap_err();
    server.join().unwrap();

    match err {
        ApiError::Remote { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("boom"));
        }
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[test]
fn test_error_without_json_body_has_no_message() {
    let (store, server) = serve_once("400 Bad Request", "not json");
    let err = store.set_limit(&session(), dec!(1)).unwrap_err();
    server.join().unwrap();

    assert_eq!(err.user_message("Limit update failed"), "Limit update failed");
}

#[test]
fn test_unreachable_server_is_transport() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpStore::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
    let err = store.list_expenses(&session()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
