use super::*;
use serde_json::json;

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials::new("a@b.com", "secret1");
    let debug = format!("{creds:?}");
    assert!(debug.contains("a@b.com"));
    assert!(!debug.contains("secret1"));
}

#[test]
fn credentials_serialize_as_email_and_password() {
    let creds = Credentials::new("a@b.com", "secret1");
    let value = serde_json::to_value(&creds).unwrap();
    assert_eq!(value, json!({ "email": "a@b.com", "password": "secret1" }));
}

// =============================================================================
// decode_login_response
// =============================================================================

#[test]
fn decode_reads_token_and_user() {
    let resp = decode_login_response(r#"{"token":"tok-1","user":{"id":1}}"#).unwrap();
    assert_eq!(resp.token, "tok-1");
    assert_eq!(resp.user, json!({ "id": 1 }));
    assert!(resp.extra.is_empty());
}

#[test]
fn decode_keeps_extra_fields() {
    let resp = decode_login_response(r#"{"token":"tok-1","user":{"id":1},"expires_in":3600}"#).unwrap();
    assert_eq!(resp.extra.get("expires_in"), Some(&json!(3600)));
}

#[test]
fn decode_missing_token_is_error() {
    let err = decode_login_response(r#"{"user":{"id":1}}"#).unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[test]
fn decode_missing_user_is_error() {
    let err = decode_login_response(r#"{"token":"tok-1"}"#).unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[test]
fn decode_non_json_is_error() {
    let err = decode_login_response("<html>").unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn login_response_serializes_extra_flat() {
    let mut resp = LoginResponse::new("tok-1", json!({ "id": 1 }));
    resp.extra.insert("role".to_owned(), json!("admin"));
    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value, json!({ "token": "tok-1", "user": { "id": 1 }, "role": "admin" }));
}

// =============================================================================
// failure_message
// =============================================================================

#[test]
fn failure_message_prefers_json_message() {
    let msg = failure_message(StatusCode::UNAUTHORIZED, r#"{"message":"Invalid credentials"}"#);
    assert_eq!(msg, "Invalid credentials");
}

#[test]
fn failure_message_falls_back_to_json_error() {
    let msg = failure_message(StatusCode::BAD_REQUEST, r#"{"error":"email required"}"#);
    assert_eq!(msg, "email required");
}

#[test]
fn failure_message_uses_text_body() {
    let msg = failure_message(StatusCode::INTERNAL_SERVER_ERROR, "  database down \n");
    assert_eq!(msg, "database down");
}

#[test]
fn failure_message_empty_body_uses_reason() {
    let msg = failure_message(StatusCode::UNAUTHORIZED, "");
    assert_eq!(msg, "Unauthorized");
}

#[test]
fn status_error_exposes_status() {
    let err = TransportError::Status { status: 401, message: "nope".to_owned() };
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "login rejected with status 401: nope");
}

// =============================================================================
// HttpTransport
// =============================================================================

#[test]
fn from_config_builds_login_url() {
    let transport = HttpTransport::from_config(&SessionConfig::default());
    assert_eq!(transport.login_url(), "http://127.0.0.1:3000/api/auth/login");
}
