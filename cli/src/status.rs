//! One-line session summary for `authshell status`.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use authshell::Session;

/// `anonymous`, or `authenticated` plus whether the user identity is known.
/// A session restored from storage carries only its token.
pub fn status_line(session: Option<&Session>) -> String {
    match session {
        None => "anonymous".to_owned(),
        Some(Session { user: Some(_), .. }) => "authenticated (identity known)".to_owned(),
        Some(Session { user: None, .. }) => "authenticated (identity unknown)".to_owned(),
    }
}
