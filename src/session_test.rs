use super::*;

#[test]
fn memory_session_default_has_no_token() {
    let session = MemorySession::new();
    assert!(session.token().is_none());
    assert!(active_token(&session).is_none());
}

#[test]
fn memory_session_with_token_reports_it() {
    let session = MemorySession::with_token("abc");
    assert_eq!(session.token().as_deref(), Some("abc"));
    assert_eq!(active_token(&session).as_deref(), Some("abc"));
}

#[test]
fn empty_token_is_not_an_active_session() {
    let session = MemorySession::with_token("");
    assert_eq!(session.token().as_deref(), Some(""));
    assert!(active_token(&session).is_none());
}

#[test]
fn logout_clears_token() {
    let session = MemorySession::with_token("abc");
    session.logout();
    assert!(session.token().is_none());
}

#[test]
fn logout_without_session_is_a_no_op() {
    let session = MemorySession::new();
    session.logout();
    assert!(session.token().is_none());
}

#[test]
fn login_replaces_previous_token() {
    let session = MemorySession::with_token("old");
    session.login("new");
    assert_eq!(session.token().as_deref(), Some("new"));
}
