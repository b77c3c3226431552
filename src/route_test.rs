use std::sync::Arc;

use super::*;
use crate::session::{MemorySession, SessionStore};

fn router_with(session: Arc<MemorySession>) -> Router {
    let guard = NavigationGuard::new(session, LOGIN_ROUTE);
    Router::new(RouteTable::default_app(), guard)
}

// =============================================================
// Route matching
// =============================================================

#[test]
fn route_matches_exact_path() {
    let route = Route::protected("/chat", CHAT_ROUTE);
    assert!(route.matches("/chat"));
    assert!(!route.matches("/chats"));
    assert!(!route.matches("/chat/1"));
}

#[test]
fn route_match_ignores_trailing_slash_query_and_fragment() {
    let route = Route::protected("/history", HISTORY_ROUTE);
    assert!(route.matches("/history/"));
    assert!(route.matches("/history?page=2"));
    assert!(route.matches("/history#top"));
}

#[test]
fn root_route_matches_only_root() {
    let route = Route::public("/", LOGIN_ROUTE);
    assert!(route.matches("/"));
    assert!(route.matches(""));
    assert!(!route.matches("/chat"));
}

#[test]
fn param_segment_matches_any_single_segment() {
    let route = Route::protected("/report/:id", REPORT_ROUTE);
    assert!(route.matches("/report/42"));
    assert!(!route.matches("/report"));
    assert!(!route.matches("/report/42/extra"));
}

// =============================================================
// RouteTable
// =============================================================

#[test]
fn default_app_table_marks_only_login_public() {
    let table = RouteTable::default_app();
    assert_eq!(table.entry_name(), LOGIN_ROUTE);
    assert_eq!(table.entry_path(), "/");
    let public: Vec<_> = table.iter().filter(|r| !r.requires_auth).map(|r| r.name.as_str()).collect();
    assert_eq!(public, vec![LOGIN_ROUTE]);
}

#[test]
fn resolve_and_by_name_find_routes() {
    let table = RouteTable::default_app();
    assert_eq!(table.resolve("/report").map(|r| r.name.as_str()), Some(REPORT_ROUTE));
    assert_eq!(table.by_name(HISTORY_ROUTE).map(|r| r.path.as_str()), Some("/history"));
    assert!(table.resolve("/missing").is_none());
    assert!(table.by_name("Missing").is_none());
}

#[test]
fn entry_path_falls_back_to_root_when_entry_is_unknown() {
    let table = RouteTable::new(vec![Route::protected("/chat", CHAT_ROUTE)], "Nowhere");
    assert_eq!(table.entry_path(), "/");
}

// =============================================================
// Router
// =============================================================

#[test]
fn push_to_protected_without_session_lands_on_login() {
    let mut router = router_with(Arc::new(MemorySession::new()));
    let nav = router.push("/chat").unwrap();
    assert!(nav.redirected);
    assert_eq!(nav.route.name, LOGIN_ROUTE);
    assert_eq!(router.current().map(|r| r.name.as_str()), Some(LOGIN_ROUTE));
}

#[test]
fn push_to_protected_with_session_proceeds() {
    let mut router = router_with(Arc::new(MemorySession::with_token("tok")));
    let nav = router.push("/history").unwrap();
    assert!(!nav.redirected);
    assert_eq!(nav.route.name, HISTORY_ROUTE);
}

#[test]
fn push_follows_session_changes() {
    let session = Arc::new(MemorySession::new());
    let mut router = router_with(session.clone());

    assert!(router.push("/report").unwrap().redirected);
    session.login("tok");
    assert!(!router.push("/report").unwrap().redirected);
    session.logout();
    assert!(router.push("/report").unwrap().redirected);
}

#[test]
fn push_unknown_path_keeps_current_route() {
    let mut router = router_with(Arc::new(MemorySession::with_token("tok")));
    router.push("/chat").unwrap();
    assert_eq!(router.push("/nope"), Err(RouteError::NotFound("/nope".to_owned())));
    assert_eq!(router.current().map(|r| r.name.as_str()), Some(CHAT_ROUTE));
}

#[test]
fn push_reports_unknown_redirect_target() {
    let table = RouteTable::new(vec![Route::protected("/chat", CHAT_ROUTE)], LOGIN_ROUTE);
    let guard = NavigationGuard::new(Arc::new(MemorySession::new()), LOGIN_ROUTE);
    let mut router = Router::new(table, guard);
    assert_eq!(router.push("/chat"), Err(RouteError::UnknownRoute(LOGIN_ROUTE.to_owned())));
    assert!(router.current().is_none());
}

#[test]
fn push_detects_protected_entry_route() {
    let table = RouteTable::new(
        vec![Route::protected("/", LOGIN_ROUTE), Route::protected("/chat", CHAT_ROUTE)],
        LOGIN_ROUTE,
    );
    let session: Arc<dyn SessionStore> = Arc::new(MemorySession::new());
    let mut router = Router::new(table, NavigationGuard::new(session, LOGIN_ROUTE));
    assert_eq!(router.push("/chat"), Err(RouteError::RedirectLoop(LOGIN_ROUTE.to_owned())));
}
