//! Static route table and the minimal router that applies guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routes are declared once at startup; `requires_auth` never changes after
//! that. The [`Router`] is the routing layer the [`NavigationGuard`] plugs
//! into: every `push` resolves a path, asks the guard, and lands either on the
//! requested route or on the redirect target.
//!
//! ERROR HANDLING
//! ==============
//! Unknown paths and misconfigured redirects come back as [`RouteError`]; the
//! current route is left untouched when a transition fails.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::guard::{Decision, NavigationGuard};

pub const LOGIN_ROUTE: &str = "Login";
pub const CHAT_ROUTE: &str = "Chat";
pub const REPORT_ROUTE: &str = "Report";
pub const HISTORY_ROUTE: &str = "History";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches path: {0}")]
    NotFound(String),
    #[error("unknown route name: {0}")]
    UnknownRoute(String),
    #[error("redirect to {0} was itself redirected")]
    RedirectLoop(String),
}

/// One navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
}

impl Route {
    #[must_use]
    pub fn public(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), requires_auth: false }
    }

    #[must_use]
    pub fn protected(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), requires_auth: true }
    }

    /// Whether `path` matches this route's pattern. `:param` segments match
    /// any single non-empty segment.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let wanted = segments(&self.path);
        let given = segments(strip_suffixes(path));
        wanted.len() == given.len()
            && wanted
                .iter()
                .zip(&given)
                .all(|(pattern, segment)| pattern.starts_with(':') || pattern == segment)
    }
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Ordered set of routes plus the name of the entry route.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    entry: String,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<Route>, entry: impl Into<String>) -> Self {
        Self { routes, entry: entry.into() }
    }

    /// Routes of the chat/report application: a public login page at `/`
    /// and three protected pages.
    #[must_use]
    pub fn default_app() -> Self {
        Self::new(
            vec![
                Route::public("/", LOGIN_ROUTE),
                Route::protected("/chat", CHAT_ROUTE),
                Route::protected("/report", REPORT_ROUTE),
                Route::protected("/history", HISTORY_ROUTE),
            ],
            LOGIN_ROUTE,
        )
    }

    /// First route whose pattern matches `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(path))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    #[must_use]
    pub fn entry_name(&self) -> &str {
        &self.entry
    }

    /// Path of the entry route, falling back to `/` when the entry name is
    /// not in the table.
    #[must_use]
    pub fn entry_path(&self) -> &str {
        self.by_name(&self.entry).map_or("/", |route| route.path.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

/// Where a `push` ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub redirected: bool,
}

/// Tracks the current route and applies the guard to each transition.
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    current: Option<Route>,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard, current: None }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Navigate to `path`, following at most one guard redirect.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] for an unmatched path,
    /// [`RouteError::UnknownRoute`] when the guard names a route that is not in
    /// the table, and [`RouteError::RedirectLoop`] when the redirect target is
    /// itself redirected.
    pub fn push(&mut self, path: &str) -> Result<Navigation, RouteError> {
        let target = self
            .table
            .resolve(path)
            .ok_or_else(|| RouteError::NotFound(path.to_owned()))?;

        let navigation = match self.guard.before_each(target, self.current.as_ref()) {
            Decision::Proceed => Navigation { route: target.clone(), redirected: false },
            Decision::RedirectTo(name) => {
                let fallback = self
                    .table
                    .by_name(&name)
                    .ok_or_else(|| RouteError::UnknownRoute(name.clone()))?;
                if self.guard.before_each(fallback, self.current.as_ref()) != Decision::Proceed {
                    return Err(RouteError::RedirectLoop(name));
                }
                Navigation { route: fallback.clone(), redirected: true }
            }
        };

        self.current = Some(navigation.route.clone());
        Ok(navigation)
    }
}
