//! Navigation guard consulted before every route transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages require a session. The guard only reads the session; it
//! never clears or refreshes it, and never remembers where the user was
//! heading. Unauthenticated users always land on the entry route.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use crate::route::Route;
use crate::session::{SessionStore, active_token};

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    RedirectTo(String),
}

pub struct NavigationGuard {
    session: Arc<dyn SessionStore>,
    entry: String,
}

impl NavigationGuard {
    /// `entry` is the route name unauthenticated users are sent to.
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>, entry: impl Into<String>) -> Self {
        Self { session, entry: entry.into() }
    }

    #[must_use]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Exactly one decision per transition.
    #[must_use]
    pub fn before_each(&self, to: &Route, from: Option<&Route>) -> Decision {
        let from_path = from.map_or("", |route| route.path.as_str());
        if !to.requires_auth {
            tracing::debug!(to = %to.path, from = %from_path, "public route");
            return Decision::Proceed;
        }
        if active_token(self.session.as_ref()).is_some() {
            tracing::debug!(to = %to.path, from = %from_path, "session present");
            Decision::Proceed
        } else {
            tracing::debug!(to = %to.path, from = %from_path, entry = %self.entry, "no session, redirecting");
            Decision::RedirectTo(self.entry.clone())
        }
    }
}
