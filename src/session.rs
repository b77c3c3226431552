//! Session state shared by the navigation guard and the HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login flows live outside this crate. They hand over a token by writing it
//! into a [`SessionStore`]; everything here only reads it, except the HTTP
//! client's expiry handler, which calls [`SessionStore::logout`].
//!
//! DESIGN
//! ======
//! A present, non-empty token is the only authorization signal. There is no
//! expiry timestamp and no refresh token.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{PoisonError, RwLock};

/// Read/clear contract over the current session.
pub trait SessionStore: Send + Sync {
    /// Current token, if any. May return an empty string; callers should go
    /// through [`active_token`].
    fn token(&self) -> Option<String>;

    /// Clear the session. No return value, no failure mode.
    fn logout(&self);
}

/// The token from `store`, treating an empty string as no session.
pub fn active_token(store: &dyn SessionStore) -> Option<String> {
    store.token().filter(|token| !token.is_empty())
}

/// In-memory session store, the default backing for the CLI and tests.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    /// Install a token obtained by a login flow.
    pub fn login(&self, token: impl Into<String>) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.into());
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn logout(&self) {
        let mut slot = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            tracing::info!("session cleared");
        }
    }
}
