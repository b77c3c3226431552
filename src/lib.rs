//! # sessiongate
//!
//! Session-aware HTTP access layer for a browser-style application.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two components share one piece of state, the session token:
//!
//! - [`guard::NavigationGuard`] decides whether a route transition may proceed
//!   or must be sent back to the entry route.
//! - [`net::client::HttpClient`] attaches the bearer token to every outbound
//!   call, unwraps successful payloads, and turns failures into user
//!   notifications. A 401 tears the session down and schedules a forced
//!   navigation to the entry route.
//!
//! Both read the session through the [`session::SessionStore`] trait; only the
//! client's expiry handler ever writes to it.

pub mod config;
pub mod guard;
pub mod navigate;
pub mod net;
pub mod notify;
pub mod route;
pub mod session;

pub use config::{ClientConfig, ConfigError, EnvMode};
pub use guard::{Decision, NavigationGuard};
pub use navigate::{Navigator, SESSION_EXPIRED_REDIRECT_DELAY};
pub use net::client::HttpClient;
pub use net::error::{ErrorKind, HttpError};
pub use notify::{Notifier, Severity};
pub use route::{Route, RouteError, RouteTable, Router};
pub use session::{MemorySession, SessionStore};
