//! HTTP access pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` is the single entry point. Each call runs two explicit stages
//! around the transport: `request::authorize` (request + session → request)
//! and `classify::classify` (failure → kind + display message). `transport`
//! owns the wire, `types` the envelopes, `error` the caller-facing error.

pub mod classify;
pub mod client;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;
