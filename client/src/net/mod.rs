//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `api` the auth gateway on top of it,
//! `error` the normalized failure taxonomy, and `types` the wire schema.

pub mod api;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod transport;
pub mod types;
