//! Client-side application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the credential and its persisted copy; `auth` exposes it to
//! the reactive tree; `resources` holds directory filter selections;
//! `funding` turns raw awards into chart buckets and summary cards.

pub mod auth;
pub mod funding;
pub mod resources;
pub mod session;
