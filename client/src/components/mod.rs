//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared auth state from the `SessionContext` provided at
//! the app root.

pub mod route_guard;
