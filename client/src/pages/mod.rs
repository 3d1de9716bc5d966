//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and talks to the backend only
//! through the gateway in `SessionContext`. Protected pages are wrapped in
//! `ProtectedRoute` by the router rather than checking auth themselves.

pub mod dashboard;
pub mod funding;
pub mod login;
pub mod resources;
pub mod signup;
