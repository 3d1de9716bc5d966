//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical guard and redirect behavior. The
//! decision logic lives here as plain async functions over the gateway so the
//! `ProtectedRoute` component only wires it to signals.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::api::{AuthGateway, VerifyOutcome};
use crate::net::error::AuthError;
use crate::net::transport::Transport;
use crate::state::auth::AuthState;
use crate::util::storage::KeyValueStorage;

pub const LOGIN_PATH: &str = "/login";
pub const DEFAULT_AFTER_LOGIN: &str = "/dashboard";
pub const UNREACHABLE_MESSAGE: &str = "Unable to authenticate. Please check your connection.";

/// What a protected route should render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Verification pending; render a loading indicator.
    Checking,
    /// Render the protected content.
    Allowed,
    /// Definitely logged out; navigate to the login view.
    Redirect,
    /// Backend unreachable; render the message with a Retry affordance.
    Unreachable(String),
}

/// Decide access for a protected route.
///
/// A session set aside by an earlier unreachable check is restored first,
/// so Retry and re-entering any protected route behave the same. With no
/// credential after that, the answer is an immediate redirect without a
/// network call. Otherwise the credential is checked live; a rejection has
/// already cleared the session by the time `Redirect` is returned.
pub async fn resolve_guard<T: Transport, S: KeyValueStorage>(gateway: &AuthGateway<T, S>) -> GuardState {
    if gateway.store().restore_suspended() {
        log::debug!("guard: restored suspended session");
    }
    if gateway.store().credential().is_none() {
        return GuardState::Redirect;
    }
    match gateway.check().await {
        VerifyOutcome::Valid => GuardState::Allowed,
        VerifyOutcome::Invalid => GuardState::Redirect,
        VerifyOutcome::Unreachable(err) => {
            log::debug!("guard: backend unreachable: {err}");
            GuardState::Unreachable(UNREACHABLE_MESSAGE.to_owned())
        }
    }
}

/// Liveness flag for a mounted view; flipped by `on_cleanup`.
#[derive(Clone, Debug)]
pub struct ViewLiveness(Arc<AtomicBool>);

impl ViewLiveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn dispose(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for ViewLiveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Await `fut` and yield its output only if the view is still mounted.
pub async fn run_while_alive<F: Future>(liveness: &ViewLiveness, fut: F) -> Option<F::Output> {
    let output = fut.await;
    liveness.is_alive().then_some(output)
}

/// Login URL that returns to `from` after a successful login.
pub fn login_redirect_path(from: &str) -> String {
    match accept_next(from) {
        Some(path) => {
            let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
            format!("{LOGIN_PATH}?next={encoded}")
        }
        None => LOGIN_PATH.to_owned(),
    }
}

/// Where to go after login: `next` if it is a same-origin path, otherwise
/// the dashboard.
pub fn after_login_path(next: Option<&str>) -> String {
    next.and_then(accept_next).unwrap_or(DEFAULT_AFTER_LOGIN).to_owned()
}

fn accept_next(path: &str) -> Option<&str> {
    let path = path.trim();
    let same_origin = path.starts_with('/') && !path.starts_with("//") && !path.contains('\\');
    let is_auth_page = path == LOGIN_PATH || path.starts_with("/login?") || path == "/signup";
    (same_origin && !is_auth_page && path != "/").then_some(path)
}

/// Message for a failed form submission. Failures a resubmit can fix say so.
pub fn failure_notice(err: &AuthError) -> String {
    if err.is_retryable() {
        format!("{err} Please try again.")
    } else {
        err.to_string()
    }
}

/// Whether an auth page should send an already-authenticated user onward.
pub fn should_redirect_authenticated(state: &AuthState) -> bool {
    !state.loading && state.user.is_some()
}

/// Send an already-signed-in visitor of an auth page to `target`.
pub fn install_auth_redirect<F>(auth: RwSignal<AuthState>, target: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_authenticated(&auth.get()) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
