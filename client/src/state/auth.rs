//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. `SessionContext` is provided once at the
//! app root; it pairs the reactive `AuthState` with the gateway that owns the
//! session store.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::api::AuthGateway;
use crate::net::transport::BrowserTransport;
use crate::net::types::User;
use crate::state::session::{Session, SessionStore};
use crate::util::storage::BrowserStorage;

/// Authentication state tracking the current user and loading status.
///
/// This is a render snapshot of the session store, refreshed through
/// [`SessionContext::sync`] after each gateway operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State before the persisted session has been read.
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    pub fn from_session(session: &Session) -> Self {
        Self { user: session.user().cloned().filter(|_| session.is_authenticated()), loading: false }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// The gateway wired to `fetch` and `localStorage`.
pub type PortalGateway = AuthGateway<BrowserTransport, BrowserStorage>;

/// Build the browser gateway and rehydrate the persisted session.
pub fn portal_gateway(config: ClientConfig) -> PortalGateway {
    let store = SessionStore::new(BrowserStorage);
    let restored = store.rehydrate();
    log::debug!("session rehydrated: {restored:?}");
    AuthGateway::new(BrowserTransport::new(config.clone()), store, config)
}

/// App-wide auth context.
///
/// The gateway is browser-only; during SSR the context carries just the
/// `AuthState` signal, which stays pending.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub auth: RwSignal<AuthState>,
    #[cfg(feature = "hydrate")]
    gateway: StoredValue<PortalGateway, LocalStorage>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            auth: RwSignal::new(AuthState::pending()),
            #[cfg(feature = "hydrate")]
            gateway: StoredValue::new_local(portal_gateway(ClientConfig::load())),
        }
    }

    /// A handle to the shared gateway, or `None` once the app is torn down.
    #[cfg(feature = "hydrate")]
    pub fn gateway(&self) -> Option<PortalGateway> {
        self.gateway.try_get_value()
    }

    /// Copy the store's current session into the `auth` signal.
    pub fn sync(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(session) = self.gateway.try_with_value(|g| g.store().snapshot()) {
                let _ = self.auth.try_set(AuthState::from_session(&session));
            }
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
