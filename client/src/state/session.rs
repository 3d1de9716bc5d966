//! Session store: the single source of truth for who is logged in.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth gateway is the only writer. Route guards and pages read through
//! `AuthState` snapshots. The in-memory session is mirrored into durable
//! storage under two keys so a page reload can rehydrate it.
//!
//! ORDERING
//! ========
//! Every mutation bumps a generation counter. Async operations take a
//! [`SessionTicket`] before their request and apply results through the
//! `*_if_current` methods, so a `clear_session` that lands while a login is
//! in flight cannot be overwritten by that login's late reply.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::net::types::User;
use crate::util::storage::KeyValueStorage;

/// Storage key holding the bearer credential.
pub const CREDENTIAL_KEY: &str = "token";
/// Storage key holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// In-memory pairing of a credential and the user it authorizes.
///
/// Fields stay private so a user can never be stored without its credential.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    credential: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some() && self.user.is_some()
    }
}

/// Generation captured when an async operation started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionTicket(u64);

/// What `rehydrate` found in durable storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rehydrated {
    /// Both entries were present and valid.
    Restored,
    /// Nothing was persisted.
    Empty,
    /// The entries were inconsistent or unparsable and have been removed.
    Discarded,
}

struct Inner<S> {
    session: RefCell<Session>,
    generation: Cell<u64>,
    storage: S,
}

/// Shared handle to the session. Clones point at the same session.
pub struct SessionStore<S> {
    inner: Rc<Inner<S>>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Create an empty store over `storage`. Call [`Self::rehydrate`] to load
    /// a persisted session.
    pub fn new(storage: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(Session::default()),
                generation: Cell::new(0),
                storage,
            }),
        }
    }

    pub fn credential(&self) -> Option<String> {
        self.inner.session.borrow().credential.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.session.borrow().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn ticket(&self) -> SessionTicket {
        SessionTicket(self.inner.generation.get())
    }

    pub fn is_current(&self, ticket: SessionTicket) -> bool {
        self.inner.generation.get() == ticket.0
    }

    fn bump(&self) {
        self.inner.generation.set(self.inner.generation.get().wrapping_add(1));
    }

    /// Replace the session in memory and in storage.
    ///
    /// A failed persisted write removes both entries rather than leaving one
    /// half of the pair behind; the in-memory session is still replaced.
    pub fn set_session(&self, user: User, credential: String) {
        self.persist(&user, &credential);
        *self.inner.session.borrow_mut() = Session { credential: Some(credential), user: Some(user) };
        self.bump();
    }

    /// Like [`Self::set_session`], but only while `ticket` is current.
    pub fn set_session_if_current(&self, ticket: SessionTicket, user: User, credential: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.set_session(user, credential);
        true
    }

    /// Replace the user record for the session holding `credential`.
    ///
    /// The credential is unchanged, so the generation is not bumped and
    /// operations in flight stay current. Returns `false` without touching
    /// anything when `credential` is no longer the stored one.
    pub fn refresh_user(&self, credential: &str, user: User) -> bool {
        if self.inner.session.borrow().credential.as_deref() != Some(credential) {
            return false;
        }
        self.persist(&user, credential);
        self.inner.session.borrow_mut().user = Some(user);
        true
    }

    /// Remove the session from memory and storage.
    pub fn clear_session(&self) {
        self.remove_persisted();
        *self.inner.session.borrow_mut() = Session::default();
        self.bump();
    }

    pub fn clear_if_current(&self, ticket: SessionTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.clear_session();
        true
    }

    /// Drop the in-memory session but keep the persisted copy, so a later
    /// retry can rehydrate it.
    pub fn suspend(&self) {
        *self.inner.session.borrow_mut() = Session::default();
        self.bump();
    }

    pub fn suspend_if_current(&self, ticket: SessionTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.suspend();
        true
    }

    /// Bring back a session set aside by [`Self::suspend`].
    ///
    /// Only acts when memory is empty and a credential is persisted, so a
    /// plain logged-out state is left alone and in-flight operations keep
    /// their tickets.
    pub fn restore_suspended(&self) -> bool {
        if self.inner.session.borrow().credential.is_some() || self.inner.storage.get(CREDENTIAL_KEY).is_none() {
            return false;
        }
        self.rehydrate() == Rehydrated::Restored
    }

    /// Load the persisted session into memory. Inconsistent or malformed
    /// entries are removed and the session is left empty.
    pub fn rehydrate(&self) -> Rehydrated {
        let storage = &self.inner.storage;
        let outcome = match (storage.get(CREDENTIAL_KEY), storage.get(USER_KEY)) {
            (None, None) => Rehydrated::Empty,
            (Some(credential), Some(raw_user)) if !credential.trim().is_empty() => {
                match serde_json::from_str::<User>(&raw_user) {
                    Ok(user) => {
                        *self.inner.session.borrow_mut() = Session { credential: Some(credential), user: Some(user) };
                        Rehydrated::Restored
                    }
                    Err(e) => {
                        log::warn!("discarding persisted session: unreadable user record: {e}");
                        Rehydrated::Discarded
                    }
                }
            }
            _ => {
                log::warn!("discarding persisted session: incomplete entries");
                Rehydrated::Discarded
            }
        };
        if outcome != Rehydrated::Restored {
            self.remove_persisted();
            *self.inner.session.borrow_mut() = Session::default();
        }
        self.bump();
        outcome
    }

    fn persist(&self, user: &User, credential: &str) {
        let storage = &self.inner.storage;
        let raw_user = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("session not persisted: {e}");
                self.remove_persisted();
                return;
            }
        };
        let written = storage
            .set(CREDENTIAL_KEY, credential)
            .and_then(|()| storage.set(USER_KEY, &raw_user));
        if let Err(e) = written {
            log::warn!("session not persisted: {e}");
            self.remove_persisted();
        }
    }

    fn remove_persisted(&self) {
        self.inner.storage.remove(CREDENTIAL_KEY);
        self.inner.storage.remove(USER_KEY);
    }
}
