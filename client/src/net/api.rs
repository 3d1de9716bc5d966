//! Auth gateway: session intents translated into backend calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway owns the [`SessionStore`] and is its only writer. Pages call
//! `login`/`signup`/`logout`; the route guard calls `check`. Every outcome is
//! normalized into [`AuthError`] or [`VerifyOutcome`] before it leaves here.
//!
//! ERROR HANDLING
//! ==============
//! Verification is fail-closed: anything but a 2xx reply leaves the caller
//! unauthenticated. Logout never fails; the session is cleared before the
//! backend is told.
//!
//! ORDERING
//! ========
//! Each operation takes a session ticket before its request. A reply that
//! arrives after the session changed is discarded (`AuthError::Superseded`)
//! instead of resurrecting a cleared session.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::error::{self, AuthError};
use super::transport::{ApiReply, ApiRequest, Transport};
use super::types::{
    Achievement, AuthResponse, Course, FundingStatistics, Insight, LoginRequest, MessageReply, NewResource,
    Notification, PortalStats, Resource, ResourceQuery, SignupProfile, SuccessStory, TimeRange, User, UserProfile,
    VerifyResponse,
};
use crate::config::ClientConfig;
use crate::state::session::{SessionStore, SessionTicket};
use crate::util::storage::KeyValueStorage;

/// Result of a live credential check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The backend accepted the credential.
    Valid,
    /// No credential, or the backend rejected it. The session is cleared.
    Invalid,
    /// The backend could not be reached or did not answer in time.
    Unreachable(AuthError),
}

impl VerifyOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// What to do with the session when verification cannot reach the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unreachable {
    /// Remove it everywhere.
    Clear,
    /// Drop it from memory only, keeping the persisted copy for a retry.
    Suspend,
}

pub struct AuthGateway<T, S> {
    transport: T,
    store: SessionStore<S>,
    config: ClientConfig,
}

impl<T: Clone, S> Clone for AuthGateway<T, S> {
    fn clone(&self) -> Self {
        Self { transport: self.transport.clone(), store: self.store.clone(), config: self.config.clone() }
    }
}

impl<T: Transport, S: KeyValueStorage> AuthGateway<T, S> {
    pub fn new(transport: T, store: SessionStore<S>, config: ClientConfig) -> Self {
        Self { transport, store, config }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Log in with email and password via `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for a rejected login, `ServiceError` for other
    /// backend failures, `NetworkError` when unreachable, `Superseded` when
    /// the session changed (e.g. a logout) before the reply arrived. The
    /// session is untouched on every error.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let ticket = self.store.ticket();
        let body = serde_json::to_value(LoginRequest { email, password })
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;
        let reply = self.send(ApiRequest::post("/auth/login").with_json(body)).await?;
        if !reply.is_success() {
            return Err(error::login_failure(reply.status, &reply.body));
        }
        self.establish(ticket, &reply)
    }

    /// Register a new account via `POST /auth/signup` and log it in.
    ///
    /// # Errors
    ///
    /// `DuplicateAccount`, `ValidationError`, `ServiceError`, `NetworkError`
    /// or `Superseded`; the session is untouched on every error.
    pub async fn signup(&self, profile: &SignupProfile) -> Result<User, AuthError> {
        let ticket = self.store.ticket();
        let body = serde_json::to_value(profile).map_err(|e| AuthError::ValidationError(e.to_string()))?;
        let reply = self.send(ApiRequest::post("/auth/signup").with_json(body)).await?;
        if !reply.is_success() {
            return Err(error::signup_failure(reply.status, &reply.body));
        }
        self.establish(ticket, &reply)
    }

    fn establish(&self, ticket: SessionTicket, reply: &ApiReply) -> Result<User, AuthError> {
        let auth: AuthResponse = reply.json().map_err(|e| error::malformed_response(reply.status, &e))?;
        if auth.token.trim().is_empty() {
            return Err(AuthError::ServiceError {
                status: reply.status,
                message: "malformed response: empty token".to_owned(),
            });
        }
        if !self.store.set_session_if_current(ticket, auth.user.clone(), auth.token) {
            log::info!("discarding auth reply: session changed while the request was in flight");
            return Err(AuthError::Superseded);
        }
        Ok(auth.user)
    }

    /// Clear the session, then best-effort notify `POST /auth/logout`.
    pub async fn logout(&self) {
        if let Some(token) = self.end_session() {
            self.notify_logout(token).await;
        }
    }

    /// The synchronous half of [`Self::logout`]: clear the session and hand
    /// back the credential it held, if any.
    pub fn end_session(&self) -> Option<String> {
        let credential = self.store.credential();
        self.store.clear_session();
        credential
    }

    /// Tell the backend `token` is done. Failures are logged, never returned.
    pub async fn notify_logout(&self, token: String) {
        match self.send(ApiRequest::post("/auth/logout").with_bearer(token)).await {
            Ok(reply) if reply.is_success() => {}
            Ok(reply) => log::warn!("logout request failed: {}", reply.status),
            Err(e) => log::warn!("logout request failed: {e}"),
        }
    }

    /// Ask `GET /auth/verify` whether the stored credential is still valid.
    ///
    /// Fail-closed: any non-2xx reply, network failure or timeout clears the
    /// session and returns `false`.
    pub async fn verify(&self) -> bool {
        self.round_trip(Unreachable::Clear).await.is_valid()
    }

    /// Like [`Self::verify`], but distinguishes an unreachable backend. In
    /// that case the in-memory session is dropped and the persisted copy kept,
    /// so a retry can rehydrate it.
    pub async fn check(&self) -> VerifyOutcome {
        self.round_trip(Unreachable::Suspend).await
    }

    async fn round_trip(&self, on_unreachable: Unreachable) -> VerifyOutcome {
        loop {
            let Some(token) = self.store.credential() else {
                return VerifyOutcome::Invalid;
            };
            let ticket = self.store.ticket();
            let request = ApiRequest::get("/auth/verify")
                .with_bearer(token.clone())
                .with_timeout(self.config.verify_timeout);
            let result = self.transport.send(request).await;

            // Answer describes a credential that is no longer the current one.
            if !self.store.is_current(ticket) {
                log::debug!("session changed during verification; checking again");
                continue;
            }

            return match result {
                Ok(reply) if reply.is_success() => {
                    if let Ok(VerifyResponse { user: Some(user) }) = reply.json::<VerifyResponse>() {
                        if self.store.user().as_ref() != Some(&user) {
                            self.store.refresh_user(&token, user);
                        }
                    }
                    VerifyOutcome::Valid
                }
                Ok(reply) => {
                    log::info!("credential rejected by backend: {}", reply.status);
                    self.store.clear_if_current(ticket);
                    VerifyOutcome::Invalid
                }
                Err(e) => {
                    log::warn!("credential verification failed: {e}");
                    match on_unreachable {
                        Unreachable::Clear => self.store.clear_if_current(ticket),
                        Unreachable::Suspend => self.store.suspend_if_current(ticket),
                    };
                    VerifyOutcome::Unreachable(e.into())
                }
            };
        }
    }

    /// Fetch the dashboard profile from `GET /user/profile`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_profile(&self) -> Result<UserProfile, AuthError> {
        self.authorized_json(ApiRequest::get("/user/profile")).await
    }

    /// Fetch notifications from `GET /notifications`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_notifications(&self) -> Result<Vec<Notification>, AuthError> {
        self.authorized_json(ApiRequest::get("/notifications")).await
    }

    /// Mark one notification read via `PUT /notifications/{id}/read`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn mark_notification_read(&self, id: &str) -> Result<(), AuthError> {
        self.authorized(ApiRequest::put(format!("/notifications/{id}/read")))
            .await
            .map(|_| ())
    }

    /// Fetch the filtered resource directory from `GET /resources`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, AuthError> {
        self.authorized_json(ApiRequest::get(query.path())).await
    }

    /// Fetch resource category names from `GET /categories`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_categories(&self) -> Result<Vec<String>, AuthError> {
        self.authorized_json(ApiRequest::get("/categories")).await
    }

    /// Fetch directory counters from `GET /stats`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_stats(&self) -> Result<PortalStats, AuthError> {
        self.authorized_json(ApiRequest::get("/stats")).await
    }

    /// Submit a directory entry via `POST /add-resource`. Returns the
    /// backend's confirmation message, if it sent one.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn add_resource(&self, resource: &NewResource) -> Result<Option<String>, AuthError> {
        let body = serde_json::to_value(resource).map_err(|e| AuthError::ValidationError(e.to_string()))?;
        let reply = self.authorized(ApiRequest::post("/add-resource").with_json(body)).await?;
        Ok(reply.json::<MessageReply>().ok().and_then(|r| r.message))
    }

    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_achievements(&self) -> Result<Vec<Achievement>, AuthError> {
        self.authorized_json(ApiRequest::get("/user/achievements")).await
    }

    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_insights(&self) -> Result<Vec<Insight>, AuthError> {
        self.authorized_json(ApiRequest::get("/insights")).await
    }

    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_courses(&self) -> Result<Vec<Course>, AuthError> {
        self.authorized_json(ApiRequest::get("/courses")).await
    }

    /// Fetch funding awards for `range` from `GET /funding/statistics`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_funding_statistics(&self, range: TimeRange) -> Result<FundingStatistics, AuthError> {
        self.authorized_json(ApiRequest::get(range.path())).await
    }

    /// Fetch the top-funded projects from `GET /funding/success-stories`.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` when logged out or the credential expired,
    /// `ServiceError` or `NetworkError` otherwise.
    pub async fn fetch_success_stories(&self) -> Result<Vec<SuccessStory>, AuthError> {
        self.authorized_json(ApiRequest::get("/funding/success-stories")).await
    }

    async fn authorized_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, AuthError> {
        let reply = self.authorized(request).await?;
        reply.json().map_err(|e| error::malformed_response(reply.status, &e))
    }

    /// Send a bearer-authenticated request.
    ///
    /// # Errors
    ///
    /// `ExpiredSession` without a credential (no request is sent) or on a 401
    /// reply, which also clears the session; `ServiceError` for other non-2xx
    /// replies or an undecodable body; `NetworkError` when unreachable.
    async fn authorized(&self, request: ApiRequest) -> Result<ApiReply, AuthError> {
        let Some(token) = self.store.credential() else {
            return Err(AuthError::ExpiredSession);
        };
        let ticket = self.store.ticket();
        let reply = self.send(request.with_bearer(token)).await?;
        if reply.is_success() {
            return Ok(reply);
        }
        let err = error::data_failure(reply.status, &reply.body);
        if err == AuthError::ExpiredSession && self.store.clear_if_current(ticket) {
            log::info!("credential expired; session cleared");
        }
        Err(err)
    }

    async fn send(&self, mut request: ApiRequest) -> Result<ApiReply, AuthError> {
        if request.timeout.is_none() {
            request.timeout = Some(self.config.request_timeout);
        }
        Ok(self.transport.send(request).await?)
    }
}
