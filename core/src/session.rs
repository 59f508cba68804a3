//! The signed-in session: a bearer token and the user it belongs to.
//!
//! # Design
//! `Session` is a cheap, cloneable handle to shared state. The transport
//! reads the token at the start of every request; only the auth flows write
//! it. Writes are last-write-wins. Persisting the session across restarts is
//! the host's job: read what [`Session::snapshot`] returns, and seed a new
//! handle with [`Session::restore`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::entities::User;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(token: Option<String>, user: Option<User>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState { token, user })),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().token.is_some()
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.read().clone()
    }

    pub fn sign_in(&self, token: String, user: Option<User>) {
        *self.inner.write() = SessionState {
            token: Some(token),
            user,
        };
    }

    pub fn set_user(&self, user: User) {
        self.inner.write().user = Some(user);
    }

    pub fn sign_out(&self) {
        *self.inner.write() = SessionState::default();
    }
}
