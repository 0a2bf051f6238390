//! Identity provider port.
//!
//! The sync layer consumes exactly two things from the identity platform:
//! the current owner identifier and a session-change notification stream.
//! The sign-in protocol itself is delegated; [`StaticIdentity`] is the
//! in-process session holder used for embedding and tests.

use crate::core::OwnerId;
use async_trait::async_trait;
use tokio::sync::watch;

/// An authenticated session resolved from the identity platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub owner: OwnerId,
    pub email: Option<String>,
}

impl Session {
    pub fn new(owner: OwnerId) -> Self {
        Self { owner, email: None }
    }

    pub fn with_email(owner: OwnerId, email: impl Into<String>) -> Self {
        Self {
            owner,
            email: Some(email.into()),
        }
    }
}

/// Source of the current owner and of session-change notifications.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the currently authenticated actor; `None` without raising
    /// when nobody is signed in.
    async fn current_session(&self) -> Option<Session>;

    /// Stream of session changes: sign-in, sign-out, and identity switch
    /// all publish a new value.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

/// Session holder backed by a watch channel.
///
/// Holds whatever session the embedding application last pushed via
/// [`sign_in`](Self::sign_in) / [`sign_out`](Self::sign_out).
pub struct StaticIdentity {
    tx: watch::Sender<Option<Session>>,
}

impl StaticIdentity {
    /// Starts signed out.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Starts with an active session.
    pub fn signed_in(session: Session) -> Self {
        let (tx, _rx) = watch::channel(Some(session));
        Self { tx }
    }

    pub fn sign_in(&self, session: Session) {
        log::info!("session change: signed in as {}", session.owner);
        // The session must be stored even before anyone subscribes; a
        // plain send drops the value when every receiver is gone.
        self.tx.send_replace(Some(session));
    }

    pub fn sign_out(&self) {
        log::info!("session change: signed out");
        self.tx.send_replace(None);
    }
}

impl Default for StaticIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_session(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}
