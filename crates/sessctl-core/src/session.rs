//! Session lifecycle: the single source of truth for "is the user
//! authenticated" and the only writer of durable session data.
//!
//! Two states: `Anonymous` and `Authenticated`. Login, registration, or a
//! validated external-identity callback commit a session; logout or a failed
//! server-side confirmation clears it. A generation counter guards the
//! confirm path so a validation that resolves after a concurrent logout can
//! never re-authenticate.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::AuthError;
use crate::store::SessionStore;

/// The authenticated user's record as returned by the auth server.
/// Unknown server fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Whether a password is set on the account.
    #[serde(default)]
    pub has_password: bool,
    /// External-identity (Google) marker. Absent for password-only accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// A complete session: user record plus bearer token. Never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// The two-state session machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Session),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Anonymous => None,
        }
    }
}

/// A confirm captured against the controller's current generation.
///
/// Produced by [`SessionController::begin_confirm`]; hand the validation
/// outcome back to [`SessionController::finish_confirm`]. If the controller
/// changed state in between, the outcome is discarded.
#[derive(Debug)]
pub struct PendingConfirm {
    pub token: String,
    generation: u64,
}

/// How a finished confirm was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    /// The server confirmed the session; still authenticated.
    Confirmed,
    /// The server rejected the token (or the call failed); session cleared.
    Revoked,
    /// The controller changed state while the confirm was in flight;
    /// the outcome was discarded.
    Superseded,
}

/// Owner of the in-memory session and its durable mirror.
pub struct SessionController {
    store: SessionStore,
    state: AuthState,
    generation: u64,
}

impl SessionController {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            state: AuthState::Anonymous,
            generation: 0,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// Returns the path of the durable session file.
    pub fn store_path(&self) -> &std::path::Path {
        self.store.path()
    }

    /// Commits a new session: sets the in-memory state and persists both
    /// durable entries.
    pub fn commit(&mut self, user: User, token: String) -> Result<()> {
        let encoded = serde_json::to_string(&user)?;
        self.store.save(&token, &encoded)?;
        self.state = AuthState::Authenticated(Session { user, token });
        self.generation += 1;
        Ok(())
    }

    /// Clears the in-memory session and both durable entries. Idempotent.
    /// Returns whether durable data was actually removed.
    pub fn clear(&mut self) -> Result<bool> {
        let removed = self.store.clear()?;
        self.state = AuthState::Anonymous;
        self.generation += 1;
        Ok(removed)
    }

    /// Restores the session from durable storage.
    ///
    /// Both entries present and the user record parseable → optimistically
    /// `Authenticated` (the caller should follow up with a confirm). A
    /// malformed user record counts as corrupt: storage is cleared and the
    /// state stays `Anonymous`. Returns whether a session was restored.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(stored) = self.store.load()? else {
            self.state = AuthState::Anonymous;
            return Ok(false);
        };

        match serde_json::from_str::<User>(&stored.user) {
            Ok(user) => {
                self.state = AuthState::Authenticated(Session {
                    user,
                    token: stored.token,
                });
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(%err, "stored user record is corrupt, clearing session");
                self.clear()?;
                Ok(false)
            }
        }
    }

    /// Starts a server-side confirmation of the current session.
    ///
    /// Returns `None` when anonymous. The caller validates the token against
    /// the server and passes the outcome to [`finish_confirm`].
    ///
    /// [`finish_confirm`]: SessionController::finish_confirm
    pub fn begin_confirm(&self) -> Option<PendingConfirm> {
        self.state.session().map(|session| PendingConfirm {
            token: session.token.clone(),
            generation: self.generation,
        })
    }

    /// Applies the outcome of a confirmation.
    ///
    /// The outcome only applies if no commit or clear happened since
    /// [`begin_confirm`]; otherwise it is discarded (`Superseded`). A server
    /// rejection or transport failure demotes to `Anonymous` and wipes
    /// durable storage.
    ///
    /// [`begin_confirm`]: SessionController::begin_confirm
    pub fn finish_confirm(
        &mut self,
        pending: PendingConfirm,
        outcome: Result<User, AuthError>,
    ) -> Result<ConfirmResult> {
        if pending.generation != self.generation {
            tracing::debug!("confirm superseded by a newer session state");
            return Ok(ConfirmResult::Superseded);
        }

        match outcome {
            Ok(_user) => Ok(ConfirmResult::Confirmed),
            Err(err) => {
                tracing::debug!(%err, "session confirmation failed");
                self.clear()?;
                Ok(ConfirmResult::Revoked)
            }
        }
    }
}
