//! HTTP client for the auth server.
//!
//! Consumes (never implements) the auth contract: login, register,
//! set-password, and token validation. Every response is a JSON envelope
//! `{success, message, data}`; a `success:false` message is surfaced
//! verbatim, anything else (network failure, non-JSON body) is a generic
//! connection error. No call is retried.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::session::User;

/// Client-side minimum password length, counted in UTF-16 units. A UX
/// shortcut only; the server remains the authority.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors from the auth client, by the three client-visible categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Client-side validation failure; nothing was sent.
    Validation(String),
    /// The server answered `{success:false}`; message is verbatim.
    Rejected(String),
    /// Network failure or a response that was not the expected JSON.
    Transport(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(message) | AuthError::Rejected(message) => {
                write!(f, "{message}")
            }
            AuthError::Transport(detail) => write!(f, "connection error: {detail}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// The server's uniform response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct SessionData {
    user: User,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValidateData {
    user: User,
}

/// A freshly issued session from login or registration.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub user: User,
    pub token: String,
    /// Server-supplied success message, shown verbatim.
    pub message: Option<String>,
}

/// Auth API client. Holds one reqwest client for all calls.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `/auth/login` with email + password.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let envelope: Envelope<SessionData> = self
            .post(
                "/auth/login",
                &json!({ "email": email, "password": password }),
                None,
            )
            .await?;
        Self::issued(envelope)
    }

    /// POST `/auth/register` with name, email, and password.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthError> {
        let envelope: Envelope<SessionData> = self
            .post(
                "/auth/register",
                &json!({ "name": name, "email": email, "password": password }),
                None,
            )
            .await?;
        Self::issued(envelope)
    }

    /// POST `/auth/set-password` with bearer auth.
    ///
    /// Enforces the client-side minimum length before any network call.
    /// Returns the server message on success.
    pub async fn set_password(
        &self,
        token: &str,
        password: &str,
    ) -> Result<Option<String>, AuthError> {
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }

        let envelope: Envelope<serde_json::Value> = self
            .post(
                "/auth/set-password",
                &json!({ "password": password }),
                Some(token),
            )
            .await?;
        if envelope.success {
            Ok(envelope.message)
        } else {
            Err(AuthError::Rejected(rejection_message(envelope.message)))
        }
    }

    /// POST `/auth/validate-token`. Returns the server's user record when
    /// the token is valid.
    pub async fn validate_token(&self, token: &str) -> Result<User, AuthError> {
        let envelope: Envelope<ValidateData> = self
            .post("/auth/validate-token", &json!({ "token": token }), None)
            .await?;
        if envelope.success {
            envelope
                .data
                .map(|data| data.user)
                .ok_or_else(|| AuthError::Transport("response missing user data".to_string()))
        } else {
            Err(AuthError::Rejected(rejection_message(envelope.message)))
        }
    }

    /// The external-identity login entry point (a browser redirect, not an
    /// API call).
    pub fn google_login_url(&self) -> String {
        format!("{}/auth/google/login", self.base_url)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        bearer: Option<&str>,
    ) -> Result<Envelope<T>, AuthError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "auth request");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))
    }

    fn issued(envelope: Envelope<SessionData>) -> Result<IssuedSession, AuthError> {
        if envelope.success {
            let data = envelope
                .data
                .ok_or_else(|| AuthError::Transport("response missing session data".to_string()))?;
            Ok(IssuedSession {
                user: data.user,
                token: data.token,
                message: envelope.message,
            })
        } else {
            Err(AuthError::Rejected(rejection_message(envelope.message)))
        }
    }
}

fn rejection_message(message: Option<String>) -> String {
    message.unwrap_or_else(|| "request rejected by server".to_string())
}
