//! External-identity callback parsing.
//!
//! The auth server finishes its Google flow by redirecting with `token`,
//! `user`, and `error` query parameters (`error` is mutually exclusive with
//! the other two). Input can be the full redirect URL, a bare query string,
//! or a pasted raw token.

/// Parameters carried by an external-identity callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: Option<String>,
    /// The user id the redirect names. Informational only: the session is
    /// always committed with the validated server user record instead.
    pub user: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none() && self.error.is_none()
    }
}

/// Parses pasted callback input into its parameters.
pub fn parse_callback_input(input: &str) -> CallbackParams {
    let value = input.trim();
    if value.is_empty() {
        return CallbackParams::default();
    }

    if let Ok(url) = url::Url::parse(value) {
        return from_pairs(url.query_pairs().map(|(k, v)| (k.to_string(), v.to_string())));
    }

    if value.contains("token=") || value.contains("error=") {
        let pairs = url::form_urlencoded::parse(value.trim_start_matches('?').as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()));
        return from_pairs(pairs);
    }

    // Bare paste: treat the whole input as the token.
    CallbackParams {
        token: Some(value.to_string()),
        user: None,
        error: None,
    }
}

fn from_pairs(pairs: impl Iterator<Item = (String, String)>) -> CallbackParams {
    let mut params = CallbackParams::default();
    for (key, value) in pairs {
        match key.as_str() {
            "token" => params.token = Some(value),
            "user" => params.user = Some(value),
            "error" => params.error = Some(value),
            _ => {}
        }
    }
    params
}
