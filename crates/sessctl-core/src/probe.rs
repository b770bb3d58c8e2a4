//! Ad-hoc endpoint prober.
//!
//! Fires single GET requests at the demo endpoints, optionally attaching the
//! bearer token, and hands back raw status/body for inspection. Stateless:
//! no retries, no parsing beyond pass-through.

use crate::api::AuthError;

/// The demonstration endpoints exposed by the auth server.
pub const DEMO_ENDPOINTS: &[&str] = &[
    "/api/public",
    "/api/protected",
    "/api/user-data",
    "/api/mixed",
];

/// Raw result of probing one endpoint.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub endpoint: String,
    pub status: u16,
    /// Whether the status was in the 2xx range.
    pub ok: bool,
    /// Response body, passed through unparsed.
    pub body: String,
}

/// One-shot GET prober sharing the session controller's token.
pub struct Prober {
    http: reqwest::Client,
    base_url: String,
}

impl Prober {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// GETs an endpoint, attaching `Authorization: Bearer <token>` when a
    /// token is given. Non-2xx statuses are outcomes, not errors; only
    /// transport failures error.
    pub async fn get(
        &self,
        endpoint: &str,
        bearer: Option<&str>,
    ) -> Result<ProbeOutcome, AuthError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.http.get(&url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        Ok(ProbeOutcome {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            ok: status.is_success(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn probe_attaches_bearer_token_when_given() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/protected"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let prober = Prober::new(server.uri());
        let outcome = prober.get("/api/protected", Some("tok-1")).await.unwrap();
        assert_eq!(outcome.status, 200);
        assert!(outcome.ok);
        assert_eq!(outcome.body, r#"{"success":true}"#);
    }

    #[tokio::test]
    async fn probe_without_token_sends_no_auth_header() {
        let server = MockServer::start().await;
        // Matches only requests that carry an Authorization header; the
        // probe below must not hit it.
        Mock::given(method("GET"))
            .and(path("/api/protected"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/protected"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"success":false}"#))
            .mount(&server)
            .await;

        let prober = Prober::new(server.uri());
        let outcome = prober.get("/api/protected", None).await.unwrap();
        assert_eq!(outcome.status, 401);
        assert!(!outcome.ok);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let prober = Prober::new("http://127.0.0.1:9");
        let err = prober.get("/api/public", None).await.unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
    }
}
