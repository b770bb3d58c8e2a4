//! Endpoint probe command.
//!
//! Fires GETs at the demo endpoints and prints raw status/body, optionally
//! attaching the stored bearer token.

use anyhow::Result;
use sessctl_core::api::AuthError;
use sessctl_core::probe::{DEMO_ENDPOINTS, Prober};
use sessctl_core::session::SessionController;
use sessctl_core::store::SessionStore;

pub async fn run(
    base_url: &str,
    endpoint: Option<&str>,
    all: bool,
    no_token: bool,
) -> Result<()> {
    // The probe shares the session controller's token but never confirms or
    // mutates the session.
    let mut controller = SessionController::new(SessionStore::at_default());
    controller.restore()?;
    let token = if no_token {
        None
    } else {
        controller.session().map(|session| session.token.clone())
    };

    let prober = Prober::new(base_url);

    if all {
        for endpoint in DEMO_ENDPOINTS {
            // Failures are logged inline; the sweep keeps going.
            let _ = probe_one(&prober, endpoint, token.as_deref()).await;
        }
        return Ok(());
    }

    let Some(endpoint) = endpoint else {
        anyhow::bail!("Please specify an endpoint (e.g. /api/public) or --all");
    };
    probe_one(&prober, endpoint, token.as_deref()).await?;
    Ok(())
}

async fn probe_one(
    prober: &Prober,
    endpoint: &str,
    bearer: Option<&str>,
) -> Result<(), AuthError> {
    let stamp = chrono::Local::now().format("%H:%M:%S");
    let token_note = if bearer.is_some() {
        "with token"
    } else {
        "without token"
    };
    println!("[{stamp}] Testing GET {endpoint} ({token_note})...");

    match prober.get(endpoint, bearer).await {
        Ok(outcome) => {
            println!("Status: {}", outcome.status);
            println!("Response: {}", outcome.body);
            println!("---");
            Ok(())
        }
        Err(err) => {
            println!("Error: {err}");
            println!("---");
            Err(err)
        }
    }
}
