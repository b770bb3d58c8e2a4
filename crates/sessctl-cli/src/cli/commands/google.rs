//! Google (external-identity) login flow.
//!
//! The server's `/auth/google/login` flow ends with a redirect back to the
//! server's own page carrying `token`/`user`/`error` query parameters; its
//! redirect target is fixed, so the result reaches the terminal by pasting
//! the redirect URL (or just the token). The token is exchanged through
//! `/auth/validate-token` and the session is committed with the
//! server-returned user record, never the `user` id named in the URL.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use sessctl_core::api::AuthClient;
use sessctl_core::callback;
use sessctl_core::session::SessionController;
use sessctl_core::store::SessionStore;

pub async fn login(base_url: &str) -> Result<()> {
    let client = AuthClient::new(base_url);
    let auth_url = client.google_login_url();

    println!("To log in with Google:");
    println!();
    println!("  1. A browser window will open (or visit the URL below)");
    println!("  2. Log in with your Google account and authorize access");
    println!("  3. Paste the redirect URL (or just the token) back here");
    println!();
    println!("Login URL:");
    println!("  {auth_url}");
    println!();

    // Try to open browser (best effort, skip in tests)
    if std::env::var("SESSCTL_NO_BROWSER").is_err() {
        let _ = open::that(&auth_url);
    }

    print!("Paste the redirect URL (or token): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let params = callback::parse_callback_input(&input);

    if let Some(error) = params.error {
        anyhow::bail!("Google login error: {error}");
    }
    let Some(token) = params.token else {
        anyhow::bail!("Callback did not include a token");
    };

    // Exchange through the validation endpoint; the `user` id from the URL
    // is never trusted.
    println!("Validating token...");
    let user = client.validate_token(&token).await?;

    let display = if user.name.is_empty() {
        user.email.clone()
    } else {
        user.name.clone()
    };

    let mut controller = SessionController::new(SessionStore::at_default());
    controller.commit(user, token)?;

    println!();
    println!("✓ Google login successful ({display})");
    println!(
        "  Session saved to: {}",
        controller.store_path().display()
    );

    Ok(())
}
