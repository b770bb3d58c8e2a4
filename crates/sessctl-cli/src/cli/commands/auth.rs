//! Password auth command handlers: login, register, set-password, logout.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use sessctl_core::api::{AuthClient, IssuedSession};
use sessctl_core::session::SessionController;
use sessctl_core::store::SessionStore;

pub async fn login(base_url: &str, email: &str, password: Option<&str>) -> Result<()> {
    let password = read_secret(password, "Password: ")?;
    let client = AuthClient::new(base_url);

    let issued = client.login(email, &password).await?;
    commit_issued(issued)
}

pub async fn register(
    base_url: &str,
    name: &str,
    email: &str,
    password: Option<&str>,
) -> Result<()> {
    let password = read_secret(password, "Password: ")?;
    let client = AuthClient::new(base_url);

    let issued = client.register(name, email, &password).await?;
    commit_issued(issued)
}

pub async fn set_password(base_url: &str, password: Option<&str>) -> Result<()> {
    let mut controller = SessionController::new(SessionStore::at_default());
    if !controller.restore()? {
        anyhow::bail!("Not logged in (no stored session).");
    }
    let Some(session) = controller.session() else {
        anyhow::bail!("Not logged in (no stored session).");
    };
    let token = session.token.clone();

    let password = read_secret(password, "New password: ")?;
    let client = AuthClient::new(base_url);

    let message = client.set_password(&token, &password).await?;
    println!(
        "✓ {}",
        message.unwrap_or_else(|| "Password updated".to_string())
    );
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut controller = SessionController::new(SessionStore::at_default());
    let removed = controller.clear()?;

    if removed {
        println!("✓ Logged out");
        println!(
            "  Session removed from: {}",
            controller.store_path().display()
        );
    } else {
        println!("Not logged in (no stored session).");
    }

    Ok(())
}

/// Commits a freshly issued session and reports it.
fn commit_issued(issued: IssuedSession) -> Result<()> {
    let IssuedSession {
        user,
        token,
        message,
    } = issued;

    let display = if user.name.is_empty() {
        user.email.clone()
    } else {
        user.name.clone()
    };

    let mut controller = SessionController::new(SessionStore::at_default());
    controller.commit(user, token)?;

    if let Some(message) = message {
        println!("{message}");
    }
    println!("✓ Logged in as {display}");
    println!(
        "  Session saved to: {}",
        controller.store_path().display()
    );
    Ok(())
}

/// Returns the flag value, or prompts and reads one line from stdin.
/// Works both interactively and piped.
fn read_secret(flag: Option<&str>, prompt: &str) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value.to_string());
    }

    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let value = input.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }
    Ok(value)
}
