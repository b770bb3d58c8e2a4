//! Status command: restore the stored session, confirm it against the
//! server, and render the resulting view.

use anyhow::Result;
use sessctl_core::api::AuthClient;
use sessctl_core::session::{ConfirmResult, SessionController};
use sessctl_core::store::SessionStore;
use sessctl_core::view::{self, Section, ViewModel};

pub async fn run(base_url: &str) -> Result<()> {
    let mut controller = SessionController::new(SessionStore::at_default());
    if !controller.restore()? {
        println!("Not logged in.");
        return Ok(());
    }

    let Some(pending) = controller.begin_confirm() else {
        println!("Not logged in.");
        return Ok(());
    };

    let client = AuthClient::new(base_url);
    let outcome = client.validate_token(&pending.token).await;

    match controller.finish_confirm(pending, outcome)? {
        ConfirmResult::Confirmed => {
            render(&view::reconcile(controller.state()));
        }
        ConfirmResult::Revoked => {
            println!("Stored session is no longer valid. Logged out.");
        }
        ConfirmResult::Superseded => {}
    }

    Ok(())
}

fn render(vm: &ViewModel) {
    let Some(profile) = &vm.profile else {
        println!("Not logged in.");
        return;
    };

    println!("✓ Signed in as {} <{}>", profile.display_name, profile.email);
    println!(
        "  Password: {}",
        if profile.password_set { "set" } else { "not set" }
    );
    println!(
        "  Google:   {}",
        if profile.google_connected {
            "connected"
        } else {
            "not connected"
        }
    );
    if vm.is_visible(Section::SetPassword) {
        println!("  Run `sessctl set-password` to add a password to this account.");
    }
}
