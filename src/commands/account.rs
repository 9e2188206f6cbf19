//! Sign-in, sign-out and the notification composer

use anyhow::{Context, Result};

use crate::app::AppState;
use crate::auth::{Route, RouteDecision};
use crate::commands::api_failure;
use crate::shell::{NotificationDraft, Shell};

pub async fn login(app: &AppState, email: &str, password: &str) -> Result<()> {
    if app.gate(Route::Login) == RouteDecision::Redirect(Route::Panel) {
        let name = app.session.current().map(|s| s.name).unwrap_or_default();
        println!("Already signed in as {name}. Run `rizz-admin logout` to switch accounts.");
        return Ok(());
    }

    let session = app
        .api
        .login(email, password)
        .await
        .map_err(|e| api_failure(e, "Login failed. Please check your credentials."))?;
    println!("Signed in as {} ({})", session.name, session.role);
    Ok(())
}

pub fn logout(app: &AppState) -> Result<()> {
    let mut shell = Shell::new(app.session.clone());
    let decision = shell.logout().context("Failed to clear the saved session")?;
    tracing::debug!(?decision, "Panel gate after sign-out");
    println!("Signed out");
    Ok(())
}

pub fn notify(title: String, description: String) -> Result<()> {
    let mut draft = NotificationDraft { title, description };
    let sent = draft.send()?;
    println!("Notification \"{}\" queued", sent.title);
    Ok(())
}
