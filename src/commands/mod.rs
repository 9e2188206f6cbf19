//! # Commands Module
//!
//! The `rizz-admin` command line. Each subcommand maps onto one screen or
//! action of the admin panel:
//!
//! - `account`: sign-in, sign-out, notification composer
//! - `lists`: users, influencers, token usage, interactive browse
//! - `influencer`: detail editor, invite form, deep links
//!
//! Everything except `login` and `influencer link` sits behind the auth
//! gate and refuses to run without a saved session.

pub mod account;
pub mod influencer;
pub mod lists;
pub mod table;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};

use crate::api::{AccessType, Source};
use crate::app::AppState;
use crate::auth::{Route, RouteDecision};
use crate::error::AdminError;

#[derive(Parser, Debug)]
#[command(name = "rizz-admin")]
#[command(about = "Admin console for users, influencers and token usage", long_about = None)]
#[command(
    after_help = "Environment:\n  ADMIN_API_BASE_URL   Admin API root (required)\n  ADMIN_SESSION_FILE   Saved session location\n  RUST_LOG             Log filter (default rizz_admin=info)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with admin credentials
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the saved session
    Logout,
    /// List registered users
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List influencers
    Influencers {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Browse influencers interactively; each input line is the search box
    Browse,
    /// Inspect or change one influencer
    Influencer {
        #[command(subcommand)]
        command: InfluencerCommand,
    },
    /// Invite a new influencer
    Invite {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        instagram: String,
        #[arg(long, default_value = "")]
        tiktok: String,
        /// LIMITED or UNLIMITED
        #[arg(long)]
        access_type: AccessType,
        /// YYYY-MM-DD, required for LIMITED
        #[arg(long)]
        start_date: Option<String>,
        /// YYYY-MM-DD, required for LIMITED
        #[arg(long)]
        expiry_date: Option<String>,
    },
    /// List model token usage
    Tokens {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Compose a push notification
    Notify {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum InfluencerCommand {
    Show {
        id: String,
    },
    Update {
        id: String,
        #[arg(long)]
        access_type: Option<AccessType>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        expiry_date: Option<String>,
    },
    Revoke {
        id: String,
        #[arg(long)]
        comment: String,
    },
    RegenerateLink {
        id: String,
    },
    Delete {
        id: String,
        /// INFLUENCER or INVITE
        #[arg(long)]
        source: Source,
    },
    /// Print the onboarding deep link for an invite token
    Link {
        token: String,
    },
}

pub async fn run(cli: Cli, app: AppState) -> Result<()> {
    match cli.command {
        Command::Login { email, password } => account::login(&app, &email, &password).await,
        Command::Logout => account::logout(&app),
        Command::Influencer {
            command: InfluencerCommand::Link { token },
        } => {
            influencer::link(&app, &token);
            Ok(())
        }
        command => {
            require_panel(&app)?;
            run_protected(command, &app).await
        }
    }
}

async fn run_protected(command: Command, app: &AppState) -> Result<()> {
    match command {
        Command::Users { page } => lists::users(app, page).await,
        Command::Influencers { page, search } => {
            lists::influencers(app, page, search.as_deref()).await
        }
        Command::Browse => lists::browse(app).await,
        Command::Tokens { page } => lists::tokens(app, page).await,
        Command::Influencer { command } => influencer::run(app, command).await,
        Command::Invite {
            name,
            email,
            instagram,
            tiktok,
            access_type,
            start_date,
            expiry_date,
        } => {
            let form = crate::influencer::InviteForm {
                name,
                email,
                instagram,
                tiktok,
                access: crate::influencer::AccessForm {
                    access_type: Some(access_type),
                    start_date: start_date.unwrap_or_default(),
                    expiry_date: expiry_date.unwrap_or_default(),
                },
            };
            influencer::invite(app, form).await
        }
        Command::Notify { title, description } => account::notify(title, description),
        Command::Login { .. } | Command::Logout => Ok(()),
    }
}

/// Refuse protected commands without a session.
pub fn require_panel(app: &AppState) -> Result<()> {
    match app.gate(Route::Panel) {
        RouteDecision::Render => Ok(()),
        RouteDecision::Redirect(route) => bail!(
            "Not signed in (redirected to {}). Run `rizz-admin login` first.",
            route.path()
        ),
        RouteDecision::Loading => bail!("Session has not been read yet"),
    }
}

/// Operator-facing error for a failed API action.
pub(crate) fn api_failure(error: AdminError, fallback: &str) -> anyhow::Error {
    tracing::error!(error = %error, "Admin API call failed");
    if error.is_unauthorized() {
        return anyhow!("Session expired. Run `rizz-admin login` to sign in again.");
    }
    anyhow!(error.user_message(fallback))
}
