//! Influencer detail editor, invite form and deep links

use anyhow::{Result, anyhow};

use crate::api::MutationAck;
use crate::app::AppState;
use crate::commands::{InfluencerCommand, api_failure, lists};
use crate::dates;
use crate::influencer::editor::{LOAD_FAILED, REGENERATE_FAILED, REVOKE_FAILED, UPDATE_FAILED};
use crate::influencer::invite::INVITE_FAILED;
use crate::influencer::{EditorState, InfluencerEditor, InviteForm, MutationOutcome, invite_link};
use crate::listing::LoadOutcome;

pub async fn run(app: &AppState, command: InfluencerCommand) -> Result<()> {
    match command {
        InfluencerCommand::Show { id } => {
            let editor = open(app, &id).await?;
            print!("{}", describe(&editor.snapshot(), &app.config.ui.deep_link_scheme));
            Ok(())
        }
        InfluencerCommand::Update {
            id,
            access_type,
            start_date,
            expiry_date,
        } => {
            let editor = open(app, &id).await?;
            editor.edit_form(|form| {
                if let Some(access_type) = access_type {
                    form.access_type = Some(access_type);
                }
                if let Some(start) = start_date {
                    form.start_date = start;
                }
                if let Some(expiry) = expiry_date {
                    form.expiry_date = expiry;
                }
            });
            let outcome = editor
                .update()
                .await
                .map_err(|e| api_failure(e, UPDATE_FAILED))?;
            finish(app, outcome).await
        }
        InfluencerCommand::Revoke { id, comment } => {
            let editor = open(app, &id).await?;
            let outcome = editor
                .revoke(&comment)
                .await
                .map_err(|e| api_failure(e, REVOKE_FAILED))?;
            finish(app, outcome).await
        }
        InfluencerCommand::RegenerateLink { id } => {
            let editor = open(app, &id).await?;
            let outcome = editor
                .regenerate_link()
                .await
                .map_err(|e| api_failure(e, REGENERATE_FAILED))?;
            if let Some(link) = editor.snapshot().invite_link(&app.config.ui.deep_link_scheme) {
                println!("Invite link: {link}");
            }
            finish(app, outcome).await
        }
        InfluencerCommand::Delete { id, source } => {
            let ack = app
                .api
                .delete_influencer(&id, source)
                .await
                .map_err(|e| api_failure(e, "Delete failed"))?;
            tracing::info!(influencer_id = %id, %source, "Influencer deleted");
            println!("{}", ack.message.unwrap_or_else(|| "Deleted successfully".into()));
            Ok(())
        }
        InfluencerCommand::Link { token } => {
            link(app, &token);
            Ok(())
        }
    }
}

pub fn link(app: &AppState, token: &str) {
    println!("{}", invite_link(&app.config.ui.deep_link_scheme, token));
}

pub async fn invite(app: &AppState, mut form: InviteForm) -> Result<()> {
    let ack = form
        .submit(&app.api)
        .await
        .map_err(|e| api_failure(e, INVITE_FAILED))?;
    print!("{}", invite_summary(&ack, &app.config.ui.deep_link_scheme));
    Ok(())
}

fn invite_summary(ack: &MutationAck, scheme: &str) -> String {
    let mut out = format!(
        "{}\n",
        ack.message.as_deref().unwrap_or("Invite sent successfully!")
    );
    if let Some(token) = ack.invite_token() {
        out.push_str(&format!("Invite link: {}\n", invite_link(scheme, &token)));
    }
    out
}

async fn open(app: &AppState, id: &str) -> Result<InfluencerEditor> {
    let editor = InfluencerEditor::new(app.api.clone(), app.config.ui.confirmation_delay);
    match editor.load(id).await {
        LoadOutcome::Applied => Ok(editor),
        LoadOutcome::Failed(message) => Err(anyhow!(message)),
        LoadOutcome::Superseded => Err(anyhow!(LOAD_FAILED)),
    }
}

/// Show the confirmation, hold it for the configured delay, then go back to
/// the list.
async fn finish(app: &AppState, outcome: MutationOutcome) -> Result<()> {
    println!("{}", outcome.message);
    outcome.settle().await;
    lists::influencers(app, 1, None).await
}

fn describe(state: &EditorState, scheme: &str) -> String {
    let Some(inf) = &state.influencer else {
        return "Influencer details are not loaded\n".to_string();
    };
    let or_dash = |s: &str| if s.trim().is_empty() { "-".to_string() } else { s.to_string() };

    let mut lines = vec![
        format!("Name:         {}", or_dash(&inf.name)),
        format!("Email:        {}", or_dash(&inf.email)),
        format!("Instagram:    {}", or_dash(&inf.instagram)),
        format!("TikTok:       {}", or_dash(&inf.tiktok)),
        format!(
            "Access type:  {}",
            state.form.access_type.map_or_else(|| "-".to_string(), |a| a.to_string())
        ),
        format!("Start date:   {}", or_dash(&state.form.start_date)),
        format!("Expiry date:  {}", or_dash(&state.form.expiry_date)),
    ];

    if let Some(lc) = state.lifecycle {
        lines.push(format!("State:        {:?}", lc.state()));
        let mut actions = Vec::new();
        if lc.editable() {
            actions.push("update");
        }
        if lc.can_revoke() {
            actions.push("revoke");
        }
        if lc.can_regenerate_link() {
            actions.push("regenerate-link");
        }
        let actions = if actions.is_empty() {
            "none (read-only)".to_string()
        } else {
            actions.join(", ")
        };
        lines.push(format!("Actions:      {actions}"));
    }

    if let Some(rev) = &state.revocation {
        lines.push(format!("Revoked at:   {}", dates::display_timestamp(&rev.revoked_at)));
        lines.push(format!("Revoked by:   {}", rev.revoked_by.as_deref().unwrap_or("-")));
        lines.push(format!("Comment:      {}", rev.comment));
    }

    if let Some(link) = state.invite_link(scheme) {
        lines.push(format!("Invite link:  {link}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
