//! Webhook settings commands
//!
//! Drives the webhook editor the way the settings screen does: load the
//! directory, open the editor (blank or seeded from an existing record),
//! prompt for fields, validate, persist through the client, then reload the
//! directory before reporting the result.

use crate::{output, WebhookCommands};
use anyhow::{anyhow, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use leadflow_sdk::LeadflowClient;
use leadflow_webhook::{Submission, WebhookEditor, WebhookRecord};
use tabled::{Table, Tabled};

pub async fn run(
    api_url: &str,
    api_key: Option<&str>,
    cmd: WebhookCommands,
    format: &str,
) -> Result<()> {
    let client = LeadflowClient::builder()
        .base_url(api_url)
        .api_key(api_key.map(String::from))
        .build()?;

    match cmd {
        WebhookCommands::List => list_webhooks(&client, format).await,
        WebhookCommands::Add => add_webhook(&client, format).await,
        WebhookCommands::Edit { id } => edit_webhook(&client, &id, format).await,
        WebhookCommands::Delete { id, force } => delete_webhook(&client, &id, force, format).await,
    }
}

async fn list_webhooks(client: &LeadflowClient, format: &str) -> Result<()> {
    let webhooks = client.list_webhooks().await?;
    render_directory(&webhooks, format)
}

fn render_directory(webhooks: &[WebhookRecord], format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(webhooks)?);
        }
        "yaml" => {
            println!("{}", serde_yaml::to_string(webhooks)?);
        }
        _ => {
            if webhooks.is_empty() {
                println!("{}", "No webhooks configured.".dimmed());
                return Ok(());
            }

            #[derive(Tabled)]
            struct WebhookRow {
                #[tabled(rename = "ID")]
                id: String,
                #[tabled(rename = "URL")]
                url: String,
                #[tabled(rename = "Events")]
                events: String,
                #[tabled(rename = "Headers")]
                headers: usize,
            }

            let rows: Vec<WebhookRow> = webhooks
                .iter()
                .map(|webhook| WebhookRow {
                    id: webhook.id.clone().unwrap_or_default(),
                    url: webhook.url.clone(),
                    events: webhook.events.join(", "),
                    headers: webhook
                        .to_draft()
                        .headers
                        .iter()
                        .filter(|row| row.is_complete())
                        .count(),
                })
                .collect();

            let table = Table::new(rows).to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

async fn add_webhook(client: &LeadflowClient, format: &str) -> Result<()> {
    let mut editor = WebhookEditor::new();
    editor.open_create()?;

    let record = match drive_editor(&mut editor)? {
        Some(record) => record,
        None => {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    };

    match client.create_webhook(&record).await {
        Ok(saved) => {
            // Reload the directory before the editor closes so the view
            // already reflects the save.
            let webhooks = client.list_webhooks().await?;
            render_directory(&webhooks, format)?;
            editor.complete_submit()?;
            output::success(&format!(
                "Created webhook {}",
                saved.id.unwrap_or_default()
            ));
            Ok(())
        }
        Err(err) => {
            editor.fail_submit()?;
            Err(err.into())
        }
    }
}

async fn edit_webhook(client: &LeadflowClient, id: &str, format: &str) -> Result<()> {
    let webhooks = client.list_webhooks().await?;
    let record = webhooks
        .into_iter()
        .find(|webhook| webhook.id.as_deref() == Some(id))
        .ok_or_else(|| anyhow!("No webhook with id {id}"))?;

    let mut editor = WebhookEditor::new();
    editor.open_edit(record)?;

    let merged = match drive_editor(&mut editor)? {
        Some(record) => record,
        None => {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    };

    match client.update_webhook(&merged).await {
        Ok(_) => {
            let webhooks = client.list_webhooks().await?;
            render_directory(&webhooks, format)?;
            editor.complete_submit()?;
            output::success(&format!("Updated webhook {id}"));
            Ok(())
        }
        Err(err) => {
            editor.fail_submit()?;
            Err(err.into())
        }
    }
}

async fn delete_webhook(client: &LeadflowClient, id: &str, force: bool, format: &str) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete webhook {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    }

    client.delete_webhook(id).await?;
    let webhooks = client.list_webhooks().await?;
    render_directory(&webhooks, format)?;
    output::success(&format!("Deleted webhook {id}"));

    Ok(())
}

/// Prompt for draft fields until validation passes or the user gives up.
///
/// Returns the normalized record ready to persist, leaving the editor in its
/// submitting state, or `None` when the user cancelled (editor closed).
fn drive_editor(editor: &mut WebhookEditor) -> Result<Option<WebhookRecord>> {
    loop {
        prompt_fields(editor)?;

        match editor.begin_submit()? {
            Submission::Accepted(record) => return Ok(Some(record)),
            Submission::Rejected(errors) => {
                println!();
                println!("{}", "Please fix the following:".red().bold());
                for (field, message) in errors.iter() {
                    println!("  {} {}", format!("{field}:").red(), message);
                }

                let retry = Confirm::new()
                    .with_prompt("Edit again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    editor.close();
                    return Ok(None);
                }
            }
        }
    }
}

fn prompt_fields(editor: &mut WebhookEditor) -> Result<()> {
    let draft = editor
        .draft()
        .ok_or_else(|| anyhow!("editor is not open"))?
        .clone();

    let url: String = Input::new()
        .with_prompt("Webhook URL")
        .with_initial_text(draft.url)
        .allow_empty(true)
        .interact_text()?;
    editor.set_url(url)?;

    let events: String = Input::new()
        .with_prompt("Events (comma separated)")
        .with_initial_text(draft.events)
        .allow_empty(true)
        .interact_text()?;
    editor.set_events(events)?;

    prompt_headers(editor)
}

fn prompt_headers(editor: &mut WebhookEditor) -> Result<()> {
    println!("{}", "Headers".bold());

    let mut index = 0;
    loop {
        let rows = editor.draft().map(|draft| draft.headers.len()).unwrap_or(0);
        if index >= rows {
            let add = Confirm::new()
                .with_prompt("Add another header?")
                .default(false)
                .interact()?;
            if !add {
                break;
            }
            editor.add_header()?;
        }

        let row = editor
            .draft()
            .and_then(|draft| draft.headers.get(index))
            .cloned()
            .unwrap_or_default();

        let key: String = Input::new()
            .with_prompt(format!("Header {} key", index + 1))
            .with_initial_text(row.key)
            .allow_empty(true)
            .interact_text()?;
        editor.set_header_key(index, key)?;

        let value: String = Input::new()
            .with_prompt(format!("Header {} value", index + 1))
            .with_initial_text(row.value)
            .allow_empty(true)
            .interact_text()?;
        editor.set_header_value(index, value)?;

        index += 1;
    }

    // Drop rows the user blanked out; the trailing entry row always stays.
    loop {
        let Some(draft) = editor.draft() else { break };
        let Some(position) = draft.headers.iter().position(|row| row.is_blank()) else {
            break;
        };
        if draft.headers.len() == 1 {
            break;
        }
        editor.remove_header(position)?;
    }

    Ok(())
}
