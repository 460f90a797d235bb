//! Contact directory commands

use crate::{output, ContactCommands};
use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::Input;
use leadflow_sdk::{LeadflowClient, NewContact};
use tabled::{Table, Tabled};

pub async fn run(
    api_url: &str,
    api_key: Option<&str>,
    cmd: ContactCommands,
    format: &str,
) -> Result<()> {
    let client = LeadflowClient::builder()
        .base_url(api_url)
        .api_key(api_key.map(String::from))
        .build()?;

    match cmd {
        ContactCommands::List => list_contacts(&client, format).await,
        ContactCommands::Add {
            first_name,
            last_name,
            email,
        } => add_contact(&client, first_name, last_name, email).await,
    }
}

async fn list_contacts(client: &LeadflowClient, format: &str) -> Result<()> {
    let contacts = client.list_contacts().await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&contacts)?);
        }
        "yaml" => {
            println!("{}", serde_yaml::to_string(&contacts)?);
        }
        _ => {
            if contacts.is_empty() {
                println!("{}", "No contacts found.".dimmed());
                return Ok(());
            }

            #[derive(Tabled)]
            struct ContactRow {
                #[tabled(rename = "ID")]
                id: i64,
                #[tabled(rename = "Name")]
                name: String,
                #[tabled(rename = "Email")]
                email: String,
                #[tabled(rename = "Company")]
                company: String,
                #[tabled(rename = "Verified")]
                verified: String,
            }

            let rows: Vec<ContactRow> = contacts
                .iter()
                .map(|contact| ContactRow {
                    id: contact.contact_id,
                    name: format!("{} {}", contact.first_name, contact.last_name),
                    email: contact.email_address.clone(),
                    company: contact.company_name.clone().unwrap_or_default(),
                    verified: contact
                        .email_verification_status
                        .clone()
                        .unwrap_or_else(|| "not_verified".to_string()),
                })
                .collect();

            let table = Table::new(rows).to_string();
            println!("{}", table);
        }
    }

    Ok(())
}

async fn add_contact(
    client: &LeadflowClient,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let first_name = prompt_missing(first_name, "First name")?;
    let last_name = prompt_missing(last_name, "Last name")?;
    let email = prompt_missing(email, "Email address")?;

    if first_name.is_empty() || last_name.is_empty() || email.is_empty() {
        bail!("All fields are required.");
    }

    let contact = client
        .create_contact(&NewContact {
            first_name,
            last_name,
            email_address: email,
        })
        .await?;

    output::success(&format!(
        "Added contact {} {} ({})",
        contact.first_name, contact.last_name, contact.email_address
    ));

    Ok(())
}

fn prompt_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}
