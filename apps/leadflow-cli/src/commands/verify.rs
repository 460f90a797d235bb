//! Email-verification job commands
//!
//! Verification is two sequential calls: create a job for a set of contacts,
//! then run it. Progress and results land on the contacts server-side.

use crate::{output, VerifyCommands};
use anyhow::Result;
use leadflow_sdk::LeadflowClient;

pub async fn run(
    api_url: &str,
    api_key: Option<&str>,
    cmd: VerifyCommands,
    format: &str,
) -> Result<()> {
    let client = LeadflowClient::builder()
        .base_url(api_url)
        .api_key(api_key.map(String::from))
        .build()?;

    match cmd {
        VerifyCommands::Create { contact_ids } => create_job(&client, &contact_ids, format).await,
        VerifyCommands::Run { job_id } => run_job(&client, &job_id).await,
    }
}

async fn create_job(client: &LeadflowClient, contact_ids: &[i64], format: &str) -> Result<()> {
    let job = client.create_verification_job(contact_ids).await?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&job)?);
        }
        "yaml" => {
            println!("{}", serde_yaml::to_string(&job)?);
        }
        _ => {
            output::key_value("Job", &job.job_id);
            if let Some(status) = &job.status {
                output::key_value("Status", status);
            }
            output::success(&format!(
                "Queued {} contact(s) for verification",
                contact_ids.len()
            ));
        }
    }

    Ok(())
}

async fn run_job(client: &LeadflowClient, job_id: &str) -> Result<()> {
    client.run_verification_job(job_id).await?;
    output::success(&format!("Verification job {job_id} started"));

    Ok(())
}
