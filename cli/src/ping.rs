use anyhow::{Context, Result};
use mealsync_core::{HttpClient, ReqwestClient};

/// GET the server root and print what it answers.
pub async fn ping(server: &str) -> Result<()> {
    let client = ReqwestClient::new().context("Failed to create HTTP client")?;

    let body = client
        .get_text(server)
        .await
        .with_context(|| format!("Server at {server} did not answer"))?;

    println!("{}", body);

    Ok(())
}
