//! Basic usage example: log in, run a calculation, print the report.

use numera_client::{NumeraClient, Result};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("numera_client=debug")
        .init();

    let mut builder = NumeraClient::builder()
        .base_url(std::env::var("NUMERA_BASE_URL").unwrap_or_default())
        .api_key(std::env::var("NUMERA_API_KEY").unwrap_or_default());
    if let Ok(secret) = std::env::var("NUMERA_SIGNING_SECRET") {
        builder = builder.signing_secret(secret);
    }
    let client = builder.build()?;

    let session = client
        .auth()
        .login("demo-user", "demo@example.com", "password")
        .await?;
    println!("Logged in as: {}", session.user);

    let report = client
        .compatibility()
        .calculate(
            "demo-user",
            serde_json::json!({
                "person1": {"name": "Ada", "birth_date": "1990-03-14"},
                "person2": {"name": "Alan", "birth_date": "1991-06-23"},
            }),
        )
        .await?;

    println!("Report: {}", serde_json::to_string_pretty(&report).unwrap());

    client.auth().logout("demo-user").await?;
    Ok(())
}
