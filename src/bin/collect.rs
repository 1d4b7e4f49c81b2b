//! Collect the Mimecast graph for one account and print a summary.
//!
//! ```sh
//! export MIMECAST_CLIENT_ID=... MIMECAST_CLIENT_SECRET=... \
//!        MIMECAST_APP_KEY=... MIMECAST_APP_ID=...
//! # optional, defaults to https://us-api.mimecast.com
//! export MIMECAST_BASE_URL=https://eu-api.mimecast.com
//! RUST_LOG=mimecast_client=debug cargo run --bin mimecast-collect
//! ```
//!
//! Logs go to stderr; the JSON summary goes to stdout. The exit status is
//! non-zero when any step failed.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mimecast_connector::auth::Credentials;
use mimecast_connector::client::ClientConfig;
use mimecast_connector::collect;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let credentials =
        Credentials::from_env().context("reading Mimecast credentials from the environment")?;

    let mut config = ClientConfig::builder();
    if let Ok(base_url) = std::env::var("MIMECAST_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let collection = collect(credentials, config.build())
        .await
        .context("validating the invocation")?;

    let summary = collection.summary().await;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !collection.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
