//! Entrypoint for sfdc2openapi
//!
//! 1. Parse arguments and resolve credentials.
//! 2. Initialize logging.
//! 3. Load the OpenAPI template.
//! 4. Authenticate and fetch the object's describe result.
//! 5. Specialize the template and write the document.

use anyhow::Context;
use clap::Parser;
use sfdc2openapi::{cli::Args, config::Config};
use sfdc2openapi_core::{
    client::SalesforceClient, pipeline::generate, template::OpenApiTemplate,
};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::resolve(Args::parse()).context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // --- 3. Load Template ---
    let template = match &config.template_path {
        Some(path) => OpenApiTemplate::from_path(path),
        None => OpenApiTemplate::bundled(),
    }
    .context("Failed to load OpenAPI template")?;

    // --- 4. Authenticate ---
    let client = SalesforceClient::connect(
        config.target.domain.clone(),
        config.target.version.clone(),
        &config.credentials,
        config.debug,
    )
    .await
    .context("Failed to authenticate with Salesforce")?;

    // --- 5. Generate ---
    let document = generate(&client, &template, &config.target, &config.output)
        .await
        .with_context(|| format!("Failed to generate OpenAPI for {}", config.target.object))?;

    if !document.warnings().is_empty() {
        warn!(
            count = document.warnings().len(),
            "Some fields had unmapped types and were typed as string."
        );
    }
    info!(
        object = %config.target.object,
        output = %config.output.display(),
        "Done."
    );
    Ok(())
}
