//! Entry point for the catalog synchronization CLI.

use std::process::ExitCode;

use clap::Parser;
use i18n_catalog_sync::cli::Args;
use i18n_catalog_sync::provider::DeepLClient;
use i18n_catalog_sync::sync;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let settings = Args::parse().into_settings();
    let translator = DeepLClient::new(settings.api_key.clone());

    match sync::run(&settings, &translator).await {
        Ok(summary) => {
            for (locale, outcome) in &summary.locales {
                tracing::info!(locale = %locale, outcome = ?outcome, "Locale result");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "Synchronization aborted");
            ExitCode::FAILURE
        }
    }
}
