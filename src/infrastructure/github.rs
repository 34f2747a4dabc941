use crate::config::GithubConfig;
use crate::services::github::{GithubReleaseClient, ReleaseAssetClient};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

pub fn setup_client(config: &GithubConfig) -> Result<Arc<dyn ReleaseAssetClient>> {
    if config.token.is_none() {
        warn!("⚠️  GITHUB_TOKEN is not set, uploads will be sent unauthenticated");
    }

    info!("🐙 GitHub API: {} (uploads: {})", config.api_url, config.upload_url);

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let client = GithubReleaseClient::new(http, config)?;
    Ok(Arc::new(client))
}
