pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::error::{Result, UploaderError};
use crate::models::{UploadOutput, UploadRequest};
use crate::services::github::ReleaseAssetClient;
use crate::services::output::ActionOutput;
use crate::services::release_assets::ReleaseAssetService;
use std::sync::Arc;

/// Name of the action output carrying the download URL(s).
pub const OUTPUT_NAME: &str = "browser_download_url";

/// Uploads the requested assets and reports the outcome to `output`.
///
/// On success the download URLs are published once as [`OUTPUT_NAME`]. On
/// failure the error message is reported through `set_failed` and no output
/// is published.
pub async fn run(
    request: &UploadRequest,
    client: Arc<dyn ReleaseAssetClient>,
    output: &dyn ActionOutput,
) -> Result<UploadOutput> {
    let service = ReleaseAssetService::new(client);

    let results = match service.upload_all(request).await {
        Ok(results) => results,
        Err(e) => {
            output.set_failed(&e.to_string());
            return Err(e);
        }
    };

    let upload_output = UploadOutput::from_results(results);
    if let Err(e) = output.set_output(OUTPUT_NAME, &upload_output.to_output_value()) {
        tracing::error!("Failed to write output: {:?}", e);
        let e = UploaderError::Output(e.to_string());
        output.set_failed(&e.to_string());
        return Err(e);
    }

    Ok(upload_output)
}
