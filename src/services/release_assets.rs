use crate::error::{Result, UploaderError};
use crate::models::{AssetHeaders, AssetUpload, ResolvedFile, UploadRequest, UploadResult};
use crate::services::github::ReleaseAssetClient;
use crate::services::metadata::MetadataService;
use crate::services::resolver::resolve_asset_paths;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Resolves the asset pattern and uploads each file to the release, one at a time.
pub struct ReleaseAssetService {
    client: Arc<dyn ReleaseAssetClient>,
}

impl ReleaseAssetService {
    pub fn new(client: Arc<dyn ReleaseAssetClient>) -> Self {
        Self { client }
    }

    /// Uploads every file matched by the request.
    ///
    /// Stops at the first failure; nothing uploaded before it is reported.
    pub async fn upload_all(&self, request: &UploadRequest) -> Result<Vec<UploadResult>> {
        info!("🔎 Resolving asset path '{}'", request.asset_path);
        let paths = resolve_asset_paths(&request.asset_path).inspect_err(|e| {
            error!("❌ Failed to resolve '{}': {}", request.asset_path, e);
        })?;

        if paths.is_empty() {
            warn!("No files to upload in '{}'", request.asset_path);
            return Ok(Vec::new());
        }

        info!(
            "📦 Uploading {} file(s) to {}/{} release {}",
            paths.len(),
            request.owner,
            request.repo,
            request.release_id
        );

        let mut results = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            let file = Self::load(path, request).await?;
            let result = self.upload(request, file).await.inspect_err(|e| {
                error!(
                    "❌ Upload {}/{} failed for {}: {}",
                    index + 1,
                    paths.len(),
                    path.display(),
                    e
                );
            })?;
            results.push(result);
        }

        info!("✅ Uploaded {} asset(s)", results.len());
        Ok(results)
    }

    async fn load(path: &Path, request: &UploadRequest) -> Result<ResolvedFile> {
        let contents = tokio::fs::read(path)
            .await
            .map_err(|e| UploaderError::io(path, e))?;
        let meta = MetadataService::derive(
            path,
            request.asset_name.as_deref(),
            request.asset_content_type.as_deref(),
        );

        Ok(ResolvedFile {
            path: PathBuf::from(path),
            name: meta.name,
            content_type: meta.content_type,
            size: contents.len() as u64,
            contents: Bytes::from(contents),
        })
    }

    async fn upload(&self, request: &UploadRequest, file: ResolvedFile) -> Result<UploadResult> {
        info!(
            "📤 {} as '{}' ({}, {} bytes)",
            file.path.display(),
            file.name,
            file.content_type,
            file.size
        );

        let upload = AssetUpload {
            owner: request.owner.clone(),
            repo: request.repo.clone(),
            release_id: request.release_id,
            headers: AssetHeaders {
                content_type: file.content_type,
                content_length: file.size,
            },
            name: file.name,
            data: file.contents,
        };

        let asset = self
            .client
            .upload_release_asset(upload)
            .await
            .map_err(|e| UploaderError::Upload(e.to_string()))?;

        info!("🔗 {}", asset.browser_download_url);
        Ok(UploadResult {
            browser_download_url: asset.browser_download_url,
        })
    }
}
