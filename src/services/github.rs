use crate::config::GithubConfig;
use crate::models::{AssetUpload, ReleaseAsset};
use anyhow::{Result, anyhow};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Uploads a single file to a release.
///
/// Errors carry a human readable message which becomes the run's failure reason.
#[async_trait::async_trait]
pub trait ReleaseAssetClient: Send + Sync {
    async fn upload_release_asset(&self, upload: AssetUpload) -> Result<ReleaseAsset>;
}

/// Release asset client backed by the GitHub REST API.
pub struct GithubReleaseClient {
    client: Client,
    upload_url: Url,
    token: Option<String>,
    user_agent: String,
}

impl GithubReleaseClient {
    pub fn new(client: Client, config: &GithubConfig) -> Result<Self> {
        let upload_url = Url::parse(&config.upload_url)
            .map_err(|e| anyhow!("Invalid upload URL '{}': {}", config.upload_url, e))?;

        Ok(Self {
            client,
            upload_url,
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn asset_url(&self, upload: &AssetUpload) -> Result<Url> {
        let release_id = upload.release_id.to_string();
        let mut url = self.upload_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Upload URL '{}' cannot be a base", self.upload_url))?
            .pop_if_empty()
            .extend([
                "repos",
                upload.owner.as_str(),
                upload.repo.as_str(),
                "releases",
                release_id.as_str(),
                "assets",
            ]);
        url.query_pairs_mut().append_pair("name", &upload.name);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ReleaseAssetClient for GithubReleaseClient {
    async fn upload_release_asset(&self, upload: AssetUpload) -> Result<ReleaseAsset> {
        let url = self.asset_url(&upload)?;
        tracing::debug!("POST {}", url);

        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(USER_AGENT, &self.user_agent)
            .header(CONTENT_TYPE, &upload.headers.content_type)
            .header(CONTENT_LENGTH, upload.headers.content_length)
            .body(upload.data);

        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(anyhow!(error_message(response).await));
        }

        let asset = response.json::<ReleaseAsset>().await?;
        Ok(asset)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: Option<String>,
}

/// Builds the failure message for a non-success response.
///
/// GitHub reports errors as `{"message": ..., "errors": [{"code": ...}]}`;
/// anything else falls back to the status line.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };

    if !is_json(&response) {
        return fallback;
    }

    let body = match response.json::<ApiError>().await {
        Ok(body) => body,
        Err(_) => return fallback,
    };

    let Some(message) = body.message.filter(|m| !m.is_empty()) else {
        return fallback;
    };

    let codes: Vec<String> = body.errors.into_iter().filter_map(|e| e.code).collect();
    if codes.is_empty() {
        message
    } else {
        format!("{} ({})", message, codes.join(", "))
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .map(|m| m.essence_str() == mime::APPLICATION_JSON.essence_str())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetHeaders;
    use bytes::Bytes;

    fn client(upload_url: &str) -> GithubReleaseClient {
        let config = GithubConfig {
            upload_url: upload_url.to_string(),
            ..GithubConfig::default()
        };
        GithubReleaseClient::new(Client::new(), &config).unwrap()
    }

    fn upload(name: &str) -> AssetUpload {
        AssetUpload {
            owner: "owner".to_string(),
            repo: "repo".to_string(),
            release_id: 123,
            headers: AssetHeaders {
                content_type: "application/zip".to_string(),
                content_length: 3,
            },
            name: name.to_string(),
            data: Bytes::from_static(b"abc"),
        }
    }

    #[test]
    fn test_asset_url() {
        let url = client("https://uploads.github.com")
            .asset_url(&upload("app.zip"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://uploads.github.com/repos/owner/repo/releases/123/assets?name=app.zip"
        );
    }

    #[test]
    fn test_asset_url_keeps_enterprise_prefix() {
        let url = client("https://ghe.example.com/api/uploads/")
            .asset_url(&upload("my app v1.zip"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/uploads/repos/owner/repo/releases/123/assets?name=my+app+v1.zip"
        );
    }

    #[test]
    fn test_invalid_upload_url() {
        let config = GithubConfig {
            upload_url: "not a url".to_string(),
            ..GithubConfig::default()
        };
        assert!(GithubReleaseClient::new(Client::new(), &config).is_err());
    }
}
