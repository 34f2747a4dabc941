use crate::error::{Result, UploaderError};
use crate::models::UploadRequest;
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// Raw action inputs, as the workflow supplies them through `INPUT_*` variables.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ActionInputs {
    /// Target repository as "owner/repo" (default: $GITHUB_REPOSITORY)
    #[arg(long, env = "INPUT_REPOSITORY")]
    pub repository: Option<String>,

    /// Numeric ID of the release to attach assets to
    #[arg(long, env = "INPUT_RELEASE_ID")]
    pub release_id: Option<String>,

    /// File, directory or glob pattern of the assets to upload
    #[arg(long, env = "INPUT_ASSET_PATH")]
    pub asset_path: Option<String>,

    /// Asset name override, applied to every uploaded file
    #[arg(long, env = "INPUT_ASSET_NAME")]
    pub asset_name: Option<String>,

    /// Content type override, applied to every uploaded file
    #[arg(long, env = "INPUT_ASSET_CONTENT_TYPE")]
    pub asset_content_type: Option<String>,
}

impl ActionInputs {
    /// Fall back to the workflow's own repository when none was given.
    pub fn or_default_repository(mut self) -> Self {
        if non_empty(self.repository.clone()).is_none() {
            self.repository = env::var("GITHUB_REPOSITORY").ok();
        }
        self
    }

    /// Coerce the inputs into a validated request.
    pub fn into_request(self) -> Result<UploadRequest> {
        let repository = required(self.repository, "repository")?;
        let (owner, repo) = split_repository(&repository)?;

        let release_id = required(self.release_id, "release_id")?;
        let release_id = release_id.parse::<u64>().map_err(|_| {
            UploaderError::Config(format!("release_id must be a number, got '{}'", release_id))
        })?;

        let asset_path = required(self.asset_path, "asset_path")?;

        Ok(UploadRequest {
            owner,
            repo,
            release_id,
            asset_path,
            asset_name: non_empty(self.asset_name),
            asset_content_type: non_empty(self.asset_content_type),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| UploaderError::Config(format!("{} is required", name)))
}

fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(UploaderError::Config(format!(
            "repository must be in the form 'owner/repo', got '{}'",
            repository
        ))),
    }
}

/// Connection settings for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Token sent as a bearer credential
    pub token: Option<String>,

    /// REST API base (default: "https://api.github.com")
    pub api_url: String,

    /// Upload API base (default: derived from `api_url`)
    pub upload_url: String,

    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            user_agent: format!("upload-release-asset/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GithubConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through `var`; unset and empty values use the defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let var = |name: &str| var(name).filter(|v| !v.is_empty());

        let api_url = var("GITHUB_API_URL").unwrap_or(default.api_url);
        let upload_url = var("GITHUB_UPLOAD_URL").unwrap_or_else(|| upload_url_for(&api_url));

        Self {
            token: var("GITHUB_TOKEN"),
            api_url,
            upload_url,
            user_agent: var("UPLOADER_USER_AGENT").unwrap_or(default.user_agent),
        }
    }
}

/// Uploads live on a separate host for github.com and under `/api/uploads` on Enterprise Server.
pub fn upload_url_for(api_url: &str) -> String {
    let api_url = api_url.trim_end_matches('/');
    if api_url == DEFAULT_API_URL {
        return DEFAULT_UPLOAD_URL.to_string();
    }

    match api_url.strip_suffix("/api/v3") {
        Some(host) => format!("{}/api/uploads", host),
        None => api_url.to_string(),
    }
}
