use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A validated upload run, built once from the action inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub owner: String,
    pub repo: String,
    pub release_id: u64,
    pub asset_path: String,
    pub asset_name: Option<String>,
    pub asset_content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub contents: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub browser_download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHeaders {
    pub content_type: String,
    pub content_length: u64,
}

/// Everything the release asset endpoint needs for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub owner: String,
    pub repo: String,
    pub release_id: u64,
    pub headers: AssetHeaders,
    pub name: String,
    pub data: Bytes,
}

/// Release asset as returned by the GitHub REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub state: Option<String>,
    pub browser_download_url: String,
}

/// The `browser_download_url` output: a bare URL for one file, a list otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutput {
    Single(String),
    Multiple(Vec<String>),
}

impl UploadOutput {
    pub fn from_results(results: Vec<UploadResult>) -> Self {
        let mut urls: Vec<String> = results
            .into_iter()
            .map(|r| r.browser_download_url)
            .collect();

        if urls.len() == 1 {
            Self::Single(urls.remove(0))
        } else {
            Self::Multiple(urls)
        }
    }

    pub fn urls(&self) -> Vec<&str> {
        match self {
            Self::Single(url) => vec![url.as_str()],
            Self::Multiple(urls) => urls.iter().map(String::as_str).collect(),
        }
    }

    /// Renders the value the way workflow outputs carry it: strings as-is, lists as JSON.
    pub fn to_output_value(&self) -> String {
        match self {
            Self::Single(url) => url.clone(),
            Self::Multiple(urls) => serde_json::Value::from(urls.clone()).to_string(),
        }
    }
}
