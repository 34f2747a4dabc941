use crate::utils::mime_types;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMetadata {
    pub name: String,
    pub content_type: String,
}

pub struct MetadataService;

impl MetadataService {
    /// Name and content type for one resolved file.
    ///
    /// Overrides are used as given for every file of the batch; only missing
    /// values are derived from the path.
    pub fn derive(
        path: &Path,
        asset_name: Option<&str>,
        asset_content_type: Option<&str>,
    ) -> AssetMetadata {
        let name = match asset_name.filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => Self::file_name(path),
        };

        let content_type = match asset_content_type.filter(|t| !t.is_empty()) {
            Some(content_type) => content_type.to_string(),
            None => mime_types::content_type_for(path).to_string(),
        };

        AssetMetadata { name, content_type }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }
}
