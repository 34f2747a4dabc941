use std::path::Path;

/// Fallback for extensions with no known MIME type.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extensions whose release content type differs from the `mime_guess` database.
const CONTENT_TYPE_OVERRIDES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("exe", "application/x-msdos-program"),
    ("dmg", "application/x-apple-diskimage"),
];

/// Look up the MIME type registered for an extension, ignoring case.
pub fn lookup(extension: &str) -> Option<&'static str> {
    let extension = extension.trim_start_matches('.').to_lowercase();
    if extension.is_empty() {
        return None;
    }

    CONTENT_TYPE_OVERRIDES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime_type)| *mime_type)
        .or_else(|| mime_guess::from_ext(&extension).first_raw())
}

/// Content type for a file path, falling back to a generic binary stream.
pub fn content_type_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(lookup)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
