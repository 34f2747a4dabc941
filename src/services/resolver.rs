use crate::error::{Result, UploaderError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolve an asset path pattern to the ordered list of files to upload.
///
/// An existing file resolves to itself and an existing directory to its direct
/// child files (sorted by name, subdirectories skipped). Anything else is
/// expanded as a glob, where `**` matches across directories. Wildcards do not
/// match a leading `.`, so dotfiles and hidden directories need an explicit dot.
pub fn resolve_asset_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);

    if path.is_file() {
        debug!("Asset path '{}' is a file", pattern);
        return Ok(vec![absolute(path)?]);
    }

    if path.is_dir() {
        debug!("Asset path '{}' is a directory", pattern);
        return list_directory(path);
    }

    let files = expand_glob(pattern)?;
    if files.is_empty() {
        return Err(UploaderError::NotFound(pattern.to_string()));
    }

    debug!("Glob '{}' matched {} file(s)", pattern, files.len());
    Ok(files)
}

fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| UploaderError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| UploaderError::io(dir, e))?;
        let path = entry.path();
        // follows symlinks, so a link to a file counts as a file
        if path.is_file() {
            files.push(absolute(&path)?);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let options = glob::MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let paths = glob::glob_with(pattern, options)
        .map_err(|e| UploaderError::InvalidPattern(pattern.to_string(), e.to_string()))?;

    // wildcards never match a leading dot, not even across `**`
    let prefix = literal_prefix(pattern);
    let wildcard_part = Path::new(pattern).strip_prefix(&prefix).unwrap_or(Path::new(pattern));
    let allow_hidden = has_hidden_component(wildcard_part);

    let mut files = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            UploaderError::io(path, e.into_error())
        })?;

        if !allow_hidden && has_hidden_component(path.strip_prefix(&prefix).unwrap_or(&path)) {
            debug!("Skipping hidden path {}", path.display());
            continue;
        }

        if path.is_file() {
            files.push(absolute(&path)?);
        }
    }

    Ok(files)
}

/// Leading components of the pattern without wildcards.
fn literal_prefix(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .take_while(|c| !c.as_os_str().to_string_lossy().contains(['*', '?', '[']))
        .collect()
}

fn has_hidden_component(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| UploaderError::io(path, e))
}
