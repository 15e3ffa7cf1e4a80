use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions probed, in order, when resolving an asset key to a file.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("asset key must not be empty")]
    Empty,
    #[error("asset key must not start or end with '/'")]
    DanglingSlash,
    #[error("asset key must not contain '..'")]
    ParentTraversal,
    #[error("asset key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Validated name of an image under the asset root, e.g. `character/walk_03`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn parse(raw: &str) -> Result<Self, AssetKeyError> {
        validate_asset_key(raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Candidate file paths for this key, one per known image extension.
    pub fn candidate_paths(&self, asset_root: &Path) -> Vec<PathBuf> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| asset_root.join(format!("{}.{ext}", self.0)))
            .collect()
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn validate_asset_key(key: &str) -> Result<(), AssetKeyError> {
    if key.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    if key.starts_with('/') || key.ends_with('/') {
        return Err(AssetKeyError::DanglingSlash);
    }
    if key.contains("..") {
        return Err(AssetKeyError::ParentTraversal);
    }
    if let Some(character) = key.chars().find(|ch| !is_key_char(*ch)) {
        return Err(AssetKeyError::InvalidCharacter { character });
    }
    Ok(())
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-')
}
