use std::path::{Path, PathBuf};
use std::fs;
use std::io;
use std::env;
use sha2::{Sha256, Digest};

pub const ASSETS_ENV_VAR: &str = "ECOSORT_HOME";
pub const MODEL_FILE_NAME: &str = "model.onnx";
pub const LABELS_FILE_NAME: &str = "labels.txt";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Locates the model artifact and label list on disk.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    assets_dir: PathBuf,
}

impl AssetLocator {
    /// Creates a locator rooted at the default assets directory
    pub fn new_default() -> Self {
        Self::new(Self::get_default_assets_dir())
    }

    /// Returns the default assets directory path
    pub fn get_default_assets_dir() -> PathBuf {
        Self::resolve_assets_dir(env::var(ASSETS_ENV_VAR).ok())
    }

    fn resolve_assets_dir(override_dir: Option<String>) -> PathBuf {
        // 1. Explicit override
        if let Some(path) = override_dir.filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("ecosort").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".ecosort").join("models");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("ecosort").join("models")
    }

    pub fn new<P: AsRef<Path>>(assets_dir: P) -> Self {
        Self {
            assets_dir: assets_dir.as_ref().to_path_buf(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn model_path(&self) -> PathBuf {
        self.assets_dir.join(MODEL_FILE_NAME)
    }

    pub fn labels_path(&self) -> PathBuf {
        self.assets_dir.join(LABELS_FILE_NAME)
    }
}

/// Lowercase hex SHA-256 of a file's contents.
pub fn file_sha256(path: &Path) -> Result<String, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.display().to_string()));
    }
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Checks a file against an expected SHA-256 digest (case-insensitive hex).
pub fn verify_file(path: &Path, expected_hash: &str, file_type: &str) -> Result<(), AssetError> {
    log::info!("Verifying {} file: {:?}", file_type, path);
    let actual = file_sha256(path)?;
    if !actual.eq_ignore_ascii_case(expected_hash.trim()) {
        log::error!("{} hash mismatch: expected {}, got {}", file_type, expected_hash, actual);
        return Err(AssetError::HashMismatch {
            file_type: file_type.to_string(),
            expected: expected_hash.to_string(),
            actual,
        });
    }
    log::info!("{} file verified successfully", file_type);
    Ok(())
}
