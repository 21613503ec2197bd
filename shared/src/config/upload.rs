//! File upload configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_parse_or};

/// Photo upload configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Maximum accepted upload size in bytes
    pub max_file_upload: usize,

    /// Directory uploaded photos are written to
    pub file_upload_path: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_upload: 1_000_000,
            file_upload_path: String::from("./public/uploads"),
        }
    }
}

impl UploadConfig {
    /// Load from `MAX_FILE_UPLOAD` / `FILE_UPLOAD_PATH`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_file_upload: env_parse_or("MAX_FILE_UPLOAD", defaults.max_file_upload),
            file_upload_path: env_or("FILE_UPLOAD_PATH", &defaults.file_upload_path),
        }
    }
}
