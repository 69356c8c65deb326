//! Session blob persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::LoginError;

/// Saved login state, written by discovery and read back on later starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBlob {
    pub username: String,
    pub device_name: String,
    pub device_id: Uuid,
    /// Opaque reusable credential.
    pub auth_data: String,
}

impl SessionBlob {
    /// Fresh blob for a newly discovered session.
    pub fn new(username: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            device_name: device_name.into(),
            device_id: Uuid::new_v4(),
            auth_data: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Load a blob from disk.
    pub fn load(path: &Path) -> Result<Self, LoginError> {
        let file = File::open(path).map_err(|e| LoginError::BlobIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| LoginError::BlobFormat {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the blob to disk, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), LoginError> {
        let io_err = |e| LoginError::BlobIo {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = File::create(path).map_err(io_err)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| LoginError::BlobFormat {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), "Session blob saved");
        Ok(())
    }
}
