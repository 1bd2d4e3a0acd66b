// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use futures_util::future::BoxFuture;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StorageError {
    ObjectNotFound(String),
    InvalidKey(String),
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ObjectNotFound(key) => write!(f, "object '{}' not found", key),
            StorageError::InvalidKey(key) => write!(f, "invalid object key '{}'", key),
            StorageError::Backend(msg) => write!(f, "storage backend error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// The object-storage collaborator: turns an object key into a fetchable
/// download URL.
pub trait StorageBackend: Send + Sync {
    fn download_url<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<String, StorageError>>;
}

/// Backend serving objects from a local directory beneath a public base URL.
/// Download URLs follow the hosted-bucket shape
/// `<base>/v0/b/<bucket>/o/<percent-encoded-key>?alt=media`, so they can be
/// normalized back to keys with [`crate::storage::extract_path_from_url`].
pub struct LocalObjectStore {
    base_url: String,
    bucket: String,
    objects_dir: PathBuf,
}

impl LocalObjectStore {
    pub fn new(base_url: &str, bucket: &str, objects_dir: &Path) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            objects_dir: objects_dir.to_path_buf(),
        }
    }

    fn validate_key(key: &str) -> Result<(), StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('/')
            && !key.contains('\\')
            && !key.split('/').any(|part| part.is_empty() || part == "." || part == "..")
            && !key.chars().any(|ch| ch.is_control());
        if valid {
            Ok(())
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }
}

impl StorageBackend for LocalObjectStore {
    fn download_url<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            Self::validate_key(key)?;
            let object_path = self.objects_dir.join(key);
            match tokio::fs::metadata(&object_path).await {
                Ok(metadata) if metadata.is_file() => Ok(format!(
                    "{}/v0/b/{}/o/{}?alt=media",
                    self.base_url,
                    self.bucket,
                    percent_encode_key(key)
                )),
                Ok(_) => Err(StorageError::ObjectNotFound(key.to_string())),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    Err(StorageError::ObjectNotFound(key.to_string()))
                }
                Err(err) => Err(StorageError::Backend(err.to_string())),
            }
        })
    }
}

/// Percent-encode an object key for the `/o/` URL segment. Everything outside
/// the unreserved set is encoded, including `/`.
pub fn percent_encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{:02X}", byte));
            }
        }
    }
    encoded
}
