// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::diagnostics::Diagnostics;
use crate::storage::backend::StorageBackend;
use futures_util::future::join_all;
use std::sync::Arc;

/// Resolves stored references to fetchable URLs.
///
/// A stored reference is either an opaque object key or an already-absolute
/// URL; resolution is idempotent. Failures never escape: the resolver
/// answers with an empty string and callers render "no image".
///
/// This is the single resolver used by both the server handlers and the
/// offline SEO generator.
#[derive(Clone)]
pub struct StorageUrlResolver {
    backend: Arc<dyn StorageBackend>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl StorageUrlResolver {
    pub fn new(backend: Arc<dyn StorageBackend>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            backend,
            diagnostics,
        }
    }

    /// Resolve one stored reference. Empty input returns an empty string
    /// without touching the backend, as does an absolute URL (returned
    /// unchanged).
    pub async fn resolve(&self, path_or_url: &str) -> String {
        let trimmed = path_or_url.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        if is_absolute_url(trimmed) {
            return trimmed.to_string();
        }
        match self.backend.download_url(trimmed).await {
            Ok(url) => url,
            Err(err) => {
                self.diagnostics.report("storage.resolve", &err);
                String::new()
            }
        }
    }

    /// Absent references resolve to an empty string.
    pub async fn resolve_optional(&self, path_or_url: Option<&str>) -> String {
        match path_or_url {
            Some(value) => self.resolve(value).await,
            None => String::new(),
        }
    }

    /// Fan out independent resolutions and join them. The result preserves
    /// the input order; no ordering is guaranteed among the in-flight calls.
    pub async fn resolve_many<I, S>(&self, references: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let futures: Vec<_> = references
            .into_iter()
            .map(|reference| {
                let resolver = self.clone();
                async move { resolver.resolve(reference.as_ref()).await }
            })
            .collect();
        join_all(futures).await
    }
}

/// True when the value carries a URL scheme and authority, e.g.
/// `https://host/...` or `gs://bucket/...`.
pub fn is_absolute_url(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    if !chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.')) {
        return false;
    }
    rest.starts_with("//")
}

/// Normalize a download URL back to its object key.
///
/// Recognizes the hosted-bucket shape
/// `<scheme>://<host>/v0/b/<bucket>/o/<percent-encoded-key>?...` and returns
/// the decoded key; anything else, including a plain object key, comes back
/// unchanged. Lets an admin paste a full download URL where a key is stored.
pub fn extract_path_from_url(url: &str) -> String {
    if !is_absolute_url(url) {
        return url.to_string();
    }
    let Some(bucket_at) = url.find("/v0/b/") else {
        return url.to_string();
    };
    let Some(key_at) = url[bucket_at..].find("/o/") else {
        return url.to_string();
    };
    let encoded = url[bucket_at + key_at + 3..]
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    if encoded.is_empty() {
        return url.to_string();
    }
    percent_decode(encoded)
}

/// Decode %XX escapes. Malformed escapes are kept literally rather than
/// rejected, matching how the hosted backend treats them.
fn percent_decode(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut decoded: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%'
            && let Some(hex) = bytes.get(index + 1..index + 3)
            && let Ok(hex_str) = std::str::from_utf8(hex)
            && let Ok(byte) = u8::from_str_radix(hex_str, 16)
        {
            decoded.push(byte);
            index += 3;
            continue;
        }
        decoded.push(bytes[index]);
        index += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}
