// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::public::error;
use crate::util::detect_mime_type;
use actix_web::{HttpResponse, Result, web};

const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Serve a stored object under the same URL shape the resolver mints:
/// `/v0/b/<bucket>/o/<key>`. Reads are public; writes only happen through
/// the admin-gated upload path.
pub async fn serve_object(
    path: web::Path<(String, String)>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (bucket, key) = path.into_inner();
    if bucket != config.storage.bucket {
        return error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        );
    }

    // The match captures the key percent-decoded; reject anything that could
    // step outside the objects directory.
    let safe = !key.is_empty()
        && !key.contains('\\')
        && !key
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == "..");
    if !safe {
        return error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        );
    }

    let object_path = app_state.runtime_paths.objects_dir.join(&key);
    match tokio::fs::read(&object_path).await {
        Ok(content) => Ok(HttpResponse::Ok()
            .content_type(detect_mime_type(&key))
            .insert_header(("Cache-Control", CACHE_CONTROL_IMMUTABLE))
            .body(content)),
        Err(_) => error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        ),
    }
}
