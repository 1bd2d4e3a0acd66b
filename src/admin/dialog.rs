// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::models::{
    AboutContent, ContactInfo, PortfolioItem, PortfolioPageConfig, SettingsUpdate,
};
use crate::content::services::{ContentError, ContentServices};
use crate::storage::{extract_path_from_url, is_absolute_url};
use serde::{Deserialize, Serialize};

/// One admin editor submission. Every editor posts the same endpoint with a
/// `kind` tag, so adding an editor means adding a variant here instead of a
/// route.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DialogPayload {
    PortfolioItem { item: PortfolioItem },
    PortfolioPage { page: PortfolioPageConfig },
    Settings { update: SettingsUpdate },
    About { about: AboutContent },
    Contact { contact: ContactInfo },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

fn field_error(field: &str, message: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn require_non_empty(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field_error(field, "must not be empty"));
    }
}

impl DialogPayload {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        match self {
            DialogPayload::PortfolioItem { item } => {
                require_non_empty(&mut errors, "title", &item.title);
                require_non_empty(&mut errors, "category", &item.category);
            }
            DialogPayload::PortfolioPage { page } => {
                require_non_empty(&mut errors, "title", &page.title);
                require_non_empty(&mut errors, "category", &page.category);
                if let Some(slug) = &page.slug
                    && !slug.trim().is_empty()
                    && slug.contains('/')
                {
                    errors.push(field_error("slug", "must be a single path segment"));
                }
            }
            DialogPayload::Settings { update } => {
                if let Some(site_name) = &update.site_name
                    && site_name.trim().is_empty()
                {
                    errors.push(field_error("siteName", "must not be empty"));
                }
                if let Some(site_url) = &update.site_url
                    && !site_url.trim().is_empty()
                    && !is_absolute_url(site_url)
                {
                    errors.push(field_error("siteUrl", "must be an absolute URL"));
                }
            }
            DialogPayload::About { about } => {
                require_non_empty(&mut errors, "title", &about.title);
            }
            DialogPayload::Contact { contact } => {
                require_non_empty(&mut errors, "email", &contact.email);
                if !contact.email.trim().is_empty() && !contact.email.contains('@') {
                    errors.push(field_error("email", "must be an email address"));
                }
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Admins paste full download URLs where object keys belong; collapse
    /// every stored image reference back to its key before persisting. Keys
    /// and foreign URLs pass through untouched.
    fn normalized(mut self) -> Self {
        match &mut self {
            DialogPayload::PortfolioItem { item } => {
                item.featured_image = extract_path_from_url(&item.featured_image);
                for gallery in &mut item.galleries {
                    for picture in &mut gallery.pictures {
                        picture.image_url = extract_path_from_url(&picture.image_url);
                    }
                }
            }
            DialogPayload::About { about } => {
                about.image_url = extract_path_from_url(&about.image_url);
            }
            DialogPayload::Settings { update } => {
                if let Some(favicon_url) = &update.favicon_url {
                    update.favicon_url = Some(extract_path_from_url(favicon_url));
                }
                if let Some(artist_image) = &update.artist_image {
                    update.artist_image = Some(extract_path_from_url(artist_image));
                }
            }
            DialogPayload::PortfolioPage { .. } | DialogPayload::Contact { .. } => {}
        }
        self
    }

    /// Persists a validated payload and returns the stored document as JSON.
    pub fn apply(self, services: &ContentServices) -> Result<serde_json::Value, ContentError> {
        let value = match self.normalized() {
            DialogPayload::PortfolioItem { item } => {
                serde_json::to_value(services.save_portfolio_item(item)?)
            }
            DialogPayload::PortfolioPage { page } => {
                serde_json::to_value(services.save_portfolio_page(page)?)
            }
            DialogPayload::Settings { update } => {
                serde_json::to_value(services.upsert_settings(&update)?)
            }
            DialogPayload::About { about } => serde_json::to_value(services.save_about(about)?),
            DialogPayload::Contact { contact } => {
                serde_json::to_value(services.save_contact(contact)?)
            }
        };
        // Serializing a freshly stored document cannot fail in practice;
        // surface it as a store error if it ever does.
        value.map_err(|err| ContentError::Store(crate::content::store::StoreError::Json(err)))
    }
}
