// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fixed document id of the settings singleton.
pub const SETTINGS_DOC_ID: &str = "main-settings";

/// Creation timestamps arrive in three shapes depending on which client wrote
/// the document: an RFC 3339 string, a `{seconds}` object, or unix
/// milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds { seconds: i64 },
    Millis(i64),
    Rfc3339(String),
}

impl Timestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Seconds { seconds } => Utc.timestamp_opt(*seconds, 0).single(),
            Timestamp::Millis(millis) => Utc.timestamp_millis_opt(*millis).single(),
            Timestamp::Rfc3339(raw) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|parsed| parsed.with_timezone(&Utc)),
        }
    }

    pub fn now() -> Self {
        Timestamp::Rfc3339(Utc::now().to_rfc3339())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    #[serde(default)]
    pub id: String,
    /// Object-storage key or an already-absolute URL. Resolved to a
    /// fetchable URL at render time; an empty value means "no image".
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_price: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pictures: Vec<Picture>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_page_id: Option<String>,
    #[serde(default)]
    pub featured_image: String,
    /// Stored order fixes the positional gallery/picture routes; display
    /// order comes from each entry's own `order` field.
    #[serde(default)]
    pub galleries: Vec<GalleryEntry>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl PortfolioItem {
    /// Galleries in display order, each paired with its stored index so
    /// positional routes keep pointing at the right entry. Stable within
    /// ties.
    pub fn sorted_galleries(&self) -> Vec<(usize, &GalleryEntry)> {
        let mut galleries: Vec<(usize, &GalleryEntry)> =
            self.galleries.iter().enumerate().collect();
        galleries.sort_by_key(|(_, gallery)| gallery.order);
        galleries
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub site_description: String,
    #[serde(default)]
    pub site_keywords: Vec<String>,
    #[serde(default)]
    pub favicon_url: String,
    /// Canonical public origin of the site, e.g. `https://example.art`.
    #[serde(default)]
    pub site_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_alternate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_birth_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Atelier".to_string(),
            site_description: String::new(),
            site_keywords: Vec::new(),
            favicon_url: "/favicon.ico".to_string(),
            site_url: String::new(),
            artist_name: None,
            artist_alternate_name: None,
            artist_birth_place: None,
            artist_nationality: None,
            artist_image: None,
            artist_bio: None,
            artist_address: None,
            facebook: None,
            instagram: None,
            linkedin: None,
            twitter: None,
        }
    }
}

/// Partial settings write. The singleton is created on first write and merged
/// on every later one; `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub site_description: Option<String>,
    #[serde(default)]
    pub site_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub favicon_url: Option<String>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub artist_alternate_name: Option<String>,
    #[serde(default)]
    pub artist_birth_place: Option<String>,
    #[serde(default)]
    pub artist_nationality: Option<String>,
    #[serde(default)]
    pub artist_image: Option<String>,
    #[serde(default)]
    pub artist_bio: Option<String>,
    #[serde(default)]
    pub artist_address: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

impl SettingsUpdate {
    pub fn apply_to(&self, settings: &mut SiteSettings) {
        if let Some(value) = &self.site_name {
            settings.site_name = value.clone();
        }
        if let Some(value) = &self.site_description {
            settings.site_description = value.clone();
        }
        if let Some(value) = &self.site_keywords {
            settings.site_keywords = value.clone();
        }
        if let Some(value) = &self.favicon_url {
            settings.favicon_url = value.clone();
        }
        if let Some(value) = &self.site_url {
            settings.site_url = value.clone();
        }
        if let Some(value) = &self.artist_name {
            settings.artist_name = Some(value.clone());
        }
        if let Some(value) = &self.artist_alternate_name {
            settings.artist_alternate_name = Some(value.clone());
        }
        if let Some(value) = &self.artist_birth_place {
            settings.artist_birth_place = Some(value.clone());
        }
        if let Some(value) = &self.artist_nationality {
            settings.artist_nationality = Some(value.clone());
        }
        if let Some(value) = &self.artist_image {
            settings.artist_image = Some(value.clone());
        }
        if let Some(value) = &self.artist_bio {
            settings.artist_bio = Some(value.clone());
        }
        if let Some(value) = &self.artist_address {
            settings.artist_address = Some(value.clone());
        }
        if let Some(value) = &self.facebook {
            settings.facebook = Some(value.clone());
        }
        if let Some(value) = &self.instagram {
            settings.instagram = Some(value.clone());
        }
        if let Some(value) = &self.linkedin {
            settings.linkedin = Some(value.clone());
        }
        if let Some(value) = &self.twitter {
            settings.twitter = Some(value.clone());
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPageConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl PortfolioPageConfig {
    /// Public route segment for this page; falls back to the category.
    pub fn effective_slug(&self) -> &str {
        match &self.slug {
            Some(slug) if !slug.trim().is_empty() => slug,
            _ => &self.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behance: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}
