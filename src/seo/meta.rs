// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::models::{ContactInfo, SiteSettings};
use crate::seo::escape::escape_html;
use crate::storage::StorageUrlResolver;
use serde_json::{Map, Value, json};

const PLACEHOLDER_SITE_NAME: &str = "{{SITE_NAME}}";
const PLACEHOLDER_SITE_DESCRIPTION: &str = "{{SITE_DESCRIPTION}}";
const PLACEHOLDER_SITE_KEYWORDS: &str = "{{SITE_KEYWORDS}}";
const PLACEHOLDER_FAVICON_URL: &str = "{{FAVICON_URL}}";

/// Fill the index shell's meta placeholders from the settings record and,
/// when an artist name is configured, inject a JSON-LD Person block before
/// the closing head tag.
///
/// Deterministic: identical inputs produce byte-identical output.
pub fn render_meta(
    template: &str,
    settings: &SiteSettings,
    contact: Option<&ContactInfo>,
) -> String {
    let keywords = settings.site_keywords.join(", ");

    let mut rendered = template
        .replace(PLACEHOLDER_SITE_NAME, &escape_html(&settings.site_name))
        .replace(
            PLACEHOLDER_SITE_DESCRIPTION,
            &escape_html(&settings.site_description),
        )
        .replace(PLACEHOLDER_SITE_KEYWORDS, &escape_html(&keywords))
        .replace(PLACEHOLDER_FAVICON_URL, &escape_html(&settings.favicon_url));

    if let Some(block) = structured_data(settings, contact) {
        let script = format!(
            "<script type=\"application/ld+json\">{}</script>\n",
            block
        );
        if let Some(index) = rendered.find("</head>") {
            rendered.insert_str(index, &script);
        }
    }

    rendered
}

/// Favicon and artist-image values may be stored as object keys. Resolve
/// them before meta rendering; site-relative paths pass through untouched,
/// absolute URLs pass through inside the resolver.
pub async fn resolve_meta_assets(resolver: &StorageUrlResolver, settings: &mut SiteSettings) {
    settings.favicon_url = resolve_asset(resolver, &settings.favicon_url).await;
    if let Some(image) = settings.artist_image.clone() {
        let resolved = resolve_asset(resolver, &image).await;
        settings.artist_image = if resolved.is_empty() {
            None
        } else {
            Some(resolved)
        };
    }
}

async fn resolve_asset(resolver: &StorageUrlResolver, value: &str) -> String {
    if value.starts_with('/') {
        return value.to_string();
    }
    resolver.resolve(value).await
}

/// JSON-LD Person object, present iff the settings carry an artist name.
/// Optional fields are included only when their source value is non-empty.
fn structured_data(settings: &SiteSettings, contact: Option<&ContactInfo>) -> Option<String> {
    let artist_name = settings.artist_name.as_deref()?.trim();
    if artist_name.is_empty() {
        return None;
    }

    let mut person = Map::new();
    person.insert("@context".to_string(), json!("https://schema.org"));
    person.insert("@type".to_string(), json!("Person"));
    person.insert("name".to_string(), json!(artist_name));
    person.insert("url".to_string(), json!(settings.site_url));

    insert_non_empty(&mut person, "alternateName", &settings.artist_alternate_name);
    insert_non_empty(&mut person, "birthPlace", &settings.artist_birth_place);
    insert_non_empty(&mut person, "nationality", &settings.artist_nationality);
    insert_non_empty(&mut person, "image", &settings.artist_image);
    insert_non_empty(&mut person, "description", &settings.artist_bio);

    let same_as = social_links(settings, contact);
    if !same_as.is_empty() {
        person.insert("sameAs".to_string(), json!(same_as));
    }

    insert_non_empty(&mut person, "address", &settings.artist_address);

    Some(Value::Object(person).to_string())
}

fn insert_non_empty(object: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value
        && !value.trim().is_empty()
    {
        object.insert(key.to_string(), json!(value));
    }
}

/// Social links in a fixed order: contact profile links first, then the
/// settings-level ones.
fn social_links(settings: &SiteSettings, contact: Option<&ContactInfo>) -> Vec<String> {
    let mut links: Vec<&Option<String>> = Vec::new();
    if let Some(contact) = contact {
        links.push(&contact.instagram);
        links.push(&contact.linkedin);
        links.push(&contact.twitter);
        links.push(&contact.behance);
    }
    links.push(&settings.facebook);
    links.push(&settings.instagram);
    links.push(&settings.linkedin);
    links.push(&settings.twitter);

    links
        .into_iter()
        .filter_map(|link| link.as_deref())
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
        .collect()
}
