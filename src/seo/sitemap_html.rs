// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::models::{Picture, PortfolioItem, PortfolioPageConfig, SiteSettings};
use crate::seo::escape::escape_html;
use serde_json::{Map, Value, json};
use std::fmt::Write;

/// Render the human-navigable sitemap page.
///
/// Carries the same entry set as the XML sitemap plus one JSON-LD Painting
/// block per picture with an image. The page is rebuilt from current data on
/// every request/run, so stale structured-data blocks cannot survive a
/// content change.
pub fn generate_sitemap_html(
    base_url: &str,
    items: &[PortfolioItem],
    pages: &[PortfolioPageConfig],
    settings: &SiteSettings,
) -> String {
    let base = base_url.trim_end_matches('/');
    let published: Vec<&PortfolioItem> = items.iter().filter(|item| item.published).collect();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        html,
        "<title>Sitemap | {}</title>",
        escape_html(&settings.site_name)
    );
    for item in &published {
        for gallery in &item.galleries {
            for picture in &gallery.pictures {
                if picture.image_url.trim().is_empty() {
                    continue;
                }
                let _ = writeln!(
                    html,
                    "<script type=\"application/ld+json\">{}</script>",
                    painting_block(picture, item, settings)
                );
            }
        }
    }
    html.push_str("</head>\n<body>\n<h1>Sitemap</h1>\n");

    html.push_str("<section>\n<h2>Pages</h2>\n<ul>\n");
    let _ = writeln!(html, "<li><a href=\"{}/\">Home</a></li>", base);
    let mut ordered_pages: Vec<&PortfolioPageConfig> = pages.iter().collect();
    ordered_pages.sort_by_key(|page| page.order.unwrap_or(i64::MAX));
    for page in ordered_pages {
        let _ = writeln!(
            html,
            "<li><a href=\"{}/{}\">{}</a></li>",
            base,
            escape_html(page.effective_slug()),
            escape_html(&page.title)
        );
    }
    let _ = writeln!(html, "<li><a href=\"{}/about\">About</a></li>", base);
    let _ = writeln!(html, "<li><a href=\"{}/contact\">Contact</a></li>", base);
    html.push_str("</ul>\n</section>\n");

    html.push_str("<section>\n<h2>Portfolio</h2>\n");
    for item in &published {
        let _ = writeln!(
            html,
            "<h3><a href=\"{}/portfolio/{}\">{}</a></h3>",
            base,
            escape_html(&item.id),
            escape_html(&item.title)
        );
        for (gallery_index, gallery) in item.galleries.iter().enumerate() {
            let pictured: Vec<(usize, &Picture)> = gallery
                .pictures
                .iter()
                .enumerate()
                .filter(|(_, picture)| !picture.image_url.trim().is_empty())
                .collect();
            if pictured.is_empty() {
                continue;
            }
            html.push_str("<ul>\n");
            for (picture_index, picture) in pictured {
                let _ = writeln!(
                    html,
                    "<li><a href=\"{}/portfolio/{}/galleries/{}/pictures/{}\">{}</a></li>",
                    base,
                    escape_html(&item.id),
                    gallery_index,
                    picture_index,
                    escape_html(&picture_label(picture, picture_index))
                );
            }
            html.push_str("</ul>\n");
        }
    }
    html.push_str("</section>\n</body>\n</html>\n");
    html
}

fn picture_label(picture: &Picture, index: usize) -> String {
    if !picture.alt.trim().is_empty() {
        picture.alt.clone()
    } else if !picture.description.trim().is_empty() {
        picture.description.clone()
    } else {
        format!("Picture {}", index + 1)
    }
}

/// One Painting-typed block per picture. `image` is deliberately the raw
/// stored reference, not the resolved download URL; the displayed thumbnail
/// is the one that goes through the resolver.
fn painting_block(picture: &Picture, item: &PortfolioItem, settings: &SiteSettings) -> String {
    let creator = settings
        .artist_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Artist");

    let name = if picture.alt.trim().is_empty() {
        item.title.as_str()
    } else {
        picture.alt.as_str()
    };

    let mut painting = Map::new();
    painting.insert("@context".to_string(), json!("https://schema.org"));
    painting.insert("@type".to_string(), json!("Painting"));
    painting.insert("name".to_string(), json!(name));
    painting.insert(
        "creator".to_string(),
        json!({"@type": "Person", "name": creator}),
    );
    painting.insert("image".to_string(), json!(picture.image_url));

    if let Some(date_created) = &picture.date_created
        && !date_created.trim().is_empty()
    {
        painting.insert("dateCreated".to_string(), json!(date_created));
    }
    if let Some(art_medium) = &picture.art_medium
        && !art_medium.trim().is_empty()
    {
        painting.insert("artMedium".to_string(), json!(art_medium));
    }
    if let Some(genre) = &picture.genre
        && !genre.trim().is_empty()
    {
        painting.insert("genre".to_string(), json!(genre));
    }
    if !picture.description.trim().is_empty() {
        painting.insert("description".to_string(), json!(picture.description));
    }

    Value::Object(painting).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::GalleryEntry;

    const BASE: &str = "https://example.art";

    fn item_with_pictures(pictures: Vec<Picture>) -> PortfolioItem {
        PortfolioItem {
            id: "p1".to_string(),
            title: "Foo & <Bar>".to_string(),
            published: true,
            galleries: vec![GalleryEntry {
                pictures,
                ..GalleryEntry::default()
            }],
            ..PortfolioItem::default()
        }
    }

    fn blocks(html: &str) -> Vec<Value> {
        html.match_indices("<script type=\"application/ld+json\">")
            .map(|(start, _)| {
                let rest = &html[start..];
                let open = rest.find('>').unwrap() + 1;
                let close = rest.find("</script>").unwrap();
                serde_json::from_str(&rest[open..close]).expect("valid json-ld")
            })
            .collect()
    }

    #[test]
    fn one_painting_block_per_pictured_image() {
        let item = item_with_pictures(vec![
            Picture {
                image_url: "portfolio/a.jpg".to_string(),
                ..Picture::default()
            },
            Picture::default(),
        ]);
        let html = generate_sitemap_html(BASE, &[item], &[], &SiteSettings::default());
        assert_eq!(blocks(&html).len(), 1);
    }

    #[test]
    fn creator_falls_back_to_artist() {
        let item = item_with_pictures(vec![Picture {
            image_url: "a.jpg".to_string(),
            ..Picture::default()
        }]);

        let html = generate_sitemap_html(BASE, &[item.clone()], &[], &SiteSettings::default());
        assert_eq!(blocks(&html)[0]["creator"]["name"], "Artist");

        let settings = SiteSettings {
            artist_name: Some("Jane Doe".to_string()),
            ..SiteSettings::default()
        };
        let html = generate_sitemap_html(BASE, &[item], &[], &settings);
        assert_eq!(blocks(&html)[0]["creator"]["name"], "Jane Doe");
    }

    #[test]
    fn image_is_the_raw_stored_reference() {
        let item = item_with_pictures(vec![Picture {
            image_url: "portfolio/gallery/raw-key.jpg".to_string(),
            ..Picture::default()
        }]);
        let html = generate_sitemap_html(BASE, &[item], &[], &SiteSettings::default());
        assert_eq!(blocks(&html)[0]["image"], "portfolio/gallery/raw-key.jpg");
    }

    #[test]
    fn optional_painting_fields_appear_only_when_present() {
        let item = item_with_pictures(vec![Picture {
            image_url: "a.jpg".to_string(),
            art_medium: Some("Oil on canvas".to_string()),
            genre: Some("".to_string()),
            ..Picture::default()
        }]);
        let html = generate_sitemap_html(BASE, &[item], &[], &SiteSettings::default());
        let block = &blocks(&html)[0];
        let object = block.as_object().unwrap();
        assert_eq!(object["artMedium"], "Oil on canvas");
        assert!(!object.contains_key("genre"));
        assert!(!object.contains_key("dateCreated"));
        assert!(!object.contains_key("description"));
    }

    #[test]
    fn rendered_text_is_html_escaped() {
        let item = item_with_pictures(vec![Picture {
            image_url: "a.jpg".to_string(),
            ..Picture::default()
        }]);
        let html = generate_sitemap_html(BASE, &[item], &[], &SiteSettings::default());
        assert!(html.contains("Foo &amp; &lt;Bar&gt;"));
        assert!(!html.contains("<h3><a href=\"https://example.art/portfolio/p1\">Foo & <Bar>"));
    }

    #[test]
    fn unpublished_items_contribute_nothing() {
        let mut item = item_with_pictures(vec![Picture {
            image_url: "a.jpg".to_string(),
            ..Picture::default()
        }]);
        item.published = false;
        let html = generate_sitemap_html(BASE, &[item], &[], &SiteSettings::default());
        assert!(blocks(&html).is_empty());
        assert!(!html.contains("/portfolio/p1"));
    }

    #[test]
    fn static_links_are_always_present() {
        let html = generate_sitemap_html(BASE, &[], &[], &SiteSettings::default());
        assert!(html.contains("href=\"https://example.art/\""));
        assert!(html.contains("href=\"https://example.art/about\""));
        assert!(html.contains("href=\"https://example.art/contact\""));
    }
}
