// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::models::{PortfolioItem, PortfolioPageConfig};
use crate::seo::escape::escape_xml;
use chrono::Utc;
use std::fmt::Write;

/// Build the sitemap XML document.
///
/// Static entries (home, portfolio pages, about, contact) always appear, so
/// the output is well-formed even with no content at all. Portfolio items
/// contribute one entry each, plus one positional entry per picture that has
/// an image. Unpublished items are invisible here as everywhere public.
pub fn generate_sitemap_xml(
    base_url: &str,
    items: &[PortfolioItem],
    pages: &[PortfolioPageConfig],
) -> String {
    let base = base_url.trim_end_matches('/');

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    push_url(&mut xml, &format!("{}/", base), None, "weekly", "1.0");

    let mut ordered_pages: Vec<&PortfolioPageConfig> = pages.iter().collect();
    ordered_pages.sort_by_key(|page| page.order.unwrap_or(i64::MAX));
    for page in ordered_pages {
        let loc = format!("{}/{}", base, page.effective_slug());
        push_url(&mut xml, &loc, None, "weekly", "0.9");
    }

    push_url(&mut xml, &format!("{}/about", base), None, "monthly", "0.8");
    push_url(&mut xml, &format!("{}/contact", base), None, "monthly", "0.7");

    for item in items.iter().filter(|item| item.published) {
        let lastmod = item
            .created_at
            .as_ref()
            .and_then(|timestamp| timestamp.to_datetime())
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%d")
            .to_string();

        let item_loc = format!("{}/portfolio/{}", base, item.id);
        push_url(&mut xml, &item_loc, Some(&lastmod), "monthly", "0.8");

        // Positional addressing: the public route scheme is index-based, so
        // galleries are walked in insertion order and pictures keep their
        // stored index even when earlier ones lack an image.
        for (gallery_index, gallery) in item.galleries.iter().enumerate() {
            for (picture_index, picture) in gallery.pictures.iter().enumerate() {
                if picture.image_url.trim().is_empty() {
                    continue;
                }
                let picture_loc = format!(
                    "{}/portfolio/{}/galleries/{}/pictures/{}",
                    base, item.id, gallery_index, picture_index
                );
                push_url(&mut xml, &picture_loc, Some(&lastmod), "monthly", "0.6");
            }
        }
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(loc));
    if let Some(lastmod) = lastmod {
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod);
    }
    let _ = writeln!(xml, "    <changefreq>{}</changefreq>", changefreq);
    let _ = writeln!(xml, "    <priority>{}</priority>", priority);
    xml.push_str("  </url>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::{GalleryEntry, Picture, Timestamp};

    const BASE: &str = "https://example.art";

    fn picture(image_url: &str) -> Picture {
        Picture {
            image_url: image_url.to_string(),
            ..Picture::default()
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn zero_content_still_produces_the_three_static_entries() {
        let xml = generate_sitemap_xml(BASE, &[], &[]);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(count(&xml, "<url>"), 3);
        assert_eq!(count(&xml, "<url>"), count(&xml, "</url>"));
        assert!(xml.contains("<loc>https://example.art/</loc>"));
        assert!(xml.contains("<loc>https://example.art/about</loc>"));
        assert!(xml.contains("<loc>https://example.art/contact</loc>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn item_with_one_pictured_gallery_adds_exactly_two_entries() {
        let item = PortfolioItem {
            id: "p1".to_string(),
            published: true,
            galleries: vec![
                GalleryEntry {
                    pictures: vec![picture("x.jpg")],
                    ..GalleryEntry::default()
                },
                GalleryEntry {
                    pictures: vec![],
                    ..GalleryEntry::default()
                },
            ],
            ..PortfolioItem::default()
        };

        let xml = generate_sitemap_xml(BASE, &[item], &[]);
        assert_eq!(count(&xml, "<url>"), 5);
        assert!(xml.contains("<loc>https://example.art/portfolio/p1</loc>"));
        assert!(
            xml.contains("<loc>https://example.art/portfolio/p1/galleries/0/pictures/0</loc>")
        );
        assert_eq!(count(&xml, "/galleries/"), 1);
    }

    #[test]
    fn picture_indices_stay_positional_when_earlier_pictures_lack_images() {
        let item = PortfolioItem {
            id: "p1".to_string(),
            published: true,
            galleries: vec![GalleryEntry {
                pictures: vec![picture(""), picture("b.jpg")],
                ..GalleryEntry::default()
            }],
            ..PortfolioItem::default()
        };

        let xml = generate_sitemap_xml(BASE, &[item], &[]);
        assert!(
            xml.contains("/portfolio/p1/galleries/0/pictures/1</loc>"),
            "second picture keeps index 1"
        );
        assert!(!xml.contains("/pictures/0</loc>"));
    }

    #[test]
    fn unpublished_items_are_invisible() {
        let item = PortfolioItem {
            id: "draft".to_string(),
            published: false,
            ..PortfolioItem::default()
        };
        let xml = generate_sitemap_xml(BASE, &[item], &[]);
        assert!(!xml.contains("draft"));
        assert_eq!(count(&xml, "<url>"), 3);
    }

    #[test]
    fn pages_are_ordered_by_their_order_field() {
        let pages = vec![
            PortfolioPageConfig {
                category: "prints".to_string(),
                order: Some(2),
                ..PortfolioPageConfig::default()
            },
            PortfolioPageConfig {
                category: "paintings".to_string(),
                order: Some(1),
                ..PortfolioPageConfig::default()
            },
        ];
        let xml = generate_sitemap_xml(BASE, &[], &pages);
        let paintings_at = xml.find("/paintings").expect("paintings entry");
        let prints_at = xml.find("/prints").expect("prints entry");
        assert!(paintings_at < prints_at);
        assert_eq!(count(&xml, "<priority>0.9</priority>"), 2);
    }

    #[test]
    fn lastmod_uses_the_stored_creation_date() {
        let item = PortfolioItem {
            id: "p1".to_string(),
            published: true,
            created_at: Some(Timestamp::Seconds {
                seconds: 1_700_000_000,
            }),
            ..PortfolioItem::default()
        };
        let xml = generate_sitemap_xml(BASE, &[item], &[]);
        assert!(xml.contains("<lastmod>2023-11-14</lastmod>"));
    }

    #[test]
    fn locs_are_xml_escaped() {
        let item = PortfolioItem {
            id: "a&b".to_string(),
            published: true,
            ..PortfolioItem::default()
        };
        let xml = generate_sitemap_xml(BASE, &[item], &[]);
        assert!(xml.contains("<loc>https://example.art/portfolio/a&amp;b</loc>"));
        assert!(!xml.contains("portfolio/a&b<"));
    }
}
