// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::models::{PortfolioPageConfig, SiteSettings};
use crate::seo::escape::escape_html;
use crate::templates::{load_template, render_template};
use std::fmt::Write;

/// Wrap page content in the site layout.
pub fn render_page(
    title: &str,
    content: &str,
    pages: &[PortfolioPageConfig],
    settings: &SiteSettings,
) -> String {
    let template = load_template("public/main_layout").unwrap_or_else(|_| {
        // Fallback template if loading fails
        r#"<!DOCTYPE html>
<html><head><title>{title}</title></head>
<body><div>{content}</div></body></html>"#
            .to_string()
    });

    let vars = crate::template_vars! {
        "title" => &escape_html(title),
        "content" => content,
        "nav_html" => &navigation_html(pages),
        "site_name" => &escape_html(&settings.site_name),
        "description" => &escape_html(&settings.site_description),
        "favicon_url" => &escape_html(&settings.favicon_url),
    };

    render_template(&template, &vars)
}

/// Navigation: home, one entry per portfolio page in `order`, about, contact.
pub fn navigation_html(pages: &[PortfolioPageConfig]) -> String {
    let mut ordered: Vec<&PortfolioPageConfig> = pages.iter().collect();
    ordered.sort_by_key(|page| page.order.unwrap_or(i64::MAX));

    let mut html = String::from("      <ul class=\"site-nav\">\n");
    html.push_str("        <li><a href=\"/\">Home</a></li>\n");
    for page in ordered {
        let _ = writeln!(
            html,
            "        <li><a href=\"/{}\">{}</a></li>",
            escape_html(page.effective_slug()),
            escape_html(&page.title)
        );
    }
    html.push_str("        <li><a href=\"/about\">About</a></li>\n");
    html.push_str("        <li><a href=\"/contact\">Contact</a></li>\n");
    html.push_str("      </ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_carries_title_nav_and_content() {
        let settings = SiteSettings {
            site_name: "Studio North".to_string(),
            ..SiteSettings::default()
        };
        let pages = vec![PortfolioPageConfig {
            category: "paintings".to_string(),
            title: "Paintings".to_string(),
            ..PortfolioPageConfig::default()
        }];
        let html = render_page("Seascapes", "<p>body</p>", &pages, &settings);
        assert!(html.contains("<title>Seascapes | Studio North</title>"));
        assert!(html.contains("href=\"/paintings\""));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn nav_titles_are_escaped() {
        let pages = vec![PortfolioPageConfig {
            category: "mixed".to_string(),
            title: "Oil & Ink".to_string(),
            ..PortfolioPageConfig::default()
        }];
        let nav = navigation_html(&pages);
        assert!(nav.contains("Oil &amp; Ink"));
    }
}
