// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod escape;
pub mod meta;
pub mod sitemap_html;
pub mod sitemap_xml;

pub use escape::{escape_html, escape_xml};
pub use meta::{render_meta, resolve_meta_assets};
pub use sitemap_html::generate_sitemap_html;
pub use sitemap_xml::generate_sitemap_xml;

/// robots.txt body: two static lines plus the sitemap pointer.
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robots_points_at_the_sitemap() {
        let body = robots_txt("https://example.art/");
        assert!(body.starts_with("User-agent: *\nAllow: /\n"));
        assert!(body.contains("Sitemap: https://example.art/sitemap.xml"));
    }
}
