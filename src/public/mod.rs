// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod error;
pub mod handlers;
pub mod media;
pub mod render;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/robots.txt", web::get().to(handlers::robots_txt))
        .route("/sitemap.xml", web::get().to(handlers::sitemap_xml))
        .route("/sitemap.html", web::get().to(handlers::sitemap_html))
        .route("/", web::get().to(handlers::index))
        .route("/index.html", web::get().to(handlers::index_shell))
        .route("/about", web::get().to(handlers::about))
        .route("/contact", web::get().to(handlers::contact))
        .route("/login", web::get().to(handlers::login_page))
        .route("/login", web::post().to(handlers::login_submit))
        .route("/logout", web::post().to(handlers::logout))
        .route(
            "/portfolio/{id}",
            web::get().to(handlers::portfolio_item),
        )
        .route(
            "/portfolio/{id}/galleries/{gallery}/pictures/{picture}",
            web::get().to(handlers::picture),
        )
        .route(
            "/v0/b/{bucket}/o/{key:.*}",
            web::get().to(media::serve_object),
        )
        .route("/{slug}", web::get().to(handlers::portfolio_page));
}
