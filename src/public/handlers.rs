// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::auth::AuthRuntime;
use crate::config::ValidatedConfig;
use crate::content::models::{
    ContactInfo, PortfolioItem, PortfolioPageConfig, SiteSettings,
};
use crate::content::services::ContentServices;
use crate::public::error;
use crate::public::render::render_page;
use crate::seo;
use crate::seo::escape::escape_html;
use crate::storage::StorageUrlResolver;
use crate::templates::{load_template, render_minijinja_template};
use crate::util::first_value_timeout;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use minijinja::context;
use serde::Deserialize;
use std::fmt::Write;

fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

// SEO artifacts

pub async fn robots_txt(req: HttpRequest) -> Result<HttpResponse> {
    let body = seo::robots_txt(&request_base_url(&req));
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body))
}

pub async fn sitemap_xml(
    req: HttpRequest,
    services: web::Data<ContentServices>,
) -> Result<HttpResponse> {
    let base_url = request_base_url(&req);
    let (items, pages) = first_value_timeout(move || {
        (services.published_portfolio_items(), services.portfolio_pages())
    })
    .await
    .unwrap_or_default();

    let xml = seo::generate_sitemap_xml(&base_url, &items, &pages);
    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}

pub async fn sitemap_html(
    req: HttpRequest,
    services: web::Data<ContentServices>,
) -> Result<HttpResponse> {
    let base_url = request_base_url(&req);
    let (items, pages, settings) = first_value_timeout(move || {
        (
            services.published_portfolio_items(),
            services.portfolio_pages(),
            services.settings_or_default(),
        )
    })
    .await
    .unwrap_or_default();

    let html = seo::generate_sitemap_html(&base_url, &items, &pages, &settings);
    Ok(html_response(html))
}

// Site pages

pub async fn index(
    services: web::Data<ContentServices>,
    resolver: web::Data<StorageUrlResolver>,
) -> Result<HttpResponse> {
    let (settings, pages, items) = first_value_timeout(move || {
        (
            services.settings_or_default(),
            services.portfolio_pages(),
            services.published_portfolio_items(),
        )
    })
    .await
    .unwrap_or_default();

    let content = item_grid(&items, &resolver).await;
    Ok(html_response(render_page(
        &settings.site_name,
        &content,
        &pages,
        &settings,
    )))
}

pub async fn portfolio_page(
    path: web::Path<String>,
    services: web::Data<ContentServices>,
    resolver: web::Data<StorageUrlResolver>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    let (settings, pages, items) = first_value_timeout(move || {
        (
            services.settings_or_default(),
            services.portfolio_pages(),
            services.published_portfolio_items(),
        )
    })
    .await
    .unwrap_or_default();

    let Some(page) = pages.iter().find(|page| page.effective_slug() == slug) else {
        return error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        );
    };

    let page_items: Vec<PortfolioItem> = items
        .into_iter()
        .filter(|item| belongs_to_page(item, page))
        .collect();

    let mut content = String::new();
    if !page.subtitle.trim().is_empty() {
        let _ = writeln!(content, "<p class=\"subtitle\">{}</p>", escape_html(&page.subtitle));
    }
    content.push_str(&item_grid(&page_items, &resolver).await);

    Ok(html_response(render_page(
        &page.title,
        &content,
        &pages,
        &settings,
    )))
}

fn belongs_to_page(item: &PortfolioItem, page: &PortfolioPageConfig) -> bool {
    match &item.portfolio_page_id {
        Some(page_id) if !page_id.is_empty() => page_id == &page.id,
        _ => item.category == page.category,
    }
}

pub async fn portfolio_item(
    path: web::Path<String>,
    services: web::Data<ContentServices>,
    resolver: web::Data<StorageUrlResolver>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    let (settings, pages, item) = first_value_timeout(move || {
        (
            services.settings_or_default(),
            services.portfolio_pages(),
            services.portfolio_item(&id),
        )
    })
    .await
    .unwrap_or_default();

    let Some(item) = item.filter(|item| item.published) else {
        return error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        );
    };

    let mut content = String::new();
    if !item.description.trim().is_empty() {
        let _ = writeln!(content, "<p>{}</p>", escape_html(&item.description));
    }

    // Display order by each gallery's `order`; hrefs keep the stored index
    // so the positional routes and the sitemap stay in agreement.
    for (gallery_index, gallery) in item.sorted_galleries() {
        if !gallery.title.trim().is_empty() {
            let _ = writeln!(content, "<h2>{}</h2>", escape_html(&gallery.title));
        }
        // Fan out the thumbnail resolutions, join, keep picture order.
        let references: Vec<&str> = gallery
            .pictures
            .iter()
            .map(|picture| picture.image_url.as_str())
            .collect();
        let resolved = resolver.resolve_many(references).await;

        content.push_str("<ul class=\"gallery\">\n");
        for (picture_index, (picture, image_url)) in
            gallery.pictures.iter().zip(resolved.iter()).enumerate()
        {
            let href = format!(
                "/portfolio/{}/galleries/{}/pictures/{}",
                item.id, gallery_index, picture_index
            );
            content.push_str("<li>");
            let _ = write!(content, "<a href=\"{}\">", escape_html(&href));
            if image_url.is_empty() {
                content.push_str("<span class=\"placeholder\"></span>");
            } else {
                let _ = write!(
                    content,
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(image_url),
                    escape_html(&picture.alt)
                );
            }
            content.push_str("</a></li>\n");
        }
        content.push_str("</ul>\n");
    }

    Ok(html_response(render_page(
        &item.title,
        &content,
        &pages,
        &settings,
    )))
}

pub async fn picture(
    path: web::Path<(String, usize, usize)>,
    services: web::Data<ContentServices>,
    resolver: web::Data<StorageUrlResolver>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (id, gallery_index, picture_index) = path.into_inner();

    let (settings, pages, item) = first_value_timeout(move || {
        (
            services.settings_or_default(),
            services.portfolio_pages(),
            services.portfolio_item(&id),
        )
    })
    .await
    .unwrap_or_default();

    // Positional addressing, matching the sitemap's index-based routes.
    let picture = item
        .as_ref()
        .filter(|item| item.published)
        .and_then(|item| item.galleries.get(gallery_index))
        .and_then(|gallery| gallery.pictures.get(picture_index));

    let Some(picture) = picture else {
        return error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        );
    };

    let image_url = resolver.resolve(&picture.image_url).await;

    let mut content = String::new();
    if image_url.is_empty() {
        content.push_str("<p class=\"placeholder\">Image unavailable.</p>\n");
    } else {
        let _ = writeln!(
            content,
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&image_url),
            escape_html(&picture.alt)
        );
    }
    if !picture.description.trim().is_empty() {
        let _ = writeln!(content, "<p>{}</p>", escape_html(&picture.description));
    }
    let mut details = Vec::new();
    if let Some(medium) = picture.art_medium.as_deref().filter(|v| !v.trim().is_empty()) {
        details.push(escape_html(medium));
    }
    if let Some(genre) = picture.genre.as_deref().filter(|v| !v.trim().is_empty()) {
        details.push(escape_html(genre));
    }
    if let Some(dimensions) = &picture.dimensions {
        details.push(format!("{} × {} cm", dimensions.width, dimensions.height));
    }
    if picture.sold == Some(true) {
        details.push("Sold".to_string());
    } else if picture.show_price == Some(true)
        && let Some(price) = picture.price
    {
        details.push(format!("{:.2}", price));
    }
    if !details.is_empty() {
        let _ = writeln!(content, "<p class=\"details\">{}</p>", details.join(" · "));
    }

    let title = if picture.alt.trim().is_empty() {
        item.as_ref().map(|item| item.title.clone()).unwrap_or_default()
    } else {
        picture.alt.clone()
    };

    Ok(html_response(render_page(&title, &content, &pages, &settings)))
}

pub async fn about(
    services: web::Data<ContentServices>,
    resolver: web::Data<StorageUrlResolver>,
) -> Result<HttpResponse> {
    let (settings, pages, about) = first_value_timeout(move || {
        (
            services.settings_or_default(),
            services.portfolio_pages(),
            services.about(),
        )
    })
    .await
    .unwrap_or_default();

    let mut content = String::new();
    match about {
        Some(about) => {
            let image_url = resolver.resolve(&about.image_url).await;
            if !image_url.is_empty() {
                let _ = writeln!(
                    content,
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(&image_url),
                    escape_html(&about.title)
                );
            }
            for paragraph in about.body.split("\n\n").filter(|p| !p.trim().is_empty()) {
                let _ = writeln!(content, "<p>{}</p>", escape_html(paragraph.trim()));
            }
        }
        None => content.push_str("<p>Nothing here yet.</p>\n"),
    }

    Ok(html_response(render_page("About", &content, &pages, &settings)))
}

pub async fn contact(services: web::Data<ContentServices>) -> Result<HttpResponse> {
    let (settings, pages, contact) = first_value_timeout(move || {
        (
            services.settings_or_default(),
            services.portfolio_pages(),
            services.contact(),
        )
    })
    .await
    .unwrap_or_default();

    let content = contact_content(contact.as_ref());
    Ok(html_response(render_page(
        "Contact", &content, &pages, &settings,
    )))
}

fn contact_content(contact: Option<&ContactInfo>) -> String {
    let mut content = String::new();
    if let Some(contact) = contact {
        content.push_str("<ul class=\"contact-details\">\n");
        if !contact.email.trim().is_empty() {
            let email = escape_html(&contact.email);
            let _ = writeln!(
                content,
                "<li><a href=\"mailto:{}\">{}</a></li>",
                email, email
            );
        }
        if let Some(phone) = contact.phone.as_deref().filter(|v| !v.trim().is_empty()) {
            let _ = writeln!(content, "<li>{}</li>", escape_html(phone));
        }
        if let Some(address) = contact.address.as_deref().filter(|v| !v.trim().is_empty()) {
            let _ = writeln!(content, "<li>{}</li>", escape_html(address));
        }
        for link in [&contact.instagram, &contact.linkedin, &contact.twitter, &contact.behance]
            .into_iter()
            .flatten()
            .filter(|v| !v.trim().is_empty())
        {
            let link = escape_html(link);
            let _ = writeln!(content, "<li><a href=\"{}\">{}</a></li>", link, link);
        }
        content.push_str("</ul>\n");
    }
    // Required fields and email format are enforced in the browser; nothing
    // reaches the backend from this form.
    content.push_str(
        "<form class=\"contact-form\" data-contact-form>\n\
         <label for=\"name\">Name</label>\n\
         <input id=\"name\" name=\"name\" required>\n\
         <label for=\"email\">Email</label>\n\
         <input id=\"email\" name=\"email\" type=\"email\" required>\n\
         <label for=\"message\">Message</label>\n\
         <textarea id=\"message\" name=\"message\" required></textarea>\n\
         <button type=\"submit\">Send</button>\n\
         </form>\n",
    );
    content
}

async fn item_grid(items: &[PortfolioItem], resolver: &StorageUrlResolver) -> String {
    // Resolve all featured images in parallel; the join preserves item order.
    let references: Vec<&str> = items
        .iter()
        .map(|item| item.featured_image.as_str())
        .collect();
    let resolved = resolver.resolve_many(references).await;

    let mut html = String::from("<ul class=\"portfolio-grid\">\n");
    for (item, image_url) in items.iter().zip(resolved.iter()) {
        html.push_str("<li><article>");
        let _ = write!(
            html,
            "<a href=\"/portfolio/{}\">",
            escape_html(&item.id)
        );
        if !image_url.is_empty() {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(image_url),
                escape_html(&item.title)
            );
        }
        let _ = write!(html, "<h2>{}</h2></a>", escape_html(&item.title));
        if !item.category.trim().is_empty() {
            let _ = write!(html, "<p class=\"category\">{}</p>", escape_html(&item.category));
        }
        html.push_str("</article></li>\n");
    }
    html.push_str("</ul>\n");
    html
}

// Login view

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub token: String,
}

pub async fn login_page(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let html = render_minijinja_template(
        app_state.templates.as_ref(),
        "admin/login_page.html",
        context! { app_name => &config.app.name },
    )
    .unwrap_or_else(|err| {
        log::error!("Failed to render login template: {}", err);
        format!("<h1>Sign in | {}</h1>", escape_html(&config.app.name))
    });
    Ok(html_response(html))
}

pub async fn login_submit(
    form: web::Form<LoginForm>,
    config: web::Data<ValidatedConfig>,
    auth: web::Data<AuthRuntime>,
) -> Result<HttpResponse> {
    match auth.verifier.verify(&form.email, &form.token).await {
        Ok(identity) => {
            log::info!("signed in: {}", identity.email);
            auth.cache.sign_in(identity);
            Ok(HttpResponse::Found()
                .insert_header(("Location", config.admin.path.clone()))
                .finish())
        }
        Err(err) => {
            log::warn!("sign-in rejected: {}", err);
            Ok(HttpResponse::Found()
                .insert_header(("Location", "/login?error=1"))
                .finish())
        }
    }
}

pub async fn logout(auth: web::Data<AuthRuntime>) -> Result<HttpResponse> {
    auth.cache.sign_out();
    Ok(HttpResponse::Found()
        .insert_header(("Location", "/"))
        .finish())
}

// Meta-injected index shell, same artifact the offline generator writes.

pub async fn index_shell(
    services: web::Data<ContentServices>,
    resolver: web::Data<StorageUrlResolver>,
) -> Result<HttpResponse> {
    let (mut settings, contact) = first_value_timeout(move || {
        (services.settings_or_default(), services.contact())
    })
    .await
    .unwrap_or_default();
    seo::resolve_meta_assets(&resolver, &mut settings).await;

    let template = load_template("public/index_shell")
        .unwrap_or_else(|_| "<!DOCTYPE html><html><head></head><body></body></html>".to_string());
    let html = seo::render_meta(&template, &settings, contact.as_ref());
    Ok(html_response(html))
}
