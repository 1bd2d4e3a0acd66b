// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::admin::dialog::DialogPayload;
use crate::admin::guard::RequireAdminMiddleware;
use crate::app_state::AppState;
use crate::auth::AuthRuntime;
use crate::config::ValidatedConfig;
use crate::content::services::{ContentError, ContentServices};
use crate::templates::render_minijinja_template;
use actix_web::{HttpResponse, Result, web};
use minijinja::context;
use serde_json::json;
use std::sync::Arc;

pub fn configure(
    cfg: &mut web::ServiceConfig,
    admin_path: &str,
    config: &Arc<ValidatedConfig>,
    auth: &Arc<AuthRuntime>,
) {
    cfg.service(
        web::scope(admin_path)
            .wrap(RequireAdminMiddleware::new(config.clone(), auth.clone()))
            .route("", web::get().to(shell))
            .service(
                web::scope("/api")
                    .route("/portfolio", web::get().to(list_portfolio_items))
                    .route("/portfolio/{id}", web::get().to(get_portfolio_item))
                    .route("/portfolio/{id}", web::delete().to(delete_portfolio_item))
                    .route("/pages", web::get().to(list_portfolio_pages))
                    .route("/pages/{id}", web::delete().to(delete_portfolio_page))
                    .route("/settings", web::get().to(get_settings))
                    .route("/about", web::get().to(get_about))
                    .route("/contact", web::get().to(get_contact))
                    .route("/dialog", web::post().to(submit_dialog)),
            ),
    );
}

/// Admin panel shell; editors inside it talk to the `/api` routes.
async fn shell(
    config: web::Data<ValidatedConfig>,
    auth: web::Data<AuthRuntime>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let email = auth
        .cache
        .signed_in_email()
        .unwrap_or_else(|| "emulator".to_string());
    let html = render_minijinja_template(
        app_state.templates.as_ref(),
        "admin/shell.html",
        context! {
            app_name => &config.app.name,
            admin_path => &config.admin.path,
            email => email,
        },
    )
    .unwrap_or_else(|err| {
        log::error!("Failed to render admin shell: {}", err);
        format!("<h1>{}</h1>", config.app.name)
    });
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

// Read endpoints
//
// Unlike the public pages these answer from the store directly, with no
// published gate, so drafts stay editable.

async fn list_portfolio_items(services: web::Data<ContentServices>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(services.portfolio_items()))
}

async fn get_portfolio_item(
    path: web::Path<String>,
    services: web::Data<ContentServices>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match services.portfolio_item(&id) {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Ok(not_found_json(&id)),
    }
}

async fn list_portfolio_pages(services: web::Data<ContentServices>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(services.portfolio_pages()))
}

async fn get_settings(services: web::Data<ContentServices>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(services.settings_or_default()))
}

async fn get_about(services: web::Data<ContentServices>) -> Result<HttpResponse> {
    match services.about() {
        Some(about) => Ok(HttpResponse::Ok().json(about)),
        None => Ok(not_found_json("about")),
    }
}

async fn get_contact(services: web::Data<ContentServices>) -> Result<HttpResponse> {
    match services.contact() {
        Some(contact) => Ok(HttpResponse::Ok().json(contact)),
        None => Ok(not_found_json("contact")),
    }
}

// Write endpoints

async fn submit_dialog(
    payload: web::Json<DialogPayload>,
    services: web::Data<ContentServices>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(json!({ "errors": errors })));
    }
    match payload.apply(&services) {
        Ok(document) => Ok(HttpResponse::Ok().json(document)),
        Err(err) => Ok(content_error_response(&err, &app_state)),
    }
}

async fn delete_portfolio_item(
    path: web::Path<String>,
    services: web::Data<ContentServices>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match services.delete_portfolio_item(&id) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "deleted": id }))),
        Err(err) => Ok(content_error_response(&err, &app_state)),
    }
}

async fn delete_portfolio_page(
    path: web::Path<String>,
    services: web::Data<ContentServices>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match services.delete_portfolio_page(&id) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "deleted": id }))),
        Err(err) => Ok(content_error_response(&err, &app_state)),
    }
}

fn not_found_json(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": format!("'{}' not found", what) }))
}

fn content_error_response(err: &ContentError, app_state: &AppState) -> HttpResponse {
    match err {
        ContentError::NotFound(id) => not_found_json(id),
        ContentError::Store(_) => {
            app_state.diagnostics.report("admin.write", err);
            HttpResponse::InternalServerError().json(json!({ "error": "storage failure" }))
        }
    }
}
