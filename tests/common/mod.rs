// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use atelier::admin;
use atelier::app_state::AppState;
use atelier::auth::{AuthRuntime, EmulatorVerifier, Identity};
use atelier::config::{Config, ValidatedConfig};
use atelier::content::models::{GalleryEntry, Picture, PortfolioItem, PortfolioPageConfig};
use atelier::content::services::ContentServices;
use atelier::content::store::DocumentStore;
use atelier::diagnostics::RecordingDiagnostics;
use atelier::public;
use atelier::runtime_paths::RuntimePaths;
use atelier::storage::{LocalObjectStore, StorageUrlResolver};
use atelier::util::test_fixtures::TestFixtureRoot;
use std::fs;
use std::sync::Arc;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const OBJECT_BASE_URL: &str = "http://localhost:8080";

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
    pub services: ContentServices,
    pub resolver: StorageUrlResolver,
    pub auth: Arc<AuthRuntime>,
    pub diagnostics: Arc<RecordingDiagnostics>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Build a harness with the default allow-list config, then let the test
    /// tweak it before validation.
    pub fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let fixture = TestFixtureRoot::new_unique("atelier-suite").expect("fixture root");
        fixture.init_runtime_layout().expect("fixture layout");
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");

        let mut config = Config::default();
        config.admin.emails = vec![ADMIN_EMAIL.to_string()];
        adjust(&mut config);
        let config = Arc::new(config.validate().expect("test config"));

        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let services = ContentServices::new(
            DocumentStore::new(&runtime_paths.data_dir),
            diagnostics.clone(),
        );
        let backend = Arc::new(LocalObjectStore::new(
            OBJECT_BASE_URL,
            &config.storage.bucket,
            &runtime_paths.objects_dir,
        ));
        let resolver = StorageUrlResolver::new(backend, diagnostics.clone());
        let auth = Arc::new(AuthRuntime::new(Arc::new(EmulatorVerifier)));
        let app_state = Arc::new(AppState::with_diagnostics(
            &config.app.name,
            runtime_paths.clone(),
            diagnostics.clone(),
        ));

        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
            services,
            resolver,
            auth,
            diagnostics,
        }
    }

    pub fn sign_in(&self, email: &str) {
        self.auth.cache.sign_in(Identity {
            email: email.to_string(),
        });
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            app_state: self.app_state.clone(),
            services: self.services.clone(),
            resolver: self.resolver.clone(),
            auth: self.auth.clone(),
            admin_path: self.config.admin.path.clone(),
        }
    }

    /// Drop a raw object into the local store so the resolver can mint a
    /// download URL for it.
    pub fn write_object(&self, key: &str, bytes: &[u8]) {
        let path = self.fixture.objects_dir().join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("object parent dir");
        }
        fs::write(path, bytes).expect("write object");
    }
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
    pub services: ContentServices,
    pub resolver: StorageUrlResolver,
    pub auth: Arc<AuthRuntime>,
    pub admin_path: String,
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let admin_path = bundle.admin_path;
    let config_for_admin = bundle.config.clone();
    let auth_for_admin = bundle.auth.clone();

    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.app_state))
        .app_data(web::Data::from(bundle.auth))
        .app_data(web::Data::new(bundle.services))
        .app_data(web::Data::new(bundle.resolver))
        .configure(move |cfg| {
            admin::configure(cfg, &admin_path, &config_for_admin, &auth_for_admin)
        })
        .configure(public::configure)
}

/// GET a path against an initialized test service and return
/// `(StatusCode, body as String)`.
#[macro_export]
macro_rules! get_text {
    ($app:expr, $uri:expr) => {{
        let req = actix_web::test::TestRequest::get()
            .uri($uri)
            .insert_header(("Host", "public.example"))
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        (status, String::from_utf8_lossy(&body).to_string())
    }};
}

pub fn published_item(id: &str, title: &str) -> PortfolioItem {
    PortfolioItem {
        id: id.to_string(),
        title: title.to_string(),
        category: "paintings".to_string(),
        published: true,
        ..PortfolioItem::default()
    }
}

pub fn gallery_with_pictures(image_urls: &[&str]) -> GalleryEntry {
    GalleryEntry {
        pictures: image_urls
            .iter()
            .map(|image_url| Picture {
                image_url: image_url.to_string(),
                ..Picture::default()
            })
            .collect(),
        ..GalleryEntry::default()
    }
}

pub fn page(id: &str, title: &str, category: &str, order: i64) -> PortfolioPageConfig {
    PortfolioPageConfig {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        order: Some(order),
        ..PortfolioPageConfig::default()
    }
}
