// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Offline SEO generator. Writes `sitemap.xml`, `sitemap.html`, `index.html`
//! and `robots.txt` into the runtime's output directory from the stored
//! content, without a running server.

use actix_web::rt::System;
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use atelier::config::{Config, ValidatedConfig};
use atelier::content::models::{
    PortfolioItem, PortfolioPageConfig, SETTINGS_DOC_ID, SiteSettings,
};
use atelier::content::services::ContentServices;
use atelier::content::store::{
    COLLECTION_PORTFOLIO, COLLECTION_PORTFOLIO_PAGES, COLLECTION_SETTINGS, DocumentStore,
};
use atelier::diagnostics::LogDiagnostics;
use atelier::runtime_paths::RuntimePaths;
use atelier::seo;
use atelier::storage::{LocalObjectStore, StorageUrlResolver};
use atelier::templates::load_template;

/// Overrides both `site.base_url` from the config and `siteUrl` from the
/// stored settings.
const BASE_URL_ENV: &str = "ATELIER_BASE_URL";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("seo_build: invalid arguments: {}", error);
            return 1;
        }
    };
    if parsed_args.help {
        print!("{}", help_text());
        return 0;
    }
    init_logger();

    match build_artifacts(&parsed_args.runtime_root) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
            0
        }
        Err(error) => {
            eprintln!("seo_build: {}", error);
            1
        }
    }
}

// Same format as the server binary; the resolver and content reads report
// through `LogDiagnostics`, so the log must be live here too.
fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn build_artifacts(runtime_root: &std::path::Path) -> Result<Vec<PathBuf>, String> {
    let runtime_paths = RuntimePaths::from_root(runtime_root);
    let config = load_config(&runtime_paths)?;
    let store = DocumentStore::new(&runtime_paths.data_dir);

    // The generators are meaningless without the settings singleton; unlike
    // the server, missing data here is a hard failure.
    let settings = store
        .read::<SiteSettings>(COLLECTION_SETTINGS, SETTINGS_DOC_ID)
        .map_err(|err| format!("cannot read settings: {}", err))?
        .ok_or_else(|| {
            format!(
                "settings document '{}' is missing; save the site settings first",
                SETTINGS_DOC_ID
            )
        })?;

    let base_url = base_url(&config, &settings)?;

    let mut items = store
        .read_all::<PortfolioItem>(COLLECTION_PORTFOLIO)
        .map_err(|err| format!("cannot read portfolio items: {}", err))?;
    items.sort_by_key(|item| item.order);

    let mut pages = store
        .read_all::<PortfolioPageConfig>(COLLECTION_PORTFOLIO_PAGES)
        .map_err(|err| format!("cannot read portfolio pages: {}", err))?;
    pages.sort_by_key(|page| page.order.unwrap_or(i64::MAX));

    let index_html = System::new().block_on(render_index(
        &runtime_paths,
        &config,
        &base_url,
        settings.clone(),
    ));

    fs::create_dir_all(&runtime_paths.output_dir)
        .map_err(|err| format!("cannot create output directory: {}", err))?;

    let artifacts = [
        ("sitemap.xml", seo::generate_sitemap_xml(&base_url, &items, &pages)),
        (
            "sitemap.html",
            seo::generate_sitemap_html(&base_url, &items, &pages, &settings),
        ),
        ("index.html", index_html),
        ("robots.txt", seo::robots_txt(&base_url)),
    ];

    let mut written = Vec::new();
    for (name, body) in artifacts {
        let path = runtime_paths.output_dir.join(name);
        fs::write(&path, body).map_err(|err| format!("cannot write {}: {}", name, err))?;
        written.push(path);
    }
    Ok(written)
}

/// A missing config file is fine for read-only generation; the defaults
/// apply. An invalid one is not.
fn load_config(runtime_paths: &RuntimePaths) -> Result<ValidatedConfig, String> {
    let config = if runtime_paths.config_file.exists() {
        Config::load_from_file(&runtime_paths.config_file).map_err(|err| err.to_string())?
    } else {
        Config::default()
    };
    config.validate().map_err(|err| err.to_string())
}

fn base_url(config: &ValidatedConfig, settings: &SiteSettings) -> Result<String, String> {
    let from_env = std::env::var(BASE_URL_ENV).unwrap_or_default();
    let candidate = [
        from_env.as_str(),
        settings.site_url.as_str(),
        config.site.base_url.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .find(|value| !value.is_empty());

    candidate.map(str::to_string).ok_or_else(|| {
        format!(
            "no site base URL: set {}, the siteUrl setting, or site.base_url in the config",
            BASE_URL_ENV
        )
    })
}

/// The index shell template can be overridden by an `index.template.html`
/// next to the runtime data; otherwise the embedded one is used.
async fn render_index(
    runtime_paths: &RuntimePaths,
    config: &ValidatedConfig,
    base_url: &str,
    mut settings: SiteSettings,
) -> String {
    let template = match fs::read_to_string(&runtime_paths.index_template_file) {
        Ok(content) => content,
        Err(_) => load_template("public/index_shell")
            .unwrap_or_else(|_| "<!DOCTYPE html><html><head></head><body></body></html>".to_string()),
    };

    let object_base_url = if config.storage.public_base_url.trim().is_empty() {
        base_url.to_string()
    } else {
        config.storage.public_base_url.clone()
    };
    let backend = Arc::new(LocalObjectStore::new(
        &object_base_url,
        &config.storage.bucket,
        &runtime_paths.objects_dir,
    ));
    let resolver = StorageUrlResolver::new(backend, Arc::new(LogDiagnostics));
    seo::resolve_meta_assets(&resolver, &mut settings).await;

    // Contact is optional for the meta block; degrade like the server does.
    let services = ContentServices::new(
        DocumentStore::new(&runtime_paths.data_dir),
        Arc::new(LogDiagnostics),
    );
    let contact = services.contact();

    seo::render_meta(&template, &settings, contact.as_ref())
}

struct ParsedArgs {
    runtime_root: PathBuf,
    help: bool,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut runtime_root = PathBuf::from(".");
    let mut help = false;

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            help = true;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = PathBuf::from(value);
        } else {
            return Err(format!("Unknown argument '{}'", arg));
        }
    }

    Ok(ParsedArgs { runtime_root, help })
}

fn help_text() -> String {
    format!(
        "seo_build - offline SEO artifact generator\n\
         \n\
         Usage: seo_build [-C <root>]\n\
         \n\
         Writes sitemap.xml, sitemap.html, index.html and robots.txt to the\n\
         runtime's output directory.\n\
         \n\
         Options:\n\
           -C <root>   Runtime directory (default: current directory)\n\
           -h, --help  Show this help\n\
         \n\
         Environment:\n\
           {}  Override the site base URL\n",
        BASE_URL_ENV
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_prefers_settings_over_config() {
        let mut config = Config::default();
        config.site.base_url = "https://config.example".to_string();
        let config = config.validate().expect("config");
        let settings = SiteSettings {
            site_url: "https://settings.example".to_string(),
            ..SiteSettings::default()
        };
        assert_eq!(
            base_url(&config, &settings).expect("base url"),
            "https://settings.example"
        );
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let config = Config::default().validate().expect("config");
        assert!(base_url(&config, &SiteSettings::default()).is_err());
    }

    #[test]
    fn parse_args_accepts_runtime_root() {
        let parsed =
            parse_args_from(vec!["-C".to_string(), "runtime".to_string()]).expect("parse args");
        assert_eq!(parsed.runtime_root, PathBuf::from("runtime"));
        assert!(!parsed.help);
    }

    #[test]
    fn parse_args_rejects_unknown_flags() {
        assert!(parse_args_from(vec!["--force".to_string()]).is_err());
    }
}
