// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use atelier::app_state::AppState;
use atelier::auth::{AuthRuntime, DenyAllVerifier, EmulatorVerifier, IdentityVerifier};
use atelier::config::ValidatedConfig;
use atelier::content::services::ContentServices;
use atelier::content::store::DocumentStore;
use atelier::diagnostics::LogDiagnostics;
use atelier::runtime_paths::RuntimePaths;
use atelier::storage::{LocalObjectStore, StorageUrlResolver};
use atelier::{admin, bootstrap, public};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("Invalid command line arguments: {}", error);
            eprintln!("Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if parsed_args.help {
        print!("{}", help_text());
        return 0;
    }

    init_logger();

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("Bootstrap error: {}", error);
            eprintln!("Application cannot start with invalid configuration.");
            return 1;
        }
    };
    if bootstrap.created_config {
        eprintln!(
            "[bootstrap] created {}; review it before going live",
            bootstrap.runtime_paths.config_file.display()
        );
    }

    match System::new().block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("Server failed to start: {}", error);
            1
        }
    }
}

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

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let config = Arc::new(bootstrap.config);
    let runtime_paths = bootstrap.runtime_paths;

    log_startup_info(&config, &runtime_paths);

    let diagnostics = Arc::new(LogDiagnostics);

    let services = ContentServices::new(
        DocumentStore::new(&runtime_paths.data_dir),
        diagnostics.clone(),
    );

    let object_base_url = if config.storage.public_base_url.trim().is_empty() {
        format!(
            "http://{}:{}",
            config.server.bind_address, config.server.port
        )
    } else {
        config.storage.public_base_url.clone()
    };
    let backend = Arc::new(LocalObjectStore::new(
        &object_base_url,
        &config.storage.bucket,
        &runtime_paths.objects_dir,
    ));
    let resolver = StorageUrlResolver::new(backend, diagnostics.clone());

    let verifier: Arc<dyn IdentityVerifier> = if config.environment.emulator_bypass() {
        info!("emulator mode: identity checks accept any non-empty email");
        Arc::new(EmulatorVerifier)
    } else {
        Arc::new(DenyAllVerifier)
    };
    let auth = Arc::new(AuthRuntime::new(verifier));

    let app_state = Arc::new(AppState::with_diagnostics(
        &config.app.name,
        runtime_paths.clone(),
        diagnostics,
    ));

    let bind = (config.server.bind_address.clone(), config.server.port);
    let admin_path = config.admin.path.clone();

    let factory = {
        let config = config.clone();
        let auth = auth.clone();
        let app_state = app_state.clone();

        move || {
            let admin_path = admin_path.clone();
            let config_for_admin = config.clone();
            let auth_for_admin = auth.clone();

            App::new()
                .app_data(web::Data::from(config.clone()))
                .app_data(web::Data::from(app_state.clone()))
                .app_data(web::Data::from(auth.clone()))
                .app_data(web::Data::new(services.clone()))
                .app_data(web::Data::new(resolver.clone()))
                .wrap(Logger::new(
                    r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
                ))
                .configure(move |cfg| {
                    admin::configure(cfg, &admin_path, &config_for_admin, &auth_for_admin)
                })
                .configure(public::configure)
        }
    };

    HttpServer::new(factory).bind(bind)?.run().await
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths) {
    info!("Starting {}", config.app.name);
    info!(
        "Listening on http://{}:{}",
        config.server.bind_address, config.server.port
    );
    info!(
        "Admin panel available at: http://{}:{}{}",
        config.server.bind_address, config.server.port, config.admin.path
    );
    info!("Runtime root: {}", runtime_paths.root.display());
    info!("Data directory: {}", runtime_paths.data_dir.display());
    info!("Objects directory: {}", runtime_paths.objects_dir.display());
    info!("Config file: {}", runtime_paths.config_file.display());
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

    let runtime_root = make_runtime_root_absolute(runtime_root)?;
    Ok(ParsedArgs { runtime_root, help })
}

fn make_runtime_root_absolute(runtime_root: PathBuf) -> Result<PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }
    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}

fn help_text() -> String {
    "atelier - portfolio site server\n\
     \n\
     Usage: atelier [-C <root>]\n\
     \n\
     Options:\n\
       -C <root>   Runtime directory (default: current directory)\n\
       -h, --help  Show this help\n"
        .to_string()
}
