// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use atelier::content::models::SettingsUpdate;
use std::process::Command;

fn run_seo_build(harness: &common::TestHarness, envs: &[(&str, &str)]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_seo_build"));
    command
        .arg("-C")
        .arg(harness.fixture.path())
        .env_remove("ATELIER_BASE_URL")
        .env_remove("RUST_LOG");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("run seo_build")
}

#[test]
fn missing_settings_exit_one_with_a_diagnostic() {
    let harness = common::TestHarness::new();
    let output = run_seo_build(&harness, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("settings"), "stderr was: {}", stderr);
}

#[test]
fn missing_base_url_exit_one() {
    let harness = common::TestHarness::new();
    harness
        .services
        .upsert_settings(&SettingsUpdate {
            site_name: Some("Studio North".to_string()),
            ..SettingsUpdate::default()
        })
        .expect("settings");

    let output = run_seo_build(&harness, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("base URL"), "stderr was: {}", stderr);
}

#[test]
fn writes_all_four_artifacts() {
    let harness = common::TestHarness::new();
    harness
        .services
        .upsert_settings(&SettingsUpdate {
            site_name: Some("Studio North".to_string()),
            site_url: Some("https://example.art".to_string()),
            ..SettingsUpdate::default()
        })
        .expect("settings");
    harness
        .services
        .save_portfolio_item(common::published_item("p1", "Dunes"))
        .expect("item");

    let output = run_seo_build(&harness, &[]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = harness.fixture.output_dir();
    let sitemap = std::fs::read_to_string(out.join("sitemap.xml")).expect("sitemap.xml");
    assert!(sitemap.contains("<loc>https://example.art/portfolio/p1</loc>"));

    let robots = std::fs::read_to_string(out.join("robots.txt")).expect("robots.txt");
    assert!(robots.contains("Sitemap: https://example.art/sitemap.xml"));

    let index = std::fs::read_to_string(out.join("index.html")).expect("index.html");
    assert!(index.contains("Studio North"));
    assert!(!index.contains("{{"));

    assert!(out.join("sitemap.html").is_file());
}

#[test]
fn resolver_failures_are_logged_to_stderr() {
    let harness = common::TestHarness::new();
    // A favicon key with no stored object makes the resolver report while
    // the build itself still degrades and succeeds.
    harness
        .services
        .upsert_settings(&SettingsUpdate {
            site_name: Some("Studio North".to_string()),
            site_url: Some("https://example.art".to_string()),
            favicon_url: Some("uploads/missing-favicon.png".to_string()),
            ..SettingsUpdate::default()
        })
        .expect("settings");

    let output = run_seo_build(&harness, &[]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("storage.resolve"), "stderr was: {}", stderr);
}

#[test]
fn environment_base_url_overrides_settings() {
    let harness = common::TestHarness::new();
    harness
        .services
        .upsert_settings(&SettingsUpdate {
            site_url: Some("https://stale.example".to_string()),
            ..SettingsUpdate::default()
        })
        .expect("settings");

    let output = run_seo_build(&harness, &[("ATELIER_BASE_URL", "https://fresh.example")]);
    assert_eq!(output.status.code(), Some(0));

    let sitemap = std::fs::read_to_string(harness.fixture.output_dir().join("sitemap.xml"))
        .expect("sitemap.xml");
    assert!(sitemap.contains("https://fresh.example/"));
    assert!(!sitemap.contains("stale.example"));
}

#[test]
fn on_disk_template_overrides_the_embedded_shell() {
    let harness = common::TestHarness::new();
    harness
        .services
        .upsert_settings(&SettingsUpdate {
            site_name: Some("Studio North".to_string()),
            site_url: Some("https://example.art".to_string()),
            ..SettingsUpdate::default()
        })
        .expect("settings");
    std::fs::write(
        &harness.runtime_paths.index_template_file,
        "<!DOCTYPE html><html><head><title>{{SITE_NAME}}</title></head><body>custom shell</body></html>",
    )
    .expect("template override");

    let output = run_seo_build(&harness, &[]);
    assert_eq!(output.status.code(), Some(0));

    let index = std::fs::read_to_string(harness.fixture.output_dir().join("index.html"))
        .expect("index.html");
    assert!(index.contains("custom shell"));
    assert!(index.contains("<title>Studio North</title>"));
}
