// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

async fn post_dialog(
    harness: &common::TestHarness,
    payload: Value,
) -> (StatusCode, Value) {
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;
    let req = test::TestRequest::post()
        .uri("/admin/api/dialog")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[actix_web::test]
async fn portfolio_item_dialog_persists_the_item() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);

    let (status, saved) = post_dialog(
        &harness,
        json!({
            "kind": "portfolio-item",
            "item": {"title": "Dunes", "category": "paintings", "published": true}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let id = saved["id"].as_str().expect("generated id");
    assert!(!id.is_empty());
    assert!(saved["createdAt"].is_string());

    let stored = harness.services.portfolio_item(id).expect("stored item");
    assert_eq!(stored.title, "Dunes");
    assert!(stored.published);
}

#[actix_web::test]
async fn invalid_dialog_payload_returns_field_errors() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);

    let (status, body) = post_dialog(
        &harness,
        json!({"kind": "portfolio-item", "item": {"title": "  ", "category": ""}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("errors array");
    let fields: Vec<&str> = errors
        .iter()
        .map(|error| error["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"category"));
}

#[actix_web::test]
async fn unknown_dialog_kind_is_a_bad_request() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);

    let (status, _) = post_dialog(&harness, json!({"kind": "mystery"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn settings_dialogs_merge_into_the_singleton() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);

    let (status, _) = post_dialog(
        &harness,
        json!({"kind": "settings", "update": {"siteName": "Studio North"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, merged) = post_dialog(
        &harness,
        json!({"kind": "settings", "update": {"siteDescription": "Oil paintings"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(merged["siteName"], "Studio North");
    assert_eq!(merged["siteDescription"], "Oil paintings");
}

#[actix_web::test]
async fn contact_dialog_round_trips_through_the_api() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);

    let (status, _) = post_dialog(
        &harness,
        json!({
            "kind": "contact",
            "contact": {"email": "studio@example.art", "instagram": "https://instagram.com/studio"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;
    let req = test::TestRequest::get()
        .uri("/admin/api/contact")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "studio@example.art");
}

#[actix_web::test]
async fn admin_listing_includes_drafts() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);
    let mut draft = common::published_item("draft", "Draft");
    draft.published = false;
    harness.services.save_portfolio_item(draft).expect("save");

    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;
    let req = test::TestRequest::get()
        .uri("/admin/api/portfolio")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let items: Value = test::read_body_json(resp).await;
    assert_eq!(items.as_array().expect("array").len(), 1);
}

#[actix_web::test]
async fn deleting_a_missing_item_is_not_found() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);

    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;
    let req = test::TestRequest::delete()
        .uri("/admin/api/portfolio/ghost")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_an_item_removes_it() {
    let harness = common::TestHarness::new();
    harness.sign_in(common::ADMIN_EMAIL);
    harness
        .services
        .save_portfolio_item(common::published_item("p1", "Dunes"))
        .expect("save");

    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;
    let req = test::TestRequest::delete()
        .uri("/admin/api/portfolio/p1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(harness.services.portfolio_item("p1").is_none());
}
