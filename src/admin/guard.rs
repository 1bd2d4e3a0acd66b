// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::auth::AuthRuntime;
use crate::config::ValidatedConfig;
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::LOCATION,
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::sync::Arc;

/// Outcome of the admin gate for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

/// Point-in-time admin check. The emulator bypass short-circuits everything;
/// otherwise the cached identity's email must appear verbatim in the
/// allow-list. No identity, or a non-listed one, is a plain deny.
pub fn admin_access_decision(
    config: &ValidatedConfig,
    signed_in_email: Option<&str>,
) -> AccessDecision {
    if config.environment.emulator_bypass() {
        return AccessDecision::Allow;
    }
    match signed_in_email {
        Some(email) if config.is_admin_email(email) => AccessDecision::Allow,
        _ => AccessDecision::Deny,
    }
}

/// Middleware guarding the admin scope. Denied page loads are redirected to
/// the login view; denied API calls get a 401 body instead, so the admin
/// frontend can react without following redirects.
pub struct RequireAdminMiddleware {
    config: Arc<ValidatedConfig>,
    auth: Arc<AuthRuntime>,
}

impl RequireAdminMiddleware {
    pub fn new(config: Arc<ValidatedConfig>, auth: Arc<AuthRuntime>) -> Self {
        Self { config, auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddlewareService {
            service,
            config: self.config.clone(),
            auth: self.auth.clone(),
        }))
    }
}

pub struct RequireAdminMiddlewareService<S> {
    service: S,
    config: Arc<ValidatedConfig>,
    auth: Arc<AuthRuntime>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let email = self.auth.cache.signed_in_email();
        let decision = admin_access_decision(&self.config, email.as_deref());

        if decision == AccessDecision::Deny {
            if let Some(email) = &email {
                log::warn!("admin access denied for {}", email);
            }
            let is_api_call = req.path().contains("/api/");
            let (req, _) = req.into_parts();

            let response = if is_api_call {
                HttpResponse::Unauthorized()
                    .json(serde_json::json!({ "error": "unauthorized" }))
                    .map_into_right_body()
            } else {
                let current_path = req
                    .uri()
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or(req.uri().path());
                let location =
                    format!("/login?return_path={}", urlencoding::encode(current_path));
                HttpResponse::Found()
                    .insert_header((LOCATION, location))
                    .finish()
                    .map_into_right_body()
            };

            return Box::pin(async move { Ok(ServiceResponse::new(req, response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
