// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::RwLock;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub email: String,
}

#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    ProviderUnavailable(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "invalid credentials"),
            AuthError::ProviderUnavailable(msg) => {
                write!(f, "identity provider unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Cached auth state. The admin gate is a point-in-time check against this
/// cache, never a round trip to the identity provider.
#[derive(Default)]
pub struct AuthCache {
    current: RwLock<Option<Identity>>,
}

impl AuthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, identity: Identity) {
        *self.current.write().expect("auth cache lock") = Some(identity);
    }

    pub fn sign_out(&self) {
        *self.current.write().expect("auth cache lock") = None;
    }

    pub fn current(&self) -> Option<Identity> {
        self.current.read().expect("auth cache lock").clone()
    }

    pub fn signed_in_email(&self) -> Option<String> {
        self.current().map(|identity| identity.email)
    }
}

/// Auth collaborators bundled for handler injection.
pub struct AuthRuntime {
    pub cache: AuthCache,
    pub verifier: std::sync::Arc<dyn IdentityVerifier>,
}

impl AuthRuntime {
    pub fn new(verifier: std::sync::Arc<dyn IdentityVerifier>) -> Self {
        Self {
            cache: AuthCache::new(),
            verifier,
        }
    }
}

/// Integration point for the external authentication service. The server
/// only ever sees a verified identity; token semantics stay on the provider
/// side.
pub trait IdentityVerifier: Send + Sync {
    fn verify<'a>(
        &'a self,
        email: &'a str,
        token: &'a str,
    ) -> BoxFuture<'a, Result<Identity, AuthError>>;
}

/// Emulator-mode verifier: accepts any non-empty email. Wired only when the
/// non-production emulator flag is on.
pub struct EmulatorVerifier;

impl IdentityVerifier for EmulatorVerifier {
    fn verify<'a>(
        &'a self,
        email: &'a str,
        _token: &'a str,
    ) -> BoxFuture<'a, Result<Identity, AuthError>> {
        Box::pin(async move {
            let email = email.trim();
            if email.is_empty() {
                return Err(AuthError::InvalidCredentials);
            }
            Ok(Identity {
                email: email.to_string(),
            })
        })
    }
}

/// Placeholder production verifier: deployments plug the real provider in
/// here; until then every sign-in is refused.
pub struct DenyAllVerifier;

impl IdentityVerifier for DenyAllVerifier {
    fn verify<'a>(
        &'a self,
        _email: &'a str,
        _token: &'a str,
    ) -> BoxFuture<'a, Result<Identity, AuthError>> {
        Box::pin(async {
            Err(AuthError::ProviderUnavailable(
                "no identity provider configured".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_round_trips_sign_in_and_out() {
        let cache = AuthCache::new();
        assert!(cache.current().is_none());
        cache.sign_in(Identity {
            email: "owner@example.com".to_string(),
        });
        assert_eq!(
            cache.signed_in_email().as_deref(),
            Some("owner@example.com")
        );
        cache.sign_out();
        assert!(cache.current().is_none());
    }

    #[tokio::test]
    async fn emulator_verifier_accepts_any_non_empty_email() {
        let verifier = EmulatorVerifier;
        let identity = verifier.verify("dev@example.com", "anything").await;
        assert_eq!(identity.expect("identity").email, "dev@example.com");
        assert!(verifier.verify("  ", "anything").await.is_err());
    }

    #[tokio::test]
    async fn deny_all_verifier_refuses_everything() {
        let verifier = DenyAllVerifier;
        assert!(verifier.verify("owner@example.com", "token").await.is_err());
    }
}
