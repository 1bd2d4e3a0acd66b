// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::models::{
    AboutContent, ContactInfo, PortfolioItem, PortfolioPageConfig, SETTINGS_DOC_ID,
    SettingsUpdate, SiteSettings, Timestamp,
};
use crate::content::store::{
    COLLECTION_ABOUT, COLLECTION_CONTACT, COLLECTION_PORTFOLIO, COLLECTION_PORTFOLIO_PAGES,
    COLLECTION_SETTINGS, DocumentStore, StoreError,
};
use crate::diagnostics::Diagnostics;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// About and contact are singletons like settings, under their own fixed id.
const SINGLETON_DOC_ID: &str = "main";

#[derive(Debug)]
pub enum ContentError {
    Store(StoreError),
    NotFound(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Store(err) => write!(f, "{}", err),
            ContentError::NotFound(id) => write!(f, "document '{}' not found", id),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<StoreError> for ContentError {
    fn from(err: StoreError) -> Self {
        ContentError::Store(err)
    }
}

/// Typed CRUD wrappers over the document collections.
///
/// Reads used on public paths never fail outward: they substitute empty
/// results and report the underlying error through [`Diagnostics`]. Admin
/// writes propagate errors so the caller can answer with a real status.
#[derive(Clone)]
pub struct ContentServices {
    store: DocumentStore,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ContentServices {
    pub fn new(store: DocumentStore, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { store, diagnostics }
    }

    // Portfolio items

    pub fn portfolio_items(&self) -> Vec<PortfolioItem> {
        match self.store.read_all::<PortfolioItem>(COLLECTION_PORTFOLIO) {
            Ok(mut items) => {
                items.sort_by_key(|item| item.order);
                items
            }
            Err(err) => {
                self.diagnostics.report("content.portfolio_items", &err);
                Vec::new()
            }
        }
    }

    /// Every public read goes through the published gate.
    pub fn published_portfolio_items(&self) -> Vec<PortfolioItem> {
        self.portfolio_items()
            .into_iter()
            .filter(|item| item.published)
            .collect()
    }

    pub fn portfolio_item(&self, id: &str) -> Option<PortfolioItem> {
        match self.store.read(COLLECTION_PORTFOLIO, id) {
            Ok(item) => item,
            Err(err) => {
                self.diagnostics.report("content.portfolio_item", &err);
                None
            }
        }
    }

    pub fn save_portfolio_item(&self, mut item: PortfolioItem) -> Result<PortfolioItem, ContentError> {
        if item.id.trim().is_empty() {
            item.id = Uuid::new_v4().to_string();
        }
        if item.created_at.is_none() {
            item.created_at = Some(Timestamp::now());
        }
        self.store.write(COLLECTION_PORTFOLIO, &item.id, &item)?;
        Ok(item)
    }

    pub fn delete_portfolio_item(&self, id: &str) -> Result<(), ContentError> {
        if self.store.delete(COLLECTION_PORTFOLIO, id)? {
            Ok(())
        } else {
            Err(ContentError::NotFound(id.to_string()))
        }
    }

    // Portfolio pages

    pub fn portfolio_pages(&self) -> Vec<PortfolioPageConfig> {
        match self
            .store
            .read_all::<PortfolioPageConfig>(COLLECTION_PORTFOLIO_PAGES)
        {
            Ok(mut pages) => {
                pages.sort_by_key(|page| page.order.unwrap_or(i64::MAX));
                pages
            }
            Err(err) => {
                self.diagnostics.report("content.portfolio_pages", &err);
                Vec::new()
            }
        }
    }

    pub fn portfolio_page_by_slug(&self, slug: &str) -> Option<PortfolioPageConfig> {
        self.portfolio_pages()
            .into_iter()
            .find(|page| page.effective_slug() == slug)
    }

    pub fn save_portfolio_page(
        &self,
        mut page: PortfolioPageConfig,
    ) -> Result<PortfolioPageConfig, ContentError> {
        if page.id.trim().is_empty() {
            page.id = Uuid::new_v4().to_string();
        }
        page.updated_at = Some(Timestamp::now());
        self.store
            .write(COLLECTION_PORTFOLIO_PAGES, &page.id, &page)?;
        Ok(page)
    }

    pub fn delete_portfolio_page(&self, id: &str) -> Result<(), ContentError> {
        if self.store.delete(COLLECTION_PORTFOLIO_PAGES, id)? {
            Ok(())
        } else {
            Err(ContentError::NotFound(id.to_string()))
        }
    }

    // Settings singleton

    pub fn settings(&self) -> Option<SiteSettings> {
        match self.store.read(COLLECTION_SETTINGS, SETTINGS_DOC_ID) {
            Ok(settings) => settings,
            Err(err) => {
                self.diagnostics.report("content.settings", &err);
                None
            }
        }
    }

    pub fn settings_or_default(&self) -> SiteSettings {
        self.settings().unwrap_or_default()
    }

    /// Created on first write, merged on every later one.
    pub fn upsert_settings(&self, update: &SettingsUpdate) -> Result<SiteSettings, ContentError> {
        let mut settings = self
            .store
            .read::<SiteSettings>(COLLECTION_SETTINGS, SETTINGS_DOC_ID)?
            .unwrap_or_default();
        update.apply_to(&mut settings);
        self.store
            .write(COLLECTION_SETTINGS, SETTINGS_DOC_ID, &settings)?;
        Ok(settings)
    }

    // About / contact singletons

    pub fn about(&self) -> Option<AboutContent> {
        match self.store.read(COLLECTION_ABOUT, SINGLETON_DOC_ID) {
            Ok(about) => about,
            Err(err) => {
                self.diagnostics.report("content.about", &err);
                None
            }
        }
    }

    pub fn save_about(&self, mut about: AboutContent) -> Result<AboutContent, ContentError> {
        about.updated_at = Some(Timestamp::now());
        self.store
            .write(COLLECTION_ABOUT, SINGLETON_DOC_ID, &about)?;
        Ok(about)
    }

    pub fn contact(&self) -> Option<ContactInfo> {
        match self.store.read(COLLECTION_CONTACT, SINGLETON_DOC_ID) {
            Ok(contact) => contact,
            Err(err) => {
                self.diagnostics.report("content.contact", &err);
                None
            }
        }
    }

    pub fn save_contact(&self, contact: ContactInfo) -> Result<ContactInfo, ContentError> {
        self.store
            .write(COLLECTION_CONTACT, SINGLETON_DOC_ID, &contact)?;
        Ok(contact)
    }
}
