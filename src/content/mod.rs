// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod models;
pub mod services;
pub mod store;

pub use models::{
    AboutContent, ContactInfo, GalleryEntry, Picture, PortfolioItem, PortfolioPageConfig,
    SettingsUpdate, SiteSettings, Timestamp,
};
pub use services::{ContentError, ContentServices};
pub use store::{DocumentStore, StoreError};
