// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod admin;
pub mod app_state;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod public;
pub mod runtime_paths;
pub mod seo;
pub mod storage;
pub mod templates;
pub mod util;
