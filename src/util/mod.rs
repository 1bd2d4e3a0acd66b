// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Atelier Studio
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod mime_helper;
pub mod test_fixtures;

pub use mime_helper::detect_mime_type;

use std::time::Duration;

/// Server-rendered paths wait at most this long for their first value, then
/// proceed with "no data" rather than hang on a slow or absent backend.
pub const FIRST_VALUE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a synchronous store read off the worker thread and give it a
/// deadline. The read runs on the blocking pool; only that detaches it from
/// the handler, so the timeout can actually fire while the disk stalls.
pub async fn first_value_timeout<F, T>(load: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let read = tokio::task::spawn_blocking(load);
    match tokio::time::timeout(FIRST_VALUE_TIMEOUT, read).await {
        Ok(Ok(value)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fast_reads_yield_their_value() {
        assert_eq!(first_value_timeout(|| 7).await, Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_reads_time_out_to_none() {
        // Paused time jumps past the deadline while the read still holds a
        // blocking-pool thread.
        let result = first_value_timeout(|| {
            std::thread::sleep(Duration::from_millis(250));
            7
        })
        .await;
        assert_eq!(result, None);
    }
}
