// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-season mutual exclusion.
//!
//! Two ladder operations read aggregate state and then write based on what
//! they read: challenge creation (the open-challenge set) and standings
//! appends (the latest snapshot). Neither is expressible as a single atomic
//! row update, so both serialize on an advisory mutex keyed by season id.
//!
//! The registry is shared between every store handle on the same database.
//! Locking one season never blocks another; the lock is scoped strictly to
//! the one transaction that needs it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of advisory per-season locks.
pub struct SeasonLocks {
    /// Lazily populated map from season id to its dedicated mutex.
    inner: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl SeasonLocks {
    /// Creates an empty lock registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the mutex dedicated to a season, creating it on first use.
    fn handle(&self, season_id: i64) -> Arc<Mutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(season_id).or_default())
    }

    /// Runs `f` while holding the season's exclusive lock.
    ///
    /// The lock is acquired before `f` starts and released when it returns,
    /// so callers open their transaction inside `f`; the lock is then the
    /// first thing the exclusive section takes, which keeps lock ordering
    /// deterministic when two operations race on the same season.
    pub fn with_season<T>(&self, season_id: i64, f: impl FnOnce() -> T) -> T {
        let handle = self.handle(season_id);
        let _guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}

impl Default for SeasonLocks {
    fn default() -> Self {
        Self::new()
    }
}
