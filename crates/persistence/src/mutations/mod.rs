// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Every mutation runs inside one SQLite IMMEDIATE transaction: the state
//! change, its events, and any standings snapshot either all commit or none
//! do. Operations that read aggregate state before writing (challenge
//! creation, standings appends) additionally run under the season lock,
//! acquired by the `Persistence` adapter before the transaction opens.

pub mod challenges;
pub mod events;
pub mod matches;
pub mod proposals;
pub mod seasons;
pub mod standings;
pub mod teams;
pub mod unavailability;

use club_ladder::CoreError;
use club_ladder_domain::DomainError;

use crate::error::PersistenceError;

/// The error type threaded through mutation transactions.
///
/// Diesel's transaction API needs `From<diesel::result::Error>`; the ladder
/// operations need to abort with `CoreError` values. This wrapper carries
/// both and collapses into `CoreError` at the adapter boundary.
#[derive(Debug)]
pub(crate) enum TxError {
    /// A ladder rule or consistency failure.
    Core(CoreError),
    /// A database failure.
    Db(diesel::result::Error),
}

impl TxError {
    /// Collapses into the caller-facing `CoreError`.
    pub(crate) fn into_core(self) -> CoreError {
        match self {
            Self::Core(err) => err,
            Self::Db(err) => CoreError::Storage(err.to_string()),
        }
    }
}

impl From<diesel::result::Error> for TxError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err)
    }
}

impl From<CoreError> for TxError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<DomainError> for TxError {
    fn from(err: DomainError) -> Self {
        Self::Core(CoreError::DomainViolation(err))
    }
}

impl From<PersistenceError> for TxError {
    fn from(err: PersistenceError) -> Self {
        Self::Core(CoreError::Storage(err.to_string()))
    }
}

impl From<serde_json::Error> for TxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Core(CoreError::Storage(err.to_string()))
    }
}

/// Returns the current instant as an RFC 3339 string.
///
/// Snapshot and event ordering never depends on these strings (row ids
/// order both), so the epoch fallback on a formatting failure is harmless.
pub(crate) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
