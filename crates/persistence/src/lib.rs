// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Club Ladder System.
//!
//! This crate owns every write to the ladder's contended state: the match
//! rows, the append-only standings snapshot sequence, and the append-only
//! event feed. It is built on Diesel over `SQLite`.
//!
//! ## Concurrency model
//!
//! Two mechanisms, used for different purposes:
//!
//! 1. **Per-season exclusive section**: an advisory mutex keyed by season
//!    id ([`SeasonLocks`]), held only around the operations that read
//!    aggregate state and then write based on it: challenge creation (the
//!    open-challenge set) and standings appends (the latest snapshot).
//!    Operations on different seasons proceed fully in parallel.
//! 2. **Status-guarded single-row updates**: every match lifecycle
//!    transition is one conditional `UPDATE` whose affected-row count is
//!    checked. Zero rows is the unambiguous signal of a lost race,
//!    surfaced as a conflict and never retried internally.
//!
//! Every mutating operation runs inside one SQLite IMMEDIATE transaction;
//! the state change, its events, and any snapshot either all commit or
//! none do. No operation retries internally; callers surface conflicts and
//! the end user re-attempts with refreshed state.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory databases named from an
//! atomic counter, so they are isolated and deterministic without
//! time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use club_ladder::CoreError;
use club_ladder_domain::{Season, SetScore, Team};
use club_ladder_events::StoredEvent;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod season_lock;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    ChallengeSpec, ConfirmedResult, EnrolledTeam, HeadToHead, MatchRecord, NewSeasonSpec,
    ProposalRecord, RankPoint, SnapshotRecord, StandingRow,
};
pub use error::PersistenceError;
pub use season_lock::SeasonLocks;

use club_ladder_domain::SeasonStatus;
use mutations::TxError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the ladder.
///
/// Each adapter owns one database connection. Additional handles onto the
/// same database (sharing the same season lock registry) are created with
/// [`Persistence::reopen`]; this is how concurrent request handlers (and
/// tests simulating them) coordinate.
pub struct Persistence {
    conn: SqliteConnection,
    database_url: String,
    locks: Arc<SeasonLocks>,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database instance via an
    /// atomic counter, ensuring deterministic test isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_ladder_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url: shared_memory_url,
            locks: Arc::new(SeasonLocks::new()),
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            database_url: path_str.to_string(),
            locks: Arc::new(SeasonLocks::new()),
        })
    }

    /// Opens another handle onto the same database.
    ///
    /// The new handle shares this handle's season lock registry, so the
    /// per-season exclusive sections hold across handles.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn reopen(&self) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = sqlite::open_connection(&self.database_url)?;
        Ok(Self {
            conn,
            database_url: self.database_url.clone(),
            locks: Arc::clone(&self.locks),
        })
    }

    /// Runs one IMMEDIATE transaction without a season lock.
    fn in_tx<T>(
        &mut self,
        f: impl FnOnce(&mut SqliteConnection) -> Result<T, TxError>,
    ) -> Result<T, CoreError> {
        self.conn
            .immediate_transaction(f)
            .map_err(TxError::into_core)
    }

    /// Runs one IMMEDIATE transaction inside the season's exclusive section.
    ///
    /// The lock is acquired first and the transaction opened second, so the
    /// exclusive section's first statement is the lock itself, the
    /// ordering that keeps two racing operations on one season deadlock
    /// free.
    fn in_locked_tx<T>(
        &mut self,
        season_id: i64,
        f: impl FnOnce(&mut SqliteConnection) -> Result<T, TxError>,
    ) -> Result<T, CoreError> {
        let locks: Arc<SeasonLocks> = Arc::clone(&self.locks);
        let conn: &mut SqliteConnection = &mut self.conn;
        locks
            .with_season(season_id, move || conn.immediate_transaction(f))
            .map_err(TxError::into_core)
    }

    /// Reads the season id a match belongs to.
    fn season_id_of_match(&mut self, match_id: i64) -> Result<i64, CoreError> {
        let record: Option<MatchRecord> =
            queries::matches::get_match(&mut self.conn, match_id).map_err(CoreError::from)?;
        record
            .map(|r| r.season_id)
            .ok_or(CoreError::MatchNotFound { match_id })
    }

    // ========================================================================
    // Seasons
    // ========================================================================

    /// Creates a season in `Draft` status.
    ///
    /// # Errors
    ///
    /// Returns a domain violation for invalid configuration.
    pub fn create_season(&mut self, spec: &NewSeasonSpec) -> Result<i64, CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| mutations::seasons::create_season(conn, spec, &now))
    }

    /// Activates a draft season.
    ///
    /// # Errors
    ///
    /// Returns `SeasonNotFound` or `SeasonStatusConflict`.
    pub fn activate_season(&mut self, season_id: i64) -> Result<(), CoreError> {
        self.in_tx(|conn| {
            mutations::seasons::transition_season(
                conn,
                season_id,
                SeasonStatus::Draft,
                SeasonStatus::Active,
            )
        })
    }

    /// Ends an active season.
    ///
    /// # Errors
    ///
    /// Returns `SeasonNotFound` or `SeasonStatusConflict`.
    pub fn end_season(&mut self, season_id: i64) -> Result<(), CoreError> {
        self.in_tx(|conn| {
            mutations::seasons::transition_season(
                conn,
                season_id,
                SeasonStatus::Active,
                SeasonStatus::Ended,
            )
        })
    }

    /// Retrieves a season.
    ///
    /// # Errors
    ///
    /// Returns `SeasonNotFound` if it does not exist.
    pub fn get_season(&mut self, season_id: i64) -> Result<Season, CoreError> {
        queries::seasons::get_season(&mut self.conn, season_id)
            .map_err(CoreError::from)?
            .ok_or(CoreError::SeasonNotFound { season_id })
    }

    // ========================================================================
    // Teams & enrollment
    // ========================================================================

    /// Enrolls a team and anchors it at the bottom of the ladder.
    ///
    /// Runs under the season lock: the starting rank comes from reading the
    /// latest snapshot and appending to it.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyEnrolled`, `EnrollmentClosed`, or a domain violation
    /// for bad team composition.
    pub fn enroll_team(
        &mut self,
        season_id: i64,
        member_player_ids: &[i64],
    ) -> Result<EnrolledTeam, CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_locked_tx(season_id, |conn| {
            mutations::teams::enroll_team(conn, season_id, member_player_ids, &now)
        })
    }

    /// Appends an existing team at the bottom of the season's standings.
    ///
    /// # Errors
    ///
    /// Returns `TeamNotFound`, `TeamNotInSeason`, or a consistency error if
    /// the team is already ranked.
    pub fn add_team_to_standings(
        &mut self,
        season_id: i64,
        team_id: i64,
    ) -> Result<u32, CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_locked_tx(season_id, |conn| {
            let team: Team = queries::teams::get_team(conn, team_id)?
                .ok_or(CoreError::TeamNotFound { team_id })?;
            if team.season_id() != season_id {
                return Err(CoreError::TeamNotInSeason { team_id, season_id }.into());
            }
            mutations::standings::append_team_to_standings(conn, season_id, team_id, &now)
        })
    }

    /// Retrieves a team with its ordered member list.
    ///
    /// # Errors
    ///
    /// Returns `TeamNotFound` if it does not exist.
    pub fn get_team(&mut self, team_id: i64) -> Result<Team, CoreError> {
        queries::teams::get_team(&mut self.conn, team_id)
            .map_err(CoreError::from)?
            .ok_or(CoreError::TeamNotFound { team_id })
    }

    /// Finds the team a player belongs to within a season.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn find_team_of_player(
        &mut self,
        season_id: i64,
        player_id: i64,
    ) -> Result<Option<i64>, CoreError> {
        queries::teams::find_team_of_player(&mut self.conn, season_id, player_id)
            .map_err(CoreError::from)
    }

    // ========================================================================
    // Challenges & match lifecycle
    // ========================================================================

    /// Creates a challenge, yielding a match in status `challenged`.
    ///
    /// The unavailability check runs first, advisory and lock-free. The
    /// open-challenge set, the reach rule, and team validity are then
    /// re-checked inside the season lock before the match row is inserted.
    ///
    /// # Errors
    ///
    /// Returns `TeamUnavailable`, `ChallengeConflict`,
    /// `ChallengeOutOfReach`, or team/season precondition failures.
    pub fn create_challenge(&mut self, spec: &ChallengeSpec) -> Result<i64, CoreError> {
        let now: String = mutations::now_rfc3339();

        // Advisory availability check, deliberately outside the lock: it
        // only ever prevents an operation, never corrupts state.
        for team_id in [spec.challenger_team_id, spec.challengee_team_id] {
            let unavailable: bool = queries::unavailability::team_has_unavailable_member(
                &mut self.conn,
                spec.season_id,
                team_id,
                &now,
            )
            .map_err(CoreError::from)?;
            if unavailable {
                return Err(CoreError::TeamUnavailable { team_id });
            }
        }

        self.in_locked_tx(spec.season_id, |conn| {
            mutations::challenges::create_challenge(conn, spec, &now)
        })
    }

    /// Records a date proposal for an open match.
    ///
    /// # Errors
    ///
    /// Returns `NotAParticipant` or a status conflict.
    pub fn propose_date(
        &mut self,
        match_id: i64,
        proposed_by: i64,
        proposed_at: &str,
    ) -> Result<i64, CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| {
            mutations::proposals::propose_date(conn, match_id, proposed_by, proposed_at, &now)
        })
    }

    /// Accepts a pending date proposal, scheduling the match.
    ///
    /// # Errors
    ///
    /// Returns `ProposalNotPending`, `ProposalMatchMismatch`, or a status
    /// conflict.
    pub fn accept_date_proposal(
        &mut self,
        match_id: i64,
        proposal_id: i64,
        accepted_by: i64,
    ) -> Result<(), CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| {
            mutations::proposals::accept_date_proposal(
                conn,
                match_id,
                proposal_id,
                accepted_by,
                &now,
            )
        })
    }

    /// Declines a pending date proposal.
    ///
    /// # Errors
    ///
    /// Returns `ProposalNotPending` or `ProposalMatchMismatch`.
    pub fn decline_date_proposal(
        &mut self,
        match_id: i64,
        proposal_id: i64,
        declined_by: i64,
    ) -> Result<(), CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| {
            mutations::proposals::decline_date_proposal(
                conn,
                match_id,
                proposal_id,
                declined_by,
                &now,
            )
        })
    }

    /// Enters a result for a match.
    ///
    /// For seasons requiring confirmation the match moves to
    /// `pending_confirmation`; otherwise it completes immediately, which
    /// appends a snapshot and therefore runs under the season lock.
    ///
    /// # Errors
    ///
    /// Returns an invalid-scores domain violation, `NotAParticipant`, or a
    /// status conflict.
    pub fn enter_result(
        &mut self,
        match_id: i64,
        entered_by: i64,
        sets: &[SetScore],
    ) -> Result<(), CoreError> {
        let now: String = mutations::now_rfc3339();
        let season_id: i64 = self.season_id_of_match(match_id)?;
        let season: Season = self.get_season(season_id)?;

        if season.config().requires_confirmation() {
            self.in_tx(|conn| {
                mutations::matches::enter_result(conn, match_id, entered_by, sets, &now)
            })
            .map(|_| ())
        } else {
            self.in_locked_tx(season_id, |conn| {
                mutations::matches::enter_result(conn, match_id, entered_by, sets, &now)
            })
            .map(|_| ())
        }
    }

    /// Confirms an entered result, completing the match and swapping the
    /// standings. Runs under the season lock.
    ///
    /// # Errors
    ///
    /// Returns `CannotConfirmOwnResult`, `NotAParticipant`, or a status
    /// conflict when the match is not awaiting confirmation.
    pub fn confirm_result(
        &mut self,
        match_id: i64,
        confirmed_by: i64,
    ) -> Result<ConfirmedResult, CoreError> {
        let now: String = mutations::now_rfc3339();
        let season_id: i64 = self.season_id_of_match(match_id)?;
        self.in_locked_tx(season_id, |conn| {
            mutations::matches::confirm_result(conn, match_id, confirmed_by, &now)
        })
    }

    /// Disputes an entered result. No standings change.
    ///
    /// # Errors
    ///
    /// Returns `CannotDisputeOwnResult`, `NotAParticipant`, or a status
    /// conflict.
    pub fn dispute_result(
        &mut self,
        match_id: i64,
        disputed_by: i64,
        reason: &str,
    ) -> Result<(), CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| {
            mutations::matches::dispute_result(conn, match_id, disputed_by, reason, &now)
        })
    }

    /// Withdraws an open challenge. Challenger only; no standings change.
    ///
    /// # Errors
    ///
    /// Returns `OnlyChallengerMayWithdraw`, `NotAParticipant`, or a status
    /// conflict.
    pub fn withdraw(&mut self, match_id: i64, player_id: i64) -> Result<(), CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| mutations::matches::withdraw(conn, match_id, player_id, &now))
    }

    /// Forfeits an open match in favor of the other team. Runs under the
    /// season lock because the swap appends a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotAParticipant` or a status conflict.
    pub fn forfeit(
        &mut self,
        match_id: i64,
        forfeited_by: i64,
    ) -> Result<ConfirmedResult, CoreError> {
        let now: String = mutations::now_rfc3339();
        let season_id: i64 = self.season_id_of_match(match_id)?;
        self.in_locked_tx(season_id, |conn| {
            mutations::matches::forfeit(conn, match_id, forfeited_by, &now)
        })
    }

    /// Retrieves every date proposal of a match, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn proposals_for_match(
        &mut self,
        match_id: i64,
    ) -> Result<Vec<ProposalRecord>, CoreError> {
        queries::proposals::proposals_for_match(&mut self.conn, match_id).map_err(CoreError::from)
    }

    /// Retrieves a match.
    ///
    /// # Errors
    ///
    /// Returns `MatchNotFound` if it does not exist.
    pub fn get_match(&mut self, match_id: i64) -> Result<MatchRecord, CoreError> {
        queries::matches::get_match(&mut self.conn, match_id)
            .map_err(CoreError::from)?
            .ok_or(CoreError::MatchNotFound { match_id })
    }

    // ========================================================================
    // Unavailability
    // ========================================================================

    /// Declares an unavailability window for a player.
    ///
    /// # Errors
    ///
    /// Returns `HasOpenChallenge` when the player's team has an open
    /// challenge, `NotEnrolled`, or an invalid date range.
    pub fn set_unavailability(
        &mut self,
        season_id: i64,
        player_id: i64,
        starts_at: &str,
        ends_at: &str,
    ) -> Result<i64, CoreError> {
        let now: String = mutations::now_rfc3339();
        self.in_tx(|conn| {
            mutations::unavailability::set_unavailability(
                conn, season_id, player_id, starts_at, ends_at, &now,
            )
        })
    }

    /// Removes all of a player's unavailability windows in a season.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub fn clear_unavailability(
        &mut self,
        season_id: i64,
        player_id: i64,
    ) -> Result<usize, CoreError> {
        self.in_tx(|conn| mutations::unavailability::clear_unavailability(conn, season_id, player_id))
    }

    // ========================================================================
    // Read queries
    // ========================================================================

    /// Retrieves the most recent standings snapshot for a season.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn latest_standings(
        &mut self,
        season_id: i64,
    ) -> Result<Option<SnapshotRecord>, CoreError> {
        queries::standings::latest_snapshot(&mut self.conn, season_id).map_err(CoreError::from)
    }

    /// Retrieves the current standings annotated with movement against the
    /// previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn standings_with_movement(
        &mut self,
        season_id: i64,
    ) -> Result<Vec<StandingRow>, CoreError> {
        queries::standings::standings_with_movement(&mut self.conn, season_id)
            .map_err(CoreError::from)
    }

    /// Retrieves a team's rank across every snapshot that contains it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn rank_history(
        &mut self,
        season_id: i64,
        team_id: i64,
    ) -> Result<Vec<RankPoint>, CoreError> {
        queries::standings::rank_history(&mut self.conn, season_id, team_id)
            .map_err(CoreError::from)
    }

    /// Retrieves the teams of a season with an open challenge.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn teams_with_open_challenge(&mut self, season_id: i64) -> Result<Vec<i64>, CoreError> {
        queries::matches::teams_with_open_challenge(&mut self.conn, season_id)
            .map_err(CoreError::from)
    }

    /// Retrieves the teams of a season with an unavailable member at `now`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn unavailable_team_ids(
        &mut self,
        season_id: i64,
        now: &str,
    ) -> Result<Vec<i64>, CoreError> {
        queries::unavailability::unavailable_team_ids(&mut self.conn, season_id, now)
            .map_err(CoreError::from)
    }

    /// Computes the head-to-head record between two teams.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn head_to_head(
        &mut self,
        team_a_id: i64,
        team_b_id: i64,
    ) -> Result<HeadToHead, CoreError> {
        queries::matches::head_to_head(&mut self.conn, team_a_id, team_b_id)
            .map_err(CoreError::from)
    }

    /// Retrieves the most recent public events of a club's feed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn club_feed(&mut self, club_id: i64, limit: i64) -> Result<Vec<StoredEvent>, CoreError> {
        queries::events::club_feed(&mut self.conn, club_id, limit).map_err(CoreError::from)
    }

    /// Retrieves a player's most recent personal notifications.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn notifications(
        &mut self,
        player_id: i64,
        limit: i64,
    ) -> Result<Vec<StoredEvent>, CoreError> {
        queries::events::notifications(&mut self.conn, player_id, limit).map_err(CoreError::from)
    }
}
