// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure standings computations.
//!
//! A season's standings are an ordered sequence of team ids; rank is the
//! 1-based position. These functions never touch storage: the persistence
//! layer reads the latest snapshot, calls in here, and appends the result
//! as a brand-new snapshot under the season lock.

use crate::error::CoreError;

/// Returns a team's 1-based rank within a standings sequence.
#[must_use]
pub fn rank_of(results: &[i64], team_id: i64) -> Option<u32> {
    results
        .iter()
        .position(|&id| id == team_id)
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// Verifies that a standings sequence contains no duplicate team ids.
///
/// # Errors
///
/// Returns `CoreError::DuplicateTeamInStandings` naming the first
/// duplicated team.
pub fn ensure_permutation(season_id: i64, results: &[i64]) -> Result<(), CoreError> {
    for (i, team_id) in results.iter().enumerate() {
        if results[..i].contains(team_id) {
            return Err(CoreError::DuplicateTeamInStandings {
                season_id,
                team_id: *team_id,
            });
        }
    }
    Ok(())
}

/// Computes the standings sequence after a completed match.
///
/// When the winner was the original challenger, the winner is removed from
/// its current position and re-inserted at the loser's original position;
/// every other team keeps its relative order. When the defender won, the
/// order is unchanged; the caller still appends the returned sequence as a
/// new snapshot so that every completed match leaves an audit row.
///
/// # Arguments
///
/// * `season_id` - The season, for error reporting
/// * `results` - The current standings sequence
/// * `winner_team_id` - The confirmed winner
/// * `loser_team_id` - The loser
/// * `winner_was_challenger` - Whether the winner initiated the challenge
///
/// # Errors
///
/// Returns `CoreError::TeamMissingFromStandings` if either team is absent
/// from `results`. This must never happen under the ladder's invariants;
/// the caller aborts the transaction.
pub fn swap_for_result(
    season_id: i64,
    results: &[i64],
    winner_team_id: i64,
    loser_team_id: i64,
    winner_was_challenger: bool,
) -> Result<Vec<i64>, CoreError> {
    let winner_index: usize = results
        .iter()
        .position(|&id| id == winner_team_id)
        .ok_or_else(|| {
            tracing::error!(
                season_id,
                team_id = winner_team_id,
                "Winner missing from standings snapshot"
            );
            CoreError::TeamMissingFromStandings {
                season_id,
                team_id: winner_team_id,
            }
        })?;
    let loser_index: usize = results
        .iter()
        .position(|&id| id == loser_team_id)
        .ok_or_else(|| {
            tracing::error!(
                season_id,
                team_id = loser_team_id,
                "Loser missing from standings snapshot"
            );
            CoreError::TeamMissingFromStandings {
                season_id,
                team_id: loser_team_id,
            }
        })?;

    let mut new_results: Vec<i64> = results.to_vec();
    if winner_was_challenger {
        new_results.remove(winner_index);
        // Re-insert at the loser's pre-removal position so the winner takes
        // the loser's rank and the loser shifts down one.
        let insert_at: usize = if winner_index < loser_index {
            loser_index - 1
        } else {
            loser_index
        };
        new_results.insert(insert_at, winner_team_id);
    }

    Ok(new_results)
}

/// Appends a newly enrolled team at the bottom of the standings.
///
/// # Arguments
///
/// * `season_id` - The season, for error reporting
/// * `results` - The current standings sequence (empty for a new season)
/// * `team_id` - The enrolling team
///
/// # Returns
///
/// The new sequence and the team's 1-based rank.
///
/// # Errors
///
/// Returns `CoreError::DuplicateTeamInStandings` if the team is already
/// ranked.
pub fn append_team(
    season_id: i64,
    results: &[i64],
    team_id: i64,
) -> Result<(Vec<i64>, u32), CoreError> {
    if results.contains(&team_id) {
        return Err(CoreError::DuplicateTeamInStandings { season_id, team_id });
    }
    let mut new_results: Vec<i64> = results.to_vec();
    new_results.push(team_id);
    let rank: u32 = u32::try_from(new_results.len())
        .map_err(|_| CoreError::Storage(String::from("Standings length exceeds u32")))?;
    Ok((new_results, rank))
}
