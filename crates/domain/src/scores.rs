// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// The points scored by each team in one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    /// Points scored by team one (the challenger).
    pub team1: u32,
    /// Points scored by team two (the challenged team).
    pub team2: u32,
}

impl SetScore {
    /// Creates a new `SetScore`.
    #[must_use]
    pub const fn new(team1: u32, team2: u32) -> Self {
        Self { team1, team2 }
    }
}

/// Which side won a match, derived from validated set scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchWinner {
    /// Team one (the challenger) won.
    Team1,
    /// Team two (the challenged team) won.
    Team2,
}

/// Validates set scores against a best-of configuration and derives the winner.
///
/// A valid score sheet has no tied sets, ends exactly when one side reaches
/// the required set count, and never exceeds the best-of count.
///
/// # Arguments
///
/// * `best_of` - The season's best-of set count (odd, validated upstream)
/// * `sets` - The per-set scores in playing order
///
/// # Errors
///
/// Returns a `DomainError` describing the first violation found:
/// `NoSets`, `TooManySets`, `TiedSet`, `SetsAfterDecision`, or
/// `MatchNotDecided`.
pub fn validate_scores(best_of: u8, sets: &[SetScore]) -> Result<MatchWinner, DomainError> {
    if sets.is_empty() {
        return Err(DomainError::NoSets);
    }
    if sets.len() > usize::from(best_of) {
        return Err(DomainError::TooManySets {
            sets: sets.len(),
            best_of,
        });
    }

    let needed: u8 = best_of / 2 + 1;
    let mut team1_sets: u8 = 0;
    let mut team2_sets: u8 = 0;

    for (set_index, set) in sets.iter().enumerate() {
        if team1_sets >= needed || team2_sets >= needed {
            return Err(DomainError::SetsAfterDecision { set_index });
        }
        if set.team1 == set.team2 {
            return Err(DomainError::TiedSet { set_index });
        }
        if set.team1 > set.team2 {
            team1_sets += 1;
        } else {
            team2_sets += 1;
        }
    }

    if team1_sets >= needed {
        Ok(MatchWinner::Team1)
    } else if team2_sets >= needed {
        Ok(MatchWinner::Team2)
    } else {
        Err(DomainError::MatchNotDecided {
            team1_sets,
            team2_sets,
            best_of,
        })
    }
}
