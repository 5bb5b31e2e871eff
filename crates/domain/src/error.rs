// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Season name is empty or invalid.
    InvalidSeasonName(String),
    /// The best-of count is not an odd number in the supported range.
    InvalidBestOf {
        /// The invalid best-of value.
        best_of: u8,
    },
    /// Team size bounds are inconsistent (min of zero, or min greater than max).
    InvalidTeamSizeBounds {
        /// The minimum team size.
        min: u8,
        /// The maximum team size.
        max: u8,
    },
    /// A team's member count falls outside the season's bounds.
    InvalidTeamSize {
        /// The actual member count.
        size: usize,
        /// The minimum allowed size.
        min: u8,
        /// The maximum allowed size.
        max: u8,
    },
    /// A team's member list contains the same player more than once.
    DuplicateTeamMember {
        /// The duplicated player reference.
        player_id: i64,
    },
    /// The challenge reach must be at least one rank.
    InvalidChallengeReach {
        /// The invalid reach value.
        reach: u32,
    },
    /// A set score is tied; every set must have a winner.
    TiedSet {
        /// The zero-based index of the tied set.
        set_index: usize,
    },
    /// No sets were entered.
    NoSets,
    /// More sets were entered than the best-of count allows.
    TooManySets {
        /// The number of sets entered.
        sets: usize,
        /// The season's best-of count.
        best_of: u8,
    },
    /// Sets were entered after the match was already decided.
    SetsAfterDecision {
        /// The zero-based index of the first superfluous set.
        set_index: usize,
    },
    /// The entered sets do not produce a best-of winner.
    MatchNotDecided {
        /// Sets won by team one.
        team1_sets: u8,
        /// Sets won by team two.
        team2_sets: u8,
        /// The season's best-of count.
        best_of: u8,
    },
    /// A status string read from storage is not a valid match status.
    InvalidMatchStatus(String),
    /// A status string read from storage is not a valid proposal status.
    InvalidProposalStatus(String),
    /// A status string read from storage is not a valid season status.
    InvalidSeasonStatus(String),
    /// An event kind string read from storage is not recognized.
    InvalidEventKind(String),
    /// An unavailability window ends before it starts.
    InvalidDateRange {
        /// The window start (RFC 3339).
        starts_at: String,
        /// The window end (RFC 3339).
        ends_at: String,
    },
    /// Failed to parse an RFC 3339 datetime from a string.
    DateParseError {
        /// The invalid datetime string.
        value: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSeasonName(msg) => write!(f, "Invalid season name: {msg}"),
            Self::InvalidBestOf { best_of } => {
                write!(f, "Invalid best-of count: {best_of}. Must be an odd number between 1 and 9")
            }
            Self::InvalidTeamSizeBounds { min, max } => {
                write!(f, "Invalid team size bounds: min={min}, max={max}")
            }
            Self::InvalidTeamSize { size, min, max } => {
                write!(f, "Invalid team size: {size}. Must be between {min} and {max}")
            }
            Self::DuplicateTeamMember { player_id } => {
                write!(f, "Player {player_id} appears more than once in the team")
            }
            Self::InvalidChallengeReach { reach } => {
                write!(f, "Invalid challenge reach: {reach}. Must be at least 1")
            }
            Self::TiedSet { set_index } => {
                write!(f, "Set {} is tied; every set must have a winner", set_index + 1)
            }
            Self::NoSets => write!(f, "At least one set score must be entered"),
            Self::TooManySets { sets, best_of } => {
                write!(f, "{sets} sets entered but a best-of-{best_of} match has at most {best_of}")
            }
            Self::SetsAfterDecision { set_index } => {
                write!(
                    f,
                    "Set {} was entered after the match was already decided",
                    set_index + 1
                )
            }
            Self::MatchNotDecided {
                team1_sets,
                team2_sets,
                best_of,
            } => {
                write!(
                    f,
                    "Sets {team1_sets}-{team2_sets} do not decide a best-of-{best_of} match"
                )
            }
            Self::InvalidMatchStatus(s) => write!(f, "Unknown match status: {s}"),
            Self::InvalidProposalStatus(s) => write!(f, "Unknown proposal status: {s}"),
            Self::InvalidSeasonStatus(s) => write!(f, "Unknown season status: {s}"),
            Self::InvalidEventKind(s) => write!(f, "Unknown event kind: {s}"),
            Self::InvalidDateRange { starts_at, ends_at } => {
                write!(f, "Invalid date range: {starts_at} ends before it starts ({ends_at})")
            }
            Self::DateParseError { value, error } => {
                write!(f, "Failed to parse datetime '{value}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
