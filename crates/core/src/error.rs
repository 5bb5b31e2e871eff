// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use club_ladder_domain::{DomainError, SeasonStatus};

/// Errors that can occur while executing ladder operations.
///
/// Three families matter to callers:
/// - conflicts (`ChallengeConflict`, `StatusConflict`, `HasOpenChallenge`,
///   `ProposalNotPending`) are expected and recoverable by retrying with
///   fresh state;
/// - validation and precondition failures are caller-input problems and
///   leave no partial state behind;
/// - consistency failures (`TeamMissingFromStandings`,
///   `DuplicateTeamInStandings`, `MissingStandings`) indicate a broken
///   invariant and abort loudly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The season does not exist.
    SeasonNotFound {
        /// The season identifier.
        season_id: i64,
    },
    /// The season is not in the `Active` lifecycle state.
    SeasonNotActive {
        /// The season identifier.
        season_id: i64,
        /// The season's actual status.
        status: SeasonStatus,
    },
    /// The team does not exist.
    TeamNotFound {
        /// The team identifier.
        team_id: i64,
    },
    /// The team exists but belongs to a different season.
    TeamNotInSeason {
        /// The team identifier.
        team_id: i64,
        /// The season the operation targeted.
        season_id: i64,
    },
    /// Both sides of a challenge refer to the same team.
    TeamsNotDistinct {
        /// The duplicated team identifier.
        team_id: i64,
    },
    /// The team has opted out of further play.
    TeamOptedOut {
        /// The team identifier.
        team_id: i64,
    },
    /// The match does not exist.
    MatchNotFound {
        /// The match identifier.
        match_id: i64,
    },
    /// The date proposal does not exist.
    ProposalNotFound {
        /// The proposal identifier.
        proposal_id: i64,
    },
    /// A team on either side of the requested challenge already has an
    /// open challenge.
    ChallengeConflict {
        /// The team that already has an open challenge.
        team_id: i64,
    },
    /// The challenged rank gap violates the season's reach rule.
    ChallengeOutOfReach {
        /// The challenger's current rank.
        challenger_rank: u32,
        /// The target's current rank.
        target_rank: u32,
        /// The season's configured reach.
        reach: u32,
    },
    /// A concurrent actor changed the match status first; the guarded
    /// transition touched zero rows.
    StatusConflict {
        /// The match identifier.
        match_id: i64,
    },
    /// A concurrent actor changed the season status first; the guarded
    /// transition touched zero rows.
    SeasonStatusConflict {
        /// The season identifier.
        season_id: i64,
    },
    /// The player has no team in the season.
    NotEnrolled {
        /// The player identifier.
        player_id: i64,
        /// The season identifier.
        season_id: i64,
    },
    /// The acting player is on neither team of the match.
    NotAParticipant {
        /// The match identifier.
        match_id: i64,
        /// The acting player.
        player_id: i64,
    },
    /// The player who entered the result may not confirm it.
    CannotConfirmOwnResult {
        /// The match identifier.
        match_id: i64,
    },
    /// The player who entered the result may not dispute it.
    CannotDisputeOwnResult {
        /// The match identifier.
        match_id: i64,
    },
    /// Only the original challenger may withdraw a challenge.
    OnlyChallengerMayWithdraw {
        /// The match identifier.
        match_id: i64,
    },
    /// The team has an open challenge, blocking the requested change.
    HasOpenChallenge {
        /// The team identifier.
        team_id: i64,
    },
    /// A member of the team has an active unavailability window.
    TeamUnavailable {
        /// The team identifier.
        team_id: i64,
    },
    /// The proposal is no longer pending.
    ProposalNotPending {
        /// The proposal identifier.
        proposal_id: i64,
    },
    /// The proposal belongs to a different match.
    ProposalMatchMismatch {
        /// The proposal identifier.
        proposal_id: i64,
        /// The match the operation targeted.
        match_id: i64,
    },
    /// The player is already enrolled in the season.
    AlreadyEnrolled {
        /// The player identifier.
        player_id: i64,
        /// The season identifier.
        season_id: i64,
    },
    /// The season does not allow self-enrollment.
    EnrollmentClosed {
        /// The season identifier.
        season_id: i64,
    },
    /// Consistency failure: a team that must appear in the season's
    /// standings is missing from the latest snapshot.
    TeamMissingFromStandings {
        /// The season identifier.
        season_id: i64,
        /// The missing team.
        team_id: i64,
    },
    /// Consistency failure: a snapshot contains the same team twice.
    DuplicateTeamInStandings {
        /// The season identifier.
        season_id: i64,
        /// The duplicated team.
        team_id: i64,
    },
    /// Consistency failure: the season has match history but no standings
    /// snapshot.
    MissingStandings {
        /// The season identifier.
        season_id: i64,
    },
    /// An infrastructure failure in the storage layer.
    Storage(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SeasonNotFound { season_id } => write!(f, "Season {season_id} not found"),
            Self::SeasonNotActive { season_id, status } => {
                write!(f, "Season {season_id} is {status}, not active")
            }
            Self::TeamNotFound { team_id } => write!(f, "Team {team_id} not found"),
            Self::TeamNotInSeason { team_id, season_id } => {
                write!(f, "Team {team_id} does not belong to season {season_id}")
            }
            Self::TeamsNotDistinct { team_id } => {
                write!(f, "Team {team_id} cannot challenge itself")
            }
            Self::TeamOptedOut { team_id } => {
                write!(f, "Team {team_id} has opted out of the ladder")
            }
            Self::MatchNotFound { match_id } => write!(f, "Match {match_id} not found"),
            Self::ProposalNotFound { proposal_id } => {
                write!(f, "Date proposal {proposal_id} not found")
            }
            Self::ChallengeConflict { team_id } => {
                write!(f, "Team {team_id} already has an open challenge")
            }
            Self::ChallengeOutOfReach {
                challenger_rank,
                target_rank,
                reach,
            } => {
                write!(
                    f,
                    "Rank {challenger_rank} cannot challenge rank {target_rank} with reach {reach}"
                )
            }
            Self::StatusConflict { match_id } => {
                write!(
                    f,
                    "Match {match_id} changed status concurrently; refresh and retry"
                )
            }
            Self::SeasonStatusConflict { season_id } => {
                write!(
                    f,
                    "Season {season_id} changed status concurrently; refresh and retry"
                )
            }
            Self::NotEnrolled {
                player_id,
                season_id,
            } => {
                write!(f, "Player {player_id} is not enrolled in season {season_id}")
            }
            Self::NotAParticipant {
                match_id,
                player_id,
            } => {
                write!(f, "Player {player_id} is not a participant of match {match_id}")
            }
            Self::CannotConfirmOwnResult { match_id } => {
                write!(f, "The result of match {match_id} cannot be confirmed by its enterer")
            }
            Self::CannotDisputeOwnResult { match_id } => {
                write!(f, "The result of match {match_id} cannot be disputed by its enterer")
            }
            Self::OnlyChallengerMayWithdraw { match_id } => {
                write!(f, "Only the challenger may withdraw match {match_id}")
            }
            Self::HasOpenChallenge { team_id } => {
                write!(f, "Team {team_id} has an open challenge blocking this change")
            }
            Self::TeamUnavailable { team_id } => {
                write!(f, "Team {team_id} has a member with an active unavailability window")
            }
            Self::ProposalNotPending { proposal_id } => {
                write!(f, "Date proposal {proposal_id} is no longer pending")
            }
            Self::ProposalMatchMismatch {
                proposal_id,
                match_id,
            } => {
                write!(f, "Date proposal {proposal_id} does not belong to match {match_id}")
            }
            Self::AlreadyEnrolled {
                player_id,
                season_id,
            } => {
                write!(f, "Player {player_id} is already enrolled in season {season_id}")
            }
            Self::EnrollmentClosed { season_id } => {
                write!(f, "Season {season_id} does not allow self-enrollment")
            }
            Self::TeamMissingFromStandings { season_id, team_id } => {
                write!(
                    f,
                    "Consistency failure: team {team_id} missing from standings of season {season_id}"
                )
            }
            Self::DuplicateTeamInStandings { season_id, team_id } => {
                write!(
                    f,
                    "Consistency failure: team {team_id} appears twice in standings of season {season_id}"
                )
            }
            Self::MissingStandings { season_id } => {
                write!(
                    f,
                    "Consistency failure: season {season_id} has no standings snapshot"
                )
            }
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
