// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for season construction, configuration, and lifecycle transitions.

use crate::{DomainError, Season, SeasonConfig, SeasonStatus, Team};

fn test_config() -> SeasonConfig {
    SeasonConfig::new(3, 14, 3, true, true).expect("valid config")
}

#[test]
fn test_season_config_rejects_even_best_of() {
    assert_eq!(
        SeasonConfig::new(4, 14, 3, true, true),
        Err(DomainError::InvalidBestOf { best_of: 4 })
    );
}

#[test]
fn test_season_config_rejects_zero_best_of() {
    assert_eq!(
        SeasonConfig::new(0, 14, 3, true, true),
        Err(DomainError::InvalidBestOf { best_of: 0 })
    );
}

#[test]
fn test_season_config_sets_to_win() {
    let config = SeasonConfig::new(5, 14, 3, true, true).expect("valid config");
    assert_eq!(config.sets_to_win(), 3);
}

#[test]
fn test_new_season_starts_in_draft() {
    let season = Season::new(1, String::from("Spring 2026"), test_config(), 1, 1, 2)
        .expect("valid season");
    assert_eq!(season.status(), SeasonStatus::Draft);
    assert_eq!(season.season_id(), None);
}

#[test]
fn test_season_rejects_empty_name() {
    let result = Season::new(1, String::from("  "), test_config(), 1, 1, 2);
    assert!(matches!(result, Err(DomainError::InvalidSeasonName(_))));
}

#[test]
fn test_season_rejects_inverted_team_size_bounds() {
    let result = Season::new(1, String::from("Doubles"), test_config(), 3, 2, 2);
    assert_eq!(
        result,
        Err(DomainError::InvalidTeamSizeBounds { min: 3, max: 2 })
    );
}

#[test]
fn test_season_rejects_zero_reach() {
    let result = Season::new(1, String::from("Spring 2026"), test_config(), 1, 1, 0);
    assert_eq!(result, Err(DomainError::InvalidChallengeReach { reach: 0 }));
}

#[test]
fn test_season_status_transitions_are_one_directional() {
    assert!(SeasonStatus::Draft.can_transition_to(SeasonStatus::Active));
    assert!(SeasonStatus::Active.can_transition_to(SeasonStatus::Ended));
    assert!(!SeasonStatus::Active.can_transition_to(SeasonStatus::Draft));
    assert!(!SeasonStatus::Ended.can_transition_to(SeasonStatus::Active));
    assert!(!SeasonStatus::Draft.can_transition_to(SeasonStatus::Ended));
}

#[test]
fn test_season_status_round_trips_through_strings() {
    for status in [
        SeasonStatus::Draft,
        SeasonStatus::Active,
        SeasonStatus::Ended,
    ] {
        assert_eq!(status.as_str().parse::<SeasonStatus>(), Ok(status));
    }
}

#[test]
fn test_validate_team_size_bounds() {
    let season = Season::new(1, String::from("Doubles"), test_config(), 2, 3, 2)
        .expect("valid season");
    assert!(season.validate_team_size(2).is_ok());
    assert!(season.validate_team_size(3).is_ok());
    assert_eq!(
        season.validate_team_size(1),
        Err(DomainError::InvalidTeamSize {
            size: 1,
            min: 2,
            max: 3,
        })
    );
    assert_eq!(
        season.validate_team_size(4),
        Err(DomainError::InvalidTeamSize {
            size: 4,
            min: 2,
            max: 3,
        })
    );
}

#[test]
fn test_team_rejects_duplicate_member() {
    let result = Team::new(1, vec![100, 101, 100]);
    assert_eq!(
        result,
        Err(DomainError::DuplicateTeamMember { player_id: 100 })
    );
}

#[test]
fn test_team_membership_lookup() {
    let team = Team::new(1, vec![100, 101]).expect("valid team");
    assert!(team.contains_player(100));
    assert!(!team.contains_player(102));
    assert!(!team.opted_out());
}
