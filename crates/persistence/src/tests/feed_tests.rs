// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the event feed and the head-to-head record.

use club_ladder_domain::SetScore;
use club_ladder_events::EventKind;

use crate::tests::helpers::{active_season_with_players, challenge_spec, store, CLUB};
use crate::Persistence;

#[test]
fn test_public_and_personal_events_are_separated() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    p.create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");

    // The club feed carries only public events.
    let feed = p.club_feed(CLUB, 50).expect("feed");
    assert!(feed.iter().all(|stored| !stored.event.is_personal()));
    assert!(feed
        .iter()
        .any(|stored| stored.event.kind == EventKind::Challenge));

    // The notification feed carries only the target's personal events.
    let inbox = p.notifications(100, 50).expect("notifications");
    assert!(inbox
        .iter()
        .all(|stored| stored.event.target_player_id == Some(100)));
    assert!(inbox
        .iter()
        .any(|stored| stored.event.kind == EventKind::Challenged));
}

#[test]
fn test_enrollment_posts_to_the_club_feed() {
    let mut p: Persistence = store();
    let (_, _) = active_season_with_players(&mut p, &[100, 101]);

    let feed = p.club_feed(CLUB, 50).expect("feed");
    let enrollments: usize = feed
        .iter()
        .filter(|stored| stored.event.kind == EventKind::NewPlayer)
        .count();
    assert_eq!(enrollments, 2);
}

#[test]
fn test_feed_is_most_recent_first_and_limited() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &[SetScore::new(6, 0), SetScore::new(6, 0)])
        .expect("enter");
    p.confirm_result(match_id, 100).expect("confirm");

    let feed = p.club_feed(CLUB, 2).expect("feed");
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].event.kind, EventKind::Result);
    assert!(feed[0].event_id > feed[1].event_id);
}

#[test]
fn test_completed_match_event_references_the_match() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);
    let match_id: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(match_id, 101, &[SetScore::new(6, 0), SetScore::new(6, 0)])
        .expect("enter");
    p.confirm_result(match_id, 100).expect("confirm");

    let feed = p.club_feed(CLUB, 10).expect("feed");
    let result_event = feed
        .iter()
        .find(|stored| stored.event.kind == EventKind::Result)
        .expect("result event");
    assert_eq!(result_event.event.match_id, Some(match_id));
    assert_eq!(result_event.event.season_id, Some(season_id));
    assert_eq!(result_event.event.metadata["winner_team_id"], teams[1]);
}

#[test]
fn test_head_to_head_counts_decided_matches_in_both_directions() {
    let mut p: Persistence = store();
    let (season_id, teams) = active_season_with_players(&mut p, &[100, 101]);

    // First meeting: the challenger wins and takes rank 1.
    let first: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[1], teams[0], 101, 100))
        .expect("challenge");
    p.enter_result(first, 101, &[SetScore::new(6, 0), SetScore::new(6, 0)])
        .expect("enter");
    p.confirm_result(first, 100).expect("confirm");

    // Rematch in the opposite direction: the old leader forfeits.
    let second: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[0], teams[1], 100, 101))
        .expect("challenge");
    p.forfeit(second, 100).expect("forfeit");

    let record = p.head_to_head(teams[1], teams[0]).expect("head to head");
    assert_eq!(record.team_a_wins, 2);
    assert_eq!(record.team_b_wins, 0);

    // Withdrawn matches stay out of the record.
    let third: i64 = p
        .create_challenge(&challenge_spec(season_id, teams[0], teams[1], 100, 101))
        .expect("challenge");
    p.withdraw(third, 100).expect("withdraw");
    let record = p.head_to_head(teams[1], teams[0]).expect("head to head");
    assert_eq!(record.team_a_wins + record.team_b_wins, 2);
}
