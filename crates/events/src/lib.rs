// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use club_ladder_domain::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of event kinds the ladder records.
///
/// Public events (no target player) appear in the club feed; personal
/// events (target set) are notifications for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A challenge was issued (public feed entry).
    Challenge,
    /// A player was challenged (personal notification).
    Challenged,
    /// A match result was confirmed (public feed entry).
    Result,
    /// A result was entered and awaits confirmation (personal notification).
    ResultEntered,
    /// A result was confirmed (personal notification to the enterer).
    ResultConfirmed,
    /// A result was disputed (personal notification to the enterer).
    ResultDisputed,
    /// A challenge was withdrawn.
    Withdrawal,
    /// A match was forfeited.
    Forfeit,
    /// A match date was proposed (personal notification).
    DateProposed,
    /// A date proposal was accepted.
    DateAccepted,
    /// A date proposal was declined (personal notification).
    DateDeclined,
    /// A player declared an unavailability window.
    Unavailable,
    /// A new player enrolled into the ladder.
    NewPlayer,
}

impl EventKind {
    /// Converts this kind to its storage string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Challenge => "challenge",
            Self::Challenged => "challenged",
            Self::Result => "result",
            Self::ResultEntered => "result_entered",
            Self::ResultConfirmed => "result_confirmed",
            Self::ResultDisputed => "result_disputed",
            Self::Withdrawal => "withdrawal",
            Self::Forfeit => "forfeit",
            Self::DateProposed => "date_proposed",
            Self::DateAccepted => "date_accepted",
            Self::DateDeclined => "date_declined",
            Self::Unavailable => "unavailable",
            Self::NewPlayer => "new_player",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "challenge" => Ok(Self::Challenge),
            "challenged" => Ok(Self::Challenged),
            "result" => Ok(Self::Result),
            "result_entered" => Ok(Self::ResultEntered),
            "result_confirmed" => Ok(Self::ResultConfirmed),
            "result_disputed" => Ok(Self::ResultDisputed),
            "withdrawal" => Ok(Self::Withdrawal),
            "forfeit" => Ok(Self::Forfeit),
            "date_proposed" => Ok(Self::DateProposed),
            "date_accepted" => Ok(Self::DateAccepted),
            "date_declined" => Ok(Self::DateDeclined),
            "unavailable" => Ok(Self::Unavailable),
            "new_player" => Ok(Self::NewPlayer),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of something that happened in the ladder.
///
/// Events are append-only and never mutated once written. Every mutating
/// domain operation writes its events in the same transaction as the state
/// change they record, so the feed and the state can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The club whose feed this event belongs to.
    pub club_id: i64,
    /// The season this event concerns, if any.
    pub season_id: Option<i64>,
    /// The match this event concerns, if any.
    pub match_id: Option<i64>,
    /// The player who performed the action, if attributable.
    pub actor_player_id: Option<i64>,
    /// The player this event notifies. `None` makes the event public.
    pub target_player_id: Option<i64>,
    /// What happened.
    pub kind: EventKind,
    /// Free-form metadata (scores, reasons, ranks).
    pub metadata: serde_json::Value,
}

impl Event {
    /// Creates a new public event with empty metadata.
    ///
    /// # Arguments
    ///
    /// * `club_id` - The club whose feed this event belongs to
    /// * `kind` - What happened
    #[must_use]
    pub const fn public(club_id: i64, kind: EventKind) -> Self {
        Self {
            club_id,
            season_id: None,
            match_id: None,
            actor_player_id: None,
            target_player_id: None,
            kind,
            metadata: serde_json::Value::Null,
        }
    }

    /// Creates a new personal notification with empty metadata.
    ///
    /// # Arguments
    ///
    /// * `club_id` - The club whose feed this event belongs to
    /// * `kind` - What happened
    /// * `target_player_id` - The player to notify
    #[must_use]
    pub const fn personal(club_id: i64, kind: EventKind, target_player_id: i64) -> Self {
        Self {
            club_id,
            season_id: None,
            match_id: None,
            actor_player_id: None,
            target_player_id: Some(target_player_id),
            kind,
            metadata: serde_json::Value::Null,
        }
    }

    /// Sets the season reference.
    #[must_use]
    pub const fn season(mut self, season_id: i64) -> Self {
        self.season_id = Some(season_id);
        self
    }

    /// Sets the match reference.
    #[must_use]
    pub const fn for_match(mut self, match_id: i64) -> Self {
        self.match_id = Some(match_id);
        self
    }

    /// Sets the acting player.
    #[must_use]
    pub const fn actor(mut self, actor_player_id: i64) -> Self {
        self.actor_player_id = Some(actor_player_id);
        self
    }

    /// Attaches free-form metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns whether this event is a personal notification.
    #[must_use]
    pub const fn is_personal(&self) -> bool {
        self.target_player_id.is_some()
    }
}

/// An event as read back from storage, with its assigned id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// The identifier assigned by the database.
    pub event_id: i64,
    /// The event payload.
    pub event: Event,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_event_has_no_target() {
        let event: Event = Event::public(1, EventKind::Challenge);

        assert_eq!(event.club_id, 1);
        assert_eq!(event.target_player_id, None);
        assert!(!event.is_personal());
    }

    #[test]
    fn test_personal_event_targets_one_player() {
        let event: Event = Event::personal(1, EventKind::Challenged, 42);

        assert_eq!(event.target_player_id, Some(42));
        assert!(event.is_personal());
    }

    #[test]
    fn test_builder_methods_attach_references() {
        let event: Event = Event::public(1, EventKind::Result)
            .season(7)
            .for_match(99)
            .actor(42)
            .metadata(serde_json::json!({ "winner_team_id": 5 }));

        assert_eq!(event.season_id, Some(7));
        assert_eq!(event.match_id, Some(99));
        assert_eq!(event.actor_player_id, Some(42));
        assert_eq!(event.metadata["winner_team_id"], 5);
    }

    #[test]
    fn test_event_kind_round_trips_through_strings() {
        for kind in [
            EventKind::Challenge,
            EventKind::Challenged,
            EventKind::Result,
            EventKind::ResultEntered,
            EventKind::ResultConfirmed,
            EventKind::ResultDisputed,
            EventKind::Withdrawal,
            EventKind::Forfeit,
            EventKind::DateProposed,
            EventKind::DateAccepted,
            EventKind::DateDeclined,
            EventKind::Unavailable,
            EventKind::NewPlayer,
        ] {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_event_kind_rejects_unknown_string() {
        assert!("promotion".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_event_serializes_to_json() {
        let event: Event = Event::personal(1, EventKind::ResultEntered, 42).for_match(5);

        let json: String = serde_json::to_string(&event).expect("serializable");
        let back: Event = serde_json::from_str(&json).expect("deserializable");

        assert_eq!(event, back);
    }
}
