use chrono::NaiveDateTime;

use crate::alliance::Alliance;
use crate::game_data::Territory;

/// Signals produced by the duty lifecycle source and the party tracker.
/// These are the only inputs the aggregator reacts to; each one carries the
/// moment it was observed so downstream state never reads a wall clock.
#[derive(Debug, Clone)]
pub enum DutySignal {
    /// A trackable duty was entered. The only signal that creates a duty.
    DutyStarted {
        territory: Territory,
        timestamp: NaiveDateTime,
    },
    /// Full party defeat; the current run is over but the duty continues.
    DutyWiped { timestamp: NaiveDateTime },
    /// A fresh attempt has begun after a wipe.
    DutyRecommenced { timestamp: NaiveDateTime },
    /// The duty is over. `completed` distinguishes clearing the content from
    /// abandoning it (leaving the instance mid-attempt).
    DutyEnded {
        completed: bool,
        timestamp: NaiveDateTime,
    },
    /// A tracked party or alliance member's health reached zero.
    PlayerDied {
        player_name: String,
        alliance: Alliance,
        timestamp: NaiveDateTime,
    },
}

impl DutySignal {
    /// Get the timestamp from any signal variant
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            Self::DutyStarted { timestamp, .. }
            | Self::DutyWiped { timestamp }
            | Self::DutyRecommenced { timestamp }
            | Self::DutyEnded { timestamp, .. }
            | Self::PlayerDied { timestamp, .. } => *timestamp,
        }
    }
}
