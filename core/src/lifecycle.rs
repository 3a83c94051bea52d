//! Duty lifecycle signal source.
//!
//! Adapts the host's raw notifications into [`DutySignal`]s. Two independent
//! host notifications can end a duty, and they fire in a fixed order: the
//! territory change arrives *before* the authoritative completion
//! notification. The `duty_underway` guard flag arbitrates the race: it is
//! set on a tracked start and cleared by whichever end path fires first, so
//! the loser observes a cleared flag and emits nothing. A territory change
//! while the host no longer reports an active duty therefore means the player
//! abandoned the instance.

use chrono::NaiveDateTime;

use crate::game_data;
use crate::signal::DutySignal;

/// Converts host duty-state notifications into signals, filtering untracked
/// territories and deduplicating the two end-of-duty paths.
#[derive(Debug, Default)]
pub struct DutyLifecycle {
    duty_underway: bool,
}

impl DutyLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time query: has a tracked duty started and not yet ended.
    pub fn duty_underway(&self) -> bool {
        self.duty_underway
    }

    /// The host reports a duty beginning in the given territory.
    /// Returns no signal for territories outside the data table or whose use
    /// type is not tracked.
    pub fn duty_started(
        &mut self,
        territory_id: u16,
        timestamp: NaiveDateTime,
    ) -> Option<DutySignal> {
        tracing::info!(territory_id, "duty detected");

        let Some(territory) = game_data::lookup_territory(territory_id) else {
            tracing::warn!(territory_id, "territory missing from the data table");
            return None;
        };

        tracing::info!(
            place = %territory.place_name,
            intended_use = ?territory.intended_use,
            "territory resolved"
        );

        if !territory.intended_use.should_track() {
            return None;
        }

        self.duty_underway = true;
        Some(DutySignal::DutyStarted {
            territory,
            timestamp,
        })
    }

    /// The host reports a full party wipe. Always forwarded; the aggregator
    /// decides whether there is anything to close.
    pub fn duty_wiped(&self, timestamp: NaiveDateTime) -> DutySignal {
        tracing::debug!("duty wipe");
        DutySignal::DutyWiped { timestamp }
    }

    /// The host reports the duty restarting after a wipe.
    pub fn duty_recommenced(&self, timestamp: NaiveDateTime) -> DutySignal {
        tracing::debug!("duty recommenced");
        DutySignal::DutyRecommenced { timestamp }
    }

    /// The host's authoritative completion notification. Suppressed when the
    /// territory-change path already ended this duty.
    pub fn duty_completed(&mut self, timestamp: NaiveDateTime) -> Option<DutySignal> {
        if !self.duty_underway {
            return None;
        }

        tracing::debug!("detected end of duty via the completion notification");
        self.duty_underway = false;
        Some(DutySignal::DutyEnded {
            completed: true,
            timestamp,
        })
    }

    /// The player changed territory. `host_in_duty` is the host's own
    /// point-in-time duty flag: when it is already false while our guard is
    /// still set, the player left the instance without completing it.
    pub fn territory_changed(
        &mut self,
        territory_id: u16,
        host_in_duty: bool,
        timestamp: NaiveDateTime,
    ) -> Option<DutySignal> {
        if !self.duty_underway || host_in_duty {
            return None;
        }

        tracing::debug!(territory_id, "detected end of duty via territory change");
        self.duty_underway = false;
        Some(DutySignal::DutyEnded {
            completed: false,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap()
    }

    #[test]
    fn tracked_start_sets_the_guard_and_emits() {
        let mut lifecycle = DutyLifecycle::new();
        let signal = lifecycle.duty_started(827, ts());

        assert!(matches!(signal, Some(DutySignal::DutyStarted { .. })));
        assert!(lifecycle.duty_underway());
    }

    #[test]
    fn untracked_territory_is_filtered() {
        let mut lifecycle = DutyLifecycle::new();
        assert!(lifecycle.duty_started(129, ts()).is_none());
        assert!(!lifecycle.duty_underway());
    }

    #[test]
    fn unknown_territory_is_filtered() {
        let mut lifecycle = DutyLifecycle::new();
        assert!(lifecycle.duty_started(9999, ts()).is_none());
        assert!(!lifecycle.duty_underway());
    }

    #[test]
    fn completion_without_a_start_is_suppressed() {
        let mut lifecycle = DutyLifecycle::new();
        assert!(lifecycle.duty_completed(ts()).is_none());
    }

    #[test]
    fn territory_change_abandonment_suppresses_the_later_completion() {
        let mut lifecycle = DutyLifecycle::new();
        lifecycle.duty_started(827, ts());

        let abandoned = lifecycle.territory_changed(129, false, ts());
        assert!(matches!(
            abandoned,
            Some(DutySignal::DutyEnded {
                completed: false,
                ..
            })
        ));

        // The authoritative notification arrives afterwards and must not
        // produce a second end-of-duty signal.
        assert!(lifecycle.duty_completed(ts()).is_none());
    }

    #[test]
    fn completion_wins_when_it_fires_first() {
        let mut lifecycle = DutyLifecycle::new();
        lifecycle.duty_started(827, ts());

        let completed = lifecycle.duty_completed(ts());
        assert!(matches!(
            completed,
            Some(DutySignal::DutyEnded {
                completed: true,
                ..
            })
        ));
        assert!(lifecycle.territory_changed(129, false, ts()).is_none());
    }

    #[test]
    fn territory_change_while_still_in_duty_is_ignored() {
        let mut lifecycle = DutyLifecycle::new();
        lifecycle.duty_started(827, ts());

        // Intra-duty zone transition: the host still reports an active duty.
        assert!(lifecycle.territory_changed(372, true, ts()).is_none());
        assert!(lifecycle.duty_underway());
    }
}
