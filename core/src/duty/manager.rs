//! Duty aggregation state machine.
//!
//! Consumes [`DutySignal`]s and maintains the in-progress duty plus the
//! session history. The signal sources are known to double-fire and to race
//! each other, so every transition tolerates arriving in the wrong state:
//! out-of-order signals degrade to no-ops, never to errors.

use chrono::NaiveDateTime;

use crate::alliance::Alliance;
use crate::game_data::Territory;
use crate::session::SessionHistory;
use crate::signal::{DutySignal, SignalHandler};

use super::{Death, Duty, Run};

/// Tracks the current duty and its runs, and moves finished duties into the
/// session history. Owns the only mutable path into the data model.
#[derive(Debug, Default)]
pub struct DutyManager {
    current: Option<Duty>,
    history: SessionHistory,
    duty_active: bool,
    any_duties_started: bool,
}

impl DutyManager {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries (all O(1)) ---

    pub fn duty_active(&self) -> bool {
        self.duty_active
    }

    pub fn any_duties_started(&self) -> bool {
        self.any_duties_started
    }

    /// Completed duties, oldest first. The in-progress duty is not included.
    pub fn duties(&self) -> &[Duty] {
        self.history.duties()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// The in-progress duty if one exists, else the last finished one.
    pub fn most_recent_duty(&self) -> Option<&Duty> {
        self.current.as_ref().or_else(|| self.history.last())
    }

    /// Newest run of the most recent duty (it may already be closed, e.g.
    /// between a wipe and the recommencement).
    pub fn most_recent_run(&self) -> Option<&Run> {
        self.most_recent_duty().and_then(Duty::last_run)
    }

    pub fn completed_count(&self) -> usize {
        self.history.len()
    }

    // --- Transitions ---

    fn start_duty(&mut self, territory: &Territory, timestamp: NaiveDateTime) {
        if let Some(dropped) = self.current.take() {
            // A doubled start can only come from a missed end signal; the
            // older duty has no end time and cannot be summarized.
            tracing::warn!(
                place = %dropped.territory.place_name,
                "duty started while another was in progress; dropping the older one"
            );
        }

        tracing::info!(
            territory_id = territory.id,
            place = %territory.place_name,
            "duty started"
        );

        self.duty_active = true;
        self.any_duties_started = true;

        let alliance_size = territory.intended_use.alliance_size();
        let mut duty = Duty::new(territory.clone(), alliance_size, timestamp);
        duty.start_run(timestamp);
        self.current = Some(duty);
    }

    fn end_run(&mut self, timestamp: NaiveDateTime) {
        match self.current.as_mut() {
            Some(duty) => duty.close_open_run(timestamp),
            None => tracing::debug!("wipe signal with no duty in progress; ignored"),
        }
    }

    fn start_new_run(&mut self, timestamp: NaiveDateTime) {
        match self.current.as_mut() {
            // Opens a fresh run on top of whatever exists, even if the wipe
            // that should have closed the previous one never arrived.
            Some(duty) => duty.start_run(timestamp),
            None => tracing::debug!("recommence signal with no duty in progress; ignored"),
        }
    }

    fn end_duty(&mut self, completed: bool, timestamp: NaiveDateTime) {
        self.duty_active = false;

        let Some(mut duty) = self.current.take() else {
            tracing::debug!("duty-ended signal with no duty in progress; ignored");
            return;
        };

        duty.end_time = Some(timestamp);

        if completed {
            duty.close_open_run(timestamp);
        } else {
            duty.discard_open_run();
        }

        tracing::info!(
            place = %duty.territory.place_name,
            completed,
            runs = duty.runs().len(),
            deaths = duty.total_deaths(),
            "duty ended"
        );

        self.history.add(duty);
    }

    fn add_death(&mut self, player_name: &str, alliance: Alliance, timestamp: NaiveDateTime) {
        let Some(run) = self.current.as_mut().and_then(Duty::open_run_mut) else {
            tracing::debug!(player = player_name, "death with no open run; dropped");
            return;
        };

        run.deaths.push(Death {
            player_name: player_name.to_string(),
            time_of_death: timestamp,
            alliance,
        });
    }
}

impl SignalHandler for DutyManager {
    fn handle_signal(&mut self, signal: &DutySignal) {
        match signal {
            DutySignal::DutyStarted {
                territory,
                timestamp,
            } => self.start_duty(territory, *timestamp),
            DutySignal::DutyWiped { timestamp } => self.end_run(*timestamp),
            DutySignal::DutyRecommenced { timestamp } => self.start_new_run(*timestamp),
            DutySignal::DutyEnded {
                completed,
                timestamp,
            } => self.end_duty(*completed, *timestamp),
            DutySignal::PlayerDied {
                player_name,
                alliance,
                timestamp,
            } => self.add_death(player_name, *alliance, *timestamp),
        }
    }
}
