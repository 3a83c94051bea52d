//! Composition root for the tracker.
//!
//! Owns the lifecycle source, the party tracker, and the duty manager, and
//! exposes the host-facing entry points: one per host notification plus the
//! per-frame update. All delivery funnels through the panic-guarded dispatch
//! in [`crate::signal`], so nothing here can unwind back into the host.
//!
//! Everything runs on the host's single update thread; handlers are plain
//! sequential state machines and each entry point completes its transition
//! before returning, so queries never observe a half-applied update.

use chrono::NaiveDateTime;

use crate::alliance::Alliance;
use crate::duty::{Duty, DutyManager, DutySummary, Run};
use crate::lifecycle::DutyLifecycle;
use crate::party::{PartyTracker, RosterProvider};
use crate::signal::dispatch::guarded;
use crate::signal::{self, DutySignal, SignalHandler};

#[derive(Debug, Default)]
pub struct TrackerRuntime {
    lifecycle: DutyLifecycle,
    party: PartyTracker,
    manager: DutyManager,
}

impl TrackerRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Host notification entry points ---

    pub fn on_duty_started(&mut self, territory_id: u16, timestamp: NaiveDateTime) {
        let signal =
            guarded("duty started", || self.lifecycle.duty_started(territory_id, timestamp))
                .flatten();
        if let Some(signal) = signal {
            self.route(&signal);
        }
    }

    pub fn on_duty_wiped(&mut self, timestamp: NaiveDateTime) {
        let signal = self.lifecycle.duty_wiped(timestamp);
        self.route(&signal);
    }

    pub fn on_duty_recommenced(&mut self, timestamp: NaiveDateTime) {
        let signal = self.lifecycle.duty_recommenced(timestamp);
        self.route(&signal);
    }

    /// The host's authoritative completion notification. Returns the summary
    /// of the finished duty when this call closed one.
    pub fn on_duty_completed(&mut self, timestamp: NaiveDateTime) -> Option<DutySummary> {
        let before = self.manager.completed_count();
        if let Some(signal) = self.lifecycle.duty_completed(timestamp) {
            self.route(&signal);
        }
        self.finished_since(before)
    }

    /// Territory change notification; fires before the completion
    /// notification when both race. `host_in_duty` is the host's own current
    /// duty flag.
    pub fn on_territory_changed(
        &mut self,
        territory_id: u16,
        host_in_duty: bool,
        timestamp: NaiveDateTime,
    ) -> Option<DutySummary> {
        let before = self.manager.completed_count();
        if let Some(signal) =
            self.lifecycle
                .territory_changed(territory_id, host_in_duty, timestamp)
        {
            self.route(&signal);
        }
        self.finished_since(before)
    }

    /// Per-frame poll: reconcile the roster caches and record any deaths.
    pub fn on_framework_update(&mut self, roster: &dyn RosterProvider, timestamp: NaiveDateTime) {
        let Self { party, manager, .. } = self;
        let deaths = guarded("frame update", || party.tick(roster, timestamp)).unwrap_or_default();
        if !deaths.is_empty() {
            signal::dispatch::dispatch_all(&mut [manager as &mut dyn SignalHandler], &deaths);
        }
    }

    /// Direct death injection, bypassing the roster poll. Used by hook-based
    /// capture paths and the scenario replayer.
    pub fn on_player_died(&mut self, player_name: &str, alliance: Alliance, timestamp: NaiveDateTime) {
        let signal = DutySignal::PlayerDied {
            player_name: player_name.to_string(),
            alliance,
            timestamp,
        };
        self.route(&signal);
    }

    // --- Queries ---

    pub fn duty_active(&self) -> bool {
        self.manager.duty_active()
    }

    pub fn any_duties_started(&self) -> bool {
        self.manager.any_duties_started()
    }

    /// Completed duties, oldest first.
    pub fn duties(&self) -> &[Duty] {
        self.manager.duties()
    }

    pub fn most_recent_duty(&self) -> Option<&Duty> {
        self.manager.most_recent_duty()
    }

    pub fn most_recent_run(&self) -> Option<&Run> {
        self.manager.most_recent_run()
    }

    pub fn manager(&self) -> &DutyManager {
        &self.manager
    }

    // --- Internals ---

    fn route(&mut self, signal: &DutySignal) {
        let Self { party, manager, .. } = self;
        signal::dispatch(
            &mut [
                party as &mut dyn SignalHandler,
                manager as &mut dyn SignalHandler,
            ],
            signal,
        );
    }

    fn finished_since(&self, before: usize) -> Option<DutySummary> {
        if self.manager.completed_count() > before {
            self.manager.duties().last().map(DutySummary::from_duty)
        } else {
            None
        }
    }
}
