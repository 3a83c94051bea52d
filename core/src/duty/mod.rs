//! Duty, run, and death records.
//!
//! A duty is one instance attempt cycle from entry to completion or
//! abandonment. Wipes partition it into runs; deaths attach to the run that
//! was open when they happened. Records are append-only: once a duty moves
//! into the session history nothing mutates it again.

pub mod manager;
pub mod summary;

#[cfg(test)]
mod manager_tests;

pub use manager::DutyManager;
pub use summary::DutySummary;

use chrono::{NaiveDateTime, TimeDelta};

use crate::alliance::{Alliance, AllianceSize};
use crate::game_data::Territory;

/// One player death during a run.
#[derive(Debug, Clone)]
pub struct Death {
    pub player_name: String,
    pub time_of_death: NaiveDateTime,
    pub alliance: Alliance,
}

/// One attempt within a duty, bounded by wipes.
#[derive(Debug, Clone)]
pub struct Run {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    deaths: Vec<Death>,
}

impl Run {
    fn new(start_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time: None,
            deaths: Vec::new(),
        }
    }

    pub fn deaths(&self) -> &[Death] {
        &self.deaths
    }

    /// Still accumulating deaths; closed by a wipe or by duty completion.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Elapsed time, live until the run closes.
    pub fn duration(&self) -> TimeDelta {
        let terminal = match self.end_time {
            Some(end) => end,
            None => chrono::offset::Local::now().naive_local(),
        };
        terminal.signed_duration_since(self.start_time)
    }

    fn close(&mut self, timestamp: NaiveDateTime) {
        if self.end_time.is_none() {
            self.end_time = Some(timestamp);
        }
    }
}

/// One instance attempt cycle. Created by the duty-started signal only.
#[derive(Debug, Clone)]
pub struct Duty {
    pub territory: Territory,
    /// Party layout of this duty; fixed at creation.
    pub alliance_size: AllianceSize,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    runs: Vec<Run>,
}

impl Duty {
    pub(crate) fn new(
        territory: Territory,
        alliance_size: AllianceSize,
        start_time: NaiveDateTime,
    ) -> Self {
        Self {
            territory,
            alliance_size,
            start_time,
            end_time: None,
            runs: Vec::new(),
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn last_run(&self) -> Option<&Run> {
        self.runs.last()
    }

    /// Elapsed time, live until the duty ends.
    pub fn duration(&self) -> TimeDelta {
        let terminal = match self.end_time {
            Some(end) => end,
            None => chrono::offset::Local::now().naive_local(),
        };
        terminal.signed_duration_since(self.start_time)
    }

    pub fn total_deaths(&self) -> usize {
        self.runs.iter().map(|run| run.deaths.len()).sum()
    }

    /// Every run past the first one began with a wipe.
    pub fn total_wipes(&self) -> usize {
        self.runs.len().saturating_sub(1)
    }

    pub fn all_deaths(&self) -> impl Iterator<Item = &Death> {
        self.runs.iter().flat_map(|run| run.deaths.iter())
    }

    pub fn average_deaths_per_wipe(&self) -> usize {
        let wipes = self.total_wipes();
        if wipes == 0 {
            0
        } else {
            self.total_deaths() / wipes
        }
    }

    // --- Run lifecycle (driven by the manager) ---

    /// The last run, if it has not been closed yet. Earlier runs are never
    /// reopened; deaths only ever land in this one.
    pub(crate) fn open_run_mut(&mut self) -> Option<&mut Run> {
        self.runs.last_mut().filter(|run| run.is_open())
    }

    pub(crate) fn start_run(&mut self, timestamp: NaiveDateTime) {
        self.runs.push(Run::new(timestamp));
    }

    /// Close the open run if there is one; closing an already closed run is a
    /// no-op so a doubled wipe signal cannot manufacture a phantom run.
    pub(crate) fn close_open_run(&mut self, timestamp: NaiveDateTime) {
        if let Some(run) = self.open_run_mut() {
            run.close(timestamp);
        }
    }

    /// Drop the open run entirely. An abandoned attempt has no meaningful
    /// duration, so its record (deaths included) does not survive.
    pub(crate) fn discard_open_run(&mut self) {
        if self.runs.last().is_some_and(Run::is_open) {
            self.runs.pop();
        }
    }
}
