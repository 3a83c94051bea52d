//! Scripted replay scenarios.
//!
//! A scenario is a TOML file describing a sequence of host notifications with
//! second offsets from a chosen base time. Replaying one drives a
//! [`TrackerRuntime`] through the exact signal paths the live host would use,
//! which makes the tracker's behavior inspectable without a running game.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, TimeDelta};
use serde::Deserialize;
use thiserror::Error;

use crate::alliance::Alliance;
use crate::duty::DutySummary;
use crate::runtime::TrackerRuntime;

/// Errors while loading a scenario file
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "event")]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioEvent {
    /// Seconds from scenario start.
    #[serde(default)]
    pub at: f64,
    #[serde(flatten)]
    pub kind: ScenarioEventKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScenarioEventKind {
    DutyStarted { territory: u16 },
    DutyWiped,
    DutyRecommenced,
    DutyCompleted,
    TerritoryChanged {
        territory: u16,
        #[serde(default)]
        in_duty: bool,
    },
    Death {
        player: String,
        #[serde(default)]
        alliance: Alliance,
    },
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Feed every event into the runtime in file order, stamping each with
    /// `base + at`. Returns the summaries of the duties that finished.
    pub fn replay(&self, runtime: &mut TrackerRuntime, base: NaiveDateTime) -> Vec<DutySummary> {
        let mut summaries = Vec::new();

        for event in &self.events {
            let timestamp = base + TimeDelta::milliseconds((event.at * 1000.0) as i64);
            match &event.kind {
                ScenarioEventKind::DutyStarted { territory } => {
                    runtime.on_duty_started(*territory, timestamp);
                }
                ScenarioEventKind::DutyWiped => runtime.on_duty_wiped(timestamp),
                ScenarioEventKind::DutyRecommenced => runtime.on_duty_recommenced(timestamp),
                ScenarioEventKind::DutyCompleted => {
                    summaries.extend(runtime.on_duty_completed(timestamp));
                }
                ScenarioEventKind::TerritoryChanged { territory, in_duty } => {
                    summaries.extend(runtime.on_territory_changed(*territory, *in_duty, timestamp));
                }
                ScenarioEventKind::Death { player, alliance } => {
                    runtime.on_player_died(player, *alliance, timestamp);
                }
            }
        }

        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SCENARIO: &str = r#"
name = "copied factory wipe and clear"

[[event]]
at = 0.0
kind = "duty-started"
territory = 827

[[event]]
at = 95.0
kind = "death"
player = "Tam Honks"
alliance = "A"

[[event]]
at = 120.0
kind = "duty-wiped"

[[event]]
at = 150.0
kind = "duty-recommenced"

[[event]]
at = 300.0
kind = "death"
player = "Kan Himaa"
alliance = "B"

[[event]]
at = 900.0
kind = "duty-completed"
"#;

    #[test]
    fn scenario_parses_and_replays() {
        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        assert_eq!(scenario.events.len(), 6);

        let base = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(19, 0, 0)
            .unwrap();

        let mut runtime = TrackerRuntime::new();
        let summaries = scenario.replay(&mut runtime, base);

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.place_name, "The Copied Factory");
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.wipes, 1);
        assert_eq!(summary.total_deaths, 2);
        assert_eq!(summary.duration_seconds, 900);
    }

    #[test]
    fn unknown_kind_fails_to_parse() {
        let bad = r#"
[[event]]
at = 0.0
kind = "duty-paused"
"#;
        assert!(toml::from_str::<Scenario>(bad).is_err());
    }
}
