//! End-of-duty summaries.
//!
//! A [`DutySummary`] freezes the statistics of a finished duty into a
//! serializable record and renders the human-readable line set: overall time,
//! final-run time and wipes when there was more than one attempt, then death
//! counts bucketed the way the duty's alliance layout dictates.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use chrono::TimeDelta;

use crate::alliance::{Alliance, AllianceSize};
use crate::format::minutes_seconds;

use super::Duty;

const THREE_PARTY_ALLIANCES: [Alliance; 3] = [Alliance::A, Alliance::B, Alliance::C];
const SIX_PARTY_ALLIANCES: [Alliance; 6] = [
    Alliance::A,
    Alliance::B,
    Alliance::C,
    Alliance::D,
    Alliance::E,
    Alliance::F,
];

/// One rendered summary line. `highlight` marks values the display should
/// call out (zero death counts, in the original's chat styling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
    pub highlight: bool,
}

impl SummaryLine {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            highlight: false,
        }
    }

    fn highlighted(label: impl Into<String>, value: impl Into<String>, highlight: bool) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            highlight,
        }
    }
}

/// Summary of a completed duty with computed statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutySummary {
    pub place_name: String,
    pub alliance_size: AllianceSize,
    /// ISO 8601 formatted start time
    pub start_time: String,
    /// ISO 8601 formatted end time (or None if the duty never closed)
    pub end_time: Option<String>,
    pub duration_seconds: i64,
    /// Duration of the last recorded run; None when every run was discarded.
    pub final_run_seconds: Option<i64>,
    pub runs: usize,
    pub wipes: usize,
    pub total_deaths: usize,
    /// Death counts per alliance letter, in display order. Empty for duties
    /// with no alliance layout.
    pub deaths_by_alliance: Vec<(Alliance, usize)>,
}

impl DutySummary {
    pub fn from_duty(duty: &Duty) -> Self {
        let mut counts: HashMap<Alliance, usize> = HashMap::new();
        for death in duty.all_deaths() {
            *counts.entry(death.alliance).or_insert(0) += 1;
        }

        let letters: &[Alliance] = match duty.alliance_size {
            AllianceSize::None => &[],
            AllianceSize::ThreeParty => &THREE_PARTY_ALLIANCES,
            AllianceSize::SixParty => &SIX_PARTY_ALLIANCES,
        };
        let deaths_by_alliance = letters
            .iter()
            .map(|&letter| (letter, counts.get(&letter).copied().unwrap_or(0)))
            .collect();

        Self {
            place_name: duty.territory.place_name.clone(),
            alliance_size: duty.alliance_size,
            start_time: duty.start_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end_time: duty
                .end_time
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string()),
            duration_seconds: duty.duration().num_seconds(),
            final_run_seconds: duty.last_run().map(|run| run.duration().num_seconds()),
            runs: duty.runs().len(),
            wipes: duty.total_wipes(),
            total_deaths: duty.total_deaths(),
            deaths_by_alliance,
        }
    }

    /// Compose the summary lines the display collaborator prints when a duty
    /// ends. `suppress_empty_values` elides the statistics that carry no
    /// information on a clean single-run clear.
    pub fn lines(&self, suppress_empty_values: bool) -> Vec<SummaryLine> {
        let mut lines = Vec::new();

        lines.push(SummaryLine::new(
            "Time in Duty: ",
            minutes_seconds(TimeDelta::seconds(self.duration_seconds)),
        ));

        if self.runs > 1 || !suppress_empty_values {
            if let Some(final_run) = self.final_run_seconds {
                lines.push(SummaryLine::new(
                    "Final Run Duration: ",
                    minutes_seconds(TimeDelta::seconds(final_run)),
                ));
            }
            lines.push(SummaryLine::new("Wipes: ", self.wipes.to_string()));
        }

        match self.alliance_size {
            AllianceSize::ThreeParty | AllianceSize::SixParty => {
                for &(alliance, count) in &self.deaths_by_alliance {
                    lines.push(SummaryLine::highlighted(
                        format!("{alliance} deaths: "),
                        count.to_string(),
                        count == 0,
                    ));
                }
            }
            AllianceSize::None => {
                if self.total_deaths > 0 || !suppress_empty_values {
                    lines.push(SummaryLine::new(
                        "Party Deaths: ",
                        self.total_deaths.to_string(),
                    ));
                }
            }
        }

        lines
    }
}
