//! Scenario tests for the duty aggregation state machine.
//!
//! Signals are constructed directly with fixed timestamps, so every duration
//! and count asserted here is exact.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::alliance::{Alliance, AllianceSize};
use crate::game_data::{Territory, TerritoryUse};
use crate::signal::{DutySignal, SignalHandler};

use super::DutyManager;

fn ts(seconds: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(19, 0, 0)
        .unwrap()
        + TimeDelta::seconds(seconds)
}

fn alliance_raid() -> Territory {
    Territory::new(827, "The Copied Factory", TerritoryUse::AllianceRaid)
}

fn dungeon() -> Territory {
    Territory::new(1059, "The Tower of Zot", TerritoryUse::Dungeon)
}

fn started(territory: Territory, at: i64) -> DutySignal {
    DutySignal::DutyStarted {
        territory,
        timestamp: ts(at),
    }
}

fn wiped(at: i64) -> DutySignal {
    DutySignal::DutyWiped { timestamp: ts(at) }
}

fn recommenced(at: i64) -> DutySignal {
    DutySignal::DutyRecommenced { timestamp: ts(at) }
}

fn ended(completed: bool, at: i64) -> DutySignal {
    DutySignal::DutyEnded {
        completed,
        timestamp: ts(at),
    }
}

fn died(player: &str, alliance: Alliance, at: i64) -> DutySignal {
    DutySignal::PlayerDied {
        player_name: player.to_string(),
        alliance,
        timestamp: ts(at),
    }
}

#[test]
fn full_alliance_raid_cycle_records_runs_and_deaths() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(alliance_raid(), 0),
        died("Tam Honks", Alliance::A, 95),
        wiped(120),
        recommenced(150),
        died("Kan Himaa", Alliance::B, 300),
        ended(true, 900),
    ]);

    assert_eq!(manager.duties().len(), 1);
    let duty = &manager.duties()[0];

    assert_eq!(duty.alliance_size, AllianceSize::ThreeParty);
    assert_eq!(duty.runs().len(), 2);
    assert_eq!(duty.total_wipes(), 1);
    assert_eq!(duty.total_deaths(), 2);
    assert_eq!(duty.end_time, Some(ts(900)));

    let first = &duty.runs()[0];
    assert_eq!(first.end_time, Some(ts(120)));
    assert_eq!(first.deaths().len(), 1);
    assert_eq!(first.deaths()[0].player_name, "Tam Honks");
    assert_eq!(first.deaths()[0].alliance, Alliance::A);

    let second = &duty.runs()[1];
    assert_eq!(second.start_time, ts(150));
    assert_eq!(second.end_time, Some(ts(900)));
    assert_eq!(second.deaths()[0].player_name, "Kan Himaa");

    let names: Vec<&str> = duty
        .all_deaths()
        .map(|death| death.player_name.as_str())
        .collect();
    assert_eq!(names, vec!["Tam Honks", "Kan Himaa"]);
}

#[test]
fn wipe_and_death_identities_hold_for_longer_sequences() {
    for wipes in 0..4usize {
        let mut manager = DutyManager::new();
        manager.handle_signal(&started(dungeon(), 0));

        let mut clock = 10;
        for run in 0..=wipes {
            // One death per attempt plus an extra on the first.
            manager.handle_signal(&died("Tam Honks", Alliance::None, clock));
            if run == 0 {
                manager.handle_signal(&died("Kan Himaa", Alliance::None, clock + 1));
            }
            if run < wipes {
                manager.handle_signal(&wiped(clock + 5));
                manager.handle_signal(&recommenced(clock + 10));
            }
            clock += 20;
        }
        manager.handle_signal(&ended(true, clock));

        let duty = &manager.duties()[0];
        assert_eq!(duty.total_wipes(), duty.runs().len() - 1);
        assert_eq!(duty.total_wipes(), wipes);
        assert_eq!(
            duty.total_deaths(),
            duty.runs().iter().map(|r| r.deaths().len()).sum::<usize>(),
        );
        assert_eq!(duty.total_deaths(), wipes + 2);
    }
}

#[test]
fn abandoned_duty_discards_the_open_run() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(dungeon(), 0),
        died("Tam Honks", Alliance::None, 40),
        ended(false, 60),
    ]);

    assert!(!manager.duty_active());
    assert_eq!(manager.duties().len(), 1);

    let duty = &manager.duties()[0];
    // The in-progress run is removed, and its death goes with it.
    assert!(duty.runs().is_empty());
    assert_eq!(duty.total_deaths(), 0);
    assert_eq!(duty.total_wipes(), 0);
    assert_eq!(duty.end_time, Some(ts(60)));
}

#[test]
fn abandonment_after_a_wipe_keeps_the_closed_runs() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(dungeon(), 0),
        died("Tam Honks", Alliance::None, 30),
        wiped(50),
        recommenced(70),
        ended(false, 90),
    ]);

    let duty = &manager.duties()[0];
    assert_eq!(duty.runs().len(), 1);
    assert_eq!(duty.total_deaths(), 1);
    assert_eq!(duty.runs()[0].end_time, Some(ts(50)));
}

#[test]
fn most_recent_run_resolves_current_then_history_then_nothing() {
    let mut manager = DutyManager::new();
    assert!(manager.most_recent_duty().is_none());
    assert!(manager.most_recent_run().is_none());

    manager.handle_signal(&started(dungeon(), 0));
    assert!(manager.duty_active());
    let run = manager.most_recent_run().expect("open run");
    assert!(run.is_open());
    assert_eq!(run.start_time, ts(0));

    manager.handle_signal(&ended(true, 500));
    assert!(!manager.duty_active());
    let run = manager.most_recent_run().expect("historical run");
    assert_eq!(run.end_time, Some(ts(500)));
    assert_eq!(manager.most_recent_duty().unwrap().end_time, Some(ts(500)));
}

#[test]
fn doubled_wipe_closes_exactly_one_run() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[started(dungeon(), 0), wiped(100), wiped(130)]);

    let duty = manager.most_recent_duty().unwrap();
    assert_eq!(duty.runs().len(), 1);
    // The second wipe neither reopens nor re-stamps the run.
    assert_eq!(duty.runs()[0].end_time, Some(ts(100)));
}

#[test]
fn recommence_without_a_wipe_still_opens_a_fresh_run() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(dungeon(), 0),
        recommenced(60),
        died("Tam Honks", Alliance::None, 70),
        ended(true, 200),
    ]);

    let duty = &manager.duties()[0];
    assert_eq!(duty.runs().len(), 2);
    // The death lands in the newest run, not the never-closed first one.
    assert!(duty.runs()[0].deaths().is_empty());
    assert_eq!(duty.runs()[1].deaths().len(), 1);
}

#[test]
fn death_between_wipe_and_recommence_is_dropped() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(dungeon(), 0),
        wiped(100),
        died("Tam Honks", Alliance::None, 110),
        recommenced(120),
        ended(true, 300),
    ]);

    let duty = &manager.duties()[0];
    assert_eq!(duty.total_deaths(), 0);
}

#[test]
fn signals_with_no_duty_in_progress_are_noops() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        wiped(0),
        recommenced(1),
        died("Tam Honks", Alliance::None, 2),
        ended(true, 3),
    ]);

    assert!(!manager.duty_active());
    assert!(!manager.any_duties_started());
    assert!(manager.duties().is_empty());
}

#[test]
fn doubled_start_replaces_the_duty_in_progress() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(dungeon(), 0),
        started(alliance_raid(), 50),
        ended(true, 400),
    ]);

    // Only the replacing duty survives; the orphaned one is never pushed.
    assert_eq!(manager.duties().len(), 1);
    assert_eq!(manager.duties()[0].territory.id, 827);
    assert_eq!(manager.duties()[0].start_time, ts(50));
}

#[test]
fn history_preserves_completion_order() {
    let mut manager = DutyManager::new();

    manager.handle_signals(&[
        started(dungeon(), 0),
        ended(true, 100),
        started(alliance_raid(), 200),
        ended(true, 900),
    ]);

    let ids: Vec<u16> = manager.duties().iter().map(|d| d.territory.id).collect();
    assert_eq!(ids, vec![1059, 827]);
    assert!(manager.any_duties_started());
}

mod summaries {
    use super::*;
    use crate::duty::DutySummary;

    #[test]
    fn clean_clear_suppresses_empty_statistics() {
        let mut manager = DutyManager::new();
        manager.handle_signals(&[started(dungeon(), 0), ended(true, 754)]);

        let summary = DutySummary::from_duty(&manager.duties()[0]);
        assert_eq!(summary.duration_seconds, 754);
        assert_eq!(summary.final_run_seconds, Some(754));

        let lines = summary.lines(true);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "Time in Duty: ");
        assert_eq!(lines[0].value, "12:34");

        let verbose = summary.lines(false);
        let labels: Vec<&str> = verbose.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Time in Duty: ",
                "Final Run Duration: ",
                "Wipes: ",
                "Party Deaths: ",
            ],
        );
    }

    #[test]
    fn three_party_summary_buckets_deaths_by_letter() {
        let mut manager = DutyManager::new();
        manager.handle_signals(&[
            started(alliance_raid(), 0),
            died("Tam Honks", Alliance::A, 95),
            died("Kan Himaa", Alliance::A, 96),
            died("Rem Aldi", Alliance::C, 300),
            ended(true, 900),
        ]);

        let summary = DutySummary::from_duty(&manager.duties()[0]);
        assert_eq!(
            summary.deaths_by_alliance,
            vec![(Alliance::A, 2), (Alliance::B, 0), (Alliance::C, 1)],
        );

        // Alliance lines always print; zero counts are highlighted instead
        // of suppressed.
        let lines = summary.lines(true);
        let b_line = lines.iter().find(|l| l.label == "B deaths: ").unwrap();
        assert_eq!(b_line.value, "0");
        assert!(b_line.highlight);
        let a_line = lines.iter().find(|l| l.label == "A deaths: ").unwrap();
        assert_eq!(a_line.value, "2");
        assert!(!a_line.highlight);
    }

    #[test]
    fn abandoned_summary_has_no_final_run() {
        let mut manager = DutyManager::new();
        manager.handle_signals(&[started(dungeon(), 0), ended(false, 90)]);

        let summary = DutySummary::from_duty(&manager.duties()[0]);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.final_run_seconds, None);

        // No run to report on, so the verbose set omits the final-run line.
        let labels: Vec<String> = summary
            .lines(false)
            .into_iter()
            .map(|l| l.label)
            .collect();
        assert_eq!(labels, vec!["Time in Duty: ", "Wipes: ", "Party Deaths: "]);
    }
}
