//! Party and alliance presence tracking.
//!
//! Polls the roster once per frame, mirrors it into slot caches, and emits a
//! [`DutySignal::PlayerDied`] whenever a cached member's health transitions to
//! zero. Alliance attribution needs the label strings the host publishes
//! asynchronously after duty start, so the tracker waits in a distinct state
//! until they appear before it starts scanning.

pub mod roster;

pub use roster::{ALLIANCE_LABEL_SLOTS, ALLIANCE_SLOTS, PARTY_SLOTS, RosterProvider, SlotOccupant};

use chrono::NaiveDateTime;

use crate::alliance::{self, Alliance, AllianceSize};
use crate::signal::{DutySignal, SignalHandler};

/// Alliance scan progress for the current duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AllianceState {
    #[default]
    NoGroup,
    WaitingForData,
    Running,
}

/// Party scan progress for the current duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PartyState {
    #[default]
    NoGroup,
    WaitingForAlliance,
    Running,
}

#[derive(Debug, Clone)]
struct CachedMember {
    name: String,
    hp: u32,
    alliance: Alliance,
}

/// Per-tick reconciliation of the live roster against cached occupants.
/// Ephemeral: everything resets when the duty ends.
#[derive(Debug)]
pub struct PartyTracker {
    alliance_state: AllianceState,
    party_state: PartyState,

    party_cache: [Option<CachedMember>; PARTY_SLOTS],
    alliance_cache: [Option<CachedMember>; ALLIANCE_SLOTS],

    alliance_size: AllianceSize,
    /// Letters of the five *other* parties, in label order.
    alliances: [Alliance; ALLIANCE_LABEL_SLOTS],
    /// The local party's letter, deduced by elimination.
    party_alliance: Alliance,
}

impl Default for PartyTracker {
    fn default() -> Self {
        Self {
            alliance_state: AllianceState::NoGroup,
            party_state: PartyState::NoGroup,
            party_cache: std::array::from_fn(|_| None),
            alliance_cache: std::array::from_fn(|_| None),
            alliance_size: AllianceSize::None,
            alliances: [Alliance::None; ALLIANCE_LABEL_SLOTS],
            party_alliance: Alliance::None,
        }
    }
}

impl PartyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The local party's deduced alliance letter, `None` until resolved.
    pub fn party_alliance(&self) -> Alliance {
        self.party_alliance
    }

    /// Scan the roster once. Returns the deaths observed this tick, stamped
    /// with the given timestamp.
    pub fn tick(&mut self, roster: &dyn RosterProvider, timestamp: NaiveDateTime) -> Vec<DutySignal> {
        let mut deaths = Vec::new();

        match self.alliance_state {
            AllianceState::NoGroup => {}
            AllianceState::WaitingForData => {
                // The label array stays empty until the game is ready to draw
                // the alliance list; nothing can be attributed before then.
                if is_label_data_populated(roster) {
                    self.set_alliances(roster);
                    self.alliance_state = AllianceState::Running;
                    self.party_state = PartyState::Running;
                    tracing::debug!("alliance data detected, tracker running");
                }
            }
            AllianceState::Running => {
                let size = self.alliance_size;
                let alliances = self.alliances;
                reconcile_slots(
                    &mut self.alliance_cache,
                    |index| roster.alliance_member(index),
                    |index| alliance::alliance_for_slot(size, index, &alliances),
                    timestamp,
                    &mut deaths,
                );
            }
        }

        if self.party_state == PartyState::Running {
            let party_alliance = self.party_alliance;
            reconcile_slots(
                &mut self.party_cache,
                |index| roster.party_member(index),
                |_| party_alliance,
                timestamp,
                &mut deaths,
            );
        }

        deaths
    }

    fn set_alliances(&mut self, roster: &dyn RosterProvider) {
        for (index, slot) in self.alliances.iter_mut().enumerate() {
            let label = roster.alliance_label(index).unwrap_or_default();
            *slot = Alliance::from_label(&label);
        }

        self.alliance_size = roster.alliance_size();
        self.party_alliance = alliance::deduce_party_alliance(self.alliance_size, &self.alliances);

        tracing::debug!(
            alliance_size = ?self.alliance_size,
            party_alliance = %self.party_alliance,
            others = ?self.alliances,
            "alliance labels resolved"
        );
    }

    fn reset(&mut self) {
        self.alliance_state = AllianceState::NoGroup;
        self.party_state = PartyState::NoGroup;
        self.party_cache.fill_with(|| None);
        self.alliance_cache.fill_with(|| None);
        self.alliance_size = AllianceSize::None;
        self.alliances = [Alliance::None; ALLIANCE_LABEL_SLOTS];
        self.party_alliance = Alliance::None;
    }
}

impl SignalHandler for PartyTracker {
    fn handle_signal(&mut self, signal: &DutySignal) {
        match signal {
            DutySignal::DutyStarted { territory, .. } => {
                if territory.intended_use.has_alliance() {
                    self.alliance_state = AllianceState::WaitingForData;
                    self.party_state = PartyState::WaitingForAlliance;
                } else {
                    self.party_state = PartyState::Running;
                }
            }
            DutySignal::DutyEnded { .. } => self.reset(),
            _ => {}
        }
    }
}

fn is_label_data_populated(roster: &dyn RosterProvider) -> bool {
    roster
        .alliance_label(0)
        .is_some_and(|label| !label.trim().is_empty())
}

/// Reconcile one slot cache against the live roster. Shared between the party
/// and alliance caches; the scan is identical, only the accessors differ.
fn reconcile_slots(
    cache: &mut [Option<CachedMember>],
    live_member: impl Fn(usize) -> Option<SlotOccupant>,
    alliance_at: impl Fn(usize) -> Alliance,
    timestamp: NaiveDateTime,
    deaths: &mut Vec<DutySignal>,
) {
    for (index, slot) in cache.iter_mut().enumerate() {
        // Vacancy must be decided before any health comparison: an emptied
        // slot reads as zero health and would record a departure as a death.
        match (slot.take(), live_member(index)) {
            (Some(cached), None) => {
                tracing::debug!(index, name = %cached.name, "player left");
            }
            (Some(mut cached), Some(live)) => {
                if cached.hp != live.current_hp {
                    cached.hp = live.current_hp;
                    if cached.hp == 0 {
                        tracing::debug!(index, name = %cached.name, alliance = %cached.alliance, "player died");
                        deaths.push(DutySignal::PlayerDied {
                            player_name: cached.name.clone(),
                            alliance: cached.alliance,
                            timestamp,
                        });
                    }
                }
                *slot = Some(cached);
            }
            (None, Some(live)) => {
                tracing::debug!(index, name = %live.name, "detected new player");
                *slot = Some(CachedMember {
                    name: live.name,
                    hp: live.current_hp,
                    alliance: alliance_at(index),
                });
            }
            (None, None) => {}
        }
    }
}
