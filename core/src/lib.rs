//! Duty session tracking core.
//!
//! Consumes duty lifecycle notifications and a per-frame roster poll from the
//! host, reconciles them into a Duty → Run → Death hierarchy, and keeps an
//! in-memory session history for display. Everything is single-threaded and
//! synchronous; signals carry their own timestamps.

pub mod alliance;
pub mod context;
pub mod duty;
pub mod format;
pub mod game_data;
pub mod lifecycle;
pub mod party;
pub mod runtime;
pub mod scenario;
pub mod session;
pub mod signal;

// Re-exports for convenience
pub use alliance::{Alliance, AllianceSize, alliance_for_slot, deduce_party_alliance};
pub use context::{AppConfig, ConfigError};
pub use duty::summary::SummaryLine;
pub use duty::{Death, Duty, DutyManager, DutySummary, Run};
pub use game_data::{Territory, TerritoryUse, known_territories, lookup_territory};
pub use lifecycle::DutyLifecycle;
pub use party::{PartyTracker, RosterProvider, SlotOccupant};
pub use runtime::TrackerRuntime;
pub use scenario::{Scenario, ScenarioError};
pub use session::SessionHistory;
pub use signal::{DutySignal, SignalHandler};
