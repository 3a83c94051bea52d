pub mod dispatch;
pub mod handler;
pub mod signal;

pub use dispatch::dispatch;
pub use handler::SignalHandler;
pub use signal::DutySignal;
