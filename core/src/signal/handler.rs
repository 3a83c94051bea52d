use super::signal::DutySignal;

/// Trait for systems that react to duty signals.
/// Implemented by the duty aggregator and the party tracker; delivery order is
/// whatever order handlers are passed to [`super::dispatch`].
pub trait SignalHandler {
    /// Handle a single signal.
    fn handle_signal(&mut self, signal: &DutySignal);

    /// Handle multiple signals (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[DutySignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
