//! Duration rendering for summaries and status displays.

use chrono::TimeDelta;

/// `m:ss`, minutes unbounded. Negative deltas clamp to zero.
pub fn minutes_seconds(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    format!("{}:{:02}", total / 60, total % 60)
}

/// `h:mm:ss` once an hour has elapsed, `m:ss` below that.
pub fn hours_minutes_seconds(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let hours = total / 3600;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, (total % 3600) / 60, total % 60)
    } else {
        minutes_seconds(delta)
    }
}
