use std::error::Error;
use std::path::Path;

use chrono::Local;
use dutywatch_core::{AppConfig, Scenario, TrackerRuntime, format};

/// Render an error with its source chain, one cause per line.
fn render_error(error: &dyn Error) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    out
}

pub fn replay(path: &Path) -> Result<(), String> {
    let config = AppConfig::load();
    tracing::debug!(path = %path.display(), "loading scenario");
    let scenario = Scenario::load(path).map_err(|e| render_error(&e))?;

    if let Some(name) = &scenario.name {
        println!("Replaying: {name}");
        println!();
    }

    let mut runtime = TrackerRuntime::new();
    let base = Local::now().naive_local();
    let summaries = scenario.replay(&mut runtime, base);

    let prefix = if config.include_plugin_label {
        "[dutywatch] "
    } else {
        ""
    };
    for summary in &summaries {
        println!("{}", summary.place_name);
        for line in summary.lines(config.suppress_empty_values) {
            println!("  {prefix}{}{}", line.label, line.value);
        }
        println!();
    }

    print_session(&runtime);
    Ok(())
}

fn print_session(runtime: &TrackerRuntime) {
    if !runtime.any_duties_started() {
        println!("No duties to display.");
        return;
    }

    println!("Session history:");
    for (idx, duty) in runtime.duties().iter().enumerate() {
        println!(
            "  {}. {}  time {}  runs {}  wipes {}  deaths {} (avg {}/wipe)",
            idx + 1,
            duty.territory.place_name,
            format::hours_minutes_seconds(duty.duration()),
            duty.runs().len(),
            duty.total_wipes(),
            duty.total_deaths(),
            duty.average_deaths_per_wipe(),
        );

        for (run_idx, run) in duty.runs().iter().enumerate() {
            println!(
                "     run {}  duration {}",
                run_idx + 1,
                format::minutes_seconds(run.duration()),
            );
            for death in run.deaths() {
                println!(
                    "       death  {}  [{}]  at {}",
                    death.player_name,
                    death.alliance,
                    death.time_of_death.format("%H:%M:%S"),
                );
            }
        }
    }
}

pub fn territories() {
    println!("{:>5}  {:<34} {:<22} {:<7} alliance", "id", "place", "use", "track");
    for territory in dutywatch_core::known_territories() {
        let size = territory.intended_use.alliance_size();
        println!(
            "{:>5}  {:<34} {:<22} {:<7} {:?}",
            territory.id,
            territory.place_name,
            format!("{:?}", territory.intended_use),
            territory.intended_use.should_track(),
            size,
        );
    }
}

pub fn config(set_label: Option<bool>, set_suppress: Option<bool>) -> Result<(), String> {
    let mut config = AppConfig::load();

    let changed = set_label.is_some() || set_suppress.is_some();
    if let Some(label) = set_label {
        config.include_plugin_label = label;
    }
    if let Some(suppress) = set_suppress {
        config.suppress_empty_values = suppress;
    }
    if changed {
        config.save().map_err(|e| render_error(&e))?;
    }

    println!("include_plugin_label  = {}", config.include_plugin_label);
    println!("suppress_empty_values = {}", config.suppress_empty_values);
    Ok(())
}
