//! Bar timer commands. `watch` drives the one-second tick loop.

use std::path::Path;

use anyhow::Result;
use bar::model::BarTimer;

use super::open_service;

/// Timers are addressed by any unique prefix of their id.
fn resolve_timer_id(timers: &[BarTimer], prefix: &str) -> Result<String> {
    let matches: Vec<&BarTimer> = timers
        .iter()
        .filter(|t| t.id.starts_with(prefix))
        .collect();
    match matches.len() {
        0 => anyhow::bail!("No timer matches \"{}\".", prefix),
        1 => Ok(matches[0].id.clone()),
        _ => anyhow::bail!("More than one timer matches \"{}\".", prefix),
    }
}

fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn add(name: &str, minutes: u64, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let timer = svc.add_timer(name, minutes)?;
    println!(
        "Timer \"{}\" running: {} on the clock.",
        timer.name,
        timer.display_remaining()
    );
    Ok(())
}

pub fn list(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let timers = svc.timers();

    if json_output {
        println!("{}", serde_json::to_string_pretty(timers)?);
        return Ok(());
    }
    if timers.is_empty() {
        println!("No timers. Run: openbar timer add <name> <minutes>");
        return Ok(());
    }
    println!("{:10} {:24} {:>8}  {:7}", "ID", "NAME", "LEFT", "STATE");
    for t in timers {
        let state = if t.remaining_secs == 0 {
            "done"
        } else if t.running {
            "running"
        } else {
            "paused"
        };
        println!(
            "{:10} {:24} {:>8}  {:7}",
            short(&t.id),
            t.name,
            t.display_remaining(),
            state
        );
    }
    Ok(())
}

pub fn toggle(id: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let full_id = resolve_timer_id(svc.timers(), id)?;
    let timer = svc.toggle_timer(&full_id)?;
    let state = if timer.running { "running" } else { "paused" };
    println!("Timer \"{}\" {} at {}.", timer.name, state, timer.display_remaining());
    Ok(())
}

pub fn reset(id: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let full_id = resolve_timer_id(svc.timers(), id)?;
    let timer = svc.reset_timer(&full_id)?;
    println!(
        "Timer \"{}\" back to {}, paused.",
        timer.name,
        timer.display_remaining()
    );
    Ok(())
}

pub fn delete(id: &str, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let full_id = resolve_timer_id(svc.timers(), id)?;
    svc.remove_timer(&full_id)?;
    println!("Timer deleted.");
    Ok(())
}

/// Tick once a second until every running timer has finished, printing the
/// countdown and announcing each timer once as it hits zero.
pub fn watch(client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    if svc.timers().iter().all(|t| !t.running || t.remaining_secs == 0) {
        println!("Nothing is counting down.");
        return Ok(());
    }

    let mut announced: Vec<String> = Vec::new();
    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
        let timers = svc.tick_timers()?;

        let mut lines = Vec::new();
        let mut still_ticking = false;
        for t in timers {
            if t.running && t.remaining_secs == 0 && !announced.contains(&t.id) {
                announced.push(t.id.clone());
                println!("{} is done.", t.name);
            }
            if t.running && t.remaining_secs > 0 {
                still_ticking = true;
                lines.push(format!("{} {}", t.name, t.display_remaining()));
            }
        }
        if !lines.is_empty() {
            println!("{}", lines.join("  |  "));
        }
        if !still_ticking {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer_with_id(id: &str) -> BarTimer {
        BarTimer {
            id: id.into(),
            name: "Chill coupes".into(),
            total_secs: 300,
            remaining_secs: 300,
            running: true,
        }
    }

    #[test]
    fn prefix_must_match_exactly_one_timer() {
        let timers = vec![timer_with_id("7f3a9b"), timer_with_id("7f41cc")];
        assert_eq!(resolve_timer_id(&timers, "7f3").unwrap(), "7f3a9b");
        assert!(resolve_timer_id(&timers, "7f").is_err());
        assert!(resolve_timer_id(&timers, "9").is_err());
    }
}
