//! Party mode commands: live session, guest order queue. Premium.

use std::path::Path;

use anyhow::Result;
use bar::model::PartyOrder;

use super::open_service;

/// Orders are addressed by any unique prefix of their id.
fn resolve_order_id(queue: &[PartyOrder], prefix: &str) -> Result<String> {
    let matches: Vec<&PartyOrder> = queue
        .iter()
        .filter(|o| o.id.starts_with(prefix))
        .collect();
    match matches.len() {
        0 => anyhow::bail!("No order matches \"{}\".", prefix),
        1 => Ok(matches[0].id.clone()),
        _ => anyhow::bail!("More than one order matches \"{}\".", prefix),
    }
}

fn short(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn start(session_name: Option<&str>, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let session = svc.party_start(session_name.map(str::to_string))?;
    println!("\"{}\" is live. Orders are open.", session.session_name);
    Ok(())
}

pub fn stop(client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let session = svc.party_stop()?;
    println!("\"{}\" is over. Queue cleared.", session.session_name);
    Ok(())
}

pub fn order(
    cocktail: &str,
    guest: Option<&str>,
    notes: Option<&str>,
    client_config_path: &Path,
) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let order = svc.place_order(cocktail, guest.unwrap_or(""), notes.unwrap_or(""))?;
    println!(
        "Order {}: {} for {}.",
        short(&order.id),
        order.cocktail_name,
        order.guest_name
    );
    Ok(())
}

pub fn simulate(client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let mut rng = rand::thread_rng();
    let order = svc.simulate_order(&mut rng)?;
    println!(
        "Order {}: {} for {}.",
        short(&order.id),
        order.cocktail_name,
        order.guest_name
    );
    Ok(())
}

pub fn advance(id: Option<&str>, client_config_path: &Path) -> Result<()> {
    let mut svc = open_service(client_config_path)?;
    let queue = &svc.party()?.queue;
    // served orders leave the queue, so the head is the oldest active one
    let full_id = match id {
        Some(prefix) => resolve_order_id(queue, prefix)?,
        None => match queue.first() {
            Some(o) => o.id.clone(),
            None => anyhow::bail!("The queue is empty."),
        },
    };
    let order = svc.advance_order(&full_id)?;
    println!(
        "{} for {} is now {}.",
        order.cocktail_name, order.guest_name, order.status
    );
    Ok(())
}

pub fn status(json_output: bool, client_config_path: &Path) -> Result<()> {
    let svc = open_service(client_config_path)?;
    let session = svc.party()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(session)?);
        return Ok(());
    }

    if !session.active {
        println!("Party mode is off.");
        return Ok(());
    }
    let stats = svc.party_stats()?;
    println!(
        "\"{}\" is live: {} pending, {} making, {} ready.",
        session.session_name, stats.pending, stats.making, stats.ready
    );
    if session.queue.is_empty() {
        println!("The queue is empty.");
        return Ok(());
    }
    println!("{:10} {:28} {:14} {:8}", "ID", "DRINK", "GUEST", "STATUS");
    for o in &session.queue {
        println!(
            "{:10} {:28} {:14} {:8}",
            short(&o.id),
            o.cocktail_name,
            o.guest_name,
            o.status.as_str()
        );
        if !o.notes.is_empty() {
            println!("{:10} note: {}", "", o.notes);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar::model::OrderStatus;

    fn order_with_id(id: &str) -> PartyOrder {
        PartyOrder {
            id: id.into(),
            cocktail_name: "Negroni".into(),
            guest_name: "Guest".into(),
            notes: String::new(),
            timestamp: "2025-06-01T21:14:00Z".into(),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn prefix_must_match_exactly_one_order() {
        let queue = vec![order_with_id("abc123"), order_with_id("abd456")];
        assert_eq!(resolve_order_id(&queue, "abc").unwrap(), "abc123");
        assert!(resolve_order_id(&queue, "ab").is_err());
        assert!(resolve_order_id(&queue, "zz").is_err());
    }
}
