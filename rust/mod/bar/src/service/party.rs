use openbar_core::{ServiceError, new_id, now_rfc3339};
use rand::Rng;
use serde::Serialize;

use super::BarService;
use crate::model::{OrderStatus, PARTY_QUEUE_CAP, PartyOrder, PartySession};

/// Guest labels handed out by the demo order simulator.
const GUEST_NAMES: &[&str] = &[
    "Table 1",
    "Table 2",
    "VIP Booth",
    "Bar Seat 3",
    "Patio 4",
    "Guest",
];

#[derive(Debug, Serialize)]
pub struct PartyStats {
    pub pending: usize,
    pub making: usize,
    pub ready: usize,
}

impl BarService {
    // ── Party mode ──

    pub fn party(&self) -> Result<&PartySession, ServiceError> {
        self.require_premium("Party Mode")?;
        Ok(&self.state.party)
    }

    /// Go live. An omitted name keeps whatever the session was called.
    pub fn party_start(
        &mut self,
        session_name: Option<String>,
    ) -> Result<PartySession, ServiceError> {
        self.require_premium("Party Mode")?;
        if self.state.party.active {
            return Err(ServiceError::Conflict("party mode is already live".into()));
        }
        self.state.party.active = true;
        if let Some(name) = session_name {
            self.state.party.session_name = name;
        }
        self.persist()?;
        Ok(self.state.party.clone())
    }

    /// End the session. Unserved orders are dropped with it.
    pub fn party_stop(&mut self) -> Result<PartySession, ServiceError> {
        self.require_premium("Party Mode")?;
        if !self.state.party.active {
            return Err(ServiceError::Conflict("party mode is not live".into()));
        }
        self.state.party.active = false;
        self.state.party.queue.clear();
        self.persist()?;
        Ok(self.state.party.clone())
    }

    /// Take a guest order by hand. The drink must be makeable right now.
    /// An empty guest name falls back to the generic label.
    pub fn place_order(
        &mut self,
        cocktail: &str,
        guest: &str,
        notes: &str,
    ) -> Result<PartyOrder, ServiceError> {
        self.check_intake()?;
        let recipe = self
            .state
            .recipe(cocktail)
            .ok_or_else(|| ServiceError::NotFound(format!("recipe {cocktail} not found")))?;
        if !recipe.can_make {
            return Err(ServiceError::Validation(format!(
                "{cocktail} is missing ingredients"
            )));
        }

        let guest = guest.trim();
        let order = PartyOrder {
            id: new_id(),
            cocktail_name: recipe.name.clone(),
            guest_name: if guest.is_empty() { "Guest".to_string() } else { guest.to_string() },
            notes: notes.trim().to_string(),
            timestamp: now_rfc3339(),
            status: OrderStatus::Pending,
        };
        self.state.party.queue.insert(0, order.clone());
        self.persist()?;
        Ok(order)
    }

    /// Queue a demo order: a random makeable drink for a random guest.
    pub fn simulate_order<R: Rng>(&mut self, rng: &mut R) -> Result<PartyOrder, ServiceError> {
        self.check_intake()?;
        let available: Vec<&str> = self
            .state
            .recipes
            .iter()
            .filter(|c| c.can_make)
            .map(|c| c.name.as_str())
            .collect();
        if available.is_empty() {
            return Err(ServiceError::Validation(
                "no drinks available to order".into(),
            ));
        }

        let order = PartyOrder {
            id: new_id(),
            cocktail_name: available[rng.gen_range(0..available.len())].to_string(),
            guest_name: GUEST_NAMES[rng.gen_range(0..GUEST_NAMES.len())].to_string(),
            notes: if rng.gen_range(0.0..1.0) > 0.7 {
                "Extra lime please".to_string()
            } else {
                String::new()
            },
            timestamp: now_rfc3339(),
            status: OrderStatus::Pending,
        };
        self.state.party.queue.insert(0, order.clone());
        self.persist()?;
        Ok(order)
    }

    /// Move an order one step along its lifecycle. Serving it removes it
    /// from the queue; the returned order carries the new status.
    pub fn advance_order(&mut self, id: &str) -> Result<PartyOrder, ServiceError> {
        self.require_premium("Party Mode")?;
        let idx = self
            .state
            .party
            .queue
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("order {id} not found")))?;

        let next = self.state.party.queue[idx]
            .status
            .next()
            .ok_or_else(|| ServiceError::Validation("order is already served".into()))?;

        self.state.party.queue[idx].status = next;
        let order = if next.is_terminal() {
            self.state.party.queue.remove(idx)
        } else {
            self.state.party.queue[idx].clone()
        };
        self.persist()?;
        Ok(order)
    }

    pub fn party_stats(&self) -> Result<PartyStats, ServiceError> {
        self.require_premium("Party Mode")?;
        let count = |s: OrderStatus| {
            self.state
                .party
                .queue
                .iter()
                .filter(|o| o.status == s)
                .count()
        };
        Ok(PartyStats {
            pending: count(OrderStatus::Pending),
            making: count(OrderStatus::Making),
            ready: count(OrderStatus::Ready),
        })
    }

    /// Shared intake checks: premium, a live session, room in the queue.
    fn check_intake(&self) -> Result<(), ServiceError> {
        self.require_premium("Party Mode")?;
        if !self.state.party.active {
            return Err(ServiceError::Validation("party mode is not live".into()));
        }
        if self.state.party.queue.len() >= PARTY_QUEUE_CAP {
            return Err(ServiceError::Validation(format!(
                "the order queue holds at most {PARTY_QUEUE_CAP} orders"
            )));
        }
        Ok(())
    }
}
