use openbar_core::{ServiceError, new_id};

use super::BarService;
use crate::model::BarTimer;

impl BarService {
    // ── Timers ──

    pub fn timers(&self) -> &[BarTimer] {
        &self.state.timers
    }

    /// Add a countdown and start it immediately.
    pub fn add_timer(&mut self, name: &str, minutes: u64) -> Result<BarTimer, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("timer name is empty".into()));
        }
        if minutes == 0 {
            return Err(ServiceError::Validation(
                "timer must run for at least a minute".into(),
            ));
        }
        let timer = BarTimer {
            id: new_id(),
            name: name.to_string(),
            total_secs: minutes * 60,
            remaining_secs: minutes * 60,
            running: true,
        };
        self.state.timers.push(timer.clone());
        self.persist()?;
        Ok(timer)
    }

    /// Pause a running timer or resume a paused one.
    pub fn toggle_timer(&mut self, id: &str) -> Result<BarTimer, ServiceError> {
        let timer = self.timer_mut(id)?;
        timer.running = !timer.running;
        let updated = timer.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn reset_timer(&mut self, id: &str) -> Result<BarTimer, ServiceError> {
        let timer = self.timer_mut(id)?;
        timer.reset();
        let updated = timer.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn remove_timer(&mut self, id: &str) -> Result<(), ServiceError> {
        if !self.state.timers.iter().any(|t| t.id == id) {
            return Err(ServiceError::NotFound(format!("timer {id} not found")));
        }
        self.state.timers.retain(|t| t.id != id);
        self.persist()?;
        Ok(())
    }

    /// Advance every running timer by one second.
    pub fn tick_timers(&mut self) -> Result<&[BarTimer], ServiceError> {
        for t in &mut self.state.timers {
            t.tick();
        }
        self.persist()?;
        Ok(&self.state.timers)
    }

    fn timer_mut(&mut self, id: &str) -> Result<&mut BarTimer, ServiceError> {
        self.state
            .timers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("timer {id} not found")))
    }
}
