use openbar_core::ServiceError;
use serde::Serialize;

use super::BarService;
use crate::model::{FREE_RECIPE_LIMIT, PremiumState};

/// One entry on the tools surface.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub free: bool,
}

/// The tools surface, in display order.
pub const TOOLS: &[Tool] = &[
    Tool { id: "training", label: "Training", description: "Learn & challenge", free: true },
    Tool { id: "creator", label: "Recipe Creator", description: "AI naming engine", free: false },
    Tool { id: "party", label: "Party Mode", description: "Guest orders via QR", free: false },
    Tool { id: "preplab", label: "Prep Lab", description: "Track house-made", free: false },
    Tool { id: "shift", label: "Shift Mode", description: "Quick service mode", free: false },
    Tool { id: "analytics", label: "Analytics", description: "Sales & insights", free: false },
    Tool { id: "shopping", label: "Shopping List", description: "Par levels & orders", free: true },
    Tool { id: "speedrail", label: "Speed Rail", description: "Organize your well", free: false },
    Tool { id: "menu", label: "Menu Builder", description: "Create digital menus", free: false },
];

/// Entitlement snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaywallStatus {
    pub premium: bool,
    pub random_uses_remaining: u32,
    pub free_recipe_limit: usize,
}

impl BarService {
    // ── Paywall ──

    pub fn paywall_status(&self) -> PaywallStatus {
        PaywallStatus {
            premium: self.state.premium.premium,
            random_uses_remaining: self.state.premium.random_uses_remaining,
            free_recipe_limit: FREE_RECIPE_LIMIT,
        }
    }

    /// Simulated purchase. Unlocks every premium tool.
    pub fn unlock_premium(&mut self) -> Result<PaywallStatus, ServiceError> {
        self.state.premium.premium = true;
        self.persist()?;
        Ok(self.paywall_status())
    }

    /// Restore a previous purchase. Fails when none was ever saved.
    pub fn restore_premium(&self) -> Result<PaywallStatus, ServiceError> {
        if !self.state.premium.premium {
            return Err(ServiceError::NotFound("no premium purchase found".into()));
        }
        Ok(self.paywall_status())
    }

    /// Drop back to the free tier and refill the random-pick allowance.
    pub fn reset_premium(&mut self) -> Result<PaywallStatus, ServiceError> {
        self.state.premium = PremiumState::default();
        self.persist()?;
        Ok(self.paywall_status())
    }
}
