use chrono::{DateTime, Utc};
use openbar_core::{ServiceError, new_id, now_rfc3339};
use serde::Serialize;

use super::BarService;
use crate::model::{Freshness, HouseMade, PREP_TEMPLATES, PrepKind, PrepTemplate};

/// Days-remaining threshold for the expiring-soon alert.
pub(crate) const EXPIRY_WARN_DAYS: i64 = 3;

/// A batch together with its derived shelf-life view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchView {
    pub batch: HouseMade,
    pub days_remaining: i64,
    pub freshness: Freshness,
}

impl BatchView {
    fn new(batch: HouseMade, now: DateTime<Utc>) -> Self {
        let days_remaining = batch.days_remaining(now);
        Self { batch, days_remaining, freshness: Freshness::from_days(days_remaining) }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringBatch {
    pub name: String,
    pub days_remaining: i64,
}

/// Batches needing attention: already expired, or expiring within
/// [`EXPIRY_WARN_DAYS`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlerts {
    pub expired: Vec<String>,
    pub expiring: Vec<ExpiringBatch>,
}

impl BarService {
    // ── Prep lab ──

    /// Quick-select templates for the usual house staples.
    pub fn prep_templates(&self) -> Result<&'static [PrepTemplate], ServiceError> {
        self.require_premium("Prep Lab")?;
        Ok(PREP_TEMPLATES)
    }

    /// Batches newest first, each with its freshness worked out.
    pub fn list_batches(&self) -> Result<Vec<BatchView>, ServiceError> {
        self.require_premium("Prep Lab")?;
        let now = Utc::now();
        Ok(self
            .state
            .house_made
            .iter()
            .map(|b| BatchView::new(b.clone(), now))
            .collect())
    }

    /// Start a new batch at full stock. The batch number counts batches of
    /// the same name, so the third jar of orgeat reads "Batch #3".
    pub fn add_batch(
        &mut self,
        name: &str,
        kind: PrepKind,
        batch_size_ml: f64,
        shelf_life_days: i64,
        notes: &str,
    ) -> Result<BatchView, ServiceError> {
        self.require_premium("Prep Lab")?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation("batch name is empty".into()));
        }
        if batch_size_ml <= 0.0 {
            return Err(ServiceError::Validation("batch size must be positive".into()));
        }
        if shelf_life_days <= 0 {
            return Err(ServiceError::Validation(
                "shelf life must be at least a day".into(),
            ));
        }

        let batch_number =
            self.state.house_made.iter().filter(|h| h.name == name).count() as u32 + 1;
        let batch = HouseMade {
            id: new_id(),
            name: name.to_string(),
            kind,
            batch_size_ml,
            shelf_life_days,
            notes: notes.trim().to_string(),
            created_at: now_rfc3339(),
            current_stock_ml: batch_size_ml,
            batch_number,
        };
        self.state.house_made.insert(0, batch.clone());
        self.persist()?;
        Ok(BatchView::new(batch, Utc::now()))
    }

    /// Record a pour from a batch (or a top-up with a positive delta).
    /// Stock floors at zero.
    pub fn adjust_batch_stock(
        &mut self,
        id: &str,
        delta_ml: f64,
    ) -> Result<HouseMade, ServiceError> {
        self.require_premium("Prep Lab")?;
        let batch = self
            .state
            .house_made
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("batch {id} not found")))?;
        batch.current_stock_ml = (batch.current_stock_ml + delta_ml).max(0.0);
        let updated = batch.clone();
        self.persist()?;
        Ok(updated)
    }

    pub fn remove_batch(&mut self, id: &str) -> Result<(), ServiceError> {
        self.require_premium("Prep Lab")?;
        if !self.state.house_made.iter().any(|b| b.id == id) {
            return Err(ServiceError::NotFound(format!("batch {id} not found")));
        }
        self.state.house_made.retain(|b| b.id != id);
        self.persist()?;
        Ok(())
    }

    pub fn expiry_alerts(&self) -> Result<ExpiryAlerts, ServiceError> {
        self.require_premium("Prep Lab")?;
        let now = Utc::now();
        let mut expired = Vec::new();
        let mut expiring = Vec::new();
        for b in &self.state.house_made {
            let days = b.days_remaining(now);
            if days <= 0 {
                expired.push(b.name.clone());
            } else if days <= EXPIRY_WARN_DAYS {
                expiring.push(ExpiringBatch { name: b.name.clone(), days_remaining: days });
            }
        }
        Ok(ExpiryAlerts { expired, expiring })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil::{premium_service, service};

    #[test]
    fn prep_lab_is_premium_only() {
        let (_dir, mut svc) = service();
        assert!(matches!(
            svc.list_batches(),
            Err(ServiceError::PermissionDenied(_))
        ));
        assert!(matches!(
            svc.add_batch("Orgeat", PrepKind::Syrup, 500.0, 14, ""),
            Err(ServiceError::PermissionDenied(_))
        ));
    }

    #[test]
    fn batch_numbers_count_per_name() {
        let (_dir, mut svc) = premium_service();
        let first = svc.add_batch("Orgeat", PrepKind::Syrup, 500.0, 14, "").unwrap();
        let second = svc.add_batch("Orgeat", PrepKind::Syrup, 500.0, 14, "").unwrap();
        let lime = svc
            .add_batch("Fresh Lime Juice", PrepKind::Juice, 500.0, 1, "double strained")
            .unwrap();
        assert_eq!(first.batch.batch_number, 1);
        assert_eq!(second.batch.batch_number, 2);
        assert_eq!(lime.batch.batch_number, 1);
        // newest first
        let names: Vec<String> =
            svc.list_batches().unwrap().into_iter().map(|b| b.batch.name).collect();
        assert_eq!(names[0], "Fresh Lime Juice");
    }

    #[test]
    fn add_rejects_bad_input() {
        let (_dir, mut svc) = premium_service();
        assert!(matches!(
            svc.add_batch("  ", PrepKind::Syrup, 500.0, 14, ""),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.add_batch("Orgeat", PrepKind::Syrup, 0.0, 14, ""),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            svc.add_batch("Orgeat", PrepKind::Syrup, 500.0, 0, ""),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn pours_floor_at_zero() {
        let (_dir, mut svc) = premium_service();
        let b = svc.add_batch("Honey Syrup", PrepKind::Syrup, 100.0, 30, "").unwrap();
        let after = svc.adjust_batch_stock(&b.batch.id, -30.0).unwrap();
        assert_eq!(after.current_stock_ml, 70.0);
        let after = svc.adjust_batch_stock(&b.batch.id, -500.0).unwrap();
        assert_eq!(after.current_stock_ml, 0.0);

        assert!(matches!(
            svc.adjust_batch_stock("nope", -30.0),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn alerts_bucket_expired_and_expiring() {
        let (_dir, mut svc) = premium_service();
        svc.add_batch("Rich Syrup (2:1)", PrepKind::Syrup, 1000.0, 60, "").unwrap();
        svc.add_batch("Fresh Lime Juice", PrepKind::Juice, 500.0, 1, "").unwrap();
        // force one batch past its shelf life
        svc.state.house_made.push(HouseMade {
            id: "old".into(),
            name: "Old Grenadine".into(),
            kind: PrepKind::Syrup,
            batch_size_ml: 500.0,
            shelf_life_days: 30,
            notes: String::new(),
            created_at: "2020-01-01T00:00:00Z".into(),
            current_stock_ml: 200.0,
            batch_number: 1,
        });

        let alerts = svc.expiry_alerts().unwrap();
        assert_eq!(alerts.expired, vec!["Old Grenadine".to_string()]);
        assert_eq!(alerts.expiring.len(), 1);
        assert_eq!(alerts.expiring[0].name, "Fresh Lime Juice");
        assert_eq!(alerts.expiring[0].days_remaining, 1);
    }

    #[test]
    fn remove_deletes_by_id() {
        let (_dir, mut svc) = premium_service();
        let b = svc.add_batch("Orgeat", PrepKind::Syrup, 500.0, 14, "").unwrap();
        svc.remove_batch(&b.batch.id).unwrap();
        assert!(svc.list_batches().unwrap().is_empty());
        assert!(matches!(
            svc.remove_batch(&b.batch.id),
            Err(ServiceError::NotFound(_))
        ));
    }
}
