use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrepKind {
    Syrup,
    Juice,
}

/// Built-in prep recipe template.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepTemplate {
    pub name: &'static str,
    pub kind: PrepKind,
    pub shelf_life_days: i64,
    pub batch_size_ml: f64,
}

/// House prep templates offered when starting a new batch.
pub const PREP_TEMPLATES: &[PrepTemplate] = &[
    PrepTemplate { name: "Simple Syrup (1:1)", kind: PrepKind::Syrup, shelf_life_days: 30, batch_size_ml: 1000.0 },
    PrepTemplate { name: "Rich Syrup (2:1)", kind: PrepKind::Syrup, shelf_life_days: 60, batch_size_ml: 1000.0 },
    PrepTemplate { name: "Honey Syrup", kind: PrepKind::Syrup, shelf_life_days: 30, batch_size_ml: 500.0 },
    PrepTemplate { name: "Fresh Lime Juice", kind: PrepKind::Juice, shelf_life_days: 1, batch_size_ml: 500.0 },
    PrepTemplate { name: "Fresh Lemon Juice", kind: PrepKind::Juice, shelf_life_days: 1, batch_size_ml: 500.0 },
    PrepTemplate { name: "Super Juice (Lime)", kind: PrepKind::Juice, shelf_life_days: 14, batch_size_ml: 1000.0 },
    PrepTemplate { name: "Grenadine", kind: PrepKind::Syrup, shelf_life_days: 30, batch_size_ml: 500.0 },
    PrepTemplate { name: "Orgeat", kind: PrepKind::Syrup, shelf_life_days: 14, batch_size_ml: 500.0 },
];

// ---------------------------------------------------------------------------
// HouseMade
// ---------------------------------------------------------------------------

/// Shelf-life bucket derived from the days remaining on a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Freshness {
    Expired,
    Expiring,
    Aging,
    Fresh,
}

impl Freshness {
    /// Bucket for a days-remaining value: <=0 expired, <=2 expiring,
    /// <=7 aging, otherwise fresh.
    pub fn from_days(days: i64) -> Self {
        if days <= 0 {
            Self::Expired
        } else if days <= 2 {
            Self::Expiring
        } else if days <= 7 {
            Self::Aging
        } else {
            Self::Fresh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "EXPIRED",
            Self::Expiring => "EXPIRING",
            Self::Aging => "AGING",
            Self::Fresh => "FRESH",
        }
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// House-made batch (syrup, juice) tracked in the prep lab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HouseMade {
    /// UUID primary key.
    pub id: String,

    pub name: String,
    pub kind: PrepKind,

    pub batch_size_ml: f64,
    pub shelf_life_days: i64,

    #[serde(default)]
    pub notes: String,

    /// RFC 3339 timestamp the batch was made.
    pub created_at: String,

    #[serde(default)]
    pub current_stock_ml: f64,

    /// Sequence number among batches of the same name, starting at 1.
    #[serde(default)]
    pub batch_number: u32,
}

impl HouseMade {
    /// Whole days until expiry, rounded up. An unparseable `created_at`
    /// counts as expired.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        let created = match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(t) => t.with_timezone(&Utc),
            Err(_) => return 0,
        };
        let expiry = created + chrono::Duration::days(self.shelf_life_days);
        let ms = (expiry - now).num_milliseconds() as f64;
        (ms / 86_400_000.0).ceil() as i64
    }

    pub fn freshness(&self, now: DateTime<Utc>) -> Freshness {
        Freshness::from_days(self.days_remaining(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(created_at: &str, shelf_life_days: i64) -> HouseMade {
        HouseMade {
            id: "b1".into(),
            name: "Simple Syrup (1:1)".into(),
            kind: PrepKind::Syrup,
            batch_size_ml: 1000.0,
            shelf_life_days,
            notes: String::new(),
            created_at: created_at.into(),
            current_stock_ml: 1000.0,
            batch_number: 1,
        }
    }

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    #[test]
    fn templates_cover_the_house_basics() {
        assert_eq!(PREP_TEMPLATES.len(), 8);
        let lime = PREP_TEMPLATES.iter().find(|t| t.name == "Fresh Lime Juice").unwrap();
        assert_eq!(lime.kind, PrepKind::Juice);
        assert_eq!(lime.shelf_life_days, 1);
        assert_eq!(lime.batch_size_ml, 500.0);
    }

    #[test]
    fn freshness_buckets() {
        assert_eq!(Freshness::from_days(-3), Freshness::Expired);
        assert_eq!(Freshness::from_days(0), Freshness::Expired);
        assert_eq!(Freshness::from_days(1), Freshness::Expiring);
        assert_eq!(Freshness::from_days(2), Freshness::Expiring);
        assert_eq!(Freshness::from_days(3), Freshness::Aging);
        assert_eq!(Freshness::from_days(7), Freshness::Aging);
        assert_eq!(Freshness::from_days(8), Freshness::Fresh);
    }

    #[test]
    fn days_remaining_rounds_up() {
        let b = batch("2025-06-01T12:00:00Z", 30);
        assert_eq!(b.days_remaining(at("2025-06-06T12:00:00Z")), 25);
        // a second into the day still counts the full day
        assert_eq!(b.days_remaining(at("2025-06-06T12:00:01Z")), 25);
        assert_eq!(b.freshness(at("2025-06-30T12:00:00Z")), Freshness::Expiring);
        assert_eq!(b.freshness(at("2025-07-10T12:00:00Z")), Freshness::Expired);
    }

    #[test]
    fn bad_timestamp_counts_as_expired() {
        let b = batch("yesterday-ish", 30);
        assert_eq!(b.days_remaining(at("2025-06-06T12:00:00Z")), 0);
        assert_eq!(b.freshness(at("2025-06-06T12:00:00Z")), Freshness::Expired);
    }
}
