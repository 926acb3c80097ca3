use serde::{Deserialize, Serialize};

/// Hard cap on queued party orders. Simulation and intake stop at the cap.
pub const PARTY_QUEUE_CAP: usize = 20;

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a party order.
///
/// ```text
/// PENDING → MAKING → READY → SERVED (removed from queue)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Making,
    Ready,
    Served,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Making => "MAKING",
            Self::Ready => "READY",
            Self::Served => "SERVED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "MAKING" => Some(Self::Making),
            "READY" => Some(Self::Ready),
            "SERVED" => Some(Self::Served),
            _ => None,
        }
    }

    /// The next state in the lifecycle, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Making),
            Self::Making => Some(Self::Ready),
            Self::Ready => Some(Self::Served),
            Self::Served => None,
        }
    }

    /// SERVED orders leave the queue.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Served)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PartyOrder / PartySession
// ---------------------------------------------------------------------------

/// One drink order in the party queue. Newest orders sit at the front.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartyOrder {
    /// UUID primary key.
    pub id: String,

    pub cocktail_name: String,
    pub guest_name: String,

    #[serde(default)]
    pub notes: String,

    /// RFC 3339 timestamp.
    pub timestamp: String,

    #[serde(default)]
    pub status: OrderStatus,
}

fn default_session_name() -> String {
    "Saturday Night".into()
}

/// Party mode session: an on/off flag, a display name and the live queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartySession {
    #[serde(default)]
    pub active: bool,

    #[serde(default = "default_session_name")]
    pub session_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queue: Vec<PartyOrder>,
}

impl Default for PartySession {
    fn default() -> Self {
        Self { active: false, session_name: default_session_name(), queue: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lifecycle() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Making));
        assert_eq!(OrderStatus::Making.next(), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::Ready.next(), Some(OrderStatus::Served));
        assert_eq!(OrderStatus::Served.next(), None);
        assert!(OrderStatus::Served.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
    }

    #[test]
    fn status_serializes_screaming() {
        let json = serde_json::to_string(&OrderStatus::Making).unwrap();
        assert_eq!(json, "\"MAKING\"");
        assert_eq!(OrderStatus::from_str("READY"), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::from_str("ready"), None);
    }

    #[test]
    fn session_defaults() {
        let s: PartySession = serde_json::from_str("{}").unwrap();
        assert!(!s.active);
        assert_eq!(s.session_name, "Saturday Night");
        assert!(s.queue.is_empty());
    }
}
