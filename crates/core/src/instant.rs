//! Write-time instants with an explicit "unknown" sentinel.
//!
//! Historical records imported from earlier deployments may lack a timestamp.
//! Those must still sort (as the earliest possible instant) and display (as
//! "N/A") without being confused with a record genuinely written at epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instant a record was written, or `Unknown` when the field is absent.
///
/// Ordering: `Unknown` sorts strictly before every `Known` instant, epoch
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<DateTime<Utc>>", into = "Option<DateTime<Utc>>")]
pub enum RecordInstant {
    Unknown,
    Known(DateTime<Utc>),
}

impl RecordInstant {
    pub fn now() -> Self {
        Self::Known(Utc::now())
    }

    pub fn known(at: DateTime<Utc>) -> Self {
        Self::Known(at)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<DateTime<Utc>>> for RecordInstant {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(at) => Self::Known(at),
            None => Self::Unknown,
        }
    }
}

impl From<RecordInstant> for Option<DateTime<Utc>> {
    fn from(value: RecordInstant) -> Self {
        match value {
            RecordInstant::Known(at) => Some(at),
            RecordInstant::Unknown => None,
        }
    }
}

impl PartialOrd for RecordInstant {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordInstant {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use RecordInstant::{Known, Unknown};
        match (self, other) {
            (Unknown, Unknown) => core::cmp::Ordering::Equal,
            (Unknown, Known(_)) => core::cmp::Ordering::Less,
            (Known(_), Unknown) => core::cmp::Ordering::Greater,
            (Known(a), Known(b)) => a.cmp(b),
        }
    }
}

impl core::fmt::Display for RecordInstant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unknown => write!(f, "N/A"),
            Self::Known(at) => write!(f, "{}", at.to_rfc3339()),
        }
    }
}
