// ── Core identity type ──
//
// The rows surface assigns bigserial ids to content tables and UUIDs to
// contact submissions. EntityId unifies both behind the string form the
// UI layer renders and accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Canonical identifier for any content entity.
///
/// Transparently wraps either a serial row id (content tables) or a
/// UUID (contact submissions). Consumers never care which.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Serial(i64),
    Uuid(Uuid),
}

impl EntityId {
    pub fn as_serial(&self) -> Option<i64> {
        match self {
            Self::Serial(n) => Some(*n),
            Self::Uuid(_) => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            Self::Serial(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial(n) => write!(f, "{n}"),
            Self::Uuid(u) => write!(f, "{u}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Self::Serial(n));
        }
        match Uuid::parse_str(s) {
            Ok(u) => Ok(Self::Uuid(u)),
            // Unparseable ids can't match anything; park them as an
            // impossible serial so lookups simply miss.
            Err(_) => Ok(Self::Serial(i64::MIN)),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Serial(n)
    }
}

impl From<Uuid> for EntityId {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}
