use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Rule that produced an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Built-in super-role override.
    Admin,
    /// Non-expired per-user override.
    Direct,
    /// Grant held by one of the user's roles.
    Role,
    /// No rule applied; default deny.
    None,
}

impl DecisionSource {
    /// Returns a stable transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Direct => "direct",
            Self::Role => "role",
            Self::None => "none",
        }
    }
}

impl Display for DecisionSource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Outcome of one permission check with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decision {
    /// Whether access is allowed.
    pub allowed: bool,
    /// Rule that produced the outcome.
    pub source: DecisionSource,
}

impl Decision {
    /// Allowed by the super-role override.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            allowed: true,
            source: DecisionSource::Admin,
        }
    }

    /// Decided by a direct user override.
    #[must_use]
    pub const fn direct(granted: bool) -> Self {
        Self {
            allowed: granted,
            source: DecisionSource::Direct,
        }
    }

    /// Allowed by a role grant.
    #[must_use]
    pub const fn role() -> Self {
        Self {
            allowed: true,
            source: DecisionSource::Role,
        }
    }

    /// Default deny.
    #[must_use]
    pub const fn deny() -> Self {
        Self {
            allowed: false,
            source: DecisionSource::None,
        }
    }
}
