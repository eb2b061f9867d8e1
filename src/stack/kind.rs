// SPDX-License-Identifier: MPL-2.0
//! Notice categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a notice. Determines the accent color and default title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    #[default]
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub const ALL: [NoticeKind; 3] = [NoticeKind::Info, NoticeKind::Warning, NoticeKind::Error];

    /// Returns the i18n key of the default title for this kind.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            NoticeKind::Info => "notice-kind-info",
            NoticeKind::Warning => "notice-kind-warning",
            NoticeKind::Error => "notice-kind-error",
        }
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Info => write!(f, "info"),
            NoticeKind::Warning => write!(f, "warning"),
            NoticeKind::Error => write!(f, "error"),
        }
    }
}

/// Error returned when a string names no known notice kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown notice kind: {}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for NoticeKind {
    type Err = UnknownKind;

    /// Accepts the canonical names plus the older `tips`, `warn` and
    /// `failed` labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" | "tips" => Ok(NoticeKind::Info),
            "warning" | "warn" => Ok(NoticeKind::Warning),
            "error" | "failed" => Ok(NoticeKind::Error),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}
