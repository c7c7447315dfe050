use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Kind of merchant requested from the places service.
///
/// The wire name (see [`Category::as_str`]) is used verbatim as the
/// `/places/{category}` path segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Restaurant,
    Cafe,
}

impl Category {
    pub const ALL: &'static [Category] = &[Category::Restaurant, Category::Cafe];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Cafe => "cafe",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}
