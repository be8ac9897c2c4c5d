use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Coarse opinion category. The set is closed; anything unrecognized is
/// rejected at parse time rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Tech,
    Business,
    Culture,
    Global,
    #[default]
    General,
}

impl Category {
    /// Categories that take part in keyword scoring, in scoring order.
    pub const SCORED: [Category; 5] = [
        Category::Politics,
        Category::Tech,
        Category::Business,
        Category::Culture,
        Category::Global,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "politics",
            Category::Tech => "tech",
            Category::Business => "business",
            Category::Culture => "culture",
            Category::Global => "global",
            Category::General => "general",
        }
    }

    /// Capitalized form used in generated topic titles ("Tech", "General").
    pub fn label(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Tech => "Tech",
            Category::Business => "Business",
            Category::Culture => "Culture",
            Category::Global => "Global",
            Category::General => "General",
        }
    }

    /// Parse a stored value, falling back to `General` for anything unknown.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "politics" => Ok(Category::Politics),
            "tech" => Ok(Category::Tech),
            "business" => Ok(Category::Business),
            "culture" => Ok(Category::Culture),
            "global" => Ok(Category::Global),
            "general" => Ok(Category::General),
            other => Err(AppError::InvalidCategory(other.to_string())),
        }
    }
}
