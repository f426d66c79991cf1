//! Disclosure category

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a metric disclosure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A numeric value with a unit
    #[default]
    Quantitative,
    /// A narrative disclosure
    Discussion,
}

impl Category {
    /// Get the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Quantitative => "quantitative",
            Category::Discussion => "discussion",
        }
    }

    /// Interpret a free-form catalog label.
    ///
    /// Catalog files spell categories inconsistently ("Quantitative",
    /// "Discussion and Analysis", ...). Anything starting with `quant` is
    /// quantitative; everything else is discussion.
    pub fn from_label(label: &str) -> Self {
        if label.trim().to_lowercase().starts_with("quant") {
            Category::Quantitative
        } else {
            Category::Discussion
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quantitative" => Ok(Category::Quantitative),
            "discussion" => Ok(Category::Discussion),
            other => Err(format!("Invalid category: {}", other)),
        }
    }
}
