//! Categorization verdict and its provenance tag.

use serde::{Deserialize, Serialize};

/// How a category was assigned to a receipt. Persisted by callers for
/// auditing and surfaced in the UI next to the category name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Matched a curated merchant substring rule
    MerchantRule,
    /// Won on keyword signal score
    KeywordRule,
    /// Trained classifier prediction above the confidence threshold
    Ml,
    /// Category chosen explicitly by the user
    UserOverride,
    /// System-wide fallback when nothing else fired
    Default,
}

impl Source {
    /// Stable string form, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::MerchantRule => "merchant_rule",
            Source::KeywordRule => "keyword_rule",
            Source::Ml => "ml",
            Source::UserOverride => "user_override",
            Source::Default => "default",
        }
    }
}

/// The outcome of categorizing a single merchant name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    /// Category name; resolving it to a storage id is the caller's job
    pub category: String,
    /// Which tier of the cascade decided
    pub source: Source,
}

impl Verdict {
    pub fn new(category: impl Into<String>, source: Source) -> Self {
        Self {
            category: category.into(),
            source,
        }
    }
}
