use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest accepted hashtag name, after normalisation.
pub const MAX_HASHTAG_LEN: usize = 64;

/// Hashtag entity. Names are stored normalised and are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashtag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHashtag {
    pub name: String,
}

impl NewHashtag {
    /// Build a hashtag from raw user input, normalising the name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: Hashtag::normalize_name(raw)?,
        })
    }
}

impl Hashtag {
    /// Trim, drop one leading `#` and lower-case.
    ///
    /// The result must be non-empty, at most [`MAX_HASHTAG_LEN`] characters,
    /// and contain only letters, digits and `_`.
    pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix('#').unwrap_or(trimmed).to_lowercase();

        if name.is_empty() {
            return Err(DomainError::Validation(
                "Hashtag name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_HASHTAG_LEN {
            return Err(DomainError::Validation(format!(
                "Hashtag name must be at most {MAX_HASHTAG_LEN} characters"
            )));
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(DomainError::Validation(format!(
                "Hashtag name '{name}' may only contain letters, digits and '_'"
            )));
        }

        Ok(name)
    }
}
