use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::ALL_CATEGORIES_SLUG;

lazy_static! {
    /// Regex for validating category slugs
    /// Lowercase alphanumeric words joined by single hyphens
    /// - Valid: "agricole", "materiau", "objets-rares", "tier2"
    /// - Invalid: "-quete", "quete-", "objets--rares", "Quete", "objets_rares"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Rejects the pseudo-slug reserved for the "every category" entry
pub fn validate_not_reserved_slug(slug: &str) -> Result<(), ValidationError> {
    if slug == ALL_CATEGORIES_SLUG {
        let mut error = ValidationError::new("reserved_slug");
        error.message = Some(format!("'{}' is reserved and cannot be stored", slug).into());
        return Err(error);
    }
    Ok(())
}

/// Rejects values made only of whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}
