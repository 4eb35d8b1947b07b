use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::constants::{ALL_CATEGORIES_ICON, ALL_CATEGORIES_LABEL, ALL_CATEGORIES_SLUG};
use crate::shared::validation::{validate_not_blank, validate_not_reserved_slug, SLUG_REGEX};

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub slug: String,
    pub name: String,
    pub icon: Option<String>,
    pub display_order: i32,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            slug: c.slug,
            name: c.name,
            icon: c.icon,
            display_order: c.display_order,
        }
    }
}

/// One entry of a category picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryOptionDto {
    pub value: String,
    pub label: String,
    /// Empty when the category has no icon
    pub icon: String,
}

impl CategoryOptionDto {
    /// The leading "every category" entry
    pub fn all() -> Self {
        Self {
            value: ALL_CATEGORIES_SLUG.to_string(),
            label: ALL_CATEGORIES_LABEL.to_string(),
            icon: ALL_CATEGORIES_ICON.to_string(),
        }
    }
}

impl From<&Category> for CategoryOptionDto {
    fn from(c: &Category) -> Self {
        Self {
            value: c.slug.clone(),
            label: c.name.clone(),
            icon: c.icon_glyph().unwrap_or_default().to_string(),
        }
    }
}

/// Display name and icon resolved for a slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryLabelDto {
    pub slug: String,
    pub name: String,
    pub icon: String,
}

/// Request DTO for creating or updating a category (keyed on slug)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpsertCategoryDto {
    #[validate(
        length(min = 1, max = 64, message = "Slug must be 1-64 characters"),
        regex(
            path = *SLUG_REGEX,
            message = "Slug must be lowercase letters and digits separated by single hyphens"
        ),
        custom(function = validate_not_reserved_slug)
    )]
    pub slug: String,

    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[validate(length(max = 16, message = "Icon must not exceed 16 characters"))]
    pub icon: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[validate(range(min = 0, message = "Display order must not be negative"))]
    #[serde(default)]
    pub display_order: i32,
}

fn default_active() -> bool {
    true
}

impl From<UpsertCategoryDto> for Category {
    fn from(dto: UpsertCategoryDto) -> Self {
        Self {
            slug: dto.slug,
            name: dto.name.trim().to_string(),
            icon: dto.icon.filter(|icon| !icon.is_empty()),
            is_active: dto.is_active,
            display_order: dto.display_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(slug: &str) -> UpsertCategoryDto {
        UpsertCategoryDto {
            slug: slug.to_string(),
            name: "Reliques".to_string(),
            icon: Some("🏺".to_string()),
            is_active: true,
            display_order: 6,
        }
    }

    #[test]
    fn test_valid_upsert() {
        assert!(dto("reliques").validate().is_ok());
    }

    #[test]
    fn test_reserved_slug_rejected() {
        let errors = dto("all").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn test_malformed_slug_rejected() {
        assert!(dto("Reliques").validate().is_err());
        assert!(dto("").validate().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut blank = dto("reliques");
        blank.name = "   ".to_string();

        let errors = blank.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_name_is_trimmed_on_store() {
        let mut padded = dto("reliques");
        padded.name = "  Reliques ".to_string();
        assert!(padded.validate().is_ok());

        let category: Category = padded.into();
        assert_eq!(category.name, "Reliques");
    }

    #[test]
    fn test_negative_display_order_rejected() {
        let mut invalid = dto("reliques");
        invalid.display_order = -1;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_option_from_iconless_category() {
        let option = CategoryOptionDto::from(&Category::new("divers", "Divers", None, 3));
        assert_eq!(option.value, "divers");
        assert_eq!(option.icon, "");
    }

    #[test]
    fn test_empty_icon_becomes_none() {
        let mut input = dto("reliques");
        input.icon = Some(String::new());
        let category: Category = input.into();
        assert_eq!(category.icon, None);
    }
}
