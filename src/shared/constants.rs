// =============================================================================
// CATEGORY PSEUDO-ENTRY
// =============================================================================

/// Slug of the synthesized "every category" entry. Never a stored category.
pub const ALL_CATEGORIES_SLUG: &str = "all";

/// Display name of the "every category" entry in dropdowns and lookups
pub const ALL_CATEGORIES_LABEL: &str = "Toutes catégories";

/// Short label of the "every category" entry in button groups
pub const ALL_CATEGORIES_SHORT_LABEL: &str = "Tous";

/// Package glyph used for the "every category" entry
pub const ALL_CATEGORIES_ICON: &str = "📦";

// =============================================================================
// BUTTON GROUP CLASSES
// =============================================================================

pub const CATEGORY_BUTTON_CLASS: &str = "category-btn";

pub const CATEGORY_BUTTON_ACTIVE_CLASS: &str = "active";
