use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Item category as stored in the `categories` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn new(slug: &str, name: &str, icon: Option<&str>, display_order: i32) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            icon: icon.map(str::to_string),
            is_active: true,
            display_order,
        }
    }

    /// Icon glyph, treating an empty string the same as no icon
    pub fn icon_glyph(&self) -> Option<&str> {
        self.icon.as_deref().filter(|icon| !icon.is_empty())
    }
}

/// Built-in categories served when the backend cannot be reached
pub fn fallback_categories() -> Vec<Category> {
    vec![
        Category::new("agricole", "Agricole", Some("🌾"), 1),
        Category::new("consommable", "Consommable", Some("🧪"), 2),
        Category::new("equipement", "Équipement", Some("⚔️"), 3),
        Category::new("materiau", "Matériaux", Some("⚒️"), 4),
        Category::new("quete", "Quêtes", Some("✨"), 5),
    ]
}
