use chrono::NaiveDateTime;
use serde::Serialize;

/// Product category shown in the storefront navigation.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// URL slug derived from the name when the category was created.
    pub slug: String,
    /// Inactive categories are hidden from the public listing.
    #[serde(skip_serializing)]
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing)]
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category. The slug is derived by the
/// repository so that it can be de-duplicated against stored rows.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Human-readable name of the category.
    pub name: String,
    /// Whether the category is listed publicly.
    pub is_active: bool,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
