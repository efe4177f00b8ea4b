/// Category model
///
/// Deleting a category uncategorizes its books on the server; the client
/// does not enforce or mirror that behaviour beyond reloading.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: String,
}

/// Body of `POST /categories` and `PUT /categories/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryName {
    pub name: String,
}

/// Sorts categories by name, case-insensitively
pub fn sort_by_name(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}
