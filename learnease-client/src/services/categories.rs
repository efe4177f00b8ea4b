/// Category endpoints
///
/// Names are trimmed and checked locally before create and rename.

use crate::client::ApiClient;
use crate::error::ClientResult;
use learnease_shared::models::category::Category;
use learnease_shared::validation::validate_category_name;
use reqwest::Method;
use tracing::info;

impl ApiClient {
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let builder = self.authorized(Method::GET, &["categories"]).await?;
        self.send_json(builder, "Failed to fetch categories.").await
    }

    pub async fn create_category(&self, name: &str) -> ClientResult<Category> {
        let body = validate_category_name(name)?;
        let builder = self
            .authorized(Method::POST, &["categories"])
            .await?
            .json(&body);

        let category: Category = self.send_json(builder, "Failed to create category.").await?;
        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn rename_category(&self, category_id: &str, name: &str) -> ClientResult<Category> {
        let body = validate_category_name(name)?;
        let builder = self
            .authorized(Method::PUT, &["categories", category_id])
            .await?
            .json(&body);

        self.send_json(builder, "Failed to update category name.").await
    }

    /// Deletes a category; its books become uncategorized server-side
    pub async fn delete_category(&self, category_id: &str) -> ClientResult<()> {
        let builder = self
            .authorized(Method::DELETE, &["categories", category_id])
            .await?;
        self.send_empty(builder, "Failed to delete category.").await?;
        info!(category_id, "Category deleted");
        Ok(())
    }
}
