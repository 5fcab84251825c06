//! Category and tag endpoints. Both taxonomies share one shape
//! (`{id, name, slug}`) and one set of routes under their collection path.

use reqwest::Method;
use serde_json::json;

use crate::error::ClientError;
use crate::types::ApiTerm;

use super::CatalogClient;

#[derive(Debug, Clone, Copy)]
enum Taxonomy {
    Categories,
    Tags,
}

impl Taxonomy {
    fn path(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Tags => "tags",
        }
    }
}

impl CatalogClient {
    /// Lists categories (`GET /categories`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_attributes`].
    pub async fn fetch_categories(&self) -> Result<Vec<ApiTerm>, ClientError> {
        self.list_terms(Taxonomy::Categories).await
    }

    /// Creates a category (`POST /categories`) and returns it with its new ID.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if the API rejects the name, otherwise as
    /// [`CatalogClient::fetch_attributes`].
    pub async fn create_category(&self, name: &str) -> Result<ApiTerm, ClientError> {
        self.create_term(Taxonomy::Categories, name).await
    }

    /// Renames a category (`PUT /categories/{id}`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::create_category`], plus [`ClientError::NotFound`].
    pub async fn update_category(&self, id: i64, name: &str) -> Result<ApiTerm, ClientError> {
        self.update_term(Taxonomy::Categories, id, name).await
    }

    /// Deletes a category (`DELETE /categories/{id}`).
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] if it does not exist.
    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        self.delete_term(Taxonomy::Categories, id).await
    }

    /// Lists tags (`GET /tags`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_attributes`].
    pub async fn fetch_tags(&self) -> Result<Vec<ApiTerm>, ClientError> {
        self.list_terms(Taxonomy::Tags).await
    }

    /// Creates a tag (`POST /tags`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::create_category`].
    pub async fn create_tag(&self, name: &str) -> Result<ApiTerm, ClientError> {
        self.create_term(Taxonomy::Tags, name).await
    }

    /// Renames a tag (`PUT /tags/{id}`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::update_category`].
    pub async fn update_tag(&self, id: i64, name: &str) -> Result<ApiTerm, ClientError> {
        self.update_term(Taxonomy::Tags, id, name).await
    }

    /// Deletes a tag (`DELETE /tags/{id}`).
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] if it does not exist.
    pub async fn delete_tag(&self, id: i64) -> Result<(), ClientError> {
        self.delete_term(Taxonomy::Tags, id).await
    }

    async fn list_terms(&self, taxonomy: Taxonomy) -> Result<Vec<ApiTerm>, ClientError> {
        let url = self.endpoint(taxonomy.path())?;
        let terms: Vec<ApiTerm> = self.get_json(&url).await?;
        tracing::info!(taxonomy = taxonomy.path(), count = terms.len(), "fetched terms");
        Ok(terms)
    }

    async fn create_term(&self, taxonomy: Taxonomy, name: &str) -> Result<ApiTerm, ClientError> {
        let url = self.endpoint(taxonomy.path())?;
        self.send_json(Method::POST, &url, &json!({ "name": name })).await
    }

    async fn update_term(
        &self,
        taxonomy: Taxonomy,
        id: i64,
        name: &str,
    ) -> Result<ApiTerm, ClientError> {
        let url = self.endpoint(&format!("{}/{id}", taxonomy.path()))?;
        self.send_json(Method::PUT, &url, &json!({ "name": name })).await
    }

    async fn delete_term(&self, taxonomy: Taxonomy, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("{}/{id}", taxonomy.path()))?;
        self.delete(&url).await
    }
}
