//! Attribute and attribute-value maintenance: the catalog the variant
//! generator reads from.

use reqwest::Method;
use serde_json::json;

use crate::error::ClientError;
use crate::types::{ApiAttribute, ApiAttributeValue};

use super::CatalogClient;

impl CatalogClient {
    /// Creates an attribute (`POST /attributes`). The reply usually has no
    /// values yet.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if the API rejects the name, otherwise as
    /// [`CatalogClient::fetch_attributes`].
    pub async fn create_attribute(&self, name: &str) -> Result<ApiAttribute, ClientError> {
        let url = self.endpoint("attributes")?;
        self.send_json(Method::POST, &url, &json!({ "name": name })).await
    }

    /// Renames an attribute (`PUT /attributes/{id}`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::create_attribute`], plus [`ClientError::NotFound`].
    pub async fn update_attribute(&self, id: i64, name: &str) -> Result<ApiAttribute, ClientError> {
        let url = self.endpoint(&format!("attributes/{id}"))?;
        self.send_json(Method::PUT, &url, &json!({ "name": name })).await
    }

    /// Deletes an attribute and its values (`DELETE /attributes/{id}`).
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] if it does not exist.
    pub async fn delete_attribute(&self, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("attributes/{id}"))?;
        self.delete(&url).await
    }

    /// Lists the values of one attribute with their IDs
    /// (`GET /attributes/{id}/values`).
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] for an unknown attribute, otherwise as
    /// [`CatalogClient::fetch_attributes`].
    pub async fn fetch_attribute_values(
        &self,
        attribute_id: i64,
    ) -> Result<Vec<ApiAttributeValue>, ClientError> {
        let url = self.endpoint(&format!("attributes/{attribute_id}/values"))?;
        let values: Vec<ApiAttributeValue> = self.get_json(&url).await?;
        tracing::info!(attribute_id, count = values.len(), "fetched attribute values");
        Ok(values)
    }

    /// Adds a value to an attribute (`POST /attributes/{id}/values`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::create_attribute`], plus [`ClientError::NotFound`]
    /// for an unknown attribute.
    pub async fn create_attribute_value(
        &self,
        attribute_id: i64,
        value: &str,
    ) -> Result<ApiAttributeValue, ClientError> {
        let url = self.endpoint(&format!("attributes/{attribute_id}/values"))?;
        self.send_json(Method::POST, &url, &json!({ "value": value })).await
    }

    /// Changes a value's text (`PUT /attributes/{id}/values/{value_id}`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::create_attribute_value`].
    pub async fn update_attribute_value(
        &self,
        attribute_id: i64,
        value_id: i64,
        value: &str,
    ) -> Result<ApiAttributeValue, ClientError> {
        let url = self.endpoint(&format!("attributes/{attribute_id}/values/{value_id}"))?;
        self.send_json(Method::PUT, &url, &json!({ "value": value })).await
    }

    /// Removes a value (`DELETE /attributes/{id}/values/{value_id}`).
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] if either ID is unknown.
    pub async fn delete_attribute_value(
        &self,
        attribute_id: i64,
        value_id: i64,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("attributes/{attribute_id}/values/{value_id}"))?;
        self.delete(&url).await
    }
}
