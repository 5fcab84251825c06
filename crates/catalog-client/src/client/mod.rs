//! HTTP client for the catalog REST API.
//!
//! Wraps `reqwest` with typed responses, bearer-token auth, status-code
//! mapping into [`ClientError`], and retry on transient failures. Product
//! writes go out as multipart bodies built from
//! [`ProductForm::to_form_fields`]; taxonomy and attribute writes are JSON.

mod attributes;
mod terms;

use std::time::Duration;

use catalog_core::{AppConfig, AttributeCatalog, FormField, FormValue, ProductForm, SubmitMode};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::normalize::{catalog_from_api, product_form_from_api};
use crate::retry::{retry_with_backoff, RetryMode};
use crate::types::{ApiAttribute, ApiErrorBody, ApiProduct};

/// Client for the catalog REST API.
///
/// Use [`CatalogClient::new`] with an explicit base URL (a wiremock server in
/// tests) or [`CatalogClient::from_config`] in the CLI.
///
/// `GET`s are retried on any transient failure. Writes are retried only when
/// the connection could not be made, so a slow `POST` is never sent twice.
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

/// A multipart field with any upload already read into memory, so the body
/// can be rebuilt for each retry attempt.
enum PreparedField {
    Text(String, String),
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl CatalogClient {
    /// Creates a client with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Keep exactly one trailing slash so `Url::join` appends below the
        // API root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            token: None,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from application config: base URL, timeout, user
    /// agent, token, and retry policy.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms);

        Ok(match &config.api_token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    /// `max_retries` extra attempts on transient errors, starting at
    /// `backoff_base_ms` and doubling.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the attribute catalog (`GET /attributes`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport
    ///   or status failures, after retries.
    /// - [`ClientError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_attributes(&self) -> Result<AttributeCatalog, ClientError> {
        let attributes = self.fetch_raw_attributes().await?;
        tracing::info!(count = attributes.len(), "fetched attribute catalog");
        Ok(catalog_from_api(attributes))
    }

    /// Like [`CatalogClient::fetch_attributes`] but keeps the wire shape,
    /// including attribute slugs.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_attributes`].
    pub async fn fetch_raw_attributes(&self) -> Result<Vec<ApiAttribute>, ClientError> {
        let url = self.endpoint("attributes")?;
        self.get_json(&url).await
    }

    /// Lists products (`GET /products`).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_attributes`].
    pub async fn fetch_products(&self) -> Result<Vec<ApiProduct>, ClientError> {
        let url = self.endpoint("products")?;
        let products: Vec<ApiProduct> = self.get_json(&url).await?;
        tracing::info!(count = products.len(), "fetched product list");
        Ok(products)
    }

    /// Fetches a product in its raw API shape (`GET /products/{id}`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the product does not exist.
    /// - Otherwise as [`CatalogClient::fetch_attributes`].
    pub async fn fetch_product(&self, product_id: i64) -> Result<ApiProduct, ClientError> {
        let url = self.endpoint(&format!("products/{product_id}"))?;
        self.get_json(&url).await
    }

    /// Fetches a product and turns it into an edit form, resolving variant
    /// attributes through `catalog`.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::fetch_product`].
    pub async fn load_product_form(
        &self,
        catalog: &AttributeCatalog,
        product_id: i64,
    ) -> Result<ProductForm, ClientError> {
        let product = self.fetch_product(product_id).await?;
        Ok(product_form_from_api(catalog, product))
    }

    /// Creates a product (`POST /products`, multipart).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Io`] if an upload file cannot be read.
    /// - [`ClientError::Validation`] if the API rejects the product (422).
    /// - Otherwise as [`CatalogClient::fetch_attributes`], except that only
    ///   connection failures are retried.
    pub async fn create_product(
        &self,
        form: &ProductForm,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint("products")?;
        let fields = prepare_fields(form.to_form_fields(SubmitMode::Create)).await?;
        self.send_multipart(&url, &fields).await
    }

    /// Updates a product (`POST /products/{id}` with `_method=PUT`, multipart).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::create_product`], plus [`ClientError::NotFound`].
    pub async fn update_product(
        &self,
        product_id: i64,
        form: &ProductForm,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&format!("products/{product_id}"))?;
        let fields = prepare_fields(form.to_form_fields(SubmitMode::Update)).await?;
        self.send_multipart(&url, &fields).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ClientError> {
        retry_with_backoff(
            RetryMode::Read,
            self.max_retries,
            self.backoff_base_ms,
            move || async move {
                tracing::debug!(%url, "GET");
                let response = self.request(Method::GET, url).send().await?;
                parse_json(url, response).await
            },
        )
        .await
    }

    /// Sends `body` as JSON with `method` and parses the JSON reply.
    async fn send_json<B, T>(&self, method: Method, url: &Url, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        retry_with_backoff(
            RetryMode::Write,
            self.max_retries,
            self.backoff_base_ms,
            move || {
                let method = method.clone();
                async move {
                    tracing::info!(%url, %method, "sending");
                    let response = self.request(method, url).json(body).send().await?;
                    parse_json(url, response).await
                }
            },
        )
        .await
    }

    /// Sends `DELETE`; any success status counts, whatever the body.
    async fn delete(&self, url: &Url) -> Result<(), ClientError> {
        retry_with_backoff(
            RetryMode::Write,
            self.max_retries,
            self.backoff_base_ms,
            move || async move {
                tracing::info!(%url, "DELETE");
                let response = self.request(Method::DELETE, url).send().await?;
                check_status(url, response).await.map(drop)
            },
        )
        .await
    }

    async fn send_multipart(
        &self,
        url: &Url,
        fields: &[PreparedField],
    ) -> Result<serde_json::Value, ClientError> {
        retry_with_backoff(
            RetryMode::Write,
            self.max_retries,
            self.backoff_base_ms,
            move || async move {
                tracing::info!(%url, fields = fields.len(), "submitting product");
                let response = self
                    .request(Method::POST, url)
                    .multipart(build_form(fields))
                    .send()
                    .await?;
                parse_json(url, response).await
            },
        )
        .await
    }
}

async fn prepare_fields(fields: Vec<FormField>) -> Result<Vec<PreparedField>, ClientError> {
    let mut prepared = Vec::with_capacity(fields.len());
    for field in fields {
        match field.value {
            FormValue::Text(text) => prepared.push(PreparedField::Text(field.name, text)),
            FormValue::File(path) => {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|e| ClientError::Io {
                        path: path.display().to_string(),
                        source: e,
                    })?;
                let file_name = path
                    .file_name()
                    .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
                prepared.push(PreparedField::File {
                    name: field.name,
                    file_name,
                    bytes,
                });
            }
        }
    }
    Ok(prepared)
}

fn build_form(fields: &[PreparedField]) -> Form {
    fields.iter().fold(Form::new(), |form, field| match field {
        PreparedField::Text(name, text) => form.text(name.clone(), text.clone()),
        PreparedField::File {
            name,
            file_name,
            bytes,
        } => form.part(
            name.clone(),
            Part::bytes(bytes.clone()).file_name(file_name.clone()),
        ),
    })
}

/// Maps a non-success status to a [`ClientError`]; passes successes through.
async fn check_status(url: &Url, response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            url: url.to_string(),
        });
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "validation failed".to_owned());
        return Err(ClientError::Validation { message });
    }

    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response)
}

async fn parse_json<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, ClientError> {
    let body = check_status(url, response).await?.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
