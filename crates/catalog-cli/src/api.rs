//! Commands that talk to the catalog API.
//!
//! Called from `main` once the application config is loaded; the client is
//! built from it so base URL, token, timeout, and retry policy all come from
//! the environment.

use anyhow::Context;
use catalog_client::CatalogClient;
use catalog_core::{AppConfig, AttributeCatalog};

fn build_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "building catalog client");
    CatalogClient::from_config(config).context("failed to build catalog API client")
}

/// Renders each attribute as `Name: v1, v2`, prefixed with its backend ID.
pub(crate) fn format_catalog(catalog: &AttributeCatalog) -> Vec<String> {
    catalog
        .iter()
        .map(|attribute| {
            let id = attribute
                .id
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            format!("[{id}] {}: {}", attribute.name, attribute.values.join(", "))
        })
        .collect()
}

/// Fetches the attribute catalog and prints one line per attribute.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the request fails.
pub(crate) async fn run_attributes(config: &AppConfig) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let catalog = client
        .fetch_attributes()
        .await
        .context("failed to fetch attribute catalog")?;

    if catalog.is_empty() {
        println!("no attributes defined");
        return Ok(());
    }
    for line in format_catalog(&catalog) {
        println!("{line}");
    }
    Ok(())
}

/// Loads a product as an edit form and prints it as pretty JSON.
///
/// # Errors
///
/// Returns an error if either request fails or the form cannot be serialized.
pub(crate) async fn run_product(config: &AppConfig, product_id: i64) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let catalog = client
        .fetch_attributes()
        .await
        .context("failed to fetch attribute catalog")?;
    let form = client
        .load_product_form(&catalog, product_id)
        .await
        .with_context(|| format!("failed to load product {product_id}"))?;

    tracing::info!(
        product_id,
        variants = form.variants().len(),
        "loaded product"
    );
    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}
