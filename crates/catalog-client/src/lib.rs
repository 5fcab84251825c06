pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::CatalogClient;
pub use error::ClientError;
pub use normalize::{catalog_from_api, product_form_from_api, variant_from_api};
pub use types::{ApiAttribute, ApiAttributeValue, ApiProduct, ApiTerm, ApiVariant};
