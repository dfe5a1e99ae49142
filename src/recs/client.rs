use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use super::types::{PageType, RecsResponse};

/// Request issued to the recommendations service, keyed by the storefront
/// identity from the context store.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecsRequest {
    pub environment_id: String,
    pub store_view_code: String,
    pub page_type: PageType,
    /// SKU of the product being viewed; only set for product pages.
    pub current_sku: Option<String>,
}

/// Seam to the recommendations fetch service. The host application plugs
/// in the real client; tests use canned implementations.
#[async_trait]
pub trait RecsClient: Send + Sync {
    async fn fetch_preconfigured(&self, request: &RecsRequest) -> Result<RecsResponse>;
}
