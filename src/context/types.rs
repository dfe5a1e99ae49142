use serde::{Deserialize, Serialize};

/// Marker carried by each published page-offset snapshot so downstream
/// consumers can tell periodic pings from the final flush.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivityEventType {
    // Wire names predate this crate; the collector schema expects them verbatim.
    #[serde(rename = "Page Ping")]
    PagePing,
    #[serde(rename = "pageUnload")]
    PageUnload,
}

/// Accumulated page-engagement metrics published into the context store on
/// every ping and on unload/route change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageOffsets {
    pub max_scroll_y: u32,
    pub document_height: u32,
    pub viewport_height: u32,
    pub percent_viewed: u8,
    pub pings: u32,
    #[serde(rename = "ping_interval")]
    pub ping_interval_secs: u64,
    pub event_type: ActivityEventType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    pub value_index: u32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableOption {
    pub attribute_id: String,
    pub attribute_code: String,
    pub values: Vec<OptionValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VariantAttribute {
    pub attribute_id: String,
    pub value_index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub sku: String,
    pub attributes: Vec<VariantAttribute>,
}

/// Product identity/attributes set on a product page view and read back on
/// add-to-cart. Lifetime is bounded to a product-detail page visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<u64>,
    pub sku: Option<String>,
    pub name: String,
    /// Top-level SKU once a configurable child has been selected.
    pub parent_sku: Option<String>,
    pub categories: Vec<ProductCategory>,
    pub configurable_options: Vec<ConfigurableOption>,
    pub variants: Vec<ProductVariant>,
}

impl Product {
    pub fn is_configurable(&self) -> bool {
        !self.configurable_options.is_empty()
    }
}

/// Identity of the storefront issuing events, used to key recommendation
/// fetches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontInstance {
    pub environment_id: String,
    pub environment: String,
    pub store_url: String,
    pub website_id: u64,
    pub store_code: String,
    pub store_view_code: String,
}
