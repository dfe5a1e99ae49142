use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page types recognized by the recommendations service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "CMS")]
    Cms,
    Category,
    Product,
    Cart,
    Checkout,
}

pub const PAGE_TYPES: [PageType; 5] = [
    PageType::Cms,
    PageType::Category,
    PageType::Product,
    PageType::Cart,
    PageType::Checkout,
];

/// JSON rendering of [`PAGE_TYPES`], quoted verbatim in the invalid-input
/// error message.
pub const PAGE_TYPES_JSON: &str = r#"["CMS","Category","Product","Cart","Checkout"]"#;

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Cms => "CMS",
            PageType::Category => "Category",
            PageType::Product => "Product",
            PageType::Cart => "Cart",
            PageType::Checkout => "Checkout",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = RecsError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "CMS" => Ok(PageType::Cms),
            "Category" => Ok(PageType::Category),
            "Product" => Ok(PageType::Product),
            "Cart" => Ok(PageType::Cart),
            "Checkout" => Ok(PageType::Checkout),
            other => Err(RecsError::InvalidPageType {
                input: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum RecsError {
    #[error("Headless Recommendations: PageType is required to fetch recommendations.")]
    MissingPageType,
    #[error("Headless Recommendations: {input} is not a valid pagetype. Valid types include {PAGE_TYPES_JSON}")]
    InvalidPageType { input: String },
    #[error("recommendations fetch failed: {0}")]
    Client(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecProduct {
    pub sku: String,
    pub name: String,
    pub price: Option<f64>,
    /// Display position inside the owning unit, starting at 1.
    pub rank: u32,
}

/// A named slot of recommended products returned by the recommendations
/// API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecUnit {
    pub unit_id: String,
    pub unit_name: String,
    pub page_type: PageType,
    pub unit_type: String,
    /// How many of `products` the storefront actually displays.
    pub display_number: usize,
    pub products: Vec<RecProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecsResponse {
    pub results: Vec<RecUnit>,
}
