use anyhow::{Context as _, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::context::{
    ConfigurableOption, OptionValue, Product, ProductCategory, ProductVariant, VariantAttribute,
};

// GraphQL wire shapes. Field names follow the storefront schema
// (snake_case), distinct from the camelCase payload types in `context`.

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawOptionValue {
    value_index: u32,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawConfigurableOption {
    attribute_id: String,
    attribute_code: String,
    #[serde(default)]
    values: Vec<RawOptionValue>,
}

#[derive(Debug, Deserialize)]
struct RawVariantAttribute {
    attribute_id: String,
    value_index: u32,
}

#[derive(Debug, Deserialize)]
struct RawVariantProduct {
    sku: String,
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    product: RawVariantProduct,
    #[serde(default)]
    attributes: Vec<RawVariantAttribute>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    id: Option<u64>,
    sku: Option<String>,
    name: String,
    #[serde(default)]
    categories: Vec<RawCategory>,
    #[serde(default)]
    configurable_options: Vec<RawConfigurableOption>,
    #[serde(default)]
    variants: Vec<RawVariant>,
}

/// Shape a GraphQL product payload into the context [`Product`].
pub fn process_product_response(response: &Value) -> Result<Product> {
    let raw: RawProduct = serde_json::from_value(response.clone())
        .context("malformed product response from GraphQL")?;

    Ok(Product {
        id: raw.id,
        sku: raw.sku,
        name: raw.name,
        parent_sku: None,
        categories: raw
            .categories
            .into_iter()
            .map(|category| ProductCategory {
                id: category.id,
                name: category.name,
            })
            .collect(),
        configurable_options: raw
            .configurable_options
            .into_iter()
            .map(|option| ConfigurableOption {
                attribute_id: option.attribute_id,
                attribute_code: option.attribute_code,
                values: option
                    .values
                    .into_iter()
                    .map(|value| OptionValue {
                        value_index: value.value_index,
                        label: value.label,
                    })
                    .collect(),
            })
            .collect(),
        variants: raw
            .variants
            .into_iter()
            .map(|variant| ProductVariant {
                sku: variant.product.sku,
                attributes: variant
                    .attributes
                    .into_iter()
                    .map(|attribute| VariantAttribute {
                        attribute_id: attribute.attribute_id,
                        value_index: attribute.value_index,
                    })
                    .collect(),
            })
            .collect(),
    })
}
