use std::fmt::Write as _;

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::context::ContextStore;
use crate::recs::{RecProduct, RecUnit};

use super::tracker::SelfDescribingJson;

pub const PRODUCT_SCHEMA_URL: &str = "iglu:com.adobe.magento.entity/product/jsonschema/1-0-3";
pub const ACTIVITY_SUMMARY_SCHEMA_URL: &str =
    "iglu:com.adobe.magento.entity/page-activity-summary/jsonschema/1-0-0";
pub const RECS_UNIT_SCHEMA_URL: &str =
    "iglu:com.adobe.magento.entity/recommendation-unit/jsonschema/1-0-0";
pub const RECS_ITEM_SCHEMA_URL: &str =
    "iglu:com.adobe.magento.entity/recommendation-unit-item/jsonschema/1-0-0";

/// Product context attached to product view and add-to-cart events. Empty
/// when no product (or a product without an id) is in the store.
pub fn prepare_product_context(context: &ContextStore) -> Vec<SelfDescribingJson> {
    let Some(product) = context.product() else {
        return Vec::new();
    };
    let Some(product_id) = product.id else {
        return Vec::new();
    };

    let categories: Vec<String> = product
        .categories
        .iter()
        .map(|category| category.id.to_string())
        .collect();

    vec![SelfDescribingJson {
        schema: PRODUCT_SCHEMA_URL.to_string(),
        data: json!({
            "productId": product_id,
            "sku": product.sku,
            "name": product.name,
            "categories": categories,
            "topLevelSku": product.parent_sku,
        }),
    }]
}

pub fn unit_context(unit: &RecUnit) -> SelfDescribingJson {
    SelfDescribingJson {
        schema: RECS_UNIT_SCHEMA_URL.to_string(),
        data: json!({
            "unitId": unit.unit_id,
            "unitName": unit.unit_name,
            "pageType": unit.page_type,
            "unitType": unit.unit_type,
            "displayNumber": unit.display_number,
            "primaryProducts": unit.products.len(),
        }),
    }
}

pub fn item_context(unit_id: &str, product: &RecProduct) -> SelfDescribingJson {
    SelfDescribingJson {
        schema: RECS_ITEM_SCHEMA_URL.to_string(),
        data: json!({
            "unitId": unit_id,
            "sku": product.sku,
            "name": product.name,
            "price": product.price,
            "displayRank": product.rank,
        }),
    }
}

/// Cart ids are pseudonymized before leaving the storefront.
pub fn cart_id_hash(cart_id: &str) -> String {
    let digest = Sha256::digest(cart_id.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_id_hash_is_hex_and_stable() {
        let first = cart_id_hash("cart-123");
        let second = cart_id_hash("cart-123");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, cart_id_hash("cart-456"));
    }
}
