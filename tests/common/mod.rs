#![allow(dead_code)]

use serde_json::{json, Value};

use shopbeacon::context::StorefrontInstance;
use shopbeacon::recs::{PageType, RecProduct, RecUnit, RecsResponse};

pub fn make_storefront(environment_id: &str) -> StorefrontInstance {
    StorefrontInstance {
        environment_id: environment_id.to_string(),
        environment: "production".to_string(),
        store_url: "https://shop.example.com".to_string(),
        website_id: 1,
        store_code: "main".to_string(),
        store_view_code: "default".to_string(),
    }
}

pub fn make_unit(unit_id: &str, page_type: PageType, display_number: usize, products: usize) -> RecUnit {
    RecUnit {
        unit_id: unit_id.to_string(),
        unit_name: format!("{unit_id}-name"),
        page_type,
        unit_type: "primary".to_string(),
        display_number,
        products: (1..=products)
            .map(|rank| RecProduct {
                sku: format!("SKU-{rank}"),
                name: format!("Product {rank}"),
                price: Some(10.0 * rank as f64),
                rank: rank as u32,
            })
            .collect(),
    }
}

pub fn make_recs_response(units: Vec<RecUnit>) -> RecsResponse {
    RecsResponse { results: units }
}

/// GraphQL payload for a configurable product with two color variants.
pub fn configurable_product_response() -> Value {
    json!({
        "id": 1144,
        "sku": "VSW01",
        "name": "Valeria Two-Layer Tank",
        "categories": [
            { "id": 7, "name": "Tops" },
            { "id": 9, "name": "New Arrivals" }
        ],
        "configurable_options": [
            {
                "attribute_id": "93",
                "attribute_code": "color",
                "values": [
                    { "value_index": 50, "label": "Blue" },
                    { "value_index": 58, "label": "Red" }
                ]
            }
        ],
        "variants": [
            {
                "product": { "sku": "VSW01-KH" },
                "attributes": [ { "attribute_id": "93", "value_index": 50 } ]
            },
            {
                "product": { "sku": "VSW01-RD" },
                "attributes": [ { "attribute_id": "93", "value_index": 58 } ]
            }
        ]
    })
}

pub fn simple_product_response() -> Value {
    json!({
        "id": 2077,
        "sku": "24-MB01",
        "name": "Joust Duffle Bag",
        "categories": [ { "id": 3, "name": "Bags" } ]
    })
}
