use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use serde_json::Value;

use crate::context::{ContextStore, Product};
use crate::events::{EventBus, StorefrontEvent};

use super::product::process_product_response;

/// Option choices for a configurable product: attribute id to the selected
/// value index.
pub type OptionSelections = HashMap<String, u32>;

/// The wrapped product-detail provider. The host application's real
/// add-to-cart lives behind this seam.
pub trait ProductDetail: Send + Sync {
    fn handle_add_to_cart(&self, sku: &str) -> Result<()>;
}

/// Resolve the SKU that actually lands in the cart.
///
/// Simple products resolve to their own SKU. Configurable products resolve
/// to the variant matching every selection; incomplete selections fall back
/// to the parent SKU (nothing chosen yet).
pub fn resolve_cart_sku(product: &Product, selections: &OptionSelections) -> Result<String> {
    let own_sku = product
        .sku
        .clone()
        .ok_or_else(|| anyhow!("product {:?} has no sku", product.name))?;

    if !product.is_configurable() || selections.is_empty() {
        return Ok(own_sku);
    }

    for option in &product.configurable_options {
        if !selections.contains_key(&option.attribute_id) {
            return Ok(own_sku);
        }
    }

    let variant = product.variants.iter().find(|variant| {
        variant.attributes.iter().all(|attribute| {
            selections.get(&attribute.attribute_id) == Some(&attribute.value_index)
        })
    });

    match variant {
        Some(variant) => Ok(variant.sku.clone()),
        None => bail!(
            "no variant of {} matches the selected options",
            own_sku
        ),
    }
}

/// Decorates a product-detail provider with telemetry: constructing one
/// sets the product context and publishes the page view; add-to-cart
/// resolves the configurable child SKU and refreshes the context before
/// delegating.
pub struct InstrumentedProductDetail<T: ProductDetail> {
    inner: T,
    product: Product,
    context: ContextStore,
    bus: EventBus,
}

impl<T: ProductDetail> InstrumentedProductDetail<T> {
    pub fn new(
        inner: T,
        product_response: &Value,
        context: ContextStore,
        bus: EventBus,
    ) -> Result<Self> {
        let product = process_product_response(product_response)?;
        context.set_product(product.clone());
        bus.publish(StorefrontEvent::ProductPageView);

        Ok(Self {
            inner,
            product,
            context,
            bus,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn add_to_cart(&self, selections: &OptionSelections) -> Result<()> {
        let cart_sku = resolve_cart_sku(&self.product, selections)?;

        let mut product = self.product.clone();
        product.parent_sku = product.sku.clone();
        product.sku = Some(cart_sku.clone());
        self.context.set_product(product);

        self.inner.handle_add_to_cart(&cart_sku)?;
        self.bus.publish(StorefrontEvent::AddToCart);
        Ok(())
    }
}

impl<T: ProductDetail> Drop for InstrumentedProductDetail<T> {
    fn drop(&mut self) {
        // Leaving the product page tears the context down with it.
        self.context.clear_product();
    }
}
