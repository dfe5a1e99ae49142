use std::sync::{Arc, RwLock};

use super::types::{PageOffsets, Product, StorefrontInstance};

#[derive(Debug, Default)]
struct ContextData {
    page_offsets: Option<PageOffsets>,
    product: Option<Product>,
    storefront: Option<StorefrontInstance>,
    custom_url: Option<String>,
    referrer_url: Option<String>,
}

/// Shared context store with typed getters/setters.
///
/// Every slot starts absent and getters hand out owned clones, so readers
/// never alias the stored value. Cloning the store clones the handle, not
/// the data.
#[derive(Clone)]
pub struct ContextStore {
    inner: Arc<RwLock<ContextData>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ContextData::default())),
        }
    }

    pub fn set_page_offsets(&self, offsets: PageOffsets) {
        self.inner.write().unwrap().page_offsets = Some(offsets);
    }

    pub fn page_offsets(&self) -> Option<PageOffsets> {
        self.inner.read().unwrap().page_offsets.clone()
    }

    pub fn clear_page_offsets(&self) {
        self.inner.write().unwrap().page_offsets = None;
    }

    pub fn set_product(&self, product: Product) {
        self.inner.write().unwrap().product = Some(product);
    }

    pub fn product(&self) -> Option<Product> {
        self.inner.read().unwrap().product.clone()
    }

    pub fn clear_product(&self) {
        self.inner.write().unwrap().product = None;
    }

    pub fn set_storefront_instance(&self, storefront: StorefrontInstance) {
        self.inner.write().unwrap().storefront = Some(storefront);
    }

    pub fn storefront_instance(&self) -> Option<StorefrontInstance> {
        self.inner.read().unwrap().storefront.clone()
    }

    pub fn set_custom_url(&self, url: impl Into<String>) {
        self.inner.write().unwrap().custom_url = Some(url.into());
    }

    pub fn custom_url(&self) -> Option<String> {
        self.inner.read().unwrap().custom_url.clone()
    }

    pub fn set_referrer_url(&self, url: impl Into<String>) {
        self.inner.write().unwrap().referrer_url = Some(url.into());
    }

    pub fn referrer_url(&self) -> Option<String> {
        self.inner.read().unwrap().referrer_url.clone()
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}
