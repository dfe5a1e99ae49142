pub mod store;
pub mod types;

pub use store::ContextStore;
pub use types::{
    ActivityEventType, ConfigurableOption, OptionValue, PageOffsets, Product, ProductCategory,
    ProductVariant, StorefrontInstance, VariantAttribute,
};
