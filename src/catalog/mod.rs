pub mod product;
pub mod product_detail;
pub mod queries;

pub use product::process_product_response;
pub use product_detail::{
    resolve_cart_sku, InstrumentedProductDetail, OptionSelections, ProductDetail,
};
pub use queries::{mini_cart_query, MINI_CART_FRAGMENT, PRODUCT_RECOMMENDATIONS_FRAGMENT};
