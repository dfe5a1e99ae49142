/// Cart fields the mini-cart UI renders.
pub const MINI_CART_FRAGMENT: &str = "\
fragment MiniCartFragment on Cart {
  id
  total_quantity
  prices {
    subtotal_excluding_tax {
      currency
      value
    }
  }
  items {
    uid
    quantity
    product {
      uid
      sku
      name
      url_key
      thumbnail {
        url
      }
    }
  }
}";

/// Cart fields the recommendations layer needs to key its fetches.
pub const PRODUCT_RECOMMENDATIONS_FRAGMENT: &str = "\
fragment ProductRecommendationsFragment on Cart {
  items {
    uid
    product {
      sku
      categories {
        id
        name
      }
    }
  }
}";

/// Mini-cart query extended with the recommendations fragment. The host
/// passes the composed document to its GraphQL client in place of the
/// stock mini-cart query.
pub fn mini_cart_query() -> String {
    format!(
        "query MiniCartQuery($cartId: String!) {{
  cart(cart_id: $cartId) {{
    id
    ...MiniCartFragment
    ...ProductRecommendationsFragment
  }}
}}
{MINI_CART_FRAGMENT}
{PRODUCT_RECOMMENDATIONS_FRAGMENT}"
    )
}
