//! Data model shared between the storefront client and its front ends.
//!
//! Field names on the wire follow the cart service (`_id`, `image`, `qty`),
//! while the Rust names follow what the values mean.

pub mod wire;

use serde::{Deserialize, Serialize};

/// A purchasable product, as listed by the catalog service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: f64,
    /// Aggregate rating, an integer out of five.
    pub rating: u8,
    #[serde(rename = "image")]
    pub image_url: String,
}

/// A cart line as the cart service stores it: no display data, just an id and a count.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawCartEntry {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

/// A displayable cart line. Only ever produced by reconciling raw entries against the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn subtotal(&self) -> f64 {
        self.product.cost * f64::from(self.quantity)
    }
}

/// Sum of `cost * quantity` over every line.
pub fn total_cost(items: &[CartLineItem]) -> f64 {
    items.iter().map(CartLineItem::subtotal).sum()
}

/// Number of units in the cart, counting every line's quantity.
pub fn total_quantity(items: &[CartLineItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cost: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: "Test".to_string(),
            cost,
            rating: 4,
            image_url: "https://i.imgur.com/lulqWzW.jpg".to_string(),
        }
    }

    #[test]
    fn test_product_from_catalog_payload() {
        let body = r#"[
            {
                "name": "iPhone XR",
                "category": "Phones",
                "cost": 100,
                "rating": 4,
                "image": "https://i.imgur.com/lulqWzW.jpg",
                "_id": "v4sLtEcMpzabRyfx"
            }
        ]"#;

        let products: Vec<Product> = serde_json::from_str(body).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "v4sLtEcMpzabRyfx");
        assert_eq!(products[0].image_url, "https://i.imgur.com/lulqWzW.jpg");
        assert_eq!(products[0].cost, 100.0);
    }

    #[test]
    fn test_raw_cart_from_cart_payload() {
        let body = r#"[
            { "productId": "KCRwjF7lN97HnEaY", "qty": 3 },
            { "productId": "BW0jAAeDJmlZCF8i", "qty": 1 }
        ]"#;

        let entries: Vec<RawCartEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(
            entries,
            vec![
                RawCartEntry {
                    product_id: "KCRwjF7lN97HnEaY".to_string(),
                    quantity: 3,
                },
                RawCartEntry {
                    product_id: "BW0jAAeDJmlZCF8i".to_string(),
                    quantity: 1,
                },
            ]
        );
    }

    #[test]
    fn test_totals() {
        let items = vec![
            CartLineItem {
                product: product("A", 10.0),
                quantity: 3,
            },
            CartLineItem {
                product: product("B", 20.0),
                quantity: 1,
            },
        ];

        assert_eq!(total_cost(&items), 50.0);
        assert_eq!(total_quantity(&items), 4);
        assert_eq!(total_cost(&[]), 0.0);
    }
}
