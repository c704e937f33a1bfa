//! Joining the raw cart against the catalog.
//!
//! Cart line items are never edited in place. Whenever the raw cart or the catalog changes, the
//! line items are thrown away and rebuilt from both with [`reconcile`].

use rustc_hash::FxHashMap;
use storefront_types::{CartLineItem, Product, RawCartEntry};

/// One line item per raw entry whose product is in `catalog`, in raw-cart order.
///
/// Entries for products the catalog doesn't have (removed, or not loaded yet) are dropped.
pub fn reconcile(raw_entries: &[RawCartEntry], catalog: &[Product]) -> Vec<CartLineItem> {
    let mut by_id: FxHashMap<&str, &Product> = FxHashMap::default();
    for product in catalog {
        by_id.entry(product.id.as_str()).or_insert(product);
    }

    raw_entries
        .iter()
        .filter_map(|entry| {
            by_id
                .get(entry.product_id.as_str())
                .map(|product| CartLineItem {
                    product: (*product).clone(),
                    quantity: entry.quantity,
                })
        })
        .collect()
}

pub fn is_item_in_cart(items: &[CartLineItem], product_id: &str) -> bool {
    items.iter().any(|item| item.product.id == product_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cost: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category: "Fashion".to_string(),
            cost,
            rating: 4,
            image_url: format!("https://example.com/{id}.png"),
        }
    }

    fn entry(id: &str, quantity: u32) -> RawCartEntry {
        RawCartEntry {
            product_id: id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_joins_cart_against_catalog() {
        let catalog = vec![product("A", 10.0), product("B", 20.0)];
        let raw = vec![entry("A", 3)];

        assert_eq!(
            reconcile(&raw, &catalog),
            vec![CartLineItem {
                product: product("A", 10.0),
                quantity: 3,
            }]
        );
    }

    #[test]
    fn test_missing_products_are_dropped() {
        assert!(reconcile(&[entry("X", 2)], &[]).is_empty());

        let catalog = vec![product("A", 10.0)];
        let raw = vec![entry("gone", 1), entry("A", 2)];
        let items = reconcile(&raw, &catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id, "A");
    }

    #[test]
    fn test_preserves_cart_order() {
        let catalog = vec![product("A", 1.0), product("B", 2.0), product("C", 3.0)];
        let raw = vec![entry("C", 1), entry("A", 2), entry("B", 3)];

        let ids: Vec<_> = reconcile(&raw, &catalog)
            .into_iter()
            .map(|item| item.product.id)
            .collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_deterministic() {
        let catalog = vec![product("A", 1.0), product("B", 2.0)];
        let raw = vec![entry("B", 5), entry("missing", 1), entry("A", 1)];

        let first = reconcile(&raw, &catalog);
        let second = reconcile(&raw, &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_catalog_entry_wins_on_duplicate_ids() {
        let catalog = vec![product("A", 1.0), product("A", 99.0)];
        let items = reconcile(&[entry("A", 1)], &catalog);
        assert_eq!(items[0].product.cost, 1.0);
    }

    #[test]
    fn test_is_item_in_cart() {
        let items = reconcile(&[entry("A", 1)], &[product("A", 1.0)]);
        assert!(is_item_in_cart(&items, "A"));
        assert!(!is_item_in_cart(&items, "B"));
        assert!(!is_item_in_cart(&[], "A"));
    }
}
