use storefront_types::{CartLineItem, Product, RawCartEntry};

use crate::api::{ApiError, StorefrontApi, Transport};
use crate::credentials::AuthToken;
use crate::notifications::{
    ALREADY_IN_CART, BACKEND_UNREACHABLE, LOGIN_REQUIRED, Notification, NotificationSink,
    failure_message,
};
use crate::reconcile::{is_item_in_cart, reconcile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Refuse to touch a product that is already in the cart.
    ///
    /// Set for the catalog's "Add to Cart" button, which must not bump an existing line.
    /// Cleared for the cart panel's quantity stepper, which should.
    pub prevent_duplicate: bool,
}

/// One requested change to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChange<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
    pub options: AddOptions,
}

impl<'a> CartChange<'a> {
    /// "Add to Cart" from the catalog: one unit, refused if the product is already in the cart.
    pub fn add(product_id: &'a str) -> Self {
        Self {
            product_id,
            quantity: 1,
            options: AddOptions {
                prevent_duplicate: true,
            },
        }
    }

    /// The cart panel's stepper: set the line to `quantity`, 0 removes it.
    pub fn set_quantity(product_id: &'a str, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            options: AddOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The service accepted the change. `entries` is its new authoritative cart and `items` the
    /// reconciliation of it.
    Updated {
        entries: Vec<RawCartEntry>,
        items: Vec<CartLineItem>,
    },
    Unchanged(Unchanged),
}

/// Why the cart was left as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum Unchanged {
    AuthRequired,
    AlreadyInCart,
    Failed(ApiError),
}

impl MutationOutcome {
    pub fn items(&self) -> Option<&[CartLineItem]> {
        match self {
            MutationOutcome::Updated { items, .. } => Some(items),
            MutationOutcome::Unchanged(_) => None,
        }
    }
}

/// Apply `change` to the remote cart.
///
/// Checks run in order: a missing token and the duplicate guard both stop before any request is
/// made. On success the returned cart is reconciled against `catalog`. Failures notify `sink` and
/// leave `current` as the caller's cart.
pub async fn add_or_update<T: Transport>(
    api: &StorefrontApi<T>,
    sink: &dyn NotificationSink,
    token: Option<&AuthToken>,
    current: &[CartLineItem],
    catalog: &[Product],
    change: CartChange<'_>,
) -> MutationOutcome {
    let Some(token) = token else {
        sink.notify(Notification::warning(LOGIN_REQUIRED));
        return MutationOutcome::Unchanged(Unchanged::AuthRequired);
    };

    if change.options.prevent_duplicate && is_item_in_cart(current, change.product_id) {
        sink.notify(Notification::warning(ALREADY_IN_CART));
        return MutationOutcome::Unchanged(Unchanged::AlreadyInCart);
    }

    match api
        .upsert_cart_item(token, change.product_id, change.quantity)
        .await
    {
        Ok(entries) => {
            let items = reconcile(&entries, catalog);
            log::info!(
                "Cart now has {} line(s) after setting {} to {}",
                items.len(),
                change.product_id,
                change.quantity
            );
            MutationOutcome::Updated { entries, items }
        }
        Err(error) => {
            sink.notify(Notification::error(failure_message(
                &error,
                BACKEND_UNREACHABLE,
            )));
            MutationOutcome::Unchanged(Unchanged::Failed(error))
        }
    }
}
