//! Client-side state for the storefront: the product catalog, search, and the user's cart.
//!
//! How the pieces fit:
//! 1. [`StorefrontApi`] talks to the service over a [`Transport`] and turns every answer into a
//!    body or an [`ApiError`].
//! 2. The raw cart (product ids and counts) is joined against the catalog by [`reconcile`]. This
//!    is the only way cart line items are ever produced.
//! 3. Cart changes go through [`add_or_update`], which folds the service's new cart back through
//!    [`reconcile`].
//! 4. Search input is debounced before it reaches the service, and late responses to superseded
//!    searches are discarded.
//! 5. [`Storefront`] owns the resulting state and is the only thing that writes it.
//!
//! Nothing here is fatal. A failure turns into a [`Notification`] and the state stays as it was.

pub mod api;
mod cart;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod mutator;
pub mod notifications;
pub mod page;
pub mod reconcile;
pub mod register;
pub mod search;

pub use api::{ApiError, ReqwestTransport, StorefrontApi, Transport};
pub use catalog::SearchResults;
pub use config::{ConfigError, StorefrontConfig};
pub use credentials::{AuthToken, CredentialSource, EnvCredentials};
pub use mutator::{AddOptions, CartChange, MutationOutcome, Unchanged, add_or_update};
pub use notifications::{LogSink, Notification, NotificationQueue, NotificationSink, Severity};
pub use page::{PageState, Storefront};
pub use reconcile::{is_item_in_cart, reconcile};
pub use register::{RegistrationForm, RegistrationOutcome, ValidationError};
pub use search::{SearchState, SearchStatus};

pub use storefront_types::{CartLineItem, Product, RawCartEntry, total_cost, total_quantity};
