//! The products page: owner of every piece of mutable storefront state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use debounce::Debouncer;
use storefront_types::{CartLineItem, Product, RawCartEntry, total_cost};

use crate::api::{StorefrontApi, Transport};
use crate::catalog::SearchResults;
use crate::config::StorefrontConfig;
use crate::credentials::AuthToken;
use crate::mutator::{CartChange, MutationOutcome, Unchanged, add_or_update};
use crate::notifications::{
    ALREADY_IN_CART, BACKEND_UNREACHABLE, CART_UNAVAILABLE, Notification, NotificationSink,
    failure_message,
};
use crate::reconcile::reconcile;
use crate::register::{RegistrationForm, RegistrationOutcome, register};
use crate::search::{Applied, SearchState};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub search: SearchState,
    /// The full catalog from the last successful load. Carts reconcile against this, never
    /// against the (possibly filtered) search results.
    pub catalog: Vec<Product>,
    /// `None` when logged out or not loaded yet.
    pub raw_cart: Option<Vec<RawCartEntry>>,
    /// Always `reconcile(raw_cart, catalog)`, as of the last time either changed. `None` until
    /// a catalog has loaded at least once.
    pub cart: Option<Vec<CartLineItem>>,
    catalog_loaded: bool,
}

impl PageState {
    fn refresh_cart(&mut self) {
        self.cart = match (&self.raw_cart, self.catalog_loaded) {
            (Some(raw), true) => Some(reconcile(raw, &self.catalog)),
            _ => None,
        };
    }

    /// Whether the remote cart has a line for `product_id`, reconciled or not.
    fn holds(&self, product_id: &str) -> bool {
        self.raw_cart
            .as_deref()
            .is_some_and(|raw| raw.iter().any(|entry| entry.product_id == product_id))
    }
}

/// Drives the catalog, search and cart flows and keeps their results.
///
/// State lives behind a mutex that is only ever locked between awaits.
pub struct Storefront<T> {
    api: Arc<StorefrontApi<T>>,
    sink: Arc<dyn NotificationSink>,
    state: Arc<Mutex<PageState>>,
    search_debouncer: Mutex<Debouncer<()>>,
}

fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Transport + 'static> Storefront<T> {
    pub fn new(transport: T, sink: Arc<dyn NotificationSink>, config: &StorefrontConfig) -> Self {
        Self {
            api: Arc::new(StorefrontApi::new(transport)),
            sink,
            state: Arc::new(Mutex::new(PageState::default())),
            search_debouncer: Mutex::new(Debouncer::new(config.debounce_delay)),
        }
    }

    pub fn api(&self) -> &StorefrontApi<T> {
        &self.api
    }

    /// Fetch the catalog and the cart side by side, and reconcile once both have settled.
    ///
    /// A failed fetch keeps what the previous load got; the cart is rebuilt from the catalog and
    /// raw cart held afterwards. Without a token the cart is `None`.
    pub async fn load(&self, token: Option<&AuthToken>) {
        let ticket = lock(&self.state).search.begin("");

        let (products, raw_cart) = futures::join!(self.api.fetch_all(), self.api.fetch_raw(token));

        let mut notifications = Vec::new();
        {
            let mut state = lock(&self.state);

            match products {
                Ok(products) => {
                    state.catalog = products.clone();
                    state.catalog_loaded = true;
                    if state.search.apply(ticket, Ok(SearchResults::Found(products)))
                        == Applied::Stale
                    {
                        log::debug!("A search was issued during load; keeping its results");
                    }
                }
                Err(error) => {
                    notifications.push(Notification::error(failure_message(
                        &error,
                        BACKEND_UNREACHABLE,
                    )));
                    let _ = state.search.apply(ticket, Err(error));
                }
            }

            match raw_cart {
                Ok(entries) => state.raw_cart = entries,
                Err(error) => {
                    notifications.push(Notification::error(failure_message(
                        &error,
                        CART_UNAVAILABLE,
                    )));
                }
            }

            // rebuild from whatever catalog and raw cart are now held, even if one fetch failed
            state.refresh_cart();
        }

        for notification in notifications {
            self.sink.notify(notification);
        }
    }

    /// Feed one search-box change. The search goes out once input has been quiet for the
    /// configured delay; earlier pending input is dropped.
    pub fn on_search_input(&self, query: impl Into<String>) {
        let query = query.into();
        let api = Arc::clone(&self.api);
        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);

        lock(&self.search_debouncer).call(async move {
            run_search(&api, &state, sink.as_ref(), query).await;
        });
    }

    /// Wait for the pending debounced search, if there is one.
    pub async fn flush_search(&self) {
        let handle = lock(&self.search_debouncer).take_handle();
        if let Some(handle) = handle {
            handle.join().await;
        }
    }

    /// Search right away, bypassing the debouncer.
    pub async fn search_now(&self, query: impl Into<String>) {
        run_search(&self.api, &self.state, self.sink.as_ref(), query.into()).await;
    }

    /// The catalog's "Add to Cart" button.
    pub async fn add_to_cart(
        &self,
        token: Option<&AuthToken>,
        product_id: &str,
    ) -> MutationOutcome {
        self.mutate(token, CartChange::add(product_id)).await
    }

    /// The cart panel's quantity stepper.
    pub async fn set_quantity(
        &self,
        token: Option<&AuthToken>,
        product_id: &str,
        quantity: u32,
    ) -> MutationOutcome {
        self.mutate(token, CartChange::set_quantity(product_id, quantity))
            .await
    }

    async fn mutate(&self, token: Option<&AuthToken>, change: CartChange<'_>) -> MutationOutcome {
        let (current, catalog, held) = {
            let state = lock(&self.state);
            (
                state.cart.clone().unwrap_or_default(),
                state.catalog.clone(),
                state.holds(change.product_id),
            )
        };

        // the line items are empty while no catalog has loaded, so guard on the raw cart too
        if token.is_some() && change.options.prevent_duplicate && held {
            self.sink.notify(Notification::warning(ALREADY_IN_CART));
            return MutationOutcome::Unchanged(Unchanged::AlreadyInCart);
        }

        let outcome = add_or_update(
            &self.api,
            self.sink.as_ref(),
            token,
            &current,
            &catalog,
            change,
        )
        .await;

        if let MutationOutcome::Updated { entries, .. } = &outcome {
            let mut state = lock(&self.state);
            state.raw_cart = Some(entries.clone());
            state.refresh_cart();
        }
        outcome
    }

    pub async fn register(&self, form: &RegistrationForm) -> RegistrationOutcome {
        register(&self.api, self.sink.as_ref(), form).await
    }

    pub fn snapshot(&self) -> PageState {
        lock(&self.state).clone()
    }

    pub fn search_state(&self) -> SearchState {
        lock(&self.state).search.clone()
    }

    pub fn catalog(&self) -> Vec<Product> {
        lock(&self.state).catalog.clone()
    }

    pub fn cart(&self) -> Option<Vec<CartLineItem>> {
        lock(&self.state).cart.clone()
    }

    pub fn cart_total(&self) -> Option<f64> {
        lock(&self.state).cart.as_deref().map(total_cost)
    }
}

async fn run_search<T: Transport>(
    api: &StorefrontApi<T>,
    state: &Mutex<PageState>,
    sink: &dyn NotificationSink,
    query: String,
) {
    let ticket = lock(state).search.begin(query.as_str());
    let result = api.search(&query).await;
    let applied = lock(state).search.apply(ticket, result);

    match applied {
        Applied::Updated => {}
        Applied::Stale => log::debug!("Discarding stale results for {query:?}"),
        Applied::Failed(_) => sink.notify(Notification::error(BACKEND_UNREACHABLE)),
    }
}
