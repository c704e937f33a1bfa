use storefront_types::Product;

use crate::api::{ApiError, Request, StorefrontApi, Transport};

/// What a search turned up.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    /// Matching products. May be empty if the service answered 200 with `[]`.
    Found(Vec<Product>),
    /// The service answered "not found" (404, empty body).
    NoMatches,
}

impl<T: Transport> StorefrontApi<T> {
    /// `GET /products`
    pub async fn fetch_all(&self) -> Result<Vec<Product>, ApiError> {
        self.call(Request::get("/products"))
            .await
            .inspect(|products: &Vec<Product>| log::info!("Fetched {} products", products.len()))
            .inspect_err(|e| log::error!("Failed to fetch products: {e}"))
    }

    /// `GET /products/search?value=<query>`
    pub async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        let request = Request::get("/products/search").with_query("value", query);
        match self.call(request).await {
            Ok(products) => Ok(SearchResults::Found(products)),
            Err(ApiError::NotFound) => {
                log::debug!("No products match {query:?}");
                Ok(SearchResults::NoMatches)
            }
            Err(e) => {
                log::error!("Search for {query:?} failed: {e}");
                Err(e)
            }
        }
    }
}
