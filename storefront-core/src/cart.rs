use storefront_types::RawCartEntry;
use storefront_types::wire::UpsertCartRequest;

use crate::api::{ApiError, Request, StorefrontApi, Transport};
use crate::credentials::AuthToken;

impl<T: Transport> StorefrontApi<T> {
    /// `GET /cart`
    ///
    /// `Ok(None)` without a token: the cart doesn't apply to logged-out users. That is not the
    /// same as `Ok(Some(vec![]))`, a logged-in user whose cart is empty. An expired or invalid
    /// token comes back as [`ApiError::Unauthorized`].
    pub async fn fetch_raw(
        &self,
        token: Option<&AuthToken>,
    ) -> Result<Option<Vec<RawCartEntry>>, ApiError> {
        let Some(token) = token else {
            return Ok(None);
        };
        self.call(Request::get("/cart").with_bearer(token))
            .await
            .map(Some)
            .inspect_err(|e| log::error!("Failed to fetch cart: {e}"))
    }

    /// `POST /cart`. Returns the whole cart as it stands after the change.
    ///
    /// A quantity of 0 removes the line.
    pub async fn upsert_cart_item(
        &self,
        token: &AuthToken,
        product_id: &str,
        quantity: u32,
    ) -> Result<Vec<RawCartEntry>, ApiError> {
        let body = UpsertCartRequest {
            product_id: product_id.to_string(),
            quantity,
        };
        let request = Request::post("/cart", &body)?.with_bearer(token);
        self.call(request)
            .await
            .inspect_err(|e| log::error!("Failed to update cart item {product_id}: {e}"))
    }
}
