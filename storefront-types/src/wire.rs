use serde::{Deserialize, Serialize};

/// Body of `POST /cart`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UpsertCartRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Failure payload returned by every endpoint, e.g.
/// `{ "success": false, "message": "Product doesn't exist" }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub message: String,
}
