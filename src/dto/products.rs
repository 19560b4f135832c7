use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

/// Forwarded verbatim to the backend's `POST /products/`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub price_usd: f64,
    pub price_syp: f64,
    pub is_active: Option<bool>,
}

/// Partial update: only the provided fields are serialized, never the full
/// product object. The inline edit sends all three, the activation toggle
/// sends `is_active` alone.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_syp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
