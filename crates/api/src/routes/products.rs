//! Product route handlers.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiJson;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product};
use crate::state::AppState;

/// Product creation request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl CreateProductRequest {
    /// Check required fields and build the product to store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when the name is blank or the price is missing.
    pub fn into_new_product(self) -> Result<NewProduct> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("Product name is required".to_string()))?;
        let price = self
            .price
            .ok_or_else(|| AppError::BadRequest("Product price is required".to_string()))?;

        Ok(NewProduct {
            description: self.description,
            image: self.image,
            category: self.category,
            in_stock: self.in_stock.unwrap_or(true),
            ..NewProduct::new(name, price)
        })
    }
}

/// Product creation response body.
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub success: bool,
    pub product: Product,
}

/// List products.
///
/// A durable-store failure is answered with the fallback catalog.
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    let storage = state.storage().select().await;

    match storage.products().list().await {
        Ok(products) => Json(products),
        Err(e) => {
            tracing::warn!(error = %e, "Product listing failed; serving fallback catalog");
            Json(state.storage().memory().list_products().await)
        }
    }
}

/// Create a product.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProductRequest>,
) -> Result<Json<CreateProductResponse>> {
    let product = request.into_new_product()?;
    let storage = state.storage().select().await;

    let product = storage.products().create(product).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to store product");
        AppError::Internal("Failed to add product".to_string())
    })?;

    tracing::info!(product_id = %product.id, mode = ?storage.mode(), "Product created");
    Ok(Json(CreateProductResponse {
        success: true,
        product,
    }))
}
