//! Inventory routes: products, stock movements and the audit history.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use condo_core::inventory::{InventoryService, NewUsage, StockAddition};
use condo_core::state::{AppState, Product, ProductHistory};
use condo_core::validation::{
    validate_history_edit, validate_product, validate_stock, validate_usage,
};
use condo_shared::AppError;
use condo_shared::types::{HistoryId, ProductId};
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiState};

/// Creates the inventory routes.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/{id}/usages", post(record_usage))
        .route("/products/{id}/stock", post(add_stock))
        .route("/product-history", get(list_history))
        .route(
            "/product-history/{id}",
            put(edit_history).delete(delete_history),
        )
}

/// Body of `POST /products/{id}/usages`.
#[derive(Debug, Deserialize)]
pub struct UsageRequest {
    /// Units used.
    pub quantity: i64,
    /// Where they were used.
    pub location: String,
    /// Usage date; defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A product and its stock after a movement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockResponse {
    /// Product after the movement; absent for unknown products.
    pub product: Option<Product>,
    /// History row appended by the movement.
    pub history: Option<ProductHistory>,
}

fn stock_response(doc: &AppState, product_id: &ProductId) -> StockResponse {
    StockResponse {
        product: doc.products.iter().find(|p| &p.id == product_id).cloned(),
        history: doc
            .product_history
            .iter()
            .rev()
            .find(|h| &h.product_id == product_id)
            .cloned(),
    }
}

fn require_product(doc: &AppState, id: &ProductId) -> Result<(), ApiError> {
    if doc.products.iter().any(|p| &p.id == id) {
        Ok(())
    } else {
        Err(ApiError::not_found("Product", &id))
    }
}

/// GET /products
async fn list_products(State(state): State<ApiState>) -> Json<Vec<Product>> {
    Json(state.read(|doc| doc.products.clone()).await)
}

/// POST /products
///
/// The initial quantity is recorded as a `create` history row.
async fn create_product(
    State(state): State<ApiState>,
    Json(product): Json<Product>,
) -> Result<impl IntoResponse, ApiError> {
    validate_product(&product)?;
    let created = state
        .commit(move |doc, today| {
            if doc.products.iter().any(|p| p.id == product.id) {
                return Err(AppError::duplicate("Product", &product.id).into());
            }
            Ok((InventoryService::add_product(doc, product.clone(), today), product))
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /products/{id}
///
/// Only name and unit price change; stock moves through usages and additions.
async fn update_product(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
    Json(mut product): Json<Product>,
) -> Result<Json<Product>, ApiError> {
    product.id = id.clone();
    validate_product(&product)?;
    let product_id = id.clone();
    let updated = state
        .commit(move |doc, _| {
            require_product(doc, &id)?;
            let next = InventoryService::update_product(doc, product);
            let stored = next.products.iter().find(|p| p.id == id).cloned();
            Ok((next, stored))
        })
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &product_id))?;
    Ok(Json(updated))
}

/// DELETE /products/{id}
///
/// Usages and history go with the product; booked expenses stay.
async fn delete_product(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((InventoryService::delete_product(doc, &id), ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/{id}/usages
async fn record_usage(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
    Json(request): Json<UsageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usage = NewUsage {
        product_id: id.clone(),
        quantity: request.quantity,
        location: request.location,
        date: request.date.unwrap_or_else(crate::today),
        notes: request.notes,
    };
    validate_usage(&usage)?;
    let response = state
        .commit(move |doc, _| {
            require_product(doc, &id)?;
            let next = InventoryService::record_usage(doc, usage);
            let response = stock_response(&next, &id);
            Ok((next, response))
        })
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /products/{id}/stock
async fn add_stock(
    State(state): State<ApiState>,
    Path(id): Path<ProductId>,
    Json(addition): Json<StockAddition>,
) -> Result<Json<StockResponse>, ApiError> {
    validate_stock(&addition)?;
    let response = state
        .commit(move |doc, today| {
            require_product(doc, &id)?;
            let next = InventoryService::add_stock(doc, &id, addition, today);
            let response = stock_response(&next, &id);
            Ok((next, response))
        })
        .await?;
    Ok(Json(response))
}

/// GET /product-history
async fn list_history(State(state): State<ApiState>) -> Json<Vec<ProductHistory>> {
    Json(state.read(|doc| doc.product_history.clone()).await)
}

/// PUT /product-history/{id}
///
/// Only `use` rows can be edited.
async fn edit_history(
    State(state): State<ApiState>,
    Path(id): Path<HistoryId>,
    Json(mut row): Json<ProductHistory>,
) -> Result<Json<StockResponse>, ApiError> {
    row.id = id;
    validate_history_edit(&row)?;
    let product_id = row.product_id.clone();
    let response = state
        .commit(move |doc, _| {
            let next = InventoryService::edit_usage_history(doc, row)?;
            let response = stock_response(&next, &product_id);
            Ok((next, response))
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /product-history/{id}
///
/// Only `use` rows can be deleted; the units return to stock.
async fn delete_history(
    State(state): State<ApiState>,
    Path(id): Path<HistoryId>,
) -> Result<StatusCode, ApiError> {
    state
        .commit(|doc, _| Ok((InventoryService::delete_usage_history(doc, &id)?, ())))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
