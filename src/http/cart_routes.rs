//! `/cart` routes.

use super::auth::CallerId;
use super::error::ApiError;
use super::AppState;
use crate::cart_actor::CartError;
use crate::model::ProductId;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// A product reference from a request body: an id, or something that names no product.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductRef {
    Id(ProductId),
    Unknown(Value),
}

/// A quantity from a request body. Numeric strings such as `"2"` are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuantityInput {
    Count(i64),
    Text(String),
    Other(Value),
}

impl QuantityInput {
    fn count(self) -> Option<i64> {
        match self {
            QuantityInput::Count(n) => Some(n),
            QuantityInput::Text(s) => s.trim().parse().ok(),
            QuantityInput::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    product_id: Option<ProductRef>,
    quantity: Option<QuantityInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    quantity: Option<QuantityInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCoupon {
    #[serde(default)]
    coupon_code: String,
}

fn product_ref(raw: Option<ProductRef>) -> Result<ProductId, ApiError> {
    match raw {
        Some(ProductRef::Id(id)) => Ok(id),
        Some(ProductRef::Unknown(value)) if !is_blank(&value) => {
            Err(ApiError::not_found("Product not found"))
        }
        _ => Err(ApiError::invalid_input("Product ID is required")),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn quantity(raw: Option<QuantityInput>) -> Result<u32, ApiError> {
    raw.and_then(QuantityInput::count)
        .and_then(|q| u32::try_from(q).ok())
        .filter(|q| *q >= 1)
        .ok_or_else(|| CartError::InvalidQuantity.into())
}

fn cart_line(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Product not found in cart"))
}

pub async fn get_cart(
    State(state): State<AppState>,
    CallerId(user): CallerId,
) -> Result<Json<Value>, ApiError> {
    let cart = state
        .carts
        .get_cart(user)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to retrieve cart"))?;
    if cart.is_empty() {
        return Ok(Json(json!({ "message": "Cart is empty", "cart": cart })));
    }
    Ok(Json(json!({ "cart": cart })))
}

pub async fn cart_summary(
    State(state): State<AppState>,
    CallerId(user): CallerId,
) -> Result<Json<Value>, ApiError> {
    let summary = state
        .carts
        .summary(user)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to summarize cart"))?;
    Ok(Json(json!({ "summary": summary })))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    payload: Result<Json<AddToCart>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let product = product_ref(body.product_id)?;
    let quantity = quantity(body.quantity.or(Some(QuantityInput::Count(1))))?;
    let cart = state
        .carts
        .add_item(user, product, quantity)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to add product to cart"))?;
    Ok(Json(json!({
        "message": "Product added to cart successfully",
        "cart": cart,
    })))
}

pub async fn update_quantity(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    Path(product_id): Path<String>,
    payload: Result<Json<UpdateQuantity>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let quantity = quantity(body.quantity)?;
    let product = cart_line(&product_id)?;
    let cart = state
        .carts
        .set_quantity(user, product, quantity)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to update cart"))?;
    Ok(Json(json!({
        "message": "Cart updated successfully",
        "cart": cart,
    })))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = cart_line(&product_id)?;
    let remaining = state
        .carts
        .remove_item(user, product)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to remove product from cart"))?;
    Ok(Json(match remaining {
        Some(cart) => json!({ "message": "Product removed from cart", "cart": cart }),
        None => json!({ "message": "Product removed and cart is now empty" }),
    }))
}

pub async fn apply_coupon(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    payload: Result<Json<ApplyCoupon>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let cart = state
        .carts
        .apply_coupon(user, body.coupon_code)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to apply coupon"))?;
    Ok(Json(json!({ "cart": cart })))
}

pub async fn remove_coupon(
    State(state): State<AppState>,
    CallerId(user): CallerId,
) -> Result<Json<Value>, ApiError> {
    let cart = state
        .carts
        .remove_coupon(user)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to remove coupon"))?;
    Ok(Json(json!({ "cart": cart })))
}
