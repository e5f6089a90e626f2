//! `/order` routes.

use super::auth::CallerId;
use super::error::ApiError;
use super::AppState;
use crate::model::{Address, AddressId, OrderCreate, OrderId, PaymentInfo, ShippingSelection};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// `shippingAddress` is either `{"addressId": ...}` naming a saved address or the
/// address itself. Absent fields are blank and rejected by checkout.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShippingInput {
    Saved {
        #[serde(rename = "addressId")]
        address_id: AddressId,
    },
    Inline(AddressInput),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AddressInput {
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    country: Option<String>,
}

impl From<AddressInput> for Address {
    fn from(input: AddressInput) -> Self {
        Address {
            street: input.street.unwrap_or_default(),
            city: input.city.unwrap_or_default(),
            state: input.state.unwrap_or_default(),
            zip_code: input.zip_code.unwrap_or_default(),
            country: input.country.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    shipping_address: Option<ShippingInput>,
    payment_info: Option<PaymentInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancelOrder {
    reason: Option<String>,
}

fn order_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_input("Invalid order ID format"))
}

pub async fn place_order(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    payload: Result<Json<PlaceOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(body) = payload?;
    let payment = body
        .payment_info
        .ok_or_else(|| ApiError::invalid_input("Payment info is required"))?;
    let shipping = match body.shipping_address {
        Some(ShippingInput::Saved { address_id }) => ShippingSelection::Saved(address_id),
        Some(ShippingInput::Inline(address)) => ShippingSelection::Inline(address.into()),
        None => ShippingSelection::Inline(Address::default()),
    };
    let order = state
        .orders
        .place_order(OrderCreate {
            owner: user,
            shipping,
            payment,
        })
        .await
        .map_err(|e| ApiError::from(e).context("Failed to create order"))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Order placed successfully",
            "order": order,
        })),
    ))
}

pub async fn list_orders(
    State(state): State<AppState>,
    CallerId(user): CallerId,
) -> Result<Json<Value>, ApiError> {
    let orders = state
        .orders
        .list_orders(user)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch orders"))?;
    Ok(Json(json!({
        "success": true,
        "count": orders.len(),
        "orders": orders,
    })))
}

pub async fn order_stats(
    State(state): State<AppState>,
    CallerId(user): CallerId,
) -> Result<Json<Value>, ApiError> {
    let stats = state
        .orders
        .order_stats(user)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch order statistics"))?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

pub async fn get_order(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = order_id(&id)?;
    let order = state
        .orders
        .get_order(user, id)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to fetch order details"))?;
    Ok(Json(json!({ "success": true, "order": order })))
}

/// The body is optional; `{}` and no body at all both cancel without a reason.
pub async fn cancel_order(
    State(state): State<AppState>,
    CallerId(user): CallerId,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = order_id(&id)?;
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CancelOrder::default()
    } else {
        serde_json::from_slice::<CancelOrder>(&body)
            .map_err(|e| ApiError::invalid_input(format!("Invalid request body: {e}")))?
    };
    let order = state
        .orders
        .cancel_order(user, id, request.reason)
        .await
        .map_err(|e| ApiError::from(e).context("Failed to cancel order"))?;
    Ok(Json(json!({
        "success": true,
        "message": "Order cancelled successfully",
        "order": order,
    })))
}
