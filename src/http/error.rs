//! HTTP error taxonomy.
//!
//! | Variant | Status |
//! |---|---|
//! | `Unauthorized` | 401 |
//! | `InvalidInput`, `InvalidState` | 400 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Internal` | 500 |
//!
//! Every error body is `{"message": ...}`; 500 responses also carry `"error"`.

use crate::cart_actor::CartError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

const DEFAULT_INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Unauthorized(String),
    InvalidInput(String),
    NotFound(String),
    Forbidden(String),
    InvalidState(String),
    /// Storage failure. `message` is route specific, `error` is the underlying cause.
    Internal { message: String, error: String },
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    fn internal(error: impl ToString) -> Self {
        Self::Internal {
            message: DEFAULT_INTERNAL_MESSAGE.to_string(),
            error: error.to_string(),
        }
    }

    /// Sets the route's failure message on a 500; other variants pass through.
    pub fn context(self, message: &str) -> Self {
        match self {
            Self::Internal { error, .. } => Self::Internal {
                message: message.to_string(),
                error,
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) | Self::InvalidState(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Internal { message, error } => {
                tracing::error!(%error, "{message}");
                json!({ "message": message, "error": error })
            }
            Self::Unauthorized(message)
            | Self::InvalidInput(message)
            | Self::NotFound(message)
            | Self::Forbidden(message)
            | Self::InvalidState(message) => {
                tracing::debug!(%status, %message, "Request rejected");
                json!({ "message": message })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => Self::not_found("Product not found"),
            ProductError::ValidationError(msg) => Self::InvalidInput(msg),
            ProductError::ActorCommunicationError(_) => Self::internal(e),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => Self::not_found("User not found"),
            UserError::ValidationError(msg) => Self::InvalidInput(msg),
            UserError::ActorCommunicationError(_) => Self::internal(e),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::InvalidQuantity => Self::invalid_input(e.to_string()),
            CartError::ProductNotFound(_) => Self::not_found("Product not found"),
            CartError::CartNotFound => Self::not_found("Cart not found"),
            CartError::ItemNotFound(_) => Self::not_found("Product not found in cart"),
            CartError::RevisionConflict { .. } => Self::InvalidState(e.to_string()),
            CartError::Catalog(inner) => inner.into(),
            CartError::ActorCommunicationError(_) => Self::internal(e),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => Self::not_found("Order not found"),
            OrderError::Forbidden(_) => Self::Forbidden(e.to_string()),
            OrderError::InvalidAddress(_) | OrderError::InvalidPayment(_) => {
                Self::invalid_input(e.to_string())
            }
            OrderError::ProductNotFound(_) => Self::not_found("Product not found"),
            OrderError::EmptyCart
            | OrderError::CartChanged
            | OrderError::NotCancellable(_)
            | OrderError::InvalidTransition { .. }
            | OrderError::Immutable => Self::InvalidState(e.to_string()),
            OrderError::Cart(inner) => inner.into(),
            OrderError::Catalog(inner) => inner.into(),
            OrderError::Directory(inner) => inner.into(),
            OrderError::ActorCommunicationError(_) => Self::internal(e),
        }
    }
}
