//! Custom actions for the Order actor: the status state machine.

use crate::model::{OrderStatus, UserId};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Customer cancellation. Only the owner may cancel, and only a non-terminal order.
    Cancel {
        requested_by: UserId,
        reason: Option<String>,
    },
    /// Fulfillment-side move along `processing -> confirmed -> shipped -> delivered`.
    Advance {
        status: OrderStatus,
        note: Option<String>,
    },
}
