//! Custom actions for the User actor.

use crate::model::NewAddress;

/// Address book operations on a [`User`](crate::model::User).
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Appends an address and returns it with its assigned id.
    ///
    /// The first address of a user always becomes the default; a new default address
    /// clears the flag on every other one.
    AddAddress(NewAddress),
}
