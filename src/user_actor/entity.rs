//! [`ActorEntity`] implementation for [`User`].

use super::actions::UserAction;
use super::error::UserError;
use crate::model::{AddressId, SavedAddress, User, UserCreate, UserId, UserUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

fn normalize_email(email: &str) -> Result<String, UserError> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(UserError::ValidationError(format!(
            "Invalid email address: {email:?}"
        )));
    }
    Ok(email)
}

fn validate_name(name: &str) -> Result<String, UserError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UserError::ValidationError("Name is required".into()));
    }
    Ok(name.to_string())
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = UserAction;
    type ActionResult = SavedAddress;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let name = validate_name(&params.name)?;
        let email = normalize_email(&params.email)?;
        Ok(Self::new(id, name, email))
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        // Validate everything before touching the document.
        let name = update.name.as_deref().map(validate_name).transpose()?;
        let email = update.email.as_deref().map(normalize_email).transpose()?;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: UserAction,
        _ctx: &(),
    ) -> Result<SavedAddress, Self::Error> {
        match action {
            UserAction::AddAddress(new) => {
                let missing = new.address.missing_fields();
                if !missing.is_empty() {
                    return Err(UserError::ValidationError(format!(
                        "Address is missing: {}",
                        missing.join(", ")
                    )));
                }

                let next = self.addresses.iter().map(|a| a.id.0).max().unwrap_or(0) + 1;
                let is_default = new.is_default || self.addresses.is_empty();
                if is_default {
                    for existing in &mut self.addresses {
                        existing.is_default = false;
                    }
                }
                let saved = SavedAddress {
                    id: AddressId(next),
                    kind: new.kind,
                    address: new.address,
                    is_default,
                };
                self.addresses.push(saved.clone());
                Ok(saved)
            }
        }
    }
}
