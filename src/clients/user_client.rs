use crate::model::{AddressId, NewAddress, SavedAddress, User, UserCreate, UserId};
use crate::user_actor::{UserAction, UserError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<UserError>() {
            Ok(user_error) => user_error,
            Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
            Err(other) => UserError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl UserClient {
    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Adds an address to the user's address book.
    #[instrument(skip(self, address))]
    pub async fn add_address(
        &self,
        id: UserId,
        address: NewAddress,
    ) -> Result<SavedAddress, UserError> {
        debug!(?address, "Sending request");
        self.inner
            .perform_action(id, UserAction::AddAddress(address))
            .await
            .map_err(Self::map_error)
    }

    /// Looks up one saved address. `Ok(None)` when the user exists but has no such address.
    #[instrument(skip(self))]
    pub async fn saved_address(
        &self,
        id: UserId,
        address: AddressId,
    ) -> Result<Option<SavedAddress>, UserError> {
        let user = self
            .get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        Ok(user.address(address).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, AddressType};
    use actor_framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_add_address_sends_action() {
        let (client, mut receiver) = create_mock_client::<User>(10);
        let user_client = UserClient::new(client);

        let new = NewAddress {
            kind: AddressType::Work,
            address: Address::default(),
            is_default: false,
        };
        let task = tokio::spawn(async move { user_client.add_address(UserId(3), new).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, UserId(3));
        let UserAction::AddAddress(sent) = action;
        assert_eq!(sent.kind, AddressType::Work);

        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                UserError::ValidationError("Address is missing: street".into()),
            ))))
            .unwrap();

        let result = task.await.unwrap();
        assert_eq!(
            result.unwrap_err(),
            UserError::ValidationError("Address is missing: street".into())
        );
    }

    #[tokio::test]
    async fn test_framework_errors_are_mapped() {
        let (client, receiver) = create_mock_client::<User>(10);
        let user_client = UserClient::new(client);
        drop(receiver);

        let result = user_client
            .create_user(UserCreate {
                name: "A".into(),
                email: "a@b.c".into(),
            })
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::ActorCommunicationError(_)
        ));
        assert_eq!(
            UserClient::map_error(FrameworkError::NotFound("user_9".into())),
            UserError::NotFound("user_9".into())
        );
    }
}
