use crate::favorite_actor::FavoriteError;
use crate::model::{CustomerId, FavoriteCreate, FavoriteId, FavoriteOrder, FavoriteUpdate, OrderItem};
use async_trait::async_trait;
use resource_framework::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for customers' saved favorites.
#[derive(Clone)]
pub struct FavoriteClient {
    inner: ResourceClient<FavoriteOrder>,
}

#[async_trait]
impl ActorClient<FavoriteOrder> for FavoriteClient {
    type Error = FavoriteError;

    fn inner(&self) -> &ResourceClient<FavoriteOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        FavoriteError::from(e)
    }
}

impl FavoriteClient {
    pub fn new(inner: ResourceClient<FavoriteOrder>) -> Self {
        Self { inner }
    }

    /// Saves `items` under `name`. The items are stored as given, ids included.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn add_favorite(
        &self,
        customer: CustomerId,
        name: &str,
        items: Vec<OrderItem>,
    ) -> Result<FavoriteId, FavoriteError> {
        debug!("Sending request");
        self.inner
            .create(FavoriteCreate {
                customer_id: customer,
                name: name.to_string(),
                items,
            })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn get_favorite_orders(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<FavoriteOrder>, FavoriteError> {
        debug!("Sending request");
        let favorites = self.list().await?;
        Ok(favorites
            .into_iter()
            .filter(|f| f.customer_id == customer)
            .collect())
    }

    /// Like [`get`](ActorClient::get) but a missing favorite is an error.
    #[instrument(skip(self))]
    pub async fn get_favorite(&self, id: FavoriteId) -> Result<FavoriteOrder, FavoriteError> {
        self.get(id.clone())
            .await?
            .ok_or(FavoriteError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update_favorite(
        &self,
        id: FavoriteId,
        update: FavoriteUpdate,
    ) -> Result<FavoriteOrder, FavoriteError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    pub async fn rename_favorite(
        &self,
        id: FavoriteId,
        name: &str,
    ) -> Result<FavoriteOrder, FavoriteError> {
        self.update_favorite(
            id,
            FavoriteUpdate {
                name: Some(name.to_string()),
                items: None,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoffeeType;
    use resource_framework::mock::MockClient;

    fn favorite(id: &str, customer: &str) -> FavoriteOrder {
        FavoriteOrder {
            id: FavoriteId::new(id),
            customer_id: CustomerId::new(customer),
            name: "Morning".to_string(),
            items: vec![OrderItem::new("espresso", CoffeeType::Regular, 5.0)],
        }
    }

    #[tokio::test]
    async fn favorites_are_listed_per_customer() {
        let mut mock = MockClient::<FavoriteOrder>::new();
        mock.expect_list().return_ok(vec![
            favorite("favorite_1", "ana"),
            favorite("favorite_2", "ben"),
            favorite("favorite_3", "ana"),
        ]);

        let client = FavoriteClient::new(mock.client());
        let ids: Vec<String> = client
            .get_favorite_orders(CustomerId::new("ana"))
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id.to_string())
            .collect();

        assert_eq!(ids, vec!["favorite_1", "favorite_3"]);
        mock.verify();
    }

    #[tokio::test]
    async fn missing_favorite_is_not_found() {
        let mut mock = MockClient::<FavoriteOrder>::new();
        mock.expect_get(FavoriteId::new("favorite_9")).return_ok(None);

        let client = FavoriteClient::new(mock.client());
        let err = client
            .get_favorite(FavoriteId::new("favorite_9"))
            .await
            .unwrap_err();

        assert_eq!(err, FavoriteError::NotFound(FavoriteId::new("favorite_9")));
    }

    #[tokio::test]
    async fn entity_errors_survive_the_round_trip() {
        let mut mock = MockClient::<FavoriteOrder>::new();
        mock.expect_update(FavoriteId::new("favorite_1"))
            .return_err(FrameworkError::EntityError(Box::new(FavoriteError::BlankName)));

        let client = FavoriteClient::new(mock.client());
        let err = client
            .rename_favorite(FavoriteId::new("favorite_1"), "  ")
            .await
            .unwrap_err();

        assert_eq!(err, FavoriteError::BlankName);
    }
}
