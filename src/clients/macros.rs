/// Generates `get_`, `upsert_` and `delete_` methods on a client for one of the repositories
/// it wraps.
///
/// `$field` names the `ResourceClient` field; `$error` must implement `From<FrameworkError>`.
macro_rules! impl_repository_methods {
    ($client:ident, $field:ident, $entity:ty, $id:ty, $error:ty, $snake:ident) => {
        paste::paste! {
            impl $client {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $snake>](&self, id: $id) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.$field.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self, item))]
                pub async fn [<upsert_ $snake>](&self, item: $entity) -> Result<$entity, $error> {
                    tracing::debug!("Sending request");
                    self.$field.upsert(item).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $snake>](&self, id: $id) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.$field.delete(id).await.map_err(<$error>::from)
                }
            }
        }
    };
}
