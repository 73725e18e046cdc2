use async_trait::async_trait;

use crate::domain::items::item::Item;

/// Every query takes `(id, owner_id)` as a compound key so that an item
/// owned by someone else is indistinguishable from a missing one.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Items for one owner, newest first (descending id).
    async fn list_for_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Item>>;

    async fn insert(
        &self,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Item>;

    async fn get_owned(&self, id: i64, owner_id: i64) -> anyhow::Result<Option<Item>>;

    /// Returns `None` when no row matches both id and owner.
    async fn update_owned(
        &self,
        id: i64,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Option<Item>>;

    /// Returns whether a row was deleted; zero matches is not an error.
    async fn delete_owned(&self, id: i64, owner_id: i64) -> anyhow::Result<bool>;
}
