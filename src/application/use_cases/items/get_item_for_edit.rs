use crate::application::AppError;
use crate::application::ports::item_repository::ItemRepository;
use crate::domain::items::item::Item;

pub struct GetItemForEdit<'a, R: ItemRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ItemRepository + ?Sized> GetItemForEdit<'a, R> {
    /// "Exists but owned by someone else" and "does not exist" both come
    /// back as `NotFound`, so item ids cannot be probed across accounts.
    pub async fn execute(&self, owner_id: i64, item_id: i64) -> Result<Item, AppError> {
        self.repo
            .get_owned(item_id, owner_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
