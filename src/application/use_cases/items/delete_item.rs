use crate::application::AppError;
use crate::application::ports::item_repository::ItemRepository;

pub struct DeleteItem<'a, R: ItemRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ItemRepository + ?Sized> DeleteItem<'a, R> {
    /// Deleting a missing or foreign item is a silent no-op.
    pub async fn execute(&self, owner_id: i64, item_id: i64) -> Result<(), AppError> {
        let _ = self.repo.delete_owned(item_id, owner_id).await?;
        Ok(())
    }
}
