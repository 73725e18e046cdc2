use crate::application::AppError;
use crate::application::ports::item_repository::ItemRepository;
use crate::domain::items::item::Item;

pub struct ListItems<'a, R: ItemRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ItemRepository + ?Sized> ListItems<'a, R> {
    pub async fn execute(&self, owner_id: i64) -> Result<Vec<Item>, AppError> {
        Ok(self.repo.list_for_owner(owner_id).await?)
    }
}
