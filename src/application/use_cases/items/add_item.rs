use crate::application::AppError;
use crate::application::ports::item_repository::ItemRepository;
use crate::domain::items::item::Item;

pub struct AddItem<'a, R: ItemRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ItemRepository + ?Sized> AddItem<'a, R> {
    pub async fn execute(
        &self,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Item, AppError> {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        Ok(self.repo.insert(owner_id, title, description).await?)
    }
}
