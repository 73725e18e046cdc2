pub mod add_item;
pub mod delete_item;
pub mod get_item_for_edit;
pub mod list_items;
pub mod update_item;
