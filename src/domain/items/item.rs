#[derive(Debug, Clone)]
pub struct Item {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
}
