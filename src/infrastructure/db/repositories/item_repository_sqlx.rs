use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::item_repository::ItemRepository;
use crate::domain::items::item::Item;
use crate::infrastructure::db::PgPool;

pub struct SqlxItemRepository {
    pub pool: PgPool,
}

impl SqlxItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(r: &sqlx::postgres::PgRow) -> Item {
    Item {
        id: r.get("id"),
        owner_id: r.get("user_id"),
        title: r.get("title"),
        description: r.get("description"),
    }
}

#[async_trait]
impl ItemRepository for SqlxItemRepository {
    async fn list_for_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, title, description FROM items
               WHERE user_id = $1 ORDER BY id DESC"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_item).collect())
    }

    async fn insert(
        &self,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Item> {
        let row = sqlx::query(
            r#"INSERT INTO items (user_id, title, description) VALUES ($1, $2, $3)
               RETURNING id, user_id, title, description"#,
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_item(&row))
    }

    async fn get_owned(&self, id: i64, owner_id: i64) -> anyhow::Result<Option<Item>> {
        let row = sqlx::query(
            r#"SELECT id, user_id, title, description FROM items
               WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_item))
    }

    async fn update_owned(
        &self,
        id: i64,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Option<Item>> {
        let row = sqlx::query(
            r#"UPDATE items SET title = $3, description = $4
               WHERE id = $1 AND user_id = $2
               RETURNING id, user_id, title, description"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_item))
    }

    async fn delete_owned(&self, id: i64, owner_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
