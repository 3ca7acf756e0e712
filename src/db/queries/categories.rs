use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    // "type" in the schema and on the wire; renamed since it's a keyword
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as(
        r#"
SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as(
        r#"
SELECT id, type FROM categories WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT OR REPLACE INTO categories (id, type) VALUES (?1, ?2)
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
