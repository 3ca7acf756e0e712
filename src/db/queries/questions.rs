use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as(
        r#"
SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as(
        r#"
SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as(
        r#"
SELECT id, question, answer, category, difficulty FROM questions WHERE category = ?1 ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

// SQLite LIKE is case-insensitive for ASCII; "%"/"_" in the term act as wildcards
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let pattern = format!("%{term}%");
    sqlx::query_as(
        r#"
SELECT id, question, answer, category, difficulty FROM questions WHERE question LIKE ?1 ORDER BY id
        "#,
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

pub async fn create_question(
    pool: &SqlitePool,
    question: &str,
    answer: &str,
    category: i64,
    difficulty: i64,
) -> anyhow::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    for question in questions {
        sqlx::query(
            r#"
INSERT OR REPLACE INTO questions (id, question, answer, category, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
