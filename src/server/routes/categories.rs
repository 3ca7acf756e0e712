use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, get_category};
use crate::db::queries::questions::get_questions_for_category;
use crate::db::{Category, Question};
use crate::server::app::AppState;

use super::{category_map, ApiError, ApiResponse};

#[derive(Serialize)]
struct AllCategories {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions: i64,
    #[serde(rename = "currentCategory")]
    current_category: Category,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<AllCategories>> {
    let categories = get_all_categories(&pool).await?;
    Ok(Json(AllCategories {
        categories: category_map(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let current_category = get_category(&pool, id).await?.ok_or(ApiError::NotFound)?;
    let questions = get_questions_for_category(&pool, id).await?;
    Ok(Json(CategoryQuestions {
        total_questions: questions.len() as i64,
        questions,
        current_category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
