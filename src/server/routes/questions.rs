use std::collections::BTreeMap;

use anyhow::anyhow;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::categories::{get_all_categories, get_category};
use crate::db::queries::questions;
use crate::db::{Category, Question};
use crate::server::app::AppState;

use super::{category_map, ApiError, ApiJson, ApiResponse};

const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
struct ListParams {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_number_from_string"
    )]
    page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Deserialize)]
struct NewQuestion {
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: i64,
    current_category: Category,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: i64,
    #[serde(rename = "currentCategory")]
    current_category: Category,
}

#[derive(Serialize)]
struct DeletedQuestion {
    id: i64,
}

#[derive(Serialize)]
struct CreatedQuestion {
    question: Question,
}

// current_category is the category of the last question on the returned
// page; the client UI relies on this
async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListParams>,
) -> ApiResponse<Json<QuestionsPage>> {
    if params.page < 1 {
        return Err(ApiError::NotFound);
    }
    let all = questions::get_all_questions(&pool).await?;
    let total_questions = all.len() as i64;
    let start = (params.page as usize - 1).saturating_mul(QUESTIONS_PER_PAGE);
    let page: Vec<Question> = all
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect();
    let last = page.last().ok_or(ApiError::NotFound)?;
    let current_category = get_category(&pool, last.category).await?.ok_or_else(|| {
        anyhow!(
            "question {} references missing category {}",
            last.id,
            last.category
        )
    })?;
    let categories = category_map(get_all_categories(&pool).await?);
    Ok(Json(QuestionsPage {
        total_questions,
        current_category,
        categories,
        questions: page,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<DeletedQuestion>> {
    let deleted = questions::delete_question(&pool, id).await?;
    if deleted == 0 {
        return Err(ApiError::BadRequest);
    }
    Ok(Json(DeletedQuestion { id }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(new_question): ApiJson<NewQuestion>,
) -> ApiResponse<Json<CreatedQuestion>> {
    let id = questions::create_question(
        &pool,
        &new_question.question,
        &new_question.answer,
        new_question.category,
        new_question.difficulty,
    )
    .await?;

    let question = questions::get_question_by_id(&pool, id)
        .await?
        .ok_or_else(|| anyhow!("created question {id} is missing"))?;
    Ok(Json(CreatedQuestion { question }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let matches = questions::search_questions(&pool, &body.search_term).await?;
    let current_category = match matches.last() {
        Some(last) => get_category(&pool, last.category).await?.ok_or_else(|| {
            anyhow!(
                "question {} references missing category {}",
                last.id,
                last.category
            )
        })?,
        None => Category {
            id: 0,
            kind: String::new(),
        },
    };
    Ok(Json(SearchResults {
        total_questions: matches.len() as i64,
        current_category,
        questions: matches,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(search_questions))
        .route("/questions/add", post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
