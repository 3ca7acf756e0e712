use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions::{get_all_questions, get_questions_for_category};
use crate::db::Question;
use crate::server::app::AppState;
use crate::telemetry::QUIZ_CNTR;

use super::{ApiJson, ApiResponse};

#[derive(Deserialize)]
struct QuizRequest {
    quiz_category: QuizCategory,
    previous_questions: Vec<i64>,
}

// category id 0 means "all categories"
#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    question: QuizDraw,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuizDraw {
    Drawn(Question),
    // serialized as `"question": false` when no eligible question remains
    Exhausted(bool),
}

async fn draw_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizResponse>> {
    let candidates = match request.quiz_category.id {
        0 => get_all_questions(&pool).await?,
        id => get_questions_for_category(&pool, id).await?,
    };
    let mut eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !request.previous_questions.contains(&q.id))
        .collect();

    if eligible.is_empty() {
        return Ok(Json(QuizResponse {
            question: QuizDraw::Exhausted(false),
        }));
    }

    let drawn = eligible.swap_remove(rand::thread_rng().gen_range(0..eligible.len()));
    QUIZ_CNTR
        .with_label_values(&[drawn.category.to_string().as_str()])
        .inc();
    Ok(Json(QuizResponse {
        question: QuizDraw::Drawn(drawn),
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(draw_question))
        .with_state(state)
}
