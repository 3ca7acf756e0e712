mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub(crate) use super::error::{ApiError, ApiJson, ApiResponse};

use crate::db::Category;

// JSON object keys are strings, so i64 ids serialize as "1", "2", ...
fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
