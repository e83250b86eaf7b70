use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

/// Course id/title pair for the selection control on the assignment form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseOption {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub title: String,
    pub description: String,
}
