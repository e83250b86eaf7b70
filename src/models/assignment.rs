use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub due_date: Option<String>,
    pub course_id: Option<i64>,
    pub is_complete: bool,
}

/// Dashboard row: an assignment left-joined to its course, so the title is
/// null for unassigned assignments.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentOverview {
    pub id: i64,
    pub title: String,
    pub due_date: Option<String>,
    pub is_complete: bool,
    pub course_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignmentRequest {
    pub title: String,
    pub due_date: String,
    pub course_id: Option<i64>,
}

/// Result of an assignment insert. `due_date_malformed` is set when the
/// submitted due date did not parse as YYYY-MM-DD and was stored verbatim;
/// the write still happened.
#[derive(Debug, Clone)]
pub struct AssignmentCreated {
    pub id: i64,
    pub due_date_malformed: bool,
}
