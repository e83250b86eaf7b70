use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{
    Assignment, AssignmentCreated, AssignmentOverview, Course, CourseOption, NewAssignmentRequest,
    NewCourseRequest,
};

/// Ensure both tables exist. Safe to run on every process start.
pub async fn init_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assignments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            due_date TEXT,
            course_id INTEGER,
            is_complete INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>("SELECT id, title, description FROM courses ORDER BY id DESC")
        .fetch_all(db)
        .await
}

/// Courses ordered for the assignment form's picker. Selection order is
/// alphabetical, unlike the newest-first dashboard listing.
pub async fn fetch_course_options(db: &SqlitePool) -> Result<Vec<CourseOption>, sqlx::Error> {
    sqlx::query_as::<_, CourseOption>("SELECT id, title FROM courses ORDER BY title ASC")
        .fetch_all(db)
        .await
}

pub async fn insert_course(db: &SqlitePool, req: NewCourseRequest) -> Result<i64, AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Course title is required.".to_string()));
    }
    let description = match req.description.trim() {
        "" => None,
        d => Some(d.to_string()),
    };

    let result = sqlx::query("INSERT INTO courses (title, description) VALUES (?1, ?2)")
        .bind(title)
        .bind(description)
        .execute(db)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Deletes the course and every assignment pointing at it in one
/// transaction. Missing ids are a silent no-op.
pub async fn delete_course(db: &SqlitePool, course_id: i64) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM assignments WHERE course_id = ?1")
        .bind(course_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}

pub async fn fetch_assignment_overview(
    db: &SqlitePool,
) -> Result<Vec<AssignmentOverview>, sqlx::Error> {
    sqlx::query_as::<_, AssignmentOverview>(
        r#"
        SELECT a.id, a.title, a.due_date, a.is_complete, c.title AS course_title
        FROM assignments a
        LEFT JOIN courses c ON a.course_id = c.id
        ORDER BY a.id DESC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_assignment_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, title, due_date, course_id, is_complete FROM assignments WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_assignment(
    db: &SqlitePool,
    req: NewAssignmentRequest,
) -> Result<AssignmentCreated, AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation(
            "Assignment title is required.".to_string(),
        ));
    }
    let (due_date, due_date_malformed) = normalize_due_date(&req.due_date);

    let result = sqlx::query(
        "INSERT INTO assignments (title, due_date, course_id, is_complete) VALUES (?1, ?2, ?3, 0)",
    )
    .bind(title)
    .bind(due_date)
    .bind(req.course_id)
    .execute(db)
    .await?;

    Ok(AssignmentCreated {
        id: result.last_insert_rowid(),
        due_date_malformed,
    })
}

/// Flips `is_complete`. Missing ids are a silent no-op.
pub async fn toggle_assignment(db: &SqlitePool, assignment_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE assignments SET is_complete = NOT is_complete WHERE id = ?1")
        .bind(assignment_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete_assignment(db: &SqlitePool, assignment_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM assignments WHERE id = ?1")
        .bind(assignment_id)
        .execute(db)
        .await?;
    Ok(())
}

/// Normalizes a submitted due date. A parseable YYYY-MM-DD value is
/// re-formatted to that pattern; anything else is kept verbatim with the
/// malformed flag set. Empty input maps to NULL.
fn normalize_due_date(raw: &str) -> (Option<String>, bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (None, false);
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => (Some(date.format("%Y-%m-%d").to_string()), false),
        Err(_) => (Some(trimmed.to_string()), true),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_due_date;

    #[test]
    fn due_date_round_trips_when_well_formed() {
        assert_eq!(
            normalize_due_date("2025-03-10"),
            (Some("2025-03-10".to_string()), false)
        );
    }

    #[test]
    fn due_date_is_zero_padded_on_reformat() {
        assert_eq!(
            normalize_due_date("2025-1-5"),
            (Some("2025-01-05".to_string()), false)
        );
    }

    #[test]
    fn malformed_due_date_is_kept_verbatim() {
        assert_eq!(
            normalize_due_date("next tuesday"),
            (Some("next tuesday".to_string()), true)
        );
    }

    #[test]
    fn empty_due_date_maps_to_none() {
        assert_eq!(normalize_due_date(""), (None, false));
        assert_eq!(normalize_due_date("   "), (None, false));
    }
}
