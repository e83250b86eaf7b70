use coursetrack::db;
use coursetrack::db::repository;
use coursetrack::error::AppError;
use coursetrack::models::{NewAssignmentRequest, NewCourseRequest};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    db::init_schema(&pool).await.expect("Failed to init schema");
    pool
}

fn assignment(title: &str, due_date: &str, course_id: Option<i64>) -> NewAssignmentRequest {
    NewAssignmentRequest {
        title: title.to_string(),
        due_date: due_date.to_string(),
        course_id,
    }
}

#[tokio::test]
async fn well_formed_due_date_round_trips() {
    let db = test_pool().await;

    let created = repository::insert_assignment(&db, assignment("Essay", "2025-03-10", None))
        .await
        .expect("insert");
    assert!(!created.due_date_malformed);

    let stored = repository::find_assignment_by_id(&db, created.id)
        .await
        .expect("fetch")
        .expect("assignment exists");
    assert_eq!(stored.due_date.as_deref(), Some("2025-03-10"));
    assert!(!stored.is_complete);
}

#[tokio::test]
async fn malformed_due_date_is_stored_verbatim_with_warning() {
    let db = test_pool().await;

    let created = repository::insert_assignment(&db, assignment("Essay", "next tuesday", None))
        .await
        .expect("the write must still proceed");
    assert!(created.due_date_malformed);

    let stored = repository::find_assignment_by_id(&db, created.id)
        .await
        .expect("fetch")
        .expect("assignment exists");
    assert_eq!(stored.due_date.as_deref(), Some("next tuesday"));
}

#[tokio::test]
async fn empty_due_date_is_stored_as_null() {
    let db = test_pool().await;

    let created = repository::insert_assignment(&db, assignment("Essay", "  ", None))
        .await
        .expect("insert");
    assert!(!created.due_date_malformed);

    let stored = repository::find_assignment_by_id(&db, created.id)
        .await
        .expect("fetch")
        .expect("assignment exists");
    assert_eq!(stored.due_date, None);
}

#[tokio::test]
async fn blank_title_is_rejected_without_insert() {
    let db = test_pool().await;

    let err = repository::insert_assignment(&db, assignment("   ", "2025-03-10", None))
        .await
        .expect_err("blank title must fail");
    assert!(matches!(err, AppError::Validation(_)));

    let overview = repository::fetch_assignment_overview(&db)
        .await
        .expect("fetch");
    assert!(overview.is_empty());
}

#[tokio::test]
async fn toggle_is_its_own_inverse() {
    let db = test_pool().await;

    let created = repository::insert_assignment(&db, assignment("Quiz", "", None))
        .await
        .expect("insert");

    repository::toggle_assignment(&db, created.id)
        .await
        .expect("toggle");
    let stored = repository::find_assignment_by_id(&db, created.id)
        .await
        .expect("fetch")
        .expect("assignment exists");
    assert!(stored.is_complete);

    repository::toggle_assignment(&db, created.id)
        .await
        .expect("toggle");
    let stored = repository::find_assignment_by_id(&db, created.id)
        .await
        .expect("fetch")
        .expect("assignment exists");
    assert!(!stored.is_complete);
}

#[tokio::test]
async fn toggle_and_delete_on_missing_ids_are_noops() {
    let db = test_pool().await;

    repository::toggle_assignment(&db, 41).await.expect("toggle");
    repository::delete_assignment(&db, 41).await.expect("delete");

    let overview = repository::fetch_assignment_overview(&db)
        .await
        .expect("fetch");
    assert!(overview.is_empty());
}

#[tokio::test]
async fn unassigned_assignment_shows_null_course_title() {
    let db = test_pool().await;

    repository::insert_assignment(&db, assignment("Free reading", "", None))
        .await
        .expect("insert");

    let overview = repository::fetch_assignment_overview(&db)
        .await
        .expect("fetch");
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].course_title, None);
}

// The end-to-end shape: course, linked assignment, toggle, cascade delete.
#[tokio::test]
async fn course_lifecycle_scenario() {
    let db = test_pool().await;

    let course_id = repository::insert_course(
        &db,
        NewCourseRequest {
            title: "Algorithms".to_string(),
            description: String::new(),
        },
    )
    .await
    .expect("insert course");
    assert_eq!(course_id, 1);

    let created = repository::insert_assignment(&db, assignment("HW1", "2025-01-05", Some(course_id)))
        .await
        .expect("insert assignment");
    assert_eq!(created.id, 1);

    let overview = repository::fetch_assignment_overview(&db)
        .await
        .expect("fetch");
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].id, 1);
    assert_eq!(overview[0].title, "HW1");
    assert_eq!(overview[0].due_date.as_deref(), Some("2025-01-05"));
    assert!(!overview[0].is_complete);
    assert_eq!(overview[0].course_title.as_deref(), Some("Algorithms"));

    repository::toggle_assignment(&db, 1).await.expect("toggle");
    let stored = repository::find_assignment_by_id(&db, 1)
        .await
        .expect("fetch")
        .expect("assignment exists");
    assert!(stored.is_complete);

    repository::delete_course(&db, course_id)
        .await
        .expect("delete course");
    let overview = repository::fetch_assignment_overview(&db)
        .await
        .expect("fetch");
    assert!(overview.is_empty());
}
