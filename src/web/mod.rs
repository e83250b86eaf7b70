pub mod notice;

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tera::Context;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{CourseOption, NewAssignmentRequest, NewCourseRequest};
use crate::state::AppState;
use crate::web::notice::Notice;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(login))
        .route("/health", get(health))
        .route("/dashboard", get(dashboard))
        .route("/courses/add", get(add_course_form).post(add_course))
        .route("/courses/delete/{course_id}", post(delete_course))
        .route(
            "/assignments/add",
            get(add_assignment_form).post(add_assignment),
        )
        .route(
            "/assignments/complete/{assignment_id}",
            post(toggle_assignment),
        )
        .route("/assignments/delete/{assignment_id}", post(delete_assignment))
        .route("/help", get(help))
        .with_state(state)
}

#[derive(Deserialize)]
struct DashboardQuery {
    notice: Option<String>,
}

#[derive(Deserialize)]
struct CourseForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct AssignmentForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    due_date: String,
    #[serde(default)]
    course_id: String,
}

fn render(state: &AppState, name: &str, ctx: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render(name, ctx)?))
}

/// Redirect to the dashboard, carrying notice codes in the query string so
/// the next render can resolve them.
fn to_dashboard(codes: &[&str]) -> Redirect {
    if codes.is_empty() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to(&format!("/dashboard?notice={}", codes.join(",")))
    }
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn login(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut ctx = Context::new();
    ctx.insert("notices", &Vec::<Notice>::new());
    render(&state, "login.html", &ctx)
}

async fn help(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut ctx = Context::new();
    ctx.insert("notices", &Vec::<Notice>::new());
    render(&state, "help.html", &ctx)
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    let assignments = repository::fetch_assignment_overview(&state.db).await?;
    let notices = query
        .notice
        .as_deref()
        .map(Notice::parse_codes)
        .unwrap_or_default();

    let mut ctx = Context::new();
    ctx.insert("courses", &courses);
    ctx.insert("assignments", &assignments);
    ctx.insert("notices", &notices);
    render(&state, "dashboard.html", &ctx)
}

async fn add_course_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let ctx = course_form_context("", "", &[]);
    render(&state, "add_course.html", &ctx)
}

async fn add_course(
    State(state): State<AppState>,
    Form(form): Form<CourseForm>,
) -> Result<Response, AppError> {
    let req = NewCourseRequest {
        title: form.title.clone(),
        description: form.description.clone(),
    };
    match repository::insert_course(&state.db, req).await {
        Ok(id) => {
            info!("created course {}", id);
            Ok(to_dashboard(&[notice::COURSE_SAVED]).into_response())
        }
        Err(AppError::Validation(message)) => {
            let ctx = course_form_context(&form.title, &form.description, &[Notice::error(message)]);
            Ok(render(&state, "add_course.html", &ctx)?.into_response())
        }
        Err(err) => Err(err),
    }
}

async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<Redirect, AppError> {
    repository::delete_course(&state.db, course_id).await?;
    info!("deleted course {} and its assignments", course_id);
    Ok(to_dashboard(&[notice::COURSE_DELETED]))
}

async fn add_assignment_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let courses = repository::fetch_course_options(&state.db).await?;
    let ctx = assignment_form_context(&courses, "", "", &[]);
    render(&state, "add_assignment.html", &ctx)
}

async fn add_assignment(
    State(state): State<AppState>,
    Form(form): Form<AssignmentForm>,
) -> Result<Response, AppError> {
    let req = NewAssignmentRequest {
        title: form.title.clone(),
        due_date: form.due_date.clone(),
        course_id: form.course_id.trim().parse::<i64>().ok(),
    };
    match repository::insert_assignment(&state.db, req).await {
        Ok(created) => {
            info!("created assignment {}", created.id);
            let codes: &[&str] = if created.due_date_malformed {
                &[notice::DUE_DATE_HINT, notice::ASSIGNMENT_SAVED]
            } else {
                &[notice::ASSIGNMENT_SAVED]
            };
            Ok(to_dashboard(codes).into_response())
        }
        Err(AppError::Validation(message)) => {
            let courses = repository::fetch_course_options(&state.db).await?;
            let ctx = assignment_form_context(
                &courses,
                &form.title,
                &form.due_date,
                &[Notice::error(message)],
            );
            Ok(render(&state, "add_assignment.html", &ctx)?.into_response())
        }
        Err(err) => Err(err),
    }
}

async fn toggle_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Redirect, AppError> {
    repository::toggle_assignment(&state.db, assignment_id).await?;
    Ok(to_dashboard(&[]))
}

async fn delete_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Redirect, AppError> {
    repository::delete_assignment(&state.db, assignment_id).await?;
    info!("deleted assignment {}", assignment_id);
    Ok(to_dashboard(&[notice::ASSIGNMENT_DELETED]))
}

fn course_form_context(title: &str, description: &str, notices: &[Notice]) -> Context {
    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("description", description);
    ctx.insert("notices", notices);
    ctx
}

fn assignment_form_context(
    courses: &[CourseOption],
    title: &str,
    due_date: &str,
    notices: &[Notice],
) -> Context {
    let mut ctx = Context::new();
    ctx.insert("courses", courses);
    ctx.insert("title", title);
    ctx.insert("due_date", due_date);
    ctx.insert("notices", notices);
    ctx
}
