/**
 * Course Handlers
 *
 * CRUD handlers for `/courses`. Creation and update require a token; delete
 * additionally requires an administrator or manager role. Both gates are
 * applied in the router, not here.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::courses::db::CourseStore;
use crate::backend::courses::models::{Course, CourseInput};
use crate::backend::error::ApiError;
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::shared::{Envelope, Pagination};

pub const COURSE_NOT_FOUND: &str = "course not found";

#[derive(Serialize, Debug)]
pub struct CoursesData {
    pub courses: Vec<Course>,
}

#[derive(Serialize, Debug)]
pub struct CourseData {
    pub course: Course,
}

fn not_found(id: Uuid) -> ApiError {
    tracing::warn!("Course not found: {}", id);
    ApiError::fail(StatusCode::NOT_FOUND, COURSE_NOT_FOUND)
}

/// GET /courses
pub async fn list_courses(
    State(store): State<Arc<dyn CourseStore>>,
    ApiQuery(page): ApiQuery<Pagination>,
) -> Result<Json<Envelope<CoursesData>>, ApiError> {
    let courses = store.list(page).await?;
    Ok(Json(Envelope::success(CoursesData { courses })))
}

/// GET /courses/{course_id}
pub async fn get_course(
    State(store): State<Arc<dyn CourseStore>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<CourseData>>, ApiError> {
    let course = store.get(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(Envelope::success(CourseData { course })))
}

/// POST /courses
///
/// Validation failures answer 400 with the list of offending fields.
pub async fn add_course(
    State(store): State<Arc<dyn CourseStore>>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<(StatusCode, Json<Envelope<CourseData>>), ApiError> {
    let course = Course::create(input.validate_new()?);
    store.insert(&course).await?;
    tracing::info!("Course created: {} ({})", course.title, course.id);
    Ok((StatusCode::CREATED, Json(Envelope::success(CourseData { course }))))
}

/// PATCH /courses/{course_id}
///
/// A body without any field leaves the course untouched.
pub async fn update_course(
    State(store): State<Arc<dyn CourseStore>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<Json<Envelope<CourseData>>, ApiError> {
    let patch = input.validate_patch()?;
    if patch.is_empty() {
        let course = store.get(id).await?.ok_or_else(|| not_found(id))?;
        return Ok(Json(Envelope::success(CourseData { course })));
    }

    let course = store.update(id, patch).await?.ok_or_else(|| not_found(id))?;
    tracing::info!("Course updated: {}", course.id);
    Ok(Json(Envelope::success(CourseData { course })))
}

/// DELETE /courses/{course_id}
///
/// Answers `{ "status": "success", "data": null }`.
pub async fn delete_course(
    State(store): State<Arc<dyn CourseStore>>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Option<()>>>, ApiError> {
    if !store.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!("Course deleted: {}", id);
    Ok(Json(Envelope::success(None)))
}
