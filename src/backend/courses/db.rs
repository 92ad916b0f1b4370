/**
 * Course Persistence
 *
 * `CourseStore` is the seam between the course handlers and storage, with a
 * Postgres implementation and an in-process one for running without a
 * database.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::courses::models::{Course, CoursePatch};
use crate::backend::db::{limit_offset, StoreError};
use crate::shared::Pagination;

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list(&self, page: Pagination) -> Result<Vec<Course>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Course>, StoreError>;

    async fn insert(&self, course: &Course) -> Result<(), StoreError>;

    /// Apply `patch`; `None` when no course has this id
    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Option<Course>, StoreError>;

    /// `false` when no course has this id
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            title: row.title,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed [`CourseStore`]
#[derive(Debug, Clone)]
pub struct PgCourseStore {
    pool: PgPool,
}

impl PgCourseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Course>, StoreError> {
        let (limit, offset) = limit_offset(&page);
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, price, created_at, updated_at
            FROM courses
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, price, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Course::from))
    }

    async fn insert(&self, course: &Course) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO courses (id, title, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(course.id)
        .bind(&course.title)
        .bind(course.price)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Option<Course>, StoreError> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET title = COALESCE($2, title),
                price = COALESCE($3, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, price, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Course::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-process [`CourseStore`], used when no database is configured
#[derive(Debug, Default)]
pub struct MemoryCourseStore {
    courses: RwLock<Vec<Course>>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn list(&self, page: Pagination) -> Result<Vec<Course>, StoreError> {
        let courses = self.courses.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(courses.iter().skip(skip).take(take).cloned().collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Course>, StoreError> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, course: &Course) -> Result<(), StoreError> {
        let mut courses = self.courses.write().await;
        if courses.iter().any(|c| c.id == course.id) {
            return Err(StoreError::Duplicate);
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: CoursePatch) -> Result<Option<Course>, StoreError> {
        let mut courses = self.courses.write().await;
        Ok(courses.iter_mut().find(|c| c.id == id).map(|course| {
            course.apply(patch);
            course.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut courses = self.courses.write().await;
        let before = courses.len();
        courses.retain(|c| c.id != id);
        Ok(courses.len() != before)
    }
}
