//! Courses Module
//!
//! Paginated course catalogue with create, update and delete.
//!
//! - **`models`** - `Course` and input validation
//! - **`db`** - `CourseStore` seam (Postgres and in-memory)
//! - **`handlers`** - HTTP handlers for `/courses`

pub mod db;
pub mod handlers;
pub mod models;

pub use db::{CourseStore, MemoryCourseStore, PgCourseStore};
pub use handlers::{add_course, delete_course, get_course, list_courses, update_course, COURSE_NOT_FOUND};
pub use models::{Course, CourseInput, CoursePatch, NewCourse};
