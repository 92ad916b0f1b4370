//! Course record and its input shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::{FieldError, SharedError};

const TITLE_MIN_CHARS: usize = 2;

/// A course as stored and returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Build a fresh course from validated input
    pub fn create(new: NewCourse) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            price: new.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch in place
    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self.updated_at = Utc::now();
    }
}

/// Body of `POST /courses` and `PATCH /courses/{id}`
///
/// Every field is optional at the wire level; `validate_*` decides which
/// ones the operation needs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CourseInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Validated input for a new course
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub price: f64,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub price: Option<f64>,
}

impl CoursePatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none()
    }
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    let title = title.trim();
    if title.is_empty() {
        errors.push(FieldError::new("title", "title is required"));
    } else if title.chars().count() < TITLE_MIN_CHARS {
        errors.push(FieldError::new("title", "title must be at least 2 characters"));
    }
}

fn check_price(price: f64, errors: &mut Vec<FieldError>) {
    if !price.is_finite() {
        errors.push(FieldError::new("price", "price must be a number"));
    }
}

impl CourseInput {
    /// Both fields are required for creation
    pub fn validate_new(self) -> Result<NewCourse, SharedError> {
        let mut errors = Vec::new();

        match &self.title {
            Some(title) => check_title(title, &mut errors),
            None => errors.push(FieldError::new("title", "title is required")),
        }
        match self.price {
            Some(price) => check_price(price, &mut errors),
            None => errors.push(FieldError::new("price", "price is required")),
        }

        SharedError::check(errors)?;

        match (self.title, self.price) {
            (Some(title), Some(price)) => Ok(NewCourse {
                title: title.trim().to_string(),
                price,
            }),
            _ => Err(SharedError::serialization("incomplete course")),
        }
    }

    /// Fields that are present must satisfy the same rules as on creation
    pub fn validate_patch(self) -> Result<CoursePatch, SharedError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(price) = self.price {
            check_price(price, &mut errors);
        }
        SharedError::check(errors)?;

        Ok(CoursePatch {
            title: self.title.map(|t| t.trim().to_string()),
            price: self.price,
        })
    }
}
