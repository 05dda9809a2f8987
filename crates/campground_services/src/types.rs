use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{self, ValidationFailure};

/// Lowest rating a review may carry
pub const MIN_RATING: i16 = 1;
/// Highest rating a review may carry
pub const MAX_RATING: i16 = 5;

/// Campground model representing the database schema
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Campground {
    /// Unique identifier for the campground
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Nightly price
    pub price: f64,
    /// Free-form description
    pub description: String,
    /// Where the campground is
    pub location: String,
    /// Reviews owned by this campground, in the order they were added
    pub review_ids: Vec<Uuid>,
    /// Timestamp when the campground was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the campground was last updated
    pub updated_at: DateTime<Utc>,
}

/// Review model representing the database schema
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Review {
    /// Unique identifier for the review
    pub id: Uuid,
    /// Review text
    pub body: String,
    /// Star rating between [`MIN_RATING`] and [`MAX_RATING`]
    pub rating: i16,
    /// Timestamp when the review was created
    pub created_at: DateTime<Utc>,
}

/// A campground joined with the reviews its reference list points at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampgroundDetails {
    /// The campground itself
    pub campground: Campground,
    /// Owned reviews, ordered like `campground.review_ids`
    pub reviews: Vec<Review>,
}

/// Validated campground fields, used for both creation and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampground {
    /// Display title
    pub title: String,
    /// Nightly price, finite and non-negative
    pub price: f64,
    /// Free-form description
    pub description: String,
    /// Where the campground is
    pub location: String,
}

/// Validated review fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    /// Review text
    pub body: String,
    /// Star rating
    pub rating: i16,
}

/// Campground form as submitted by the browser.
///
/// Every field is kept as raw text so that a missing or malformed value is
/// reported by validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CampgroundForm {
    /// Display title
    #[serde(rename = "campground[title]", default)]
    #[validate(length(min = 1, message = "\"title\" is required"))]
    pub title: String,

    /// Nightly price as typed
    #[serde(rename = "campground[price]", default)]
    #[validate(custom(function = "validate_price"))]
    pub price: String,

    /// Free-form description
    #[serde(rename = "campground[description]", default)]
    #[validate(length(min = 1, message = "\"description\" is required"))]
    pub description: String,

    /// Where the campground is
    #[serde(rename = "campground[location]", default)]
    #[validate(length(min = 1, message = "\"location\" is required"))]
    pub location: String,
}

impl CampgroundForm {
    /// Checks the form against the campground schema and converts it into typed fields.
    pub fn into_new_campground(self) -> Result<NewCampground, ValidationFailure> {
        validation::check(&self)?;

        let price = parse_price(&self.price).ok_or_else(|| {
            ValidationFailure::single("\"price\" must be a number")
        })?;

        Ok(NewCampground {
            title: self.title,
            price,
            description: self.description,
            location: self.location,
        })
    }
}

/// Review form as submitted by the browser
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewForm {
    /// Review text
    #[serde(rename = "review[body]", default)]
    #[validate(length(min = 1, message = "\"body\" is required"))]
    pub body: String,

    /// Star rating as typed
    #[serde(rename = "review[rating]", default)]
    #[validate(custom(function = "validate_rating"))]
    pub rating: String,
}

impl ReviewForm {
    /// Checks the form against the review schema and converts it into typed fields.
    pub fn into_new_review(self) -> Result<NewReview, ValidationFailure> {
        validation::check(&self)?;

        let rating = parse_rating(&self.rating).ok_or_else(|| {
            ValidationFailure::single(rating_range_message())
        })?;

        Ok(NewReview {
            body: self.body,
            rating,
        })
    }
}

/// Custom error type for persistence failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An error reported by the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

fn parse_rating(raw: &str) -> Option<i16> {
    raw.trim()
        .parse::<i16>()
        .ok()
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
}

fn rating_range_message() -> String {
    format!("\"rating\" must be between {MIN_RATING} and {MAX_RATING}")
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Custom validation function for the campground price
fn validate_price(price: &str) -> Result<(), ValidationError> {
    if price.trim().is_empty() {
        return Err(field_error("required", "\"price\" is required"));
    }

    match parse_price(price) {
        Some(value) if value < 0.0 => Err(field_error(
            "range",
            "\"price\" must be greater than or equal to 0",
        )),
        Some(_) => Ok(()),
        None => Err(field_error("number", "\"price\" must be a number")),
    }
}

/// Custom validation function for the review rating
fn validate_rating(rating: &str) -> Result<(), ValidationError> {
    if rating.trim().is_empty() {
        return Err(field_error("required", "\"rating\" is required"));
    }

    if rating.trim().parse::<f64>().is_err() {
        return Err(field_error("number", "\"rating\" must be a number"));
    }

    match parse_rating(rating) {
        Some(_) => Ok(()),
        None => Err(field_error("range", rating_range_message())),
    }
}
