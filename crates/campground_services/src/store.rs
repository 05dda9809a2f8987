use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Campground, CampgroundDetails, NewCampground, NewReview, Review, StoreError};

/// Outcome of looking a record up by id
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The record exists
    Found(T),
    /// No record has that id
    NotFound,
}

impl<T> Lookup<T> {
    /// Whether the record was found
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Maps the found record, keeping `NotFound` as is
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Persistence operations for campgrounds and the reviews they own.
///
/// Writes that touch both a campground and its reviews are applied as a unit:
/// either the record and the reference list change together or neither does.
#[async_trait]
pub trait CampgroundStore: Send + Sync {
    /// Lists every campground, oldest first
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError>;

    /// Persists a new campground with an empty reference list
    async fn create_campground(&self, new: &NewCampground) -> Result<Campground, StoreError>;

    /// Fetches a campground by id
    async fn find_campground(&self, id: &Uuid) -> Result<Lookup<Campground>, StoreError>;

    /// Fetches a campground by id together with its reviews
    async fn find_campground_with_reviews(
        &self,
        id: &Uuid,
    ) -> Result<Lookup<CampgroundDetails>, StoreError>;

    /// Replaces the editable fields of a campground and returns the updated record
    async fn update_campground(
        &self,
        id: &Uuid,
        changes: &NewCampground,
    ) -> Result<Lookup<Campground>, StoreError>;

    /// Deletes a campground and every review it owns
    async fn delete_campground(&self, id: &Uuid) -> Result<Lookup<Campground>, StoreError>;

    /// Creates a review and appends its id to the campground's reference list
    async fn add_review(
        &self,
        campground_id: &Uuid,
        new: &NewReview,
    ) -> Result<Lookup<Review>, StoreError>;

    /// Removes a review from the campground's reference list and deletes it.
    ///
    /// Yields `NotFound` unless the campground exists, owns the review and the
    /// review record is still stored. On `NotFound` nothing is changed.
    async fn delete_review(
        &self,
        campground_id: &Uuid,
        review_id: &Uuid,
    ) -> Result<Lookup<Review>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn test_lookup_map() {
        assert_eq!(Lookup::Found(2).map(|n| n * 10), Lookup::Found(20));
        assert!(!Lookup::<i32>::NotFound.map(|n| n * 10).is_found());
    }
}
