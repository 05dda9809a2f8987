use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{CampgroundStore, Lookup};
use crate::types::{Campground, CampgroundDetails, NewCampground, NewReview, Review, StoreError};

/// A store that keeps everything in process memory.
///
/// A single write lock is held across every multi-record write, so the
/// reference lists never disagree with the stored reviews.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    /// Campgrounds in creation order
    campgrounds: Vec<Campground>,
    reviews: HashMap<Uuid, Review>,
}

impl MemoryState {
    fn campground_mut(&mut self, id: &Uuid) -> Option<&mut Campground> {
        self.campgrounds.iter_mut().find(|c| c.id == *id)
    }
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reviews currently stored, owned or not
    pub async fn review_count(&self) -> usize {
        self.state.read().await.reviews.len()
    }
}

#[async_trait]
impl CampgroundStore for MemoryStore {
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError> {
        Ok(self.state.read().await.campgrounds.clone())
    }

    async fn create_campground(&self, new: &NewCampground) -> Result<Campground, StoreError> {
        let now = Utc::now();
        let campground = Campground {
            id: Uuid::new_v4(),
            title: new.title.clone(),
            price: new.price,
            description: new.description.clone(),
            location: new.location.clone(),
            review_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.state.write().await.campgrounds.push(campground.clone());

        Ok(campground)
    }

    async fn find_campground(&self, id: &Uuid) -> Result<Lookup<Campground>, StoreError> {
        let state = self.state.read().await;
        Ok(state.campgrounds.iter().find(|c| c.id == *id).cloned().into())
    }

    async fn find_campground_with_reviews(
        &self,
        id: &Uuid,
    ) -> Result<Lookup<CampgroundDetails>, StoreError> {
        let state = self.state.read().await;
        let campground: Lookup<&Campground> =
            state.campgrounds.iter().find(|c| c.id == *id).into();

        Ok(campground.map(|campground| CampgroundDetails {
            reviews: campground
                .review_ids
                .iter()
                .filter_map(|review_id| state.reviews.get(review_id).cloned())
                .collect(),
            campground: campground.clone(),
        }))
    }

    async fn update_campground(
        &self,
        id: &Uuid,
        changes: &NewCampground,
    ) -> Result<Lookup<Campground>, StoreError> {
        let mut state = self.state.write().await;

        let updated = state.campground_mut(id).map(|campground| {
            campground.title = changes.title.clone();
            campground.price = changes.price;
            campground.description = changes.description.clone();
            campground.location = changes.location.clone();
            campground.updated_at = Utc::now();
            campground.clone()
        });

        Ok(updated.into())
    }

    async fn delete_campground(&self, id: &Uuid) -> Result<Lookup<Campground>, StoreError> {
        let mut state = self.state.write().await;

        let Some(position) = state.campgrounds.iter().position(|c| c.id == *id) else {
            return Ok(Lookup::NotFound);
        };

        let campground = state.campgrounds.remove(position);
        for review_id in &campground.review_ids {
            state.reviews.remove(review_id);
        }

        Ok(Lookup::Found(campground))
    }

    async fn add_review(
        &self,
        campground_id: &Uuid,
        new: &NewReview,
    ) -> Result<Lookup<Review>, StoreError> {
        let mut state = self.state.write().await;

        let review = Review {
            id: Uuid::new_v4(),
            body: new.body.clone(),
            rating: new.rating,
            created_at: Utc::now(),
        };

        let Some(campground) = state.campground_mut(campground_id) else {
            return Ok(Lookup::NotFound);
        };
        campground.review_ids.push(review.id);
        campground.updated_at = review.created_at;

        state.reviews.insert(review.id, review.clone());

        Ok(Lookup::Found(review))
    }

    async fn delete_review(
        &self,
        campground_id: &Uuid,
        review_id: &Uuid,
    ) -> Result<Lookup<Review>, StoreError> {
        let mut state = self.state.write().await;
        let MemoryState {
            campgrounds,
            reviews,
        } = &mut *state;

        let Some(campground) = campgrounds.iter_mut().find(|c| c.id == *campground_id) else {
            return Ok(Lookup::NotFound);
        };

        let Some(position) = campground.review_ids.iter().position(|id| id == review_id) else {
            return Ok(Lookup::NotFound);
        };

        // A dangling reference leaves the list untouched
        let Some(review) = reviews.remove(review_id) else {
            log::warn!(
                "Campground {} referenced missing review {}",
                campground_id,
                review_id
            );
            return Ok(Lookup::NotFound);
        };

        campground.review_ids.remove(position);
        campground.updated_at = Utc::now();

        Ok(Lookup::Found(review))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campground() -> NewCampground {
        NewCampground {
            title: "Tuolumne Meadows".to_string(),
            price: 32.0,
            description: "High country".to_string(),
            location: "Yosemite, CA".to_string(),
        }
    }

    fn sample_review(rating: i16) -> NewReview {
        NewReview {
            body: "Cold nights, great stars".to_string(),
            rating,
        }
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let store = MemoryStore::new();
        let first = store.create_campground(&sample_campground()).await.unwrap();
        let second = store.create_campground(&sample_campground()).await.unwrap();

        let ids: Vec<Uuid> = store
            .list_campgrounds()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert_eq!(store.find_campground(&id).await.unwrap(), Lookup::NotFound);
        assert_eq!(
            store.find_campground_with_reviews(&id).await.unwrap(),
            Lookup::NotFound
        );
        assert_eq!(
            store.update_campground(&id, &sample_campground()).await.unwrap(),
            Lookup::NotFound
        );
        assert_eq!(store.delete_campground(&id).await.unwrap(), Lookup::NotFound);
        assert_eq!(
            store.add_review(&id, &sample_review(4)).await.unwrap(),
            Lookup::NotFound
        );
        assert_eq!(store.review_count().await, 0);
    }

    #[tokio::test]
    async fn test_reviews_follow_reference_list() {
        let store = MemoryStore::new();
        let campground = store.create_campground(&sample_campground()).await.unwrap();

        let Lookup::Found(first) = store.add_review(&campground.id, &sample_review(5)).await.unwrap()
        else {
            panic!("campground should exist");
        };
        let Lookup::Found(second) = store.add_review(&campground.id, &sample_review(2)).await.unwrap()
        else {
            panic!("campground should exist");
        };

        let Lookup::Found(details) = store
            .find_campground_with_reviews(&campground.id)
            .await
            .unwrap()
        else {
            panic!("campground should exist");
        };
        assert_eq!(details.campground.review_ids, vec![first.id, second.id]);
        assert_eq!(details.reviews, vec![first.clone(), second.clone()]);

        let deleted = store.delete_review(&campground.id, &first.id).await.unwrap();
        assert_eq!(deleted, Lookup::Found(first.clone()));

        let Lookup::Found(campground) = store.find_campground(&campground.id).await.unwrap() else {
            panic!("campground should exist");
        };
        assert_eq!(campground.review_ids, vec![second.id]);
        assert_eq!(store.review_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_review_requires_ownership() {
        let store = MemoryStore::new();
        let owner = store.create_campground(&sample_campground()).await.unwrap();
        let other = store.create_campground(&sample_campground()).await.unwrap();

        let Lookup::Found(review) = store.add_review(&owner.id, &sample_review(3)).await.unwrap()
        else {
            panic!("campground should exist");
        };

        assert_eq!(
            store.delete_review(&other.id, &review.id).await.unwrap(),
            Lookup::NotFound
        );
        assert_eq!(store.review_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_review_with_missing_record_changes_nothing() {
        let store = MemoryStore::new();
        let campground = store.create_campground(&sample_campground()).await.unwrap();

        let Lookup::Found(review) = store.add_review(&campground.id, &sample_review(4)).await.unwrap()
        else {
            panic!("campground should exist");
        };
        store.state.write().await.reviews.remove(&review.id);

        let Lookup::Found(before) = store.find_campground(&campground.id).await.unwrap() else {
            panic!("campground should exist");
        };

        assert_eq!(
            store.delete_review(&campground.id, &review.id).await.unwrap(),
            Lookup::NotFound
        );

        let Lookup::Found(after) = store.find_campground(&campground.id).await.unwrap() else {
            panic!("campground should exist");
        };
        assert_eq!(after.review_ids, vec![review.id]);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[tokio::test]
    async fn test_delete_campground_cascades_to_reviews() {
        let store = MemoryStore::new();
        let campground = store.create_campground(&sample_campground()).await.unwrap();
        let keeper = store.create_campground(&sample_campground()).await.unwrap();

        store.add_review(&campground.id, &sample_review(1)).await.unwrap();
        store.add_review(&campground.id, &sample_review(4)).await.unwrap();
        store.add_review(&keeper.id, &sample_review(5)).await.unwrap();

        let deleted = store.delete_campground(&campground.id).await.unwrap();
        assert!(deleted.is_found());

        assert_eq!(
            store.find_campground(&campground.id).await.unwrap(),
            Lookup::NotFound
        );
        assert_eq!(store.review_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = MemoryStore::new();
        let campground = store.create_campground(&sample_campground()).await.unwrap();

        let mut changes = sample_campground();
        changes.price = 45.0;
        changes.title = "Tuolumne Meadows Lodge".to_string();

        let Lookup::Found(updated) = store
            .update_campground(&campground.id, &changes)
            .await
            .unwrap()
        else {
            panic!("campground should exist");
        };

        assert_eq!(updated.price, 45.0);
        assert_eq!(updated.title, "Tuolumne Meadows Lodge");
        assert_eq!(updated.created_at, campground.created_at);
    }
}
