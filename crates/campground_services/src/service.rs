use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{CampgroundStore, Lookup};
use crate::types::{Campground, CampgroundDetails, NewCampground, NewReview, Review, StoreError};

const CAMPGROUND_COLUMNS: &str =
    "id, title, price, description, location, review_ids, created_at, updated_at";

/// A store that keeps campgrounds and reviews in PostgreSQL.
///
/// The reference list lives in the `review_ids` array column of `campgrounds`.
/// Operations that write both tables run inside one transaction.
#[derive(Clone)]
pub struct PgCampgroundStore {
    pool: PgPool,
}

impl PgCampgroundStore {
    /// Creates a new instance of `PgCampgroundStore` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampgroundStore for PgCampgroundStore {
    async fn list_campgrounds(&self) -> Result<Vec<Campground>, StoreError> {
        let campgrounds = sqlx::query_as::<_, Campground>(&format!(
            "SELECT {CAMPGROUND_COLUMNS} FROM campgrounds ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(campgrounds)
    }

    async fn create_campground(&self, new: &NewCampground) -> Result<Campground, StoreError> {
        let campground = sqlx::query_as::<_, Campground>(&format!(
            r#"
            INSERT INTO campgrounds (id, title, price, description, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CAMPGROUND_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(new.price)
        .bind(&new.description)
        .bind(&new.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(campground)
    }

    async fn find_campground(&self, id: &Uuid) -> Result<Lookup<Campground>, StoreError> {
        let campground = sqlx::query_as::<_, Campground>(&format!(
            "SELECT {CAMPGROUND_COLUMNS} FROM campgrounds WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campground.into())
    }

    async fn find_campground_with_reviews(
        &self,
        id: &Uuid,
    ) -> Result<Lookup<CampgroundDetails>, StoreError> {
        let campground = match self.find_campground(id).await? {
            Lookup::Found(campground) => campground,
            Lookup::NotFound => return Ok(Lookup::NotFound),
        };

        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, body, rating, created_at
            FROM reviews
            WHERE id = ANY($1)
            ORDER BY array_position($1, id)
            "#,
        )
        .bind(&campground.review_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(Lookup::Found(CampgroundDetails {
            campground,
            reviews,
        }))
    }

    async fn update_campground(
        &self,
        id: &Uuid,
        changes: &NewCampground,
    ) -> Result<Lookup<Campground>, StoreError> {
        let campground = sqlx::query_as::<_, Campground>(&format!(
            r#"
            UPDATE campgrounds
            SET title = $2,
                price = $3,
                description = $4,
                location = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CAMPGROUND_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(changes.price)
        .bind(&changes.description)
        .bind(&changes.location)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campground.into())
    }

    async fn delete_campground(&self, id: &Uuid) -> Result<Lookup<Campground>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let campground = sqlx::query_as::<_, Campground>(&format!(
            "DELETE FROM campgrounds WHERE id = $1 RETURNING {CAMPGROUND_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(campground) = campground else {
            return Ok(Lookup::NotFound);
        };

        // Owned reviews go with the campground
        let removed = sqlx::query("DELETE FROM reviews WHERE id = ANY($1)")
            .bind(&campground.review_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log::debug!(
            "Deleted campground {} with {} reviews",
            campground.id,
            removed.rows_affected()
        );

        Ok(Lookup::Found(campground))
    }

    async fn add_review(
        &self,
        campground_id: &Uuid,
        new: &NewReview,
    ) -> Result<Lookup<Review>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock the owner so concurrent writers append to the same list in turn
        let owner = sqlx::query("SELECT id FROM campgrounds WHERE id = $1 FOR UPDATE")
            .bind(campground_id)
            .fetch_optional(&mut *tx)
            .await?;

        if owner.is_none() {
            return Ok(Lookup::NotFound);
        }

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, body, rating)
            VALUES ($1, $2, $3)
            RETURNING id, body, rating, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.body)
        .bind(new.rating)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE campgrounds
            SET review_ids = array_append(review_ids, $2),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(campground_id)
        .bind(review.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Lookup::Found(review))
    }

    async fn delete_review(
        &self,
        campground_id: &Uuid,
        review_id: &Uuid,
    ) -> Result<Lookup<Review>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query(
            r#"
            UPDATE campgrounds
            SET review_ids = array_remove(review_ids, $2),
                updated_at = NOW()
            WHERE id = $1 AND $2 = ANY(review_ids)
            RETURNING id
            "#,
        )
        .bind(campground_id)
        .bind(review_id)
        .fetch_optional(&mut *tx)
        .await?;

        if detached.is_none() {
            return Ok(Lookup::NotFound);
        }

        let review = sqlx::query_as::<_, Review>(
            "DELETE FROM reviews WHERE id = $1 RETURNING id, body, rating, created_at",
        )
        .bind(review_id)
        .fetch_optional(&mut *tx)
        .await?;

        // A dangling reference rolls back with the transaction
        let Some(review) = review else {
            log::warn!(
                "Campground {} referenced missing review {}",
                campground_id,
                review_id
            );
            return Ok(Lookup::NotFound);
        };

        tx.commit().await?;

        Ok(Lookup::Found(review))
    }
}
