use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use campground_services::{CampgroundStore, Lookup, ReviewForm};

use crate::campground_handlers::redirect_to;
use crate::error::AppError;
use crate::views::campground_path;

/// Validates the submitted review, attaches it to the campground and redirects back
pub async fn create_review(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<Uuid>,
    form: web::Form<ReviewForm>,
) -> Result<HttpResponse, AppError> {
    let campground_id = path.into_inner();
    let new_review = form.into_inner().into_new_review()?;

    match store.add_review(&campground_id, &new_review).await? {
        Lookup::Found(review) => {
            log::info!("⭐ Added review {} to campground {}", review.id, campground_id);
            Ok(redirect_to(&campground_path(&campground_id)))
        }
        Lookup::NotFound => Err(AppError::campground_not_found()),
    }
}

/// Detaches a review from its campground, deletes it and redirects back
pub async fn delete_review(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (campground_id, review_id) = path.into_inner();

    match store.delete_review(&campground_id, &review_id).await? {
        Lookup::Found(review) => {
            log::info!(
                "🗑️ Deleted review {} from campground {}",
                review.id,
                campground_id
            );
            Ok(redirect_to(&campground_path(&campground_id)))
        }
        Lookup::NotFound => Err(AppError::review_not_found()),
    }
}
