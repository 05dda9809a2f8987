use actix_web::{HttpResponse, Result, http::header, web};
use maud::Markup;
use uuid::Uuid;

use campground_services::{CampgroundForm, CampgroundStore, Lookup};

use crate::error::AppError;
use crate::views::{self, campground_path};

/// Builds a 302 redirect to `location`
pub(crate) fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders the list of every campground
pub async fn list_campgrounds(store: web::Data<dyn CampgroundStore>) -> Result<Markup, AppError> {
    let campgrounds = store.list_campgrounds().await?;
    Ok(views::campgrounds_index(&campgrounds))
}

/// Renders the empty creation form
pub async fn new_campground_form() -> Markup {
    views::campground_new()
}

/// Validates the submitted form, stores the campground and redirects to its page
pub async fn create_campground(
    store: web::Data<dyn CampgroundStore>,
    form: web::Form<CampgroundForm>,
) -> Result<HttpResponse, AppError> {
    let new_campground = form.into_inner().into_new_campground()?;

    let campground = store.create_campground(&new_campground).await?;
    log::info!("🏕️ Created campground {}", campground.id);

    Ok(redirect_to(&campground_path(&campground.id)))
}

/// Renders a campground with its reviews
pub async fn show_campground(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<Uuid>,
) -> Result<Markup, AppError> {
    let id = path.into_inner();

    match store.find_campground_with_reviews(&id).await? {
        Lookup::Found(details) => Ok(views::campground_show(&details)),
        Lookup::NotFound => Err(AppError::campground_not_found()),
    }
}

/// Renders the edit form for an existing campground
pub async fn edit_campground_form(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<Uuid>,
) -> Result<Markup, AppError> {
    let id = path.into_inner();

    match store.find_campground(&id).await? {
        Lookup::Found(campground) => Ok(views::campground_edit(&campground)),
        Lookup::NotFound => Err(AppError::campground_not_found()),
    }
}

/// Validates the submitted form, replaces the campground's fields and redirects to its page
pub async fn update_campground(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<Uuid>,
    form: web::Form<CampgroundForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let changes = form.into_inner().into_new_campground()?;

    match store.update_campground(&id, &changes).await? {
        Lookup::Found(campground) => {
            log::info!("✏️ Updated campground {}", campground.id);
            Ok(redirect_to(&campground_path(&campground.id)))
        }
        Lookup::NotFound => Err(AppError::campground_not_found()),
    }
}

/// Deletes a campground together with its reviews and redirects to the list
pub async fn delete_campground(
    store: web::Data<dyn CampgroundStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    match store.delete_campground(&id).await? {
        Lookup::Found(campground) => {
            log::info!(
                "🗑️ Deleted campground {} and {} reviews",
                campground.id,
                campground.review_ids.len()
            );
            Ok(redirect_to("/campgrounds"))
        }
        Lookup::NotFound => Err(AppError::campground_not_found()),
    }
}
