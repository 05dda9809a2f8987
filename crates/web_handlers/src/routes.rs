use actix_web::{Route, guard, web};

use crate::campground_handlers::*;
use crate::error::AppError;
use crate::page_handlers::*;
use crate::review_handlers::*;

/// Largest urlencoded form body accepted, in bytes
pub const FORM_LIMIT_BYTES: usize = 100 * 1024;

/// Form bodies that cannot be decoded are rejected as validation failures
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(FORM_LIMIT_BYTES)
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Malformed ids in the path resolve as not-found
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|_err, _req| AppError::page_not_found().into())
}

/// Page routes answer HEAD as well as GET; the server drops the body for HEAD
fn page() -> Route {
    web::route().guard(guard::Any(guard::Get()).or(guard::Head()))
}

/// Registers every route along with its extractor configuration.
///
/// The unmatched-path fallback is set on the `App` with
/// `default_service(web::to(not_found))`, and trailing slashes are trimmed by
/// wrapping it in `NormalizePath::trim()`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .app_data(path_config())
        .route("/", page().to(home))
        .route("/health", page().to(health))
        .service(
            web::scope("/campgrounds")
                .route("", page().to(list_campgrounds))
                .route("", web::post().to(create_campground))
                .route("/new", page().to(new_campground_form))
                .route("/{id}", page().to(show_campground))
                .route("/{id}", web::put().to(update_campground))
                .route("/{id}", web::delete().to(delete_campground))
                .route("/{id}/edit", page().to(edit_campground_form))
                .route("/{id}/reviews", web::post().to(create_review))
                .route(
                    "/{id}/reviews/{review_id}",
                    web::delete().to(delete_review),
                ),
        );
}
