use actix_web::{HttpResponse, Result};
use maud::Markup;

use crate::error::AppError;
use crate::views;

/// Renders the landing page
pub async fn home() -> Markup {
    views::home()
}

/// Liveness probe
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// Fallback for every path no route matches
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::page_not_found())
}
