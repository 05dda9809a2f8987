//! HTML pages, built with maud so every interpolated value is escaped.

use actix_web::http::StatusCode;
use maud::{DOCTYPE, Markup, html};
use uuid::Uuid;

use campground_services::{Campground, CampgroundDetails, MAX_RATING, MIN_RATING, Review};

/// Path of a campground's detail page
pub fn campground_path(id: &Uuid) -> String {
    format!("/campgrounds/{}", id)
}

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | YelpCamp" }
                link rel="stylesheet" href="/static/app.css";
            }
            body {
                nav {
                    a href="/" { "YelpCamp" }
                    " "
                    a href="/campgrounds" { "Campgrounds" }
                    " "
                    a href="/campgrounds/new" { "New Campground" }
                }
                main { (content) }
            }
        }
    }
}

/// Landing page
pub fn home() -> Markup {
    layout(
        "Home",
        html! {
            h1 { "YelpCamp" }
            p { "Find a campground, then tell everyone how it went." }
            a href="/campgrounds" { "View Campgrounds" }
        },
    )
}

/// List of every campground
pub fn campgrounds_index(campgrounds: &[Campground]) -> Markup {
    layout(
        "All Campgrounds",
        html! {
            h1 { "All Campgrounds" }
            @if campgrounds.is_empty() {
                p { "No campgrounds yet." }
            }
            ul class="campgrounds" {
                @for campground in campgrounds {
                    li {
                        h2 { (campground.title) }
                        p class="location" { (campground.location) }
                        p { (campground.description) }
                        a href=(campground_path(&campground.id)) { "View " (campground.title) }
                    }
                }
            }
        },
    )
}

fn campground_fields(campground: Option<&Campground>) -> Markup {
    let title = campground.map(|c| c.title.as_str()).unwrap_or_default();
    let price = campground.map(|c| c.price.to_string()).unwrap_or_default();
    let description = campground.map(|c| c.description.as_str()).unwrap_or_default();
    let location = campground.map(|c| c.location.as_str()).unwrap_or_default();

    html! {
        div {
            label for="title" { "Title" }
            input type="text" id="title" name="campground[title]" value=(title);
        }
        div {
            label for="location" { "Location" }
            input type="text" id="location" name="campground[location]" value=(location);
        }
        div {
            label for="price" { "Price" }
            input type="number" id="price" name="campground[price]" min="0" step="0.01" value=(price);
        }
        div {
            label for="description" { "Description" }
            textarea id="description" name="campground[description]" { (description) }
        }
    }
}

/// Creation form
pub fn campground_new() -> Markup {
    layout(
        "New Campground",
        html! {
            h1 { "New Campground" }
            form action="/campgrounds" method="POST" {
                (campground_fields(None))
                button type="submit" { "Add Campground" }
            }
            a href="/campgrounds" { "All Campgrounds" }
        },
    )
}

/// Edit form, submitted as a PUT through the method override
pub fn campground_edit(campground: &Campground) -> Markup {
    let path = campground_path(&campground.id);

    layout(
        &format!("Edit {}", campground.title),
        html! {
            h1 { "Edit Campground" }
            form action=(format!("{}?_method=PUT", path)) method="POST" {
                (campground_fields(Some(campground)))
                button type="submit" { "Update Campground" }
            }
            a href=(path) { "Back To Campground" }
        },
    )
}

fn review_item(campground_id: &Uuid, review: &Review) -> Markup {
    html! {
        li class="review" {
            p class="rating" { "Rating: " (review.rating) "/" (MAX_RATING) }
            p { (review.body) }
            form action=(format!("{}/reviews/{}?_method=DELETE", campground_path(campground_id), review.id)) method="POST" {
                button type="submit" { "Delete" }
            }
        }
    }
}

/// Detail page with the campground's reviews and a review form
pub fn campground_show(details: &CampgroundDetails) -> Markup {
    let campground = &details.campground;
    let path = campground_path(&campground.id);

    layout(
        &campground.title,
        html! {
            h1 { (campground.title) }
            p class="location" { (campground.location) }
            p class="price" { (format_price(campground.price)) "/night" }
            p class="description" { (campground.description) }
            a href=(format!("{}/edit", path)) { "Edit" }
            form action=(format!("{}?_method=DELETE", path)) method="POST" {
                button type="submit" { "Delete" }
            }

            h2 { "Leave a Review" }
            form action=(format!("{}/reviews", path)) method="POST" {
                div {
                    label for="rating" { "Rating" }
                    input type="number" id="rating" name="review[rating]" min=(MIN_RATING) max=(MAX_RATING) step="1";
                }
                div {
                    label for="body" { "Review" }
                    textarea id="body" name="review[body]" {}
                }
                button type="submit" { "Submit" }
            }

            h2 { "Reviews" }
            ul class="reviews" {
                @for review in &details.reviews {
                    (review_item(&campground.id, review))
                }
            }
            a href="/campgrounds" { "All Campgrounds" }
        },
    )
}

/// Error page for any failed request
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    layout(
        "Error",
        html! {
            div class="error" {
                h1 { (message) }
                p { "Status " (status.as_u16()) }
                a href="/campgrounds" { "Back To Campgrounds" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campground(title: &str) -> Campground {
        Campground {
            id: Uuid::new_v4(),
            title: title.to_string(),
            price: 12.5,
            description: "Near the river".to_string(),
            location: "Moab, UT".to_string(),
            review_ids: Vec::new(),
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn test_interpolated_values_are_escaped() {
        let campground = sample_campground("<script>alert(1)</script>");
        let page = campgrounds_index(&[campground]).into_string();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_show_formats_price() {
        let details = CampgroundDetails {
            campground: sample_campground("Sand Flats"),
            reviews: Vec::new(),
        };
        let page = campground_show(&details).into_string();

        assert!(page.contains("$12.50/night"));
        assert!(page.contains("Moab, UT"));
    }

    #[test]
    fn test_edit_form_submits_as_put() {
        let campground = sample_campground("Sand Flats");
        let page = campground_edit(&campground).into_string();

        assert!(page.contains(&format!("/campgrounds/{}?_method=PUT", campground.id)));
    }

    #[test]
    fn test_error_page_shows_status() {
        let page = error_page(StatusCode::NOT_FOUND, "Page Not Found").into_string();

        assert!(page.contains("Page Not Found"));
        assert!(page.contains("Status 404"));
    }
}
