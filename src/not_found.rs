//! The 404 Not Found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

fn not_found_view() -> Markup {
    error_view(
        "Page Not Found",
        "404",
        "Page not found.",
        "Sorry, the page you are looking for does not exist.",
    )
}

/// Build the 404 Not Found response.
pub fn get_404_not_found_response() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}

/// The fallback route handler for requests that match no other route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}
