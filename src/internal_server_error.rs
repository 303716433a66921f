//! The 500 Internal Server Error page.

use axum::{http::StatusCode, response::Response};
use maud::Markup;

use crate::html::{error_view, render};

/// The text shown on the internal server error page.
#[derive(Debug, Clone)]
pub struct InternalServerError {
    /// A short description of what went wrong.
    pub description: String,
    /// What the user can do about it.
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Something went wrong on our end.".to_owned(),
            fix: "Try again later or check the server logs for details.".to_owned(),
        }
    }
}

fn internal_server_error_view(error: &InternalServerError) -> Markup {
    error_view("Internal Server Error", "500", &error.description, &error.fix)
}

/// Build the 500 response for `error`.
pub fn render_internal_server_error(error: InternalServerError) -> Response {
    render(
        StatusCode::INTERNAL_SERVER_ERROR,
        internal_server_error_view(&error),
    )
}

/// A route handler that displays the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(InternalServerError::default())
}
