//! The page for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    html::{FORM_CONTAINER_STYLE, base, dollar_input_styles, render},
    navigation::NavBar,
    transaction::{
        form::{FormMethod, FormValues, transaction_form},
        query::list_expense_categories,
    },
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The database connection for reading category suggestions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW);

    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    let categories = match list_expense_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories for new transaction page: {error}");
            return error.into_response();
        }
    };

    let form = transaction_form(
        endpoints::TRANSACTIONS_API,
        FormMethod::Post,
        &FormValues::default(),
        &categories,
        "Save",
    );

    let content = html!(
        (nav_bar.into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "New Transaction" }

            (form)
        }
    );

    render(
        StatusCode::OK,
        base("New Transaction", &[dollar_input_styles()], &content),
    )
}
