//! The page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
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
        TransactionId,
        core::get_transaction,
        form::{FormMethod, FormValues, transaction_form},
        query::list_expense_categories,
    },
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The database connection for reading the transaction.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders the page for editing a transaction.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    let transaction = match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction,
        Err(error) => return error.into_response(),
    };

    let categories = match list_expense_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories for edit transaction page: {error}");
            return error.into_response();
        }
    };

    let form = transaction_form(
        &endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id),
        FormMethod::Put,
        &FormValues::from(&transaction),
        &categories,
        "Save Changes",
    );

    let content = html!(
        (nav_bar.into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "Edit Transaction" }

            (form)
        }
    );

    render(
        StatusCode::OK,
        base("Edit Transaction", &[dollar_input_styles()], &content),
    )
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::Response,
    };
    use rusqlite::Connection;
    use scraper::Html;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{
            Transaction, TransactionKind, create_transaction,
            edit_page::{EditTransactionPageState, get_edit_transaction_page},
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[tokio::test]
    async fn edit_page_is_prefilled_with_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(49.99, date!(2025 - 03 - 14), TransactionKind::Expense)
                .category(Some("Software".to_owned()))
                .description("IDE subscription"),
            &conn,
        )
        .unwrap();
        let state = EditTransactionPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_edit_transaction_page(State(state), Path(transaction.id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;

        let form_selector = scraper::Selector::parse("form").unwrap();
        let form = document
            .select(&form_selector)
            .next()
            .expect("expected a form");
        assert_eq!(
            form.value().attr("hx-put"),
            Some("/api/transactions/1"),
            "expected the form to submit a PUT to the transaction endpoint"
        );

        let amount_selector = scraper::Selector::parse("input[name=amount]").unwrap();
        let amount = form.select(&amount_selector).next().unwrap();
        assert_eq!(amount.value().attr("value"), Some("49.99"));

        let date_selector = scraper::Selector::parse("input[name=date]").unwrap();
        let date_input = form.select(&date_selector).next().unwrap();
        assert_eq!(date_input.value().attr("value"), Some("2025-03-14"));

        let category_selector = scraper::Selector::parse("input[name=category]").unwrap();
        let category = form.select(&category_selector).next().unwrap();
        assert_eq!(category.value().attr("value"), Some("Software"));
    }

    #[tokio::test]
    async fn edit_page_for_missing_transaction_is_not_found() {
        let conn = get_test_connection();
        let state = EditTransactionPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_edit_transaction_page(State(state), Path(999)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
