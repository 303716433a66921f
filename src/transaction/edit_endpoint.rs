//! Defines the endpoint for updating an existing transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    transaction::{
        Transaction, TransactionId, core::update_transaction,
        create_endpoint::TransactionForm,
    },
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating a transaction, redirects to transactions view on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> impl IntoResponse {
    let builder = Transaction::build(form.amount, form.date, form.kind)
        .category(form.category)
        .description(&form.description);

    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = update_transaction(transaction_id, builder, &connection) {
        tracing::error!("Could not update transaction {transaction_id}: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{
            Transaction, TransactionKind, create_endpoint::TransactionForm, create_transaction,
            edit_endpoint::{EditTransactionState, edit_transaction_endpoint},
            get_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[tokio::test]
    async fn updates_transaction_and_redirects() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            Transaction::build(10.0, date!(2025 - 05 - 01), TransactionKind::Income)
                .description("Deposit"),
            &conn,
        )
        .unwrap();
        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let form = TransactionForm {
            amount: 25.0,
            date: date!(2025 - 05 - 02),
            kind: TransactionKind::Expense,
            category: Some("Travel".to_owned()),
            description: "Train ticket".to_owned(),
        };

        let response =
            edit_transaction_endpoint(State(state.clone()), Path(transaction.id), Form(form))
                .await
                .into_response();

        assert!(
            response.headers().get(HX_REDIRECT).is_some(),
            "expected response to have the header hx-redirect"
        );

        let connection = state.db_connection.lock().unwrap();
        let updated = get_transaction(transaction.id, &connection).unwrap();
        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.kind, TransactionKind::Expense);
        assert_eq!(updated.category, Some("Travel".to_owned()));
    }

    #[tokio::test]
    async fn updating_missing_transaction_is_not_found() {
        let conn = get_test_connection();
        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let form = TransactionForm {
            amount: 25.0,
            date: date!(2025 - 05 - 02),
            kind: TransactionKind::Income,
            category: None,
            description: String::new(),
        };

        let response = edit_transaction_endpoint(State(state), Path(999), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
