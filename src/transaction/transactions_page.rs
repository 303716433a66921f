//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::Response,
};
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    html::{PAGE_CONTAINER_STYLE, base, render},
    navigation::NavBar,
    pagination::{PageState, PaginationConfig, create_pagination_indicators},
};

use super::{
    filter::{KindFilter, TransactionFilter},
    query::{count_transactions_filtered, get_transactions_page as query_transactions_page,
        list_expense_categories},
    view::{TransactionsViewModel, transactions_view},
};

/// The raw query parameters for the transactions page.
///
/// All fields are optional; missing or out-of-range values fall back to
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// Which transaction kinds to show.
    kind: Option<KindFilter>,
    /// Narrow expenses to a single category.
    category: Option<String>,
    /// The page number to display, starting at 1.
    page: Option<u64>,
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Render an overview of the user's transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query_params): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let filter = TransactionFilter::new(query_params.kind, query_params.category);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction_count = count_transactions_filtered(&filter, &connection)
        .inspect_err(|error| tracing::error!("could not count transactions: {error}"))?;

    let page_size = state.pagination_config.default_page_size;
    let page_state = PageState::new(
        transaction_count,
        query_params.page.unwrap_or(state.pagination_config.default_page),
        page_size,
    );

    let transactions = query_transactions_page(
        &filter,
        page_size,
        page_state.offset(page_size),
        &connection,
    )
    .inspect_err(|error| tracing::error!("could not get transactions page: {error}"))?;

    let categories = list_expense_categories(&connection)
        .inspect_err(|error| tracing::error!("could not list categories: {error}"))?;

    let indicators = create_pagination_indicators(
        page_state.page,
        page_state.page_count,
        state.pagination_config.max_pages,
    );

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);
    let table = transactions_view(&TransactionsViewModel {
        transactions: &transactions,
        filter: &filter,
        categories: &categories,
        indicators: &indicators,
    });

    let content = html!(
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "Transactions" }

            (table)
        }
    );

    Ok(render(StatusCode::OK, base("Transactions", &[], &content)))
}
