//! Read queries over the transaction table for pages and charts.

use std::ops::RangeInclusive;

use rusqlite::{Connection, params_from_iter};
use time::Date;

use crate::{
    Error,
    transaction::{Transaction, filter::TransactionFilter, map_transaction_row},
};

/// Count the transactions matching `filter`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_transactions_filtered(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let (where_clause, params) = filter.where_clause();

    connection
        .query_row(
            &format!("SELECT COUNT(id) FROM \"transaction\" {where_clause}"),
            params_from_iter(params),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Get one page of transactions matching `filter`, newest first.
///
/// Rows are ordered by date descending with the ID as a tiebreak so that
/// transactions on the same day keep a stable order across requests.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_page(
    filter: &TransactionFilter,
    limit: u64,
    offset: u64,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, params) = filter.where_clause();

    connection
        .prepare(&format!(
            "SELECT id, amount, date, kind, category, description, created_at
             FROM \"transaction\"
             {where_clause}
             ORDER BY date DESC, id DESC
             LIMIT {limit} OFFSET {offset}"
        ))?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(|error| error.into()))
        .collect()
}

/// Get all transactions dated within `date_range` (inclusive), oldest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_date_range(
    date_range: RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, kind, category, description, created_at
             FROM \"transaction\"
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC, id ASC",
        )?
        .query_map(
            (date_range.start(), date_range.end()),
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(|error| error.into()))
        .collect()
}

/// Get the distinct expense categories in use, sorted alphabetically.
///
/// Used to populate the category dropdowns on the filter and form views.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_expense_categories(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare(
            "SELECT DISTINCT category FROM \"transaction\"
             WHERE category IS NOT NULL
             ORDER BY category ASC",
        )?
        .query_map([], |row| row.get(0))?
        .map(|category_result| category_result.map_err(|error| error.into()))
        .collect()
}
