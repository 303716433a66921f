//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::Error;

/// The database ID of a transaction.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. an invoice payment.
    Income,
    /// Money spent, e.g. software subscriptions.
    Expense,
}

impl TransactionKind {
    /// The value stored in the `kind` column.
    pub fn as_db_value(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Parse the value stored in the `kind` column.
    pub fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// An income or expense, i.e. an event where money was either earned or spent.
///
/// Amounts are always positive; the direction of the money is recorded by
/// [TransactionKind]. To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money earned or spent in this transaction.
    /// Always greater than zero.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category of an expense, e.g. "Software", "Travel".
    /// Always `None` for income.
    pub category: Option<String>,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, kind: TransactionKind) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            kind,
            category: None,
            description: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Pass the finished builder to [create_transaction] or [update_transaction],
/// which validate it and write it to the database.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction. Must be greater than zero.
    pub amount: f64,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The category of an expense. Required for expenses, ignored for income.
    pub category: Option<String>,
    /// A human-readable description of the transaction.
    pub description: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Check the builder's fields and normalize the category.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if the amount is zero or negative,
    /// - or [Error::MissingExpenseCategory] if an expense has no category.
    fn validate(mut self) -> Result<Self, Error> {
        if self.amount <= 0.0 {
            return Err(Error::NonPositiveAmount(self.amount));
        }

        match self.kind {
            TransactionKind::Expense => {
                if self
                    .category
                    .as_ref()
                    .is_none_or(|category| category.trim().is_empty())
                {
                    return Err(Error::MissingExpenseCategory);
                }
            }
            // Income never carries a category.
            TransactionKind::Income => self.category = None,
        }

        Ok(self)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is zero or negative,
/// - or [Error::MissingExpenseCategory] if an expense has no category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let builder = builder.validate()?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, kind, category, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, date, kind, category, description, created_at",
        )?
        .query_one(
            (
                builder.amount,
                builder.date,
                builder.kind.as_db_value(),
                builder.category,
                builder.description,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, kind, category, description, created_at
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Overwrite the transaction `id` with the fields from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is zero or negative,
/// - or [Error::MissingExpenseCategory] if an expense has no category,
/// - or [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let builder = builder.validate()?;

    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET amount = ?1, date = ?2, kind = ?3, category = ?4, description = ?5
         WHERE id = ?6",
        (
            builder.amount,
            builder.date,
            builder.kind.as_db_value(),
            builder.category,
            builder.description,
            id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    get_transaction(id, connection)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                category TEXT,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index used by the transactions page query.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_id ON \"transaction\"(date, id);",
        (),
    )?;

    // Composite index used by the summary aggregates.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_kind_category ON \"transaction\"(kind, category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let kind: String = row.get(3)?;
    let kind = TransactionKind::from_db_value(&kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            format!("invalid transaction kind '{kind}'").into(),
        )
    })?;
    let category = row.get(4)?;
    let description = row.get(5)?;
    let created_at = row.get(6)?;

    Ok(Transaction {
        id,
        amount,
        date,
        kind,
        category,
        description,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Transaction, TransactionKind, count_transactions, create_transaction, get_transaction,
            update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(
            Transaction::build(amount, date!(2025 - 10 - 05), TransactionKind::Income)
                .description("Invoice #1"),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.kind, TransactionKind::Income);
                assert_eq!(transaction.category, None);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_non_positive_amount() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(0.0, date!(2025 - 10 - 05), TransactionKind::Income),
            &conn,
        );

        assert_eq!(result, Err(Error::NonPositiveAmount(0.0)));
    }

    #[test]
    fn create_fails_on_expense_without_category() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(9.99, date!(2025 - 10 - 05), TransactionKind::Expense),
            &conn,
        );

        assert_eq!(result, Err(Error::MissingExpenseCategory));
    }

    #[test]
    fn create_drops_category_for_income() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            Transaction::build(100.0, date!(2025 - 10 - 05), TransactionKind::Income)
                .category(Some("Software".to_owned())),
            &conn,
        )
        .unwrap();

        assert_eq!(transaction.category, None);
    }

    #[test]
    fn create_then_get_round_trips() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(49.99, date!(2025 - 10 - 04), TransactionKind::Expense)
                .category(Some("Software".to_owned()))
                .description("IDE subscription"),
            &conn,
        )
        .unwrap();

        let got = get_transaction(created.id, &conn).unwrap();

        assert_eq!(created, got);
    }

    #[test]
    fn update_overwrites_fields() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build(49.99, date!(2025 - 10 - 04), TransactionKind::Expense)
                .category(Some("Software".to_owned())),
            &conn,
        )
        .unwrap();

        let updated = update_transaction(
            created.id,
            Transaction::build(52.50, date!(2025 - 10 - 06), TransactionKind::Expense)
                .category(Some("Hardware".to_owned()))
                .description("New keyboard"),
            &conn,
        )
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, 52.50);
        assert_eq!(updated.date, date!(2025 - 10 - 06));
        assert_eq!(updated.category, Some("Hardware".to_owned()));
        assert_eq!(updated.description, "New keyboard");
    }

    #[test]
    fn update_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = update_transaction(
            999,
            Transaction::build(1.0, date!(2025 - 10 - 04), TransactionKind::Income),
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn get_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = get_transaction(999, &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(i as f64, today, TransactionKind::Income),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
