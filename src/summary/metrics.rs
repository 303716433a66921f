//! Aggregate queries and derived summary metrics.

use rusqlite::Connection;

use crate::{Error, transaction::TransactionKind};

/// The share of income set aside for tax.
pub(crate) const TAX_RATE: f64 = 0.25;

/// The share of profit recommended as savings.
pub(crate) const SAVINGS_RATE: f64 = 0.10;

/// The headline numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SummaryMetrics {
    /// Total income across all transactions.
    pub income: f64,
    /// Total expenses across all transactions.
    pub expenses: f64,
    /// Income minus expenses. May be negative.
    pub profit: f64,
    /// The amount to set aside for tax: [TAX_RATE] of income.
    pub tax_reserve: f64,
    /// The recommended savings: [SAVINGS_RATE] of profit, never negative.
    pub recommended_savings: f64,
    /// What is left after profit is reduced by the tax reserve and savings.
    pub safe_to_spend: f64,
}

impl SummaryMetrics {
    /// Derive all metrics from the income and expense totals.
    pub fn from_totals(income: f64, expenses: f64) -> Self {
        let profit = income - expenses;
        let tax_reserve = TAX_RATE * income;
        let recommended_savings = (SAVINGS_RATE * profit).max(0.0);
        let safe_to_spend = profit - tax_reserve - recommended_savings;

        Self {
            income,
            expenses,
            profit,
            tax_reserve,
            recommended_savings,
            safe_to_spend,
        }
    }

    /// The profit margin as a percentage.
    ///
    /// When there is no income the margin is -100 for a loss and 0 otherwise,
    /// so the indicator still points the right way instead of dividing by zero.
    pub fn profit_margin(&self) -> f64 {
        if self.income > 0.0 {
            self.profit / self.income * 100.0
        } else if self.profit < 0.0 {
            -100.0
        } else {
            0.0
        }
    }

    /// The width of the margin indicator bar, the margin's magnitude clipped
    /// to 0..=100.
    pub fn margin_bar_width(&self) -> f64 {
        self.profit_margin().abs().clamp(0.0, 100.0)
    }
}

/// Compute the summary metrics from the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub(crate) fn get_summary_metrics(connection: &Connection) -> Result<SummaryMetrics, Error> {
    let income = sum_amount_by_kind(TransactionKind::Income, connection)?;
    let expenses = sum_amount_by_kind(TransactionKind::Expense, connection)?;

    Ok(SummaryMetrics::from_totals(income, expenses))
}

fn sum_amount_by_kind(kind: TransactionKind, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" WHERE kind = ?1",
            [kind.as_db_value()],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Get the expense category with the largest total spend.
///
/// Ties are broken by taking the lexicographically first category so the
/// result is deterministic.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub(crate) fn largest_expense_category(
    connection: &Connection,
) -> Result<Option<(String, f64)>, Error> {
    let mut statement = connection.prepare(
        "SELECT category, SUM(amount) AS total FROM \"transaction\"
         WHERE kind = 'expense' AND category IS NOT NULL
         GROUP BY category
         ORDER BY total DESC, category ASC
         LIMIT 1",
    )?;

    let mut rows = statement.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod metrics_tests {
    use super::SummaryMetrics;

    #[test]
    fn derives_metrics_from_totals() {
        let metrics = SummaryMetrics::from_totals(1000.0, 400.0);

        assert_eq!(metrics.profit, 600.0);
        assert_eq!(metrics.tax_reserve, 250.0);
        assert_eq!(metrics.recommended_savings, 60.0);
        assert_eq!(metrics.safe_to_spend, 290.0);
    }

    #[test]
    fn savings_never_negative_on_a_loss() {
        let metrics = SummaryMetrics::from_totals(100.0, 400.0);

        assert_eq!(metrics.profit, -300.0);
        assert_eq!(metrics.recommended_savings, 0.0);
        assert_eq!(metrics.safe_to_spend, -325.0);
    }

    #[test]
    fn margin_is_percentage_of_income() {
        let metrics = SummaryMetrics::from_totals(1000.0, 400.0);

        assert_eq!(metrics.profit_margin(), 60.0);
    }

    #[test]
    fn margin_without_income_is_negative_hundred_on_a_loss() {
        let metrics = SummaryMetrics::from_totals(0.0, 400.0);

        assert_eq!(metrics.profit_margin(), -100.0);
    }

    #[test]
    fn margin_without_income_or_expenses_is_zero() {
        let metrics = SummaryMetrics::from_totals(0.0, 0.0);

        assert_eq!(metrics.profit_margin(), 0.0);
    }

    #[test]
    fn margin_bar_width_is_clipped_magnitude() {
        let loss = SummaryMetrics::from_totals(100.0, 400.0);
        let profit = SummaryMetrics::from_totals(1000.0, 400.0);

        assert_eq!(loss.margin_bar_width(), 100.0);
        assert_eq!(profit.margin_bar_width(), 60.0);
    }
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        summary::metrics::{get_summary_metrics, largest_expense_category},
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn sums_income_and_expenses_separately() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(100.0, date!(2025 - 01 - 01), TransactionKind::Income),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(50.0, date!(2025 - 01 - 02), TransactionKind::Income),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(30.0, date!(2025 - 01 - 03), TransactionKind::Expense)
                .category(Some("Software".to_owned())),
            &conn,
        )
        .unwrap();

        let metrics = get_summary_metrics(&conn).unwrap();

        assert_eq!(metrics.income, 150.0);
        assert_eq!(metrics.expenses, 30.0);
        assert_eq!(metrics.profit, 120.0);
    }

    #[test]
    fn metrics_are_zero_for_empty_database() {
        let conn = get_test_connection();

        let metrics = get_summary_metrics(&conn).unwrap();

        assert_eq!(metrics.income, 0.0);
        assert_eq!(metrics.expenses, 0.0);
        assert_eq!(metrics.profit_margin(), 0.0);
    }

    #[test]
    fn finds_largest_expense_category() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(30.0, date!(2025 - 01 - 01), TransactionKind::Expense)
                .category(Some("Software".to_owned())),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(45.0, date!(2025 - 01 - 02), TransactionKind::Expense)
                .category(Some("Travel".to_owned())),
            &conn,
        )
        .unwrap();

        let largest = largest_expense_category(&conn).unwrap();

        assert_eq!(largest, Some(("Travel".to_owned(), 45.0)));
    }

    #[test]
    fn largest_expense_category_tie_breaks_alphabetically() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(30.0, date!(2025 - 01 - 01), TransactionKind::Expense)
                .category(Some("Travel".to_owned())),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(30.0, date!(2025 - 01 - 02), TransactionKind::Expense)
                .category(Some("Software".to_owned())),
            &conn,
        )
        .unwrap();

        let largest = largest_expense_category(&conn).unwrap();

        assert_eq!(largest, Some(("Software".to_owned(), 30.0)));
    }

    #[test]
    fn largest_expense_category_is_none_without_expenses() {
        let conn = get_test_connection();

        let largest = largest_expense_category(&conn).unwrap();

        assert_eq!(largest, None);
    }
}
