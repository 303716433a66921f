//! The filter state for the transactions page.
//!
//! Filters live entirely in the URL query string, they are never persisted.

use serde::Deserialize;

use crate::transaction::TransactionKind;

/// Which transaction kinds to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    /// Show both income and expenses.
    #[default]
    All,
    /// Show income only.
    Income,
    /// Show expenses only.
    Expense,
}

impl KindFilter {
    /// The value used in query strings and form options.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Income => "income",
            KindFilter::Expense => "expense",
        }
    }

    /// The text shown in the filter dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            KindFilter::All => "All",
            KindFilter::Income => "Income",
            KindFilter::Expense => "Expenses",
        }
    }
}

/// The active filter for the transactions page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionFilter {
    /// Which transaction kinds to show.
    pub kind: KindFilter,
    /// Narrow expenses to a single category.
    /// Only meaningful when `kind` is [KindFilter::Expense].
    pub category: Option<String>,
}

impl TransactionFilter {
    /// Build a filter from raw query parameters.
    ///
    /// The category only narrows the results when expenses are selected,
    /// matching the filter controls which only offer the category dropdown
    /// for expenses. Blank categories are treated as absent.
    pub fn new(kind: Option<KindFilter>, category: Option<String>) -> Self {
        let kind = kind.unwrap_or_default();
        let category = match kind {
            KindFilter::Expense => category.filter(|category| !category.trim().is_empty()),
            _ => None,
        };

        Self { kind, category }
    }

    /// The SQL `WHERE` clause for this filter and its parameters.
    ///
    /// Returns an empty clause when nothing is filtered. The parameters bind
    /// to `?1`, `?2`, ... in order.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        let mut predicates = Vec::new();
        let mut params = Vec::new();

        match self.kind {
            KindFilter::All => {}
            KindFilter::Income => {
                params.push(TransactionKind::Income.as_db_value().to_owned());
                predicates.push(format!("kind = ?{}", params.len()));
            }
            KindFilter::Expense => {
                params.push(TransactionKind::Expense.as_db_value().to_owned());
                predicates.push(format!("kind = ?{}", params.len()));
            }
        }

        if let Some(category) = &self.category {
            params.push(category.clone());
            predicates.push(format!("category = ?{}", params.len()));
        }

        if predicates.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", predicates.join(" AND ")), params)
        }
    }

    /// Encode the filter as URL query parameters, with an optional page number.
    ///
    /// Used to build links that preserve the active filter.
    pub fn to_query_string(&self, page: Option<u64>) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if self.kind != KindFilter::All {
            pairs.push(("kind", self.kind.as_query_value().to_owned()));
        }

        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }

        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }

        // Serializing string pairs cannot fail.
        serde_urlencoded::to_string(&pairs).unwrap_or_default()
    }
}

#[cfg(test)]
mod filter_tests {
    use crate::transaction::filter::{KindFilter, TransactionFilter};

    #[test]
    fn defaults_to_all_kinds() {
        let filter = TransactionFilter::new(None, None);

        assert_eq!(filter.kind, KindFilter::All);
        assert_eq!(filter.category, None);
    }

    #[test]
    fn category_is_dropped_unless_filtering_expenses() {
        let filter = TransactionFilter::new(Some(KindFilter::Income), Some("Software".to_owned()));

        assert_eq!(filter.category, None);
    }

    #[test]
    fn blank_category_is_dropped() {
        let filter = TransactionFilter::new(Some(KindFilter::Expense), Some("  ".to_owned()));

        assert_eq!(filter.category, None);
    }

    #[test]
    fn where_clause_is_empty_for_all_kinds() {
        let filter = TransactionFilter::new(None, None);

        let (clause, params) = filter.where_clause();

        assert_eq!(clause, "");
        assert!(params.is_empty());
    }

    #[test]
    fn where_clause_filters_kind_and_category() {
        let filter = TransactionFilter::new(Some(KindFilter::Expense), Some("Travel".to_owned()));

        let (clause, params) = filter.where_clause();

        assert_eq!(clause, "WHERE kind = ?1 AND category = ?2");
        assert_eq!(params, vec!["expense".to_owned(), "Travel".to_owned()]);
    }

    #[test]
    fn query_string_round_trips_filter_and_page() {
        let filter = TransactionFilter::new(Some(KindFilter::Expense), Some("Travel".to_owned()));

        let query_string = filter.to_query_string(Some(3));

        assert_eq!(query_string, "kind=expense&category=Travel&page=3");
    }

    #[test]
    fn query_string_is_empty_for_default_filter() {
        let filter = TransactionFilter::default();

        assert_eq!(filter.to_query_string(None), "");
    }
}
