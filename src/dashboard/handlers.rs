//! The dashboard page: summary metric cards, the bucketed income/expense
//! chart over a selectable date range, and the AI summary widget.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::Response,
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Duration, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
        link, loading_spinner, render,
    },
    navigation::NavBar,
    summary::{cards::summary_cards, metrics::get_summary_metrics},
    transaction::{count_transactions, query::get_transactions_in_date_range},
};

use super::{
    bucket::{BucketSeries, Granularity, bucket_transactions},
    chart::{DashboardChart, chart_view, charts_script, income_expense_chart},
};

/// How many days the chart covers when no range is given (inclusive).
const DEFAULT_RANGE_DAYS: i64 = 30;

/// The raw query parameters for the dashboard chart range.
#[derive(Debug, Default, Deserialize)]
pub struct ChartRangeQuery {
    /// The first day of the chart range.
    start: Option<Date>,
    /// The last day of the chart range.
    end: Option<Date>,
    /// Override the automatically selected bucket size.
    granularity: Option<Granularity>,
}

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The resolved chart range: the inclusive dates, the bucket size, and
/// whether the size was overridden by the user.
struct ChartRange {
    start: Date,
    end: Date,
    granularity: Granularity,
    granularity_overridden: bool,
}

fn resolve_range(query: &ChartRangeQuery, today: Date) -> ChartRange {
    let end = query.end.unwrap_or(today);
    let start = query
        .start
        .unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS - 1));

    // A reversed range is treated as if the dates were given the right way
    // around rather than failing the request.
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    let day_count = (end - start).whole_days() + 1;

    ChartRange {
        start,
        end,
        granularity: query
            .granularity
            .unwrap_or_else(|| Granularity::for_span_days(day_count)),
        granularity_overridden: query.granularity.is_some(),
    }
}

/// Render the dashboard page.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<ChartRangeQuery>,
) -> Result<Response, Error> {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction_count = count_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not count transactions: {error}"))?;

    if transaction_count == 0 {
        return Ok(render(StatusCode::OK, dashboard_no_data_view(nav_bar)));
    }

    let metrics = get_summary_metrics(&connection)
        .inspect_err(|error| tracing::error!("could not compute summary metrics: {error}"))?;

    let range = resolve_range(&query, OffsetDateTime::now_utc().date());
    let transactions = get_transactions_in_date_range(range.start..=range.end, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions for chart: {error}"))?;

    let series = bucket_transactions(&transactions, range.start, range.end, range.granularity);
    let range_label = format!("{} to {}", range.start, range.end);
    let chart = DashboardChart {
        id: "income-expense-chart",
        options: income_expense_chart(&series, &range_label).to_string(),
    };

    Ok(render(
        StatusCode::OK,
        dashboard_view(nav_bar, &metrics, &range, &series, &chart),
    ))
}

fn dashboard_view(
    nav_bar: NavBar,
    metrics: &crate::summary::metrics::SummaryMetrics,
    range: &ChartRange,
    series: &BucketSeries,
    chart: &DashboardChart,
) -> Markup {
    let charts = std::slice::from_ref(chart);

    let content = html!(
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "Dashboard" }

            (summary_cards(metrics))

            (range_controls(range))

            @if series.labels.is_empty() {
                p class="text-center py-8" { "No buckets in the selected range." }
            } @else {
                (chart_view(chart))
            }

            (advisor_widget())
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

fn range_controls(range: &ChartRange) -> Markup {
    let granularities = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ];

    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex items-end gap-2 mb-4"
        {
            div
            {
                label for="start" class="block text-sm mb-1" { "From" }
                input
                    type="date"
                    name="start"
                    id="start"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(range.start);
            }

            div
            {
                label for="end" class="block text-sm mb-1" { "To" }
                input
                    type="date"
                    name="end"
                    id="end"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(range.end);
            }

            div
            {
                label for="granularity" class="block text-sm mb-1" { "Buckets" }
                select
                    name="granularity"
                    id="granularity"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[!range.granularity_overridden] { "Automatic" }

                    @for granularity in granularities {
                        option
                            value=(granularity.as_query_value())
                            selected[range.granularity_overridden
                                && range.granularity == granularity]
                        {
                            (granularity.label())
                        }
                    }
                }
            }

            button type="submit" class="px-4 py-2 bg-blue-500 text-white rounded" { "Apply" }
        }
    )
}

fn advisor_widget() -> Markup {
    html!(
        section id="advisor" class="w-full mx-auto mb-4"
        {
            h2 class="text-lg font-semibold mb-2" { "AI Summary" }

            div
                id="advisor-summary"
                class="text-sm text-gray-700 dark:text-gray-300 mb-2"
            {
                p { "Ask for a plain-language summary of your finances." }
            }

            button
                hx-post=(endpoints::ADVISOR_SUMMARY)
                hx-target="#advisor-summary"
                hx-swap="innerHTML"
                hx-target-error="#advisor-summary"
                id="indicator"
                class=(BUTTON_PRIMARY_STYLE)
                style="max-width: 16rem"
            {
                span class="htmx-indicator" { (loading_spinner()) }
                "Summarize my finances"
            }
        }
    )
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "recording a transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "Dashboard" }

            p
            {
                "There is nothing to show yet. Start by "
                (new_transaction_link)
                "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

#[cfg(test)]
mod dashboard_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::Response,
    };
    use rusqlite::Connection;
    use scraper::Html;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{ChartRange, ChartRangeQuery, DashboardState, get_dashboard_page, resolve_range};

    use crate::dashboard::bucket::Granularity;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn range_defaults_to_last_thirty_days() {
        let today = date!(2025 - 06 - 30);

        let range = resolve_range(&ChartRangeQuery::default(), today);

        assert_eq!(range.end, today);
        assert_eq!(range.start, date!(2025 - 06 - 01));
        assert_eq!(range.granularity, Granularity::Day);
    }

    #[test]
    fn reversed_range_is_swapped() {
        let query = ChartRangeQuery {
            start: Some(date!(2025 - 06 - 30)),
            end: Some(date!(2025 - 06 - 01)),
            granularity: None,
        };

        let range = resolve_range(&query, date!(2025 - 07 - 01));

        assert_eq!(range.start, date!(2025 - 06 - 01));
        assert_eq!(range.end, date!(2025 - 06 - 30));
    }

    #[test]
    fn granularity_override_wins_over_span() {
        let query = ChartRangeQuery {
            start: Some(date!(2025 - 01 - 01)),
            end: Some(date!(2025 - 12 - 31)),
            granularity: Some(Granularity::Quarter),
        };

        let range = resolve_range(&query, date!(2025 - 12 - 31));

        assert_eq!(range.granularity, Granularity::Quarter);
        assert!(range.granularity_overridden);
    }

    fn assert_range(range: &ChartRange, start: time::Date, end: time::Date) {
        assert_eq!(range.start, start);
        assert_eq!(range.end, end);
    }

    #[test]
    fn explicit_range_is_kept() {
        let query = ChartRangeQuery {
            start: Some(date!(2025 - 03 - 01)),
            end: Some(date!(2025 - 03 - 31)),
            granularity: None,
        };

        let range = resolve_range(&query, date!(2025 - 07 - 01));

        assert_range(&range, date!(2025 - 03 - 01), date!(2025 - 03 - 31));
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let conn = get_test_connection();
        let state = DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_dashboard_page(State(state), Query(ChartRangeQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;
        let text = document.root_element().text().collect::<String>();
        assert!(
            text.contains("There is nothing to show yet"),
            "expected the no-data prompt"
        );
    }

    #[tokio::test]
    async fn renders_cards_chart_and_advisor_widget() {
        let conn = get_test_connection();
        create_transaction(
            Transaction::build(1000.0, date!(2025 - 06 - 01), TransactionKind::Income)
                .description("Invoice"),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build(400.0, date!(2025 - 06 - 02), TransactionKind::Expense)
                .category(Some("Software".to_owned())),
            &conn,
        )
        .unwrap();
        let state = DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let query = ChartRangeQuery {
            start: Some(date!(2025 - 06 - 01)),
            end: Some(date!(2025 - 06 - 30)),
            granularity: None,
        };

        let response = get_dashboard_page(State(state), Query(query)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;

        let cards_selector = scraper::Selector::parse("#summary-cards").unwrap();
        assert!(
            document.select(&cards_selector).next().is_some(),
            "expected the summary cards"
        );

        let chart_selector = scraper::Selector::parse("#income-expense-chart").unwrap();
        assert!(
            document.select(&chart_selector).next().is_some(),
            "expected the chart container"
        );

        let advisor_selector = scraper::Selector::parse("#advisor button").unwrap();
        assert!(
            document.select(&advisor_selector).next().is_some(),
            "expected the advisor button"
        );
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
