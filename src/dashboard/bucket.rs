//! Time-bucketed aggregation of transactions for the dashboard chart.
//!
//! A date range is divided into buckets (days, weeks, months, quarters or
//! years). Every bucket in the range is emitted even when no transaction
//! falls into it, so the chart shows gaps as zero bars rather than skipping
//! them.

use std::collections::BTreeMap;

use serde::Deserialize;
use time::{Date, Duration, Month};

use crate::transaction::{Transaction, TransactionKind};

/// The size of the chart buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Pick a granularity for a range spanning `day_count` days (inclusive).
    ///
    /// Quarterly buckets are never chosen automatically; they are only
    /// reachable through the explicit granularity override on the dashboard.
    pub fn for_span_days(day_count: i64) -> Self {
        if day_count > 730 {
            Granularity::Year
        } else if day_count > 180 {
            Granularity::Month
        } else if day_count > 45 {
            Granularity::Week
        } else {
            Granularity::Day
        }
    }

    /// The value used in query strings and form options.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    /// The text shown in the granularity dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Day => "Daily",
            Granularity::Week => "Weekly",
            Granularity::Month => "Monthly",
            Granularity::Quarter => "Quarterly",
            Granularity::Year => "Yearly",
        }
    }
}

/// The bucketed income and expense totals over a range, aligned by index.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BucketSeries {
    /// Short axis labels, one per bucket, in chronological order.
    pub labels: Vec<String>,
    /// Longer tooltip titles, aligned with `labels`.
    pub titles: Vec<String>,
    /// Total income per bucket.
    pub income: Vec<f64>,
    /// Total expenses per bucket.
    pub expenses: Vec<f64>,
}

/// The normalized start dates of every bucket touching `start..=end`,
/// in ascending order.
pub(crate) fn bucket_keys(start: Date, end: Date, granularity: Granularity) -> Vec<Date> {
    let mut keys = Vec::new();
    // Walk from the normalized start so month-length clamping cannot drift
    // the cursor and skip the bucket containing the end date.
    let mut cursor = bucket_start(granularity, start);

    while cursor <= end {
        keys.push(cursor);
        cursor = advance(granularity, cursor);
    }

    keys
}

/// Aggregate `transactions` into per-bucket income and expense totals over
/// the inclusive range `start..=end`.
///
/// Transactions dated outside the range are ignored.
pub(crate) fn bucket_transactions(
    transactions: &[Transaction],
    start: Date,
    end: Date,
    granularity: Granularity,
) -> BucketSeries {
    // Pre-seed every bucket so empty ones still render as zero.
    let mut sums: BTreeMap<Date, (f64, f64)> = bucket_keys(start, end, granularity)
        .into_iter()
        .map(|key| (key, (0.0, 0.0)))
        .collect();

    for transaction in transactions {
        let key = bucket_start(granularity, transaction.date);

        if let Some((income, expenses)) = sums.get_mut(&key) {
            match transaction.kind {
                TransactionKind::Income => *income += transaction.amount,
                TransactionKind::Expense => *expenses += transaction.amount,
            }
        }
    }

    let mut series = BucketSeries {
        labels: Vec::with_capacity(sums.len()),
        titles: Vec::with_capacity(sums.len()),
        income: Vec::with_capacity(sums.len()),
        expenses: Vec::with_capacity(sums.len()),
    };

    // BTreeMap iteration keeps the buckets in chronological order.
    for (key, (income, expenses)) in sums {
        series.labels.push(bucket_label(granularity, key));
        series.titles.push(bucket_title(granularity, key));
        series.income.push(income);
        series.expenses.push(expenses);
    }

    series
}

/// Normalize `date` to the first day of its containing bucket.
///
/// Weeks start on Sunday.
pub(crate) fn bucket_start(granularity: Granularity, date: Date) -> Date {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => {
            date - Duration::days(date.weekday().number_days_from_sunday() as i64)
        }
        Granularity::Month => first_of_month(date.year(), date.month()),
        Granularity::Quarter => {
            let quarter_start_month = match date.month() {
                Month::January | Month::February | Month::March => Month::January,
                Month::April | Month::May | Month::June => Month::April,
                Month::July | Month::August | Month::September => Month::July,
                Month::October | Month::November | Month::December => Month::October,
            };
            first_of_month(date.year(), quarter_start_month)
        }
        Granularity::Year => first_of_month(date.year(), Month::January),
    }
}

/// Move `date` forward by one bucket-sized step.
fn advance(granularity: Granularity, date: Date) -> Date {
    match granularity {
        Granularity::Day => date + Duration::days(1),
        Granularity::Week => date + Duration::days(7),
        Granularity::Month => add_months(date, 1),
        Granularity::Quarter => add_months(date, 3),
        Granularity::Year => add_months(date, 12),
    }
}

/// Calendar month arithmetic, clamping the day to the target month's length
/// (e.g. 31 Jan + 1 month = 28/29 Feb).
fn add_months(date: Date, months: i32) -> Date {
    let month_index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + months;
    let year = month_index.div_euclid(12);
    let month = Month::try_from((month_index.rem_euclid(12) + 1) as u8)
        .expect("month index is always in 1..=12");
    let day = date.day().min(last_day_of_month(year, month));

    Date::from_calendar_date(year, month, day).expect("day is clamped to the month's length")
}

fn first_of_month(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).expect("the first of a month is always valid")
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

fn quarter_number(month: Month) -> u8 {
    (u8::from(month) - 1) / 3 + 1
}

fn bucket_label(granularity: Granularity, key: Date) -> String {
    match granularity {
        Granularity::Day | Granularity::Week => {
            format!("{} {}", key.day(), month_abbrev(key.month()))
        }
        Granularity::Month => format!("{} {}", month_abbrev(key.month()), key.year()),
        Granularity::Quarter => format!("Q{} {}", quarter_number(key.month()), key.year()),
        Granularity::Year => key.year().to_string(),
    }
}

fn bucket_title(granularity: Granularity, key: Date) -> String {
    match granularity {
        Granularity::Day => format!("{} {} {}", key.day(), month_abbrev(key.month()), key.year()),
        Granularity::Week => format!(
            "Week of {} {} {}",
            key.day(),
            month_abbrev(key.month()),
            key.year()
        ),
        Granularity::Month => format!("{} {}", month_name(key.month()), key.year()),
        Granularity::Quarter => {
            let quarter = quarter_number(key.month());
            let end_month = add_months(key, 2).month();
            format!(
                "Q{} {} ({}-{})",
                quarter,
                key.year(),
                month_abbrev(key.month()),
                month_abbrev(end_month)
            )
        }
        Granularity::Year => format!("Year {}", key.year()),
    }
}
