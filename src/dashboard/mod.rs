//! The dashboard page: summary cards, the income/expense chart and the AI
//! summary widget.

pub(crate) mod bucket;
mod chart;
mod handlers;

pub use handlers::get_dashboard_page;
