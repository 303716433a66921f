//! Summary metrics for the dashboard: aggregate totals, derived figures and
//! the metric cards that display them.

pub(crate) mod cards;
pub(crate) mod metrics;
