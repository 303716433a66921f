//! Chart generation and rendering for the dashboard.
//!
//! The income/expense chart is generated as JSON configuration for the
//! ECharts library and rendered with a HTML container and JavaScript
//! initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip, Trigger,
    },
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::bucket::BucketSeries, html::HeadElement};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML container for a dashboard chart.
pub(super) fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div
                id=(chart.id)
                class="min-h-[380px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// A grouped bar chart of income vs expenses per bucket.
///
/// The x axis shows the short bucket labels; the tooltip header shows the
/// longer bucket titles.
pub(super) fn income_expense_chart(series: &BucketSeries, range_label: &str) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext(range_label.to_owned()),
        )
        .tooltip(currency_tooltip(&series.titles))
        .legend(Legend::new())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(series.labels.clone()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Income")
                .item_style(ItemStyle::new().color("#16a34a"))
                .data(series.income.clone()),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color("#dc2626"))
                .data(series.expenses.clone()),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values.
///
/// The tooltip header is replaced with the bucket's long title, which carries
/// more context than the short axis label (e.g. "Week of 7 Jan 2024").
fn currency_tooltip(titles: &[String]) -> Tooltip {
    // Titles are plain generated strings, serializing them cannot fail.
    let titles_json = serde_json::to_string(titles).unwrap_or_else(|_| "[]".to_owned());

    let formatter = JsFunction::new_with_args(
        "params",
        &format!(
            r#"const titles = {titles_json};
            const currencyFormatter = new Intl.NumberFormat('en-US', {{
                style: 'currency',
                currency: 'USD'
            }});
            const items = Array.isArray(params) ? params : [params];
            let text = titles[items[0].dataIndex] ?? items[0].name;
            for (const item of items) {{
                text += '<br/>' + item.marker + item.seriesName + ': '
                    + currencyFormatter.format(item.value);
            }}
            return text;"#
        ),
    );

    Tooltip::new()
        .trigger(Trigger::Axis)
        .formatter(formatter)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
