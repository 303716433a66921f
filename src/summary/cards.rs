//! The summary metric cards and the profit margin indicator.

use maud::{Markup, html};

use crate::{html::currency_rounded_with_tooltip, summary::metrics::SummaryMetrics};

const CARD_STYLE: &str = "flex flex-col gap-1 rounded border border-gray-200 \
    bg-white p-4 dark:border-gray-700 dark:bg-gray-800";

const CARD_LABEL_STYLE: &str = "text-xs uppercase text-gray-500 dark:text-gray-400";

pub(crate) fn summary_cards(metrics: &SummaryMetrics) -> Markup {
    let profit_class = amount_class(metrics.profit);
    let safe_to_spend_class = amount_class(metrics.safe_to_spend);

    html!(
        section id="summary-cards" class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-2 gap-4 lg:grid-cols-5"
            {
                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Income" }
                    span class="text-2xl font-semibold text-green-600 dark:text-green-400"
                    {
                        (currency_rounded_with_tooltip(metrics.income))
                    }
                }

                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Expenses" }
                    span class="text-2xl font-semibold text-red-600 dark:text-red-400"
                    {
                        (currency_rounded_with_tooltip(metrics.expenses))
                    }
                }

                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Profit" }
                    span class=(format!("text-2xl font-semibold {profit_class}"))
                    {
                        (currency_rounded_with_tooltip(metrics.profit))
                    }

                    (margin_bar(metrics))
                }

                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Tax Reserve" }
                    span class="text-2xl font-semibold"
                    {
                        (currency_rounded_with_tooltip(metrics.tax_reserve))
                    }
                    span class="text-xs text-gray-500 dark:text-gray-400"
                    {
                        "+ savings "
                        (currency_rounded_with_tooltip(metrics.recommended_savings))
                    }
                }

                div class=(CARD_STYLE)
                {
                    span class=(CARD_LABEL_STYLE) { "Safe to Spend" }
                    span class=(format!("text-2xl font-semibold {safe_to_spend_class}"))
                    {
                        (currency_rounded_with_tooltip(metrics.safe_to_spend))
                    }
                }
            }
        }
    )
}

/// A thin bar showing the profit margin, green for profit and red for a loss.
/// The width is the margin's magnitude capped at 100%.
fn margin_bar(metrics: &SummaryMetrics) -> Markup {
    let margin = metrics.profit_margin();
    let bar_color = if margin < 0.0 {
        "bg-red-500"
    } else {
        "bg-green-500"
    };

    html!(
        div
            class="h-1.5 w-full rounded bg-gray-200 dark:bg-gray-700"
            title=(format!("{margin:.1}% margin"))
        {
            div
                class=(format!("h-1.5 rounded {bar_color}"))
                style=(format!("width: {:.1}%", metrics.margin_bar_width()))
            {}
        }
    )
}

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-gray-900 dark:text-white"
    }
}
