//! The shared form markup for creating and editing transactions.

use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::{Transaction, TransactionKind},
};

/// Which HTTP method the form submits with.
pub(super) enum FormMethod {
    /// `hx-post`, used by the new transaction form.
    Post,
    /// `hx-put`, used by the edit form.
    Put,
}

/// The values the form is pre-filled with when editing.
pub(super) struct FormValues {
    pub amount: Option<f64>,
    pub date: Date,
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub description: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            amount: None,
            date: OffsetDateTime::now_utc().date(),
            kind: TransactionKind::Income,
            category: None,
            description: String::new(),
        }
    }
}

impl From<&Transaction> for FormValues {
    fn from(transaction: &Transaction) -> Self {
        Self {
            amount: Some(transaction.amount),
            date: transaction.date,
            kind: transaction.kind,
            category: transaction.category.clone(),
            description: transaction.description.clone(),
        }
    }
}

/// Render the transaction form.
///
/// `action_url` is where the form is submitted, `categories` populates the
/// datalist suggestions for the category input. Errors from the endpoint are
/// swapped into the alert container.
pub(super) fn transaction_form(
    action_url: &str,
    method: FormMethod,
    values: &FormValues,
    categories: &[String],
    submit_label: &str,
) -> Markup {
    let max_date = OffsetDateTime::now_utc().date();

    html!(
        form
            hx-post=[matches!(method, FormMethod::Post).then_some(action_url)]
            hx-put=[matches!(method, FormMethod::Put).then_some(action_url)]
            hx-target-error="#alert-container"
            hx-swap="innerHTML"
            id="indicator"
            class="space-y-4 w-full"
        {
            div
            {
                label for="kind" class=(FORM_LABEL_STYLE) { "Type" }

                select
                    name="kind"
                    id="kind"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                {
                    option
                        value=(TransactionKind::Income.as_db_value())
                        selected[values.kind == TransactionKind::Income]
                    {
                        "Income"
                    }
                    option
                        value=(TransactionKind::Expense.as_db_value())
                        selected[values.kind == TransactionKind::Expense]
                    {
                        "Expense"
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        class=(FORM_TEXT_INPUT_STYLE)
                        min="0"
                        step="0.01"
                        value=[values.amount]
                        required;
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(values.date)
                    max=(max_date)
                    required;
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category (expenses only)" }

                input
                    type="text"
                    name="category"
                    id="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                    list="category-suggestions"
                    value=[values.category.as_deref()];

                datalist id="category-suggestions"
                {
                    @for category in categories {
                        option value=(category) {}
                    }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(values.description);
            }

            button
                type="submit"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) }
                (submit_label)
            }
        }
    )
}
