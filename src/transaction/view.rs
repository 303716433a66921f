//! The markup for the transactions page: filter controls, the transaction
//! table and the pagination indicator.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, link,
    },
    pagination::PaginationIndicator,
    transaction::{
        Transaction, TransactionKind,
        filter::{KindFilter, TransactionFilter},
    },
};

pub(super) struct TransactionsViewModel<'a> {
    pub transactions: &'a [Transaction],
    pub filter: &'a TransactionFilter,
    pub categories: &'a [String],
    pub indicators: &'a [PaginationIndicator],
}

pub(super) fn transactions_view(model: &TransactionsViewModel) -> Markup {
    html!(
        div class="relative overflow-x-auto w-full max-w-4xl"
        {
            div class="flex items-center justify-between mb-4"
            {
                (filter_controls(model.filter, model.categories))

                p { (link(endpoints::NEW_TRANSACTION_VIEW, "New Transaction")) }
            }

            @if model.transactions.is_empty() {
                p class="text-center py-8"
                {
                    "No transactions found. "
                    (link(endpoints::NEW_TRANSACTION_VIEW, "Record your first transaction"))
                    "."
                }
            } @else {
                (transaction_table(model.transactions))

                (pagination_nav(model.indicators, model.filter))
            }
        }
    )
}

fn filter_controls(filter: &TransactionFilter, categories: &[String]) -> Markup {
    let kind_options = [KindFilter::All, KindFilter::Income, KindFilter::Expense];

    html!(
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex items-end gap-2"
        {
            div
            {
                label for="kind" class="block text-sm mb-1" { "Type" }

                select
                    name="kind"
                    id="kind"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    @for option in kind_options {
                        option
                            value=(option.as_query_value())
                            selected[filter.kind == option]
                        {
                            (option.label())
                        }
                    }
                }
            }

            @if filter.kind == KindFilter::Expense && !categories.is_empty() {
                div
                {
                    label for="category" class="block text-sm mb-1" { "Category" }

                    select
                        name="category"
                        id="category"
                        class=(FORM_TEXT_INPUT_STYLE)
                        onchange="this.form.submit()"
                    {
                        option value="" { "All categories" }

                        @for category in categories {
                            option
                                value=(category)
                                selected[filter.category.as_deref() == Some(category)]
                            {
                                (category)
                            }
                        }
                    }
                }
            }
        }
    )
}

fn transaction_table(transactions: &[Transaction]) -> Markup {
    html!(
        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                }
            }

            tbody
            {
                @for transaction in transactions {
                    (transaction_row(transaction))
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let amount_class = match transaction.kind {
        TransactionKind::Income => "text-green-600 dark:text-green-400",
        TransactionKind::Expense => "text-red-600 dark:text-red-400",
    };
    let signed_amount = match transaction.kind {
        TransactionKind::Income => transaction.amount,
        TransactionKind::Expense => -transaction.amount,
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }

            td class=(TABLE_CELL_STYLE) { (transaction.description) }

            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(category) = &transaction.category {
                    span class=(CATEGORY_BADGE_STYLE) { (category) }
                }
            }

            td class=(format!("{TABLE_CELL_STYLE} {amount_class}"))
            {
                (format_currency(signed_amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                a
                    href=(endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                    class=(LINK_STYLE)
                {
                    "Edit"
                }

                " "

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id))
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    hx-confirm="Delete this transaction?"
                {
                    "Delete"
                }
            }
        }
    )
}

fn pagination_nav(indicators: &[PaginationIndicator], filter: &TransactionFilter) -> Markup {
    let page_url = |page: u64| -> String {
        let query_string = filter.to_query_string(Some(page));
        format!("{}?{query_string}", endpoints::TRANSACTIONS_VIEW)
    };

    let page_link_style = "flex items-center justify-center px-3 h-8 leading-tight \
        text-gray-500 bg-white border border-gray-300 hover:bg-gray-100 \
        hover:text-gray-700 dark:bg-gray-800 dark:border-gray-700 \
        dark:text-gray-400 dark:hover:bg-gray-700 dark:hover:text-white";
    let current_page_style = "flex items-center justify-center px-3 h-8 leading-tight \
        text-blue-600 border border-gray-300 bg-blue-50 hover:bg-blue-100 \
        hover:text-blue-700 dark:bg-gray-700 dark:border-gray-700 dark:text-white";

    html!(
        nav aria-label="Transaction table pages" class="flex justify-center mt-4"
        {
            ul class="inline-flex -space-x-px text-sm"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page)) class=(page_link_style) { "Previous" }
                            }
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class=(page_link_style) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                a
                                    href=(page_url(*page))
                                    aria-current="page"
                                    class=(current_page_style)
                                {
                                    (page)
                                }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class=(page_link_style) { "..." }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page)) class=(page_link_style) { "Next" }
                            }
                        }
                    }
                }
            }
        }
    )
}
