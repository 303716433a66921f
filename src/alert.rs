//! Alert partials swapped into the fixed alert container by htmx.

use maud::{Markup, html};

/// A dismissible alert rendered into `#alert-container`.
pub struct AlertView;

impl AlertView {
    /// An error alert with a bold `title` and a `details` line.
    pub fn error(title: &str, details: &str) -> Markup {
        html!(
            div
                class="flex items-start gap-3 p-4 mb-2 rounded border \
                    border-red-300 bg-red-50 text-red-800 dark:border-red-800 \
                    dark:bg-gray-800 dark:text-red-400"
                role="alert"
            {
                div
                {
                    p class="font-medium" { (title) }
                    p class="text-sm" { (details) }
                }

                button
                    type="button"
                    class="ms-auto text-red-800 dark:text-red-400 cursor-pointer"
                    aria-label="Close"
                    onclick="this.parentElement.remove()"
                {
                    "\u{2715}"
                }
            }
        )
    }
}
