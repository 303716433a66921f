//! The endpoint behind the dashboard's "Summarize my finances" button.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    state::AdvisorConfig,
    summary::metrics::{get_summary_metrics, largest_expense_category},
};

use super::client::{build_prompt, request_summary};

/// Shown when the server was started without an API key.
const MISSING_KEY_MESSAGE: &str =
    "AI summaries are not configured. Set the GEMINI_API_KEY environment \
    variable and restart the server to enable them.";

/// Shown when the request to the summary endpoint fails for any reason.
const FAILURE_MESSAGE: &str = "The summary service is unavailable right now. Try again later.";

/// The state needed to produce an AI summary.
#[derive(Debug, Clone)]
pub struct AdvisorState {
    /// The database connection for reading the metrics the prompt describes.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Where to send the summary request and the key to send with it.
    pub advisor_config: AdvisorConfig,
    /// The HTTP client for the outbound request.
    pub http_client: reqwest::Client,
}

impl FromRef<AppState> for AdvisorState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            advisor_config: state.advisor_config.clone(),
            http_client: state.http_client.clone(),
        }
    }
}

/// A route handler that generates a plain-language summary of the user's
/// finances and returns it as an HTML fragment for the dashboard widget.
pub async fn post_advisor_summary(State(state): State<AdvisorState>) -> Result<Response, Error> {
    let Some(api_key) = state.advisor_config.api_key.as_deref() else {
        return Ok(summary_text_view(MISSING_KEY_MESSAGE).into_response());
    };

    // The lock is scoped so the guard is dropped before the request await.
    let prompt = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let metrics = get_summary_metrics(&connection)
            .inspect_err(|error| tracing::error!("could not compute summary metrics: {error}"))?;
        let largest_expense = largest_expense_category(&connection)
            .inspect_err(|error| tracing::error!("could not get largest expense: {error}"))?;

        build_prompt(&metrics, largest_expense.as_ref())
    };

    let summary = request_summary(
        &state.http_client,
        &state.advisor_config.api_url,
        api_key,
        &prompt,
    )
    .await;

    match summary {
        Ok(text) => Ok(summary_text_view(&text).into_response()),
        Err(error) => {
            tracing::error!("{error}");

            Ok(summary_text_view(FAILURE_MESSAGE).into_response())
        }
    }
}

fn summary_text_view(text: &str) -> Markup {
    html!(
        p { (text) }
    )
}

#[cfg(test)]
mod advisor_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{db::initialize, state::AdvisorConfig};

    use super::{AdvisorState, MISSING_KEY_MESSAGE, post_advisor_summary};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[tokio::test]
    async fn missing_api_key_returns_configuration_message() {
        let state = AdvisorState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
            advisor_config: AdvisorConfig::new(None),
            http_client: reqwest::Client::new(),
        };

        let response = post_advisor_summary(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body);
        assert!(
            text.contains(MISSING_KEY_MESSAGE),
            "expected the configuration message, got: {text}"
        );
    }
}
