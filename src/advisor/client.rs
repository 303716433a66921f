//! The client for the generative-AI summary endpoint.
//!
//! The endpoint follows the Gemini `generateContent` shape: the prompt is
//! POSTed as `{"contents": [{"parts": [{"text": ...}]}]}` with the API key as
//! the `key` query parameter, and the summary is read back from
//! `candidates[0].content.parts[0].text`.

use serde::{Deserialize, Serialize};

use crate::{Error, summary::metrics::SummaryMetrics};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: ResponseContent,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Pull the summary text out of a response, if the response carries one.
pub(super) fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content
        .parts
        .into_iter()
        .next()
        .map(|part| part.text)
        .filter(|text| !text.is_empty())
}

/// Build the prompt describing the user's finances.
pub(super) fn build_prompt(
    metrics: &SummaryMetrics,
    largest_expense: Option<&(String, f64)>,
) -> String {
    let mut prompt = format!(
        "You are a financial assistant for a freelancer. Summarize their \
        finances in two or three friendly sentences of plain language. Do not \
        use markdown. Their numbers: total income ${:.2}, total expenses \
        ${:.2}, profit ${:.2} ({:.1}% margin), tax set-aside ${:.2}, \
        recommended savings ${:.2}, safe to spend ${:.2}.",
        metrics.income,
        metrics.expenses,
        metrics.profit,
        metrics.profit_margin(),
        metrics.tax_reserve,
        metrics.recommended_savings,
        metrics.safe_to_spend,
    );

    if let Some((category, total)) = largest_expense {
        prompt.push_str(&format!(
            " Their largest expense category is {category} at ${total:.2}."
        ));
    }

    prompt
}

/// Send the prompt to the summary endpoint and return the generated text.
///
/// There is no retry: a failed request surfaces as a single
/// [Error::AdvisorRequest] and the user can press the button again.
pub(super) async fn request_summary(
    client: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String, Error> {
    let body = GenerateContentRequest::from_prompt(prompt);

    let response = client
        .post(api_url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|error| Error::AdvisorRequest(format!("request failed: {error}")))?
        .error_for_status()
        .map_err(|error| Error::AdvisorRequest(format!("request rejected: {error}")))?;

    let response: GenerateContentResponse = response
        .json()
        .await
        .map_err(|error| Error::AdvisorRequest(format!("could not decode response: {error}")))?;

    extract_text(response)
        .ok_or_else(|| Error::AdvisorRequest("response contained no summary text".to_owned()))
}
