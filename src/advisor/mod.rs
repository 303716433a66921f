//! The AI summary of the user's finances: a prompt built from the summary
//! metrics, a Gemini-style `generateContent` client and the endpoint the
//! dashboard widget posts to.

mod client;
mod endpoint;

pub use endpoint::post_advisor_summary;
