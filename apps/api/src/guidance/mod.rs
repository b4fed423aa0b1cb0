// Guidance Requester: renders the profile into the fixed prompt and asks the
// hosted model for a markdown report. All model calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod request;
pub mod requester;
