// Resume tailoring: prompt building, the generation gateway, and its HTTP handlers.
// All model calls go through llm_client; nothing here talks to the provider directly.

pub mod builder;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod prompts;
