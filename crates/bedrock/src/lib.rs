pub mod api;
pub mod client;

pub use api::KnowledgeBaseApi;
pub use client::BedrockAgentClient;
