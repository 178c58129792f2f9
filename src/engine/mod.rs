pub mod engine;
pub mod llm_client;
pub mod normalizer;
pub mod prompts;
pub mod protocol;
