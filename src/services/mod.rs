// src/services/mod.rs
//
// Outbound integrations used by the request handlers

pub mod ai_gateway;
pub mod openai;


pub use ai_gateway::{AiError, AiGateway, JobMatch, MatchRecord, TextGenerator};
pub use openai::OpenAIClient;
