// src/services/ai_gateway.rs
//! Prompt templating and response parsing over a hosted text-generation API.
//!
//! None of the gateway operations fail: a missing API key, an empty input or a
//! broken upstream call all turn into an explanatory placeholder (or a single
//! error record for matching) so the calling endpoint can still answer.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::openai::OpenAIClient;
use crate::common::config::AiConfig;
use crate::jobs::Job;

pub const UNAVAILABLE_MESSAGE: &str = "AI service is unavailable due to configuration error";
pub const EMPTY_DESCRIPTION_SUMMARY: &str = "(No description to summarize.)";
pub const EMPTY_DESCRIPTION_QUESTIONS: &str = "(No job description provided to generate questions.)";
pub const EMPTY_RESUME_MESSAGE: &str = "No resume content provided for matching.";
pub const NO_JOBS_MESSAGE: &str = "No job postings available for matching.";

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Opaque `prompt -> text` call to a generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// A job picked by the model. Ids sent back as numeric strings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobMatch {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MatchRecord {
    Job(JobMatch),
    Error { error: String },
}

impl MatchRecord {
    fn error(message: impl Into<String>) -> Self {
        MatchRecord::Error {
            error: message.into(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Injected façade over the generation backend.
#[derive(Clone)]
pub struct AiGateway {
    generator: Option<Arc<dyn TextGenerator>>,
    language: String,
}

impl AiGateway {
    pub fn new(generator: Arc<dyn TextGenerator>, language: impl Into<String>) -> Self {
        Self {
            generator: Some(generator),
            language: language.into(),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            language: "English".to_string(),
        }
    }

    /// Builds the OpenAI-backed gateway, or an unconfigured one without an API key.
    pub fn from_config(config: &AiConfig) -> Self {
        let Some(api_key) = config.api_key.clone() else {
            warn!("OPENAI_API_KEY not set, AI endpoints will answer with placeholders");
            return Self::unconfigured();
        };

        match OpenAIClient::new(api_key, config) {
            Ok(client) => {
                info!(model = %client.model(), "AI gateway configured");
                Self::new(Arc::new(client), config.response_language.clone())
            }
            Err(e) => {
                warn!(error = %e, "Failed to build AI client, AI endpoints will answer with placeholders");
                Self::unconfigured()
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn summarize(&self, text: &str) -> String {
        let Some(generator) = &self.generator else {
            return format!("({})", UNAVAILABLE_MESSAGE);
        };
        if text.trim().is_empty() {
            return EMPTY_DESCRIPTION_SUMMARY.to_string();
        }

        let prompt = format!(
            "Please summarize the following job description in three concise bullet points, in {}:\n\n---\n{}\n---",
            self.language, text
        );

        match generator.generate(&prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Summary generation failed");
                format!("(Error summarizing text: {})", e)
            }
        }
    }

    pub async fn generate_questions(&self, description: &str) -> Vec<String> {
        let Some(generator) = &self.generator else {
            return vec![format!("({})", UNAVAILABLE_MESSAGE)];
        };
        if description.trim().is_empty() {
            return vec![EMPTY_DESCRIPTION_QUESTIONS.to_string()];
        }

        let prompt = format!(
            "Based on the following job description, generate 5 relevant interview questions, in {}. \
             Return them as a numbered list.\n\n---\n{}\n---",
            self.language, description
        );

        match generator.generate(&prompt).await {
            Ok(text) => split_lines(&text),
            Err(e) => {
                warn!(error = %e, "Interview question generation failed");
                vec![format!("(Error generating interview questions: {})", e)]
            }
        }
    }

    /// Asks the model for the best matching jobs. The model's picks are not
    /// checked against `jobs` here.
    pub async fn match_jobs(&self, resume: &str, jobs: &[Job]) -> Vec<MatchRecord> {
        let Some(generator) = &self.generator else {
            return vec![MatchRecord::error(UNAVAILABLE_MESSAGE)];
        };
        if resume.trim().is_empty() {
            return vec![MatchRecord::error(EMPTY_RESUME_MESSAGE)];
        }
        if jobs.is_empty() {
            return vec![MatchRecord::error(NO_JOBS_MESSAGE)];
        }

        let prompt = match_prompt(resume, jobs);
        debug!(candidates = jobs.len(), "Requesting resume match");

        let text = match generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Resume matching call failed");
                return vec![MatchRecord::error(format!("Error matching jobs: {}", e))];
            }
        };

        match parse_match_response(&text) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Resume matching response was not a JSON array");
                vec![MatchRecord::error(format!("Error matching jobs: invalid response: {}", e))]
            }
        }
    }
}

fn match_prompt(resume: &str, jobs: &[Job]) -> String {
    let jobs_text = jobs
        .iter()
        .map(|job| {
            format!(
                "Job ID: {}\nTitle: {}\nCompany: {}\nDescription: {}\n---",
                job.id,
                job.title,
                job.company.as_deref().unwrap_or("None"),
                job.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Given the following resume and a list of job postings, identify the top 3 job postings that best match the resume.\n\
         Return the result as a JSON array of objects, where each object contains the 'id', 'title', and 'company' of the matched job.\n\
         If fewer than 3 matches are found, return all matches. If no matches, return an empty array.\n\n\
         Resume:\n---\n{}\n---\n\n\
         Job Postings:\n---\n{}\n---\n\n\
         Return only the JSON array, no other text.\n",
        resume, jobs_text
    )
}

/// Non-blank trimmed lines, in order.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes a surrounding Markdown code fence, with or without a language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    match body.split_once('\n') {
        Some((info, content)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            content.trim()
        }
        _ => body.trim(),
    }
}

pub fn parse_match_response(text: &str) -> Result<Vec<MatchRecord>, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}
