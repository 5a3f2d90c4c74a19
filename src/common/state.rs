// Application state shared across all modules

use std::sync::Arc;

use crate::auth::tokens::TokenIssuer;
use crate::services::AiGateway;
use crate::store::{JobRepository, ResumeRepository, UserRepository};

/// Immutable after startup; handlers receive it as `Extension<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobRepository>,
    pub users: Arc<dyn UserRepository>,
    pub resumes: Arc<dyn ResumeRepository>,
    pub ai: AiGateway,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Wires all three repositories to one store.
    pub fn with_store<S>(store: Arc<S>, ai: AiGateway, tokens: TokenIssuer) -> Self
    where
        S: JobRepository + UserRepository + ResumeRepository + 'static,
    {
        Self {
            jobs: store.clone(),
            users: store.clone(),
            resumes: store,
            ai,
            tokens,
        }
    }
}
