use api::{middleware::log_request, routes::routes, state::AppState};
use async_trait::async_trait;
use axum::{Router, middleware::from_fn};
use db::test_utils::setup_test_db;
use marker::error::MarkerError;
use marker::prompt::GradingPrompt;
use marker::traits::grader::Grader;
use std::sync::{Arc, Mutex};

/// Grader that answers every prompt with a canned reply (or a canned failure)
/// and records the prompts it saw.
pub struct StubGrader {
    reply: Option<String>,
    prompts: Mutex<Vec<GradingPrompt>>,
}

impl StubGrader {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<GradingPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Grader for StubGrader {
    async fn grade(&self, prompt: &GradingPrompt) -> Result<String, MarkerError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply
            .clone()
            .ok_or_else(|| MarkerError::Transport("stub grader is offline".into()))
    }
}

pub const DEFAULT_REPLY: &str = "MARKS: 15\nFEEDBACK: Good work, but missing citations.";

/// Router over a fresh in-memory database with a grader replying [`DEFAULT_REPLY`].
pub async fn make_test_app() -> (Router, AppState) {
    make_test_app_with_grader(StubGrader::replying(DEFAULT_REPLY)).await
}

pub async fn make_test_app_with_grader(grader: Arc<StubGrader>) -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db, grader);

    let app = Router::new()
        .nest("/api", routes(app_state.clone()))
        .layer(from_fn(log_request));

    (app, app_state)
}
