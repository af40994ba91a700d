use crate::models::{SolveRequest, SolveResponse, MAX_TIMEOUT_MS};
use axum::http::StatusCode;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Local cap on a solve call. The solver gets `maxTimeout` to work with, plus some slack for
/// the round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(MAX_TIMEOUT_MS + 5_000);

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("request to solver service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response from solver service: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What the solver sent back: its own status code and the extracted page.
#[derive(Debug)]
pub struct Solved {
    pub status: StatusCode,
    pub body: String,
}

pub struct SolverClient {
    http_client: Client,
    solver_url: String,
}

impl SolverClient {
    pub fn new(solver_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            solver_url: solver_url.into(),
        })
    }

    /// Asks the solver to fetch `target_url`. One attempt, no retries.
    pub async fn solve(&self, target_url: &str) -> Result<Solved, SolveError> {
        let solve_request = SolveRequest::get(target_url);
        info!("Sending {} to solver for {}", solve_request.cmd, target_url);

        let resp = self
            .http_client
            .post(&self.solver_url)
            .json(&solve_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach solver service at {}: {}", self.solver_url, e);
                SolveError::from(e)
            })?;

        let status = resp.status();
        let body_bytes = resp.bytes().await?;
        let parsed: SolveResponse = serde_json::from_slice(&body_bytes).map_err(|e| {
            error!("Solver returned an unreadable body (status {}): {}", status, e);
            SolveError::from(e)
        })?;

        info!("Solver answered {} for {}", status, target_url);
        Ok(Solved {
            status,
            body: parsed.into_page(),
        })
    }
}
