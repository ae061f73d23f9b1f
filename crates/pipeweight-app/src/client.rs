//! HTTP client for the calculation endpoint
//!
//! `CalculationClient` performs single requests. `RequestSequence` wraps
//! submissions from an interactive form: starting a new submission aborts the
//! one in flight, and results are tagged with a generation number so a late
//! response from a superseded request can never overwrite fresher totals.

use std::future::Future;

use pipeweight_domain::model::PipeSpec;
use pipeweight_types::{CalculationRequest, CalculationResponse, ErrorResponse, PipeEntry};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;

/// Errors from talking to the endpoint
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Endpoint rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Client for `POST /calculate-weight` and the read-only endpoints
#[derive(Debug, Clone)]
pub struct CalculationClient {
    http: reqwest::Client,
    base_url: String,
}

impl CalculationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint_url.clone())
    }

    /// Send entries for aggregation
    pub async fn calculate(
        &self,
        entries: Vec<PipeEntry>,
    ) -> Result<CalculationResponse, ClientError> {
        let url = format!("{}/calculate-weight", self.base_url);
        tracing::debug!(%url, count = entries.len(), "sending calculation request");

        let response = self
            .http
            .post(&url)
            .json(&CalculationRequest::new(entries))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<CalculationResponse>().await?)
        } else {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Fetch the endpoint's spec table
    pub async fn specs(&self) -> Result<Vec<PipeSpec>, ClientError> {
        let url = format!("{}/specs", self.base_url);
        let specs = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PipeSpec>>()
            .await?;
        Ok(specs)
    }
}

/// Latest-wins sequence of asynchronous requests
pub struct RequestSequence<T> {
    runtime: Handle,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T: Send + 'static> RequestSequence<T> {
    pub fn new(runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            generation: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    /// Start a request, cancelling whatever was in flight. Returns its generation.
    pub fn submit<F>(&mut self, request: F) -> u64
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        let tx = self.tx.clone();
        self.in_flight = Some(self.runtime.spawn(async move {
            let output = request.await;
            // Receiver lives as long as the sequence
            let _ = tx.send((generation, output));
        }));
        generation
    }

    /// Abort the in-flight request, if any, and invalidate its result
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Non-blocking poll for the current request's result
    pub fn try_latest(&mut self) -> Option<T> {
        let mut latest = None;
        while let Ok((generation, output)) = self.rx.try_recv() {
            if self.accept(generation) {
                latest = Some(output);
            }
        }
        latest
    }

    /// Wait for the current request's result. `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<T> {
        while self.in_flight.is_some() {
            let (generation, output) = self.rx.recv().await?;
            if self.accept(generation) {
                return Some(output);
            }
        }
        None
    }

    fn accept(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            self.in_flight = None;
            true
        } else {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "dropping superseded response"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_latest_submission_wins() {
        let mut seq = RequestSequence::new(Handle::current());
        seq.submit(async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            "slow"
        });
        seq.submit(async { "fast" });

        assert_eq!(seq.next().await, Some("fast"));
        assert!(!seq.is_pending());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(seq.try_latest(), None);
    }

    #[tokio::test]
    async fn test_completed_but_unread_result_is_discarded() {
        let mut seq = RequestSequence::new(Handle::current());
        seq.submit(async { 1 });
        tokio::time::sleep(Duration::from_millis(50)).await;
        seq.submit(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            2
        });

        assert_eq!(seq.next().await, Some(2));
    }

    #[tokio::test]
    async fn test_cancel_leaves_nothing_pending() {
        let mut seq = RequestSequence::new(Handle::current());
        let first = seq.submit(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            "late"
        });
        seq.cancel();
        assert!(seq.generation() > first);
        assert!(!seq.is_pending());
        assert_eq!(seq.next().await, None);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(seq.try_latest(), None);
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = CalculationClient::new("http://localhost:3001/");
        assert_eq!(client.base_url, "http://localhost:3001");
    }
}
