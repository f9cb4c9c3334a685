use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::errors::CoreError;
use crate::models::search::SymbolMatch;
use crate::providers::traits::SearchProvider;

struct SearchRequest {
    generation: u64,
    query: String,
}

struct SearchOutcome {
    generation: u64,
    result: Result<Vec<SymbolMatch>, CoreError>,
}

/// Background symbol-search (autocomplete) worker.
///
/// Queries are submitted fire-and-forget and answered by a single
/// worker task; results are picked up later with [`SearchService::poll`].
/// Semantics are last-request-wins: each submission supersedes any
/// older one, queued-but-unstarted queries are dropped by the worker,
/// and a result that arrives for a superseded query is discarded at
/// poll time. There is no explicit cancellation of in-flight work.
pub struct SearchService {
    requests: mpsc::UnboundedSender<SearchRequest>,
    outcomes: mpsc::UnboundedReceiver<SearchOutcome>,
    generation: u64,
}

impl SearchService {
    /// Spawn the worker task. Must be called from within a Tokio
    /// runtime.
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::worker_loop(provider, request_rx, outcome_tx));

        Self {
            requests: request_tx,
            outcomes: outcome_rx,
            generation: 0,
        }
    }

    /// Submit a query, superseding any earlier one still in flight.
    pub fn submit(&mut self, query: impl Into<String>) {
        self.generation += 1;
        // Send failure means the worker is gone (service being torn
        // down); nothing useful to do with the query then.
        let _ = self.requests.send(SearchRequest {
            generation: self.generation,
            query: query.into(),
        });
    }

    /// Collect the result of the most recent submission, if it has
    /// arrived. Results of superseded submissions are discarded.
    pub fn poll(&mut self) -> Option<Result<Vec<SymbolMatch>, CoreError>> {
        let mut latest = None;

        while let Ok(outcome) = self.outcomes.try_recv() {
            if outcome.generation == self.generation {
                latest = Some(outcome.result);
            } else {
                debug!(
                    "discarding stale search result (generation {} < {})",
                    outcome.generation, self.generation
                );
            }
        }

        latest
    }

    async fn worker_loop(
        provider: Arc<dyn SearchProvider>,
        mut requests: mpsc::UnboundedReceiver<SearchRequest>,
        outcomes: mpsc::UnboundedSender<SearchOutcome>,
    ) {
        while let Some(mut request) = requests.recv().await {
            // Collapse the backlog: only the newest pending query is
            // worth running.
            while let Ok(newer) = requests.try_recv() {
                debug!("dropping superseded search '{}'", request.query);
                request = newer;
            }

            let result = provider.search(&request.query).await;

            if outcomes
                .send(SearchOutcome {
                    generation: request.generation,
                    result,
                })
                .is_err()
            {
                // Receiver dropped: the service is gone.
                break;
            }
        }
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("generation", &self.generation)
            .finish()
    }
}
