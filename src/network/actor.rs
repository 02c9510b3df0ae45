//! Network actor - runs backend calls in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::gateway::MovieApi;

/// Network actor that executes API calls, one task per call
pub struct NetworkActor {
    api: Arc<dyn MovieApi>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(api: Arc<dyn MovieApi>, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            api,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Call { id, call }) => {
                            let response_tx = self.response_tx.clone();
                            let api = Arc::clone(&self.api);

                            // No cancellation: a superseded call still reports back
                            self.active_requests.spawn(async move {
                                let name = call.name();
                                tracing::info!(id, call = name, "Executing call");
                                let start = Instant::now();
                                let result = call.execute(api.as_ref()).await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                match &result {
                                    Ok(_) => tracing::info!(id, call = name, time_ms, "Call completed"),
                                    Err(e) => tracing::warn!(id, call = name, time_ms, error = %e, "Call failed"),
                                }
                                let _ = response_tx.send(NetworkResponse::Completed { id, result, time_ms });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
