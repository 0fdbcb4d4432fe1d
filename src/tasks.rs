//! Async task management for non-blocking GraphQL operations.
//!
//! Network calls run on tokio tasks while the UI keeps drawing. Results come
//! back to the main loop through an unbounded channel:
//! 1. A table returns a `TableCommand` (or the page reacts to a row action)
//! 2. The owner spawns the work through `TaskSpawner`
//! 3. The task sends one or more `ApiMessage`s tagged with the table's id
//! 4. The main loop drains the channel with `try_recv()` and routes each
//!    message to the table with the matching id, dropping the rest
//!
//! A mutation task always sends its completion before it issues the re-fetch,
//! so the table sees `AddRowCompleted` ahead of the matching `ListFetched`.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{Client, OperationRequest, QueryResponse};
use crate::cache::FetchPolicy;
use crate::ui::components::TableId;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// List query result (mount, retry or post-mutation re-fetch).
    ListFetched {
        table: TableId,
        result: Result<QueryResponse, String>,
    },

    /// Add-row mutation finished.
    AddRowCompleted {
        table: TableId,
        result: Result<(), String>,
    },

    /// Row action mutation finished.
    RowActionCompleted {
        table: TableId,
        result: Result<(), String>,
    },
}

impl ApiMessage {
    /// The table this message belongs to.
    pub fn table(&self) -> TableId {
        match self {
            ApiMessage::ListFetched { table, .. }
            | ApiMessage::AddRowCompleted { table, .. }
            | ApiMessage::RowActionCompleted { table, .. } => *table,
        }
    }
}

/// Spawns background tasks for GraphQL operations.
///
/// Holds the channel sender and the shared client; each method clones what
/// it needs into a tokio task that reports through the channel.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    client: Client,
}

impl TaskSpawner {
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, client: Client) -> Self {
        Self { tx, client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Spawn a task to run a list query.
    pub fn spawn_fetch_list(&self, table: TableId, request: OperationRequest, policy: FetchPolicy) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .query(&request, policy)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::ListFetched { table, result });
        });
    }

    /// Spawn a task to run an add-row mutation followed by a list re-fetch.
    pub fn spawn_add_row(&self, table: TableId, mutation: OperationRequest, refetch: OperationRequest) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = run_mutation(&client, &mutation).await;
            let succeeded = result.is_ok();
            if tx.send(ApiMessage::AddRowCompleted { table, result }).is_err() {
                return;
            }
            if succeeded {
                send_refetch(&tx, &client, table, &refetch).await;
            }
        });
    }

    /// Spawn a task to run a row action mutation followed by a list re-fetch.
    pub fn spawn_row_action(
        &self,
        table: TableId,
        mutation: OperationRequest,
        refetch: OperationRequest,
    ) {
        let tx = self.tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = run_mutation(&client, &mutation).await;
            let succeeded = result.is_ok();
            if tx.send(ApiMessage::RowActionCompleted { table, result }).is_err() {
                return;
            }
            if succeeded {
                send_refetch(&tx, &client, table, &refetch).await;
            }
        });
    }
}

async fn run_mutation(client: &Client, mutation: &OperationRequest) -> Result<(), String> {
    match client.mutate(mutation).await {
        Ok(_) => {
            debug!(operation = mutation.document.operation_name(), "Mutation succeeded");
            Ok(())
        }
        Err(e) => {
            warn!(operation = mutation.document.operation_name(), error = %e, "Mutation failed");
            Err(e.to_string())
        }
    }
}

async fn send_refetch(
    tx: &mpsc::UnboundedSender<ApiMessage>,
    client: &Client,
    table: TableId,
    refetch: &OperationRequest,
) {
    let result = client.refetch(refetch).await.map_err(|e| e.to_string());
    let _ = tx.send(ApiMessage::ListFetched { table, result });
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel(client: Client) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx, client))
}
