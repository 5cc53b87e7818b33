use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    core::{
        aggregates::{Aggregates, CategoryTotal},
        store::{InventoryStore, StoreError},
    },
    insight::{InsightError, InsightGenerator},
    item::{InventoryRecord, ItemDraft},
    types::ItemId,
    view::ViewQuery,
};

use super::events::InventoryEvent;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Insight(#[from] InsightError),
    #[error("an insight request is already in flight")]
    InsightsInFlight,
    #[error("inventory runtime is not running")]
    ChannelClosed,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_queue_bound: usize,
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

pub struct InventoryHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<InventoryEvent>,
}

impl Clone for InventoryHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

type Reply<T> = oneshot::Sender<Result<T, RuntimeError>>;

enum Command {
    Add {
        draft: ItemDraft,
        resp: Reply<InventoryRecord>,
    },
    Edit {
        id: ItemId,
        draft: ItemDraft,
        resp: Reply<InventoryRecord>,
    },
    Delete {
        id: ItemId,
        resp: Reply<InventoryRecord>,
    },
    RecordSale {
        id: ItemId,
        quantity_sold: i64,
        resp: Reply<InventoryRecord>,
    },
    Get {
        id: ItemId,
        resp: oneshot::Sender<Option<InventoryRecord>>,
    },
    Records {
        resp: oneshot::Sender<Vec<InventoryRecord>>,
    },
    Query {
        query: ViewQuery,
        resp: oneshot::Sender<Vec<InventoryRecord>>,
    },
    Aggregates {
        resp: oneshot::Sender<Aggregates>,
    },
    CategoryTotals {
        resp: oneshot::Sender<Vec<CategoryTotal>>,
    },
    ExportCsv {
        resp: oneshot::Sender<String>,
    },
    GenerateInsights {
        resp: Reply<String>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Outcome of a finished insight task, reported back to the loop.
type InsightDone = Result<(), String>;

pub fn spawn_inventory<G: InsightGenerator>(
    store: InventoryStore,
    generator: G,
    config: RuntimeConfig,
) -> InventoryHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound);
    let (events_tx, _) = broadcast::channel::<InventoryEvent>(config.event_capacity);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<InsightDone>();

    let events_tx_loop = events_tx.clone();
    let generator = Arc::new(generator);

    tokio::spawn(async move {
        let mut store = store;
        let mut insight_in_flight = false;
        tracing::info!(records = store.len(), "inventory runtime started");

        loop {
            tokio::select! {
                biased;

                Some(done) = done_rx.recv() => {
                    insight_in_flight = false;
                    let evt = match done {
                        Ok(()) => InventoryEvent::InsightsReady,
                        Err(message) => InventoryEvent::InsightsFailed { message },
                    };
                    let _ = events_tx_loop.send(evt);
                }
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    let done = handle_command(
                        cmd,
                        &mut store,
                        &events_tx_loop,
                        &generator,
                        &done_tx,
                        &mut insight_in_flight,
                    );
                    if done {
                        break;
                    }
                }
            }
        }

        tracing::info!("inventory runtime stopped");
    });

    InventoryHandle { cmd_tx, events_tx }
}

impl InventoryHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<InventoryEvent> {
        self.events_tx.subscribe()
    }

    pub async fn add(&self, draft: ItemDraft) -> Result<InventoryRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Add { draft, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn edit(&self, id: ItemId, draft: ItemDraft) -> Result<InventoryRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Edit { id, draft, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn delete(&self, id: ItemId) -> Result<InventoryRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Delete { id, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn record_sale(
        &self,
        id: ItemId,
        quantity_sold: i64,
    ) -> Result<InventoryRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::RecordSale {
            id,
            quantity_sold,
            resp: tx,
        })
        .await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn get(&self, id: ItemId) -> Result<Option<InventoryRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Get { id, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn records(&self) -> Result<Vec<InventoryRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Records { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn query(&self, query: ViewQuery) -> Result<Vec<InventoryRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Query { query, resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn aggregates(&self) -> Result<Aggregates, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Aggregates { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn category_totals(&self) -> Result<Vec<CategoryTotal>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::CategoryTotals { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn export_csv(&self) -> Result<String, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::ExportCsv { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Summarizes the current records. At most one request runs at a time; a
    /// second call while one is outstanding fails with
    /// [`RuntimeError::InsightsInFlight`] without touching the generator.
    pub async fn generate_insights(&self) -> Result<String, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::GenerateInsights { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Shutdown { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn send(&self, cmd: Command) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command<G: InsightGenerator>(
    cmd: Command,
    store: &mut InventoryStore,
    events_tx: &broadcast::Sender<InventoryEvent>,
    generator: &Arc<G>,
    done_tx: &mpsc::UnboundedSender<InsightDone>,
    insight_in_flight: &mut bool,
) -> bool {
    match cmd {
        Command::Add { draft, resp } => {
            let res = store.add(draft).map_err(RuntimeError::from).and_then(|id| {
                let rec = store.get_cloned(id).ok_or(StoreError::NotFound(id))?;
                let _ = events_tx.send(InventoryEvent::Added { id });
                Ok(rec)
            });
            let _ = resp.send(res);
        }
        Command::Edit { id, draft, resp } => {
            let res = store
                .edit(id, draft)
                .cloned()
                .map_err(RuntimeError::from)
                .inspect(|_| {
                    let _ = events_tx.send(InventoryEvent::Updated { id });
                });
            let _ = resp.send(res);
        }
        Command::Delete { id, resp } => {
            let res = store
                .delete(id)
                .map_err(RuntimeError::from)
                .inspect(|_| {
                    let _ = events_tx.send(InventoryEvent::Deleted { id });
                });
            let _ = resp.send(res);
        }
        Command::RecordSale {
            id,
            quantity_sold,
            resp,
        } => {
            let res = store
                .record_sale(id, quantity_sold)
                .cloned()
                .map_err(RuntimeError::from)
                .inspect(|_| {
                    let _ = events_tx.send(InventoryEvent::SaleRecorded {
                        id,
                        quantity_sold: u32::try_from(quantity_sold).unwrap_or(u32::MAX),
                    });
                });
            let _ = resp.send(res);
        }
        Command::Get { id, resp } => {
            let _ = resp.send(store.get_cloned(id));
        }
        Command::Records { resp } => {
            let _ = resp.send(store.snapshot());
        }
        Command::Query { query, resp } => {
            let _ = resp.send(query.apply(store.records()));
        }
        Command::Aggregates { resp } => {
            let _ = resp.send(store.aggregates());
        }
        Command::CategoryTotals { resp } => {
            let _ = resp.send(store.category_totals());
        }
        Command::ExportCsv { resp } => {
            let _ = resp.send(store.export_csv());
        }
        Command::GenerateInsights { resp } => {
            if *insight_in_flight {
                tracing::debug!("insight request ignored; one is already in flight");
                let _ = resp.send(Err(RuntimeError::InsightsInFlight));
                return false;
            }

            *insight_in_flight = true;
            let snapshot = store.snapshot();
            let _ = events_tx.send(InventoryEvent::InsightsStarted {
                records: snapshot.len(),
            });

            let generator = Arc::clone(generator);
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                let out = generator.summarize(snapshot).await;
                // Completion is queued ahead of the reply so a follow-up request is not rejected.
                let _ = done_tx.send(out.as_ref().map(|_| ()).map_err(|e| e.to_string()));
                let _ = resp.send(out.map_err(RuntimeError::from));
            });
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
