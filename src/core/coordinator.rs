use crate::core::aggregate::{self, AggregateState};
use crate::domain::model::{PortfolioDataset, ResourceKind, ResourceSlot, SlotError, SlotUpdate};
use crate::domain::ports::PortfolioApi;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Starts one independent fetch per resource kind and hands back an `Activation`
/// that owns the resulting dataset.
pub struct ResourceFetchCoordinator<A: PortfolioApi + ?Sized> {
    api: Arc<A>,
}

impl<A: PortfolioApi + ?Sized + 'static> ResourceFetchCoordinator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Spawns all five fetches and returns without waiting on any of them.
    ///
    /// Must be called from within a tokio runtime. Every call starts a fresh
    /// dataset, so a failed kind is only fetched again by activating again.
    pub fn activate(&self) -> Activation {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        tracing::info!(
            "🚀 Loading {} portfolio resources",
            ResourceKind::ALL.len()
        );
        for kind in ResourceKind::ALL {
            spawn_fetch(self.api.clone(), kind, tx.clone(), cancel.clone());
        }

        Activation {
            dataset: PortfolioDataset::new(),
            updates: rx,
            cancel,
        }
    }
}

fn spawn_fetch<A: PortfolioApi + ?Sized + 'static>(
    api: Arc<A>,
    kind: ResourceKind,
    tx: mpsc::UnboundedSender<SlotUpdate>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("⏹️ Fetch of {} cancelled", kind);
                return;
            }
            outcome = api.fetch_resource(kind) => outcome,
        };

        // The cause stays in the log; consumers only see the kind that failed
        let slot = match outcome {
            Ok(data) => {
                tracing::debug!("📥 Loaded {} ({} items)", kind, data.len());
                ResourceSlot::Loaded(data)
            }
            Err(e) => {
                tracing::error!("❌ Failed to load {}: {}", kind, e);
                ResourceSlot::Failed(SlotError::new(kind))
            }
        };

        // Results that arrive after cancellation are discarded
        if cancel.is_cancelled() || tx.send(SlotUpdate { kind, slot }).is_err() {
            tracing::debug!("⏹️ Dropping result for {}: consumer is gone", kind);
        }
    });
}

/// Live view of one activation.
///
/// The dataset is only mutated through `next_update`, so slot transitions are
/// applied one at a time in the order they arrive. Dropping the handle cancels
/// fetches that are still in flight.
pub struct Activation {
    dataset: PortfolioDataset,
    updates: mpsc::UnboundedReceiver<SlotUpdate>,
    cancel: CancellationToken,
}

impl Activation {
    pub fn dataset(&self) -> &PortfolioDataset {
        &self.dataset
    }

    pub fn aggregate(&self) -> AggregateState {
        AggregateState::project(&self.dataset)
    }

    pub fn all_settled(&self) -> bool {
        aggregate::all_settled(&self.dataset)
    }

    pub fn has_errors(&self) -> bool {
        aggregate::has_errors(&self.dataset)
    }

    /// Waits for the next slot transition, applies it and returns it.
    ///
    /// Returns `None` once every fetch task has finished or been cancelled.
    pub async fn next_update(&mut self) -> Option<SlotUpdate> {
        while let Some(update) = self.updates.recv().await {
            // Each slot settles exactly once
            if self.dataset.apply(&update) {
                return Some(update);
            }
            tracing::warn!("⚠️ Ignoring repeated settlement for {}", update.kind);
        }
        None
    }

    /// Applies updates until every slot has settled.
    pub async fn settle(&mut self) -> &PortfolioDataset {
        while !self.all_settled() {
            if self.next_update().await.is_none() {
                break;
            }
        }
        &self.dataset
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
